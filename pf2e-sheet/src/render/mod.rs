//! Sheet renderers.
//!
//! Each renderer turns a [`CharacterSheet`] into the bytes of one file. The
//! artifact is built completely in memory; writing it is the caller's job.

pub mod document;
pub mod pdf_layout;
pub mod spreadsheet;
pub mod theme;

use crate::config::RenderConfig;
use pf2e_core::CharacterSheet;
use std::fmt;
use thiserror::Error;

pub use document::DocumentRenderer;
pub use spreadsheet::SpreadsheetRenderer;
pub use theme::SheetTheme;

/// Errors from producing a sheet.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Document(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format of a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Spreadsheet,
    Document,
}

impl SheetFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SheetFormat::Spreadsheet => "Excel",
            SheetFormat::Document => "PDF",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Something that can draw a character sheet.
pub trait SheetRenderer {
    fn format(&self) -> SheetFormat;

    /// Produce the complete file contents.
    fn render(&self, sheet: &CharacterSheet) -> Result<Vec<u8>, RenderError>;
}

/// The renderer for `format`, configured from `config`.
pub fn renderer_for(format: SheetFormat, config: &RenderConfig) -> Box<dyn SheetRenderer> {
    match format {
        SheetFormat::Spreadsheet => Box::new(SpreadsheetRenderer::new(config.clone())),
        SheetFormat::Document => Box::new(DocumentRenderer::new(config.clone())),
    }
}
