//! Spreadsheet and PDF front ends for Pathfinder 2e character sheets.
//!
//! Both formats render the same [`pf2e_core::CharacterSheet`], so the numbers
//! on the workbook and the PDF always agree.
//!
//! ```no_run
//! use pf2e_sheet::{renderer_for, RenderConfig, SheetFormat};
//! use pf2e_core::{load_record, CharacterSheet};
//!
//! let record = load_record("character.json").unwrap();
//! let sheet = CharacterSheet::from_record(&record);
//! let pdf = renderer_for(SheetFormat::Document, &RenderConfig::default())
//!     .render(&sheet)
//!     .unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod render;

pub use config::{PageSize, RenderConfig};
pub use render::{
    renderer_for, DocumentRenderer, RenderError, SheetFormat, SheetRenderer, SheetTheme,
    SpreadsheetRenderer,
};
