//! Shared command-line plumbing for the `pf2e-xlsx` and `pf2e-pdf` binaries.

use crate::config::{PageSize, RenderConfig};
use crate::render::{renderer_for, RenderError, SheetFormat};
use clap::error::ErrorKind;
use clap::Parser;
use pf2e_core::{load_record, write_artifact, CharacterSheet, PersistError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that end a run with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Arguments for `pf2e-xlsx`.
#[derive(Parser, Debug)]
#[command(name = "pf2e-xlsx", version, about = "Render a Pathfinder 2e character export as an Excel workbook")]
pub struct XlsxArgs {
    /// Character JSON export
    pub input: PathBuf,

    /// Workbook to write
    pub output: PathBuf,

    /// Write computed numbers instead of live formulas
    #[arg(long, default_value_t = false)]
    pub static_values: bool,
}

impl XlsxArgs {
    pub fn config(&self, base: RenderConfig) -> RenderConfig {
        if self.static_values {
            base.with_formulas(false)
        } else {
            base
        }
    }
}

/// Arguments for `pf2e-pdf`.
#[derive(Parser, Debug)]
#[command(name = "pf2e-pdf", version, about = "Render a Pathfinder 2e character export as a PDF sheet")]
pub struct PdfArgs {
    /// Character JSON export
    pub input: PathBuf,

    /// PDF to write
    pub output: PathBuf,

    /// Page size (defaults to PF2E_SHEET_PAGE_SIZE, then letter)
    #[arg(long, value_enum)]
    pub page_size: Option<PageSize>,
}

impl PdfArgs {
    pub fn config(&self, base: RenderConfig) -> RenderConfig {
        match self.page_size {
            Some(size) => base.with_page_size(size),
            None => base,
        }
    }
}

/// Load `.env` and start logging. Defaults to warnings only; `RUST_LOG` overrides.
pub fn init() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Parse arguments. Help and version exit 0; anything else unparseable
/// prints the usage and exits 1.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

/// Load, build, render and write one sheet.
pub fn generate(
    input: &Path,
    output: &Path,
    format: SheetFormat,
    config: &RenderConfig,
) -> Result<(), CliError> {
    let record = load_record(input)?;
    let sheet = CharacterSheet::from_record(&record);

    let renderer = renderer_for(format, config);
    let bytes = renderer.render(&sheet)?;
    log::info!("Rendered {} sheet for {} ({} bytes)", format, sheet.name, bytes.len());

    write_artifact(output, &bytes)?;
    Ok(())
}

/// Run [`generate`] and report the outcome. Exits 1 on failure.
pub fn run_or_exit(input: &Path, output: &Path, format: SheetFormat, config: &RenderConfig) {
    match generate(input, output, format, config) {
        Ok(()) => println!("{} character sheet created: {}", format, output.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
