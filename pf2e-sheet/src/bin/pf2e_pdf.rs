//! Render a character export as a printable PDF sheet.
//!
//! ```bash
//! pf2e-pdf character.json character.pdf
//! pf2e-pdf --page-size a4 character.json character.pdf
//! ```

use pf2e_sheet::cli::{self, PdfArgs};
use pf2e_sheet::{RenderConfig, SheetFormat};

fn main() {
    cli::init();
    let args: PdfArgs = cli::parse_or_exit();
    let config = args.config(RenderConfig::from_env());
    cli::run_or_exit(&args.input, &args.output, SheetFormat::Document, &config);
}
