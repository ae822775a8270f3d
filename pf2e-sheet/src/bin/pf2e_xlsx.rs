//! Render a character export as an Excel workbook.
//!
//! ```bash
//! pf2e-xlsx character.json character.xlsx
//! pf2e-xlsx --static-values character.json character.xlsx
//! ```

use pf2e_sheet::cli::{self, XlsxArgs};
use pf2e_sheet::{RenderConfig, SheetFormat};

fn main() {
    cli::init();
    let args: XlsxArgs = cli::parse_or_exit();
    let config = args.config(RenderConfig::from_env());
    cli::run_or_exit(&args.input, &args.output, SheetFormat::Spreadsheet, &config);
}
