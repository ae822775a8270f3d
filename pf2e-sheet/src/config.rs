//! Render configuration.
//!
//! Defaults come from the environment (a `.env` file is honored by the
//! binaries) and command-line flags override them.

use clap::ValueEnum;

/// Environment variable selecting the PDF page size (`letter` or `a4`).
pub const PAGE_SIZE_ENV: &str = "PF2E_SHEET_PAGE_SIZE";

/// Environment variable that, when truthy, disables spreadsheet formulas.
pub const STATIC_VALUES_ENV: &str = "PF2E_SHEET_STATIC_VALUES";

/// PDF page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "letter" => Some(PageSize::Letter),
            "a4" => Some(PageSize::A4),
            _ => None,
        }
    }
}

/// Options shared by the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Page size for the PDF sheet.
    pub page_size: PageSize,

    /// Page margin in points.
    pub margin: f32,

    /// Write live spreadsheet formulas instead of fixed numbers.
    pub formulas: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margin: 54.0,
            formulas: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `PF2E_SHEET_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(PAGE_SIZE_ENV) {
            match PageSize::parse(&value) {
                Some(size) => config.page_size = size,
                None => log::warn!("Ignoring {PAGE_SIZE_ENV}={value:?}: expected letter or a4"),
            }
        }

        if let Some(value) = lookup(STATIC_VALUES_ENV) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.formulas = false,
                "0" | "false" | "no" | "" => config.formulas = true,
                _ => log::warn!("Ignoring {STATIC_VALUES_ENV}={value:?}: expected true or false"),
            }
        }

        config
    }

    /// Set the PDF page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page margin in points.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Choose between live formulas and fixed values in the spreadsheet.
    pub fn with_formulas(mut self, formulas: bool) -> Self {
        self.formulas = formulas;
        self
    }
}
