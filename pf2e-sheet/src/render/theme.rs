//! Colors shared by the spreadsheet and PDF sheets.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn hex(&self) -> u32 {
        self.0
    }

    /// Components scaled to 0.0..=1.0, for PDF color operators.
    pub fn components(&self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xFF;
        let g = (self.0 >> 8) & 0xFF;
        let b = self.0 & 0xFF;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// Sheet color theme
#[derive(Debug, Clone)]
pub struct SheetTheme {
    // Accents
    pub gold: Rgb,
    pub dark: Rgb,

    // Cell backgrounds
    pub light: Rgb,
    pub very_light: Rgb,

    // Text
    pub text: Rgb,
    pub heading_text: Rgb,
    pub input_text: Rgb,

    pub grid: Rgb,
}

impl Default for SheetTheme {
    fn default() -> Self {
        Self {
            gold: Rgb(0xDAA520),
            dark: Rgb(0x2D2D2D),

            light: Rgb(0xF0F0F0),
            very_light: Rgb(0xFAFAFA),

            text: Rgb(0x000000),
            heading_text: Rgb(0xFFFFFF),
            input_text: Rgb(0x0000FF),

            grid: Rgb(0x808080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        assert_eq!(Rgb(0xFFFFFF).components(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb(0x000000).components(), [0.0, 0.0, 0.0]);
        let [r, g, b] = Rgb(0xFF8000).components();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(b, 0.0);
    }
}
