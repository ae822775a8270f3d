//! Flowing page layout for the PDF sheet.
//!
//! Blocks (titles, headings, tables, paragraphs) are stacked top to bottom.
//! When a block does not fit in the space left on the page, a new page is
//! started. Output is one lopdf [`Content`] per page.

use super::theme::{Rgb, SheetTheme};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Body text size in points.
pub const BODY_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 24.0;
const LEADING: f32 = 1.25;
const CELL_PADDING: f32 = 4.0;
const BLOCK_GAP: f32 = 12.0;

/// The three standard fonts the sheet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    pub fn all() -> [FontStyle; 3] {
        [FontStyle::Regular, FontStyle::Bold, FontStyle::Oblique]
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Oblique => "F3",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Oblique => "Helvetica-Oblique",
        }
    }
}

// ============================================================================
// Text metrics
// ============================================================================

/// Helvetica advance widths for printable ASCII, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Approximate width of `text` in points.
///
/// Bold is estimated from the regular metrics; this only drives wrapping and
/// page breaks, so a few percent of error is harmless.
pub fn text_width(text: &str, style: FontStyle, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..127).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 32) as usize])
            } else {
                556
            }
        })
        .sum();
    let scale = if style == FontStyle::Bold { 1.06 } else { 1.0 };
    units as f32 * size / 1000.0 * scale
}

/// Greedy word wrap to `max_width` points. Explicit newlines start new lines
/// and words wider than a line are split.
pub fn wrap_text(text: &str, style: FontStyle, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if text_width(&candidate, style, size) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            // Split words that cannot fit on a line of their own.
            for c in word.chars() {
                let mut extended = line.clone();
                extended.push(c);
                if !line.is_empty() && text_width(&extended, style, size) > max_width {
                    lines.push(std::mem::take(&mut line));
                    line.push(c);
                } else {
                    line = extended;
                }
            }
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encode for a WinAnsiEncoding font. Characters outside the code page
/// become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2014}' => 0x97,
            '\u{2013}' => 0x96,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2026}' => 0x85,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

/// A table column: header text and share of the content width.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub weight: f32,
}

impl Column {
    pub const fn new(header: &'static str, weight: f32) -> Self {
        Self { header, weight }
    }
}

/// Fonts and shading of a body row. `fonts[0]` is for the first cell.
#[derive(Clone, Copy)]
struct RowStyle {
    fonts: [FontStyle; 2],
    first_fill: Option<Rgb>,
    fill: Option<Rgb>,
}

impl RowStyle {
    fn font(&self, cell: usize) -> FontStyle {
        if cell == 0 {
            self.fonts[0]
        } else {
            self.fonts[1]
        }
    }

    fn fill_for(&self, cell: usize) -> Option<Rgb> {
        if cell == 0 {
            self.first_fill.or(self.fill)
        } else {
            self.fill
        }
    }
}

/// Stacks blocks onto pages.
pub struct FlowLayout {
    width: f32,
    height: f32,
    margin: f32,
    theme: SheetTheme,
    pages: Vec<Content>,
    current: Vec<Operation>,
    /// Distance from the top edge of the page to the next free line.
    cursor: f32,
}

impl FlowLayout {
    pub fn new((width, height): (f32, f32), margin: f32, theme: SheetTheme) -> Self {
        Self {
            width,
            height,
            margin,
            theme,
            pages: Vec::new(),
            current: Vec::new(),
            cursor: margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Pages completed so far, including the one in progress.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    /// Close the current page and start a fresh one.
    pub fn page_break(&mut self) {
        let operations = std::mem::take(&mut self.current);
        self.pages.push(Content { operations });
        self.cursor = self.margin;
    }

    /// All pages, in order.
    pub fn finish(mut self) -> Vec<Content> {
        let operations = std::mem::take(&mut self.current);
        self.pages.push(Content { operations });
        self.pages
    }

    fn remaining(&self) -> f32 {
        self.height - self.margin - self.cursor
    }

    fn at_page_top(&self) -> bool {
        self.cursor <= self.margin
    }

    /// Start a new page unless `needed` points still fit.
    fn ensure_space(&mut self, needed: f32) {
        if needed > self.remaining() && !self.at_page_top() {
            self.page_break();
        }
    }

    /// Large centered title.
    pub fn title(&mut self, text: &str) {
        let line_height = TITLE_SIZE * LEADING;
        self.ensure_space(line_height);
        let x = self.margin + (self.content_width() - text_width(text, FontStyle::Bold, TITLE_SIZE)) / 2.0;
        let baseline = self.cursor + TITLE_SIZE;
        self.text(text, FontStyle::Bold, TITLE_SIZE, self.theme.gold, x.max(self.margin), baseline);
        self.cursor += line_height + BLOCK_GAP;
    }

    /// Section heading on a dark band. Kept with at least one line of what follows.
    pub fn heading(&mut self, text: &str) {
        let band = HEADING_SIZE + 2.0 * CELL_PADDING;
        self.ensure_space(band + BODY_SIZE * LEADING + 2.0 * CELL_PADDING);
        self.fill_rect(self.margin, self.cursor, self.content_width(), band, self.theme.dark);
        let baseline = self.cursor + CELL_PADDING + HEADING_SIZE * 0.8;
        self.text(
            text,
            FontStyle::Bold,
            HEADING_SIZE,
            self.theme.heading_text,
            self.margin + CELL_PADDING,
            baseline,
        );
        self.cursor += band + CELL_PADDING;
    }

    /// Wrapped paragraph across the content width.
    pub fn paragraph(&mut self, text: &str, style: FontStyle) {
        let line_height = BODY_SIZE * LEADING;
        for line in wrap_text(text, style, BODY_SIZE, self.content_width()) {
            self.ensure_space(line_height);
            let baseline = self.cursor + BODY_SIZE;
            self.text(&line, style, BODY_SIZE, self.theme.text, self.margin, baseline);
            self.cursor += line_height;
        }
        self.cursor += BLOCK_GAP / 2.0;
    }

    /// Two-column table with shaded labels on the left.
    pub fn key_value_table(&mut self, rows: &[(&str, String)]) {
        let width = self.content_width();
        let widths = [width * 0.35, width * 0.65];
        for (label, value) in rows {
            let cells = [label.to_string(), value.clone()];
            let style = RowStyle {
                fonts: [FontStyle::Bold, FontStyle::Regular],
                first_fill: Some(self.theme.light),
                fill: None,
            };
            self.row(&cells, &widths, style, None);
        }
        self.cursor += BLOCK_GAP;
    }

    /// Table with a dark header row. The header repeats after a page break.
    pub fn table(&mut self, columns: &[Column], rows: &[Vec<String>]) {
        let total: f32 = columns.iter().map(|c| c.weight).sum::<f32>().max(f32::EPSILON);
        let widths: Vec<f32> = columns
            .iter()
            .map(|c| self.content_width() * c.weight / total)
            .collect();
        let headers: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();

        self.ensure_space(2.0 * (BODY_SIZE * LEADING + 2.0 * CELL_PADDING));
        self.header_row(&headers, &widths);

        for (i, cells) in rows.iter().enumerate() {
            let style = RowStyle {
                fonts: [FontStyle::Regular; 2],
                first_fill: None,
                fill: (i % 2 == 1).then_some(self.theme.very_light),
            };
            self.row(cells, &widths, style, Some(headers.as_slice()));
        }
        self.cursor += BLOCK_GAP;
    }

    fn header_row(&mut self, headers: &[String], widths: &[f32]) {
        let height = row_height(headers, widths, FontStyle::Bold);
        let mut x = self.margin;
        for (header, width) in headers.iter().zip(widths) {
            self.fill_rect(x, self.cursor, *width, height, self.theme.dark);
            let lines = wrap_text(header, FontStyle::Bold, BODY_SIZE, width - 2.0 * CELL_PADDING);
            self.cell_lines(&lines, FontStyle::Bold, self.theme.heading_text, x);
            x += width;
        }
        self.cursor += height;
    }

    /// One table row, moved whole to the next page when it fits there. A row
    /// taller than a page is split between lines, and `headers` (if any) are
    /// drawn again above each continuation.
    fn row(
        &mut self,
        cells: &[String],
        widths: &[f32],
        style: RowStyle,
        headers: Option<&[String]>,
    ) {
        let line_height = BODY_SIZE * LEADING;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                wrap_text(cell, style.font(i), BODY_SIZE, width - 2.0 * CELL_PADDING)
            })
            .collect();
        let total_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        let full_height = total_lines as f32 * line_height + 2.0 * CELL_PADDING;
        let fits_fresh_page = full_height <= self.height - 2.0 * self.margin;
        if full_height > self.remaining() && fits_fresh_page && !self.at_page_top() {
            self.continue_table(headers, widths);
        }

        let mut first_line = 0;
        while first_line < total_lines {
            let mut room = self.line_room(line_height);
            if room < 1.0 && !self.at_page_top() {
                self.continue_table(headers, widths);
                room = self.line_room(line_height);
            }
            let take = (room.max(1.0) as usize).min(total_lines - first_line);
            let height = take as f32 * line_height + 2.0 * CELL_PADDING;

            let mut x = self.margin;
            for (i, (lines, width)) in wrapped.iter().zip(widths).enumerate() {
                if let Some(fill) = style.fill_for(i) {
                    self.fill_rect(x, self.cursor, *width, height, fill);
                }
                self.stroke_rect(x, self.cursor, *width, height);
                let end = lines.len().min(first_line + take);
                let segment = lines.get(first_line..end).unwrap_or(&[]);
                self.cell_lines(segment, style.font(i), self.theme.text, x);
                x += width;
            }
            self.cursor += height;

            first_line += take;
            if first_line < total_lines {
                self.continue_table(headers, widths);
            }
        }
    }

    fn line_room(&self, line_height: f32) -> f32 {
        ((self.remaining() - 2.0 * CELL_PADDING) / line_height).floor()
    }

    fn continue_table(&mut self, headers: Option<&[String]>, widths: &[f32]) {
        self.page_break();
        if let Some(headers) = headers {
            self.header_row(headers, widths);
        }
    }

    fn cell_lines(&mut self, lines: &[String], style: FontStyle, color: Rgb, x: f32) {
        let mut baseline = self.cursor + CELL_PADDING + BODY_SIZE * 0.8;
        for line in lines {
            self.text(line, style, BODY_SIZE, color, x + CELL_PADDING, baseline);
            baseline += BODY_SIZE * LEADING;
        }
    }

    // ------------------------------------------------------------------------
    // Drawing primitives. `top` is measured from the top edge of the page.
    // ------------------------------------------------------------------------

    fn text(&mut self, text: &str, style: FontStyle, size: f32, color: Rgb, x: f32, baseline: f32) {
        if text.is_empty() {
            return;
        }
        let [r, g, b] = color.components();
        let y = self.height - baseline;
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![style.resource_name().into(), size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, color: Rgb) {
        let [r, g, b] = color.components();
        let y = self.height - top - height;
        self.current.extend([
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32) {
        let [r, g, b] = self.theme.grid.components();
        let y = self.height - top - height;
        self.current.extend([
            Operation::new("w", vec![0.5f32.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("S", vec![]),
        ]);
    }
}

fn row_height(cells: &[String], widths: &[f32], style: FontStyle) -> f32 {
    let lines = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| wrap_text(cell, style, BODY_SIZE, width - 2.0 * CELL_PADDING).len())
        .max()
        .unwrap_or(1);
    lines as f32 * BODY_SIZE * LEADING + 2.0 * CELL_PADDING
}
