//! Excel workbook renderer.
//!
//! The workbook keeps the arithmetic live: ability modifiers and save/skill
//! bonuses are spreadsheet formulas pointing at the score and level cells on
//! the `Character` worksheet, so editing a score updates everything that
//! depends on it. Each formula also carries the value the sheet builder
//! computed as its cached result. With formulas disabled, those cells hold
//! the computed numbers instead.

use super::theme::{Rgb, SheetTheme};
use super::{RenderError, SheetFormat, SheetRenderer};
use crate::config::RenderConfig;
use pf2e_core::sheet::ProficiencyLine;
use pf2e_core::CharacterSheet;
use rust_xlsxwriter::utility::row_col_to_cell;
use rust_xlsxwriter::{
    Color, ColNum, Format, FormatAlign, FormatBorder, Formula, RowNum, Workbook, Worksheet,
};

pub const CHARACTER_SHEET: &str = "Character";
pub const SKILLS_SHEET: &str = "Skills & Saves";
pub const FEATS_SHEET: &str = "Feats";
pub const EQUIPMENT_SHEET: &str = "Equipment";
pub const NOTES_SHEET: &str = "Notes";

const FONT: &str = "Arial";

/// Renders a [`CharacterSheet`] as an `.xlsx` workbook.
pub struct SpreadsheetRenderer {
    config: RenderConfig,
    theme: SheetTheme,
}

impl SpreadsheetRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            theme: SheetTheme::default(),
        }
    }
}

impl SheetRenderer for SpreadsheetRenderer {
    fn format(&self) -> SheetFormat {
        SheetFormat::Spreadsheet
    }

    fn render(&self, sheet: &CharacterSheet) -> Result<Vec<u8>, RenderError> {
        let styles = Styles::new(&self.theme);
        let mut workbook = Workbook::new();

        let (character, anchors) = character_worksheet(sheet, self.config.formulas, &styles)?;
        workbook.push_worksheet(character);
        workbook.push_worksheet(skills_worksheet(
            sheet,
            &anchors,
            self.config.formulas,
            &styles,
        )?);
        workbook.push_worksheet(feats_worksheet(sheet, &styles)?);
        workbook.push_worksheet(equipment_worksheet(sheet, &styles)?);
        if sheet.has_notes() {
            workbook.push_worksheet(notes_worksheet(sheet, &styles)?);
        }

        log::debug!(
            "Workbook for {}: {}",
            sheet.name,
            worksheet_names(sheet).join(", ")
        );
        Ok(workbook.save_to_buffer()?)
    }
}

/// Worksheets the workbook for `sheet` will contain, in order.
pub fn worksheet_names(sheet: &CharacterSheet) -> Vec<&'static str> {
    let mut names = vec![CHARACTER_SHEET, SKILLS_SHEET, FEATS_SHEET, EQUIPMENT_SHEET];
    if sheet.has_notes() {
        names.push(NOTES_SHEET);
    }
    names
}

// ============================================================================
// Styles
// ============================================================================

struct Styles {
    title: Format,
    heading: Format,
    label: Format,
    value: Format,
    input: Format,
    score: Format,
    formula: Format,
    emphasis: Format,
    cell: Format,
    centered: Format,
    bold: Format,
    wrapped: Format,
}

impl Styles {
    fn new(theme: &SheetTheme) -> Self {
        let color = |rgb: Rgb| Color::RGB(rgb.hex());
        let base = Format::new().set_font_name(FONT).set_font_size(11);
        let boxed = base.clone().set_border(FormatBorder::Thin);

        Self {
            title: base
                .clone()
                .set_font_size(20)
                .set_bold()
                .set_font_color(color(theme.gold))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            heading: base
                .clone()
                .set_font_size(12)
                .set_bold()
                .set_font_color(color(theme.heading_text))
                .set_background_color(color(theme.dark))
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center),
            label: boxed
                .clone()
                .set_bold()
                .set_background_color(color(theme.light))
                .set_align(FormatAlign::Right),
            value: boxed.clone(),
            input: boxed.clone().set_font_color(color(theme.input_text)),
            score: boxed
                .clone()
                .set_font_size(14)
                .set_bold()
                .set_font_color(color(theme.input_text))
                .set_align(FormatAlign::Center)
                .set_num_format("0"),
            formula: boxed
                .clone()
                .set_font_color(color(theme.text))
                .set_align(FormatAlign::Center)
                .set_num_format("0"),
            emphasis: boxed
                .clone()
                .set_font_size(12)
                .set_bold()
                .set_font_color(color(theme.gold))
                .set_align(FormatAlign::Center),
            cell: boxed.clone(),
            centered: boxed.set_align(FormatAlign::Center),
            bold: base.clone().set_bold(),
            wrapped: base
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_background_color(color(theme.very_light)),
        }
    }
}

// ============================================================================
// Worksheets
// ============================================================================

/// Cells on the `Character` worksheet that other worksheets refer to.
struct Anchors {
    level: String,
    /// Modifier cell per ability, in `Ability::all()` order.
    modifiers: Vec<String>,
}

impl Anchors {
    fn modifier(&self, sheet: &CharacterSheet, line: &ProficiencyLine) -> &str {
        sheet
            .abilities
            .iter()
            .position(|a| a.ability == line.ability)
            .and_then(|i| self.modifiers.get(i))
            .map(String::as_str)
            .unwrap_or("A1")
    }
}

fn character_worksheet(
    sheet: &CharacterSheet,
    formulas: bool,
    styles: &Styles,
) -> Result<(Worksheet, Anchors), RenderError> {
    let mut ws = Worksheet::new();
    ws.set_name(CHARACTER_SHEET)?;

    ws.merge_range(0, 0, 0, 5, &sheet.name, &styles.title)?;
    ws.set_row_height(0, 30)?;

    // Identity
    let mut row: RowNum = 2;
    ws.merge_range(row, 0, row, 1, "CHARACTER IDENTITY", &styles.heading)?;
    row += 1;

    let level_row = row;
    for (label, value) in sheet.identity.rows() {
        ws.write_string_with_format(row, 0, label, &styles.label)?;
        if label == "Level" {
            ws.write_number_with_format(row, 1, sheet.identity.level as f64, &styles.input)?;
        } else {
            ws.write_string_with_format(row, 1, &value, &styles.value)?;
        }
        row += 1;
    }
    row += 1;

    // Abilities: header, scores, modifiers
    let last_col = (sheet.abilities.len() as ColNum).saturating_sub(1);
    ws.merge_range(row, 0, row, last_col, "ABILITY SCORES", &styles.heading)?;
    row += 1;

    let score_row = row + 1;
    let modifier_row = row + 2;
    let mut modifiers = Vec::with_capacity(sheet.abilities.len());
    for (i, line) in sheet.abilities.iter().enumerate() {
        let col = i as ColNum;
        ws.write_string_with_format(row, col, line.ability.abbreviation(), &styles.heading)?;
        ws.write_number_with_format(score_row, col, line.score as f64, &styles.score)?;

        if formulas {
            let score = row_col_to_cell(score_row, col);
            let modifier = Formula::new(format!("=INT(({score}-10)/2)"))
                .set_result(line.modifier.to_string());
            ws.write_formula_with_format(modifier_row, col, modifier, &styles.formula)?;
        } else {
            ws.write_number_with_format(modifier_row, col, line.modifier as f64, &styles.formula)?;
        }
        modifiers.push(row_col_to_cell(modifier_row, col));
    }
    row = modifier_row + 2;

    // Core statistics
    ws.merge_range(row, 0, row, 1, "CORE STATISTICS", &styles.heading)?;
    row += 1;

    let core = &sheet.core;
    let stats = [
        ("Hit Points", core.hit_points.display()),
        ("Armor Class", core.armor_class.to_string()),
        ("Class DC", core.class_dc.to_string()),
        ("Perception", core.perception.display()),
        ("Speed", core.speed_summary()),
    ];
    for (label, value) in stats {
        ws.write_string_with_format(row, 0, label, &styles.label)?;
        ws.write_string_with_format(row, 1, &value, &styles.emphasis)?;
        row += 1;
    }

    ws.set_column_width(0, 18)?;
    ws.set_column_width(1, 20)?;

    let anchors = Anchors {
        level: row_col_to_cell(level_row, 1),
        modifiers,
    };
    Ok((ws, anchors))
}

fn skills_worksheet(
    sheet: &CharacterSheet,
    anchors: &Anchors,
    formulas: bool,
    styles: &Styles,
) -> Result<Worksheet, RenderError> {
    let mut ws = Worksheet::new();
    ws.set_name(SKILLS_SHEET)?;

    let mut row: RowNum = 0;
    row = proficiency_table(
        &mut ws,
        row,
        ("SAVING THROWS", "Save"),
        &sheet.saves,
        sheet,
        anchors,
        formulas,
        styles,
    )?;
    row += 1;
    proficiency_table(
        &mut ws,
        row,
        ("SKILLS", "Skill"),
        &sheet.skills,
        sheet,
        anchors,
        formulas,
        styles,
    )?;

    ws.set_column_width(0, 18)?;
    ws.set_column_width(1, 10)?;
    ws.set_column_width(2, 15)?;
    ws.set_column_width(3, 12)?;
    Ok(ws)
}

/// Writes a titled Name/Ability/Rank/Modifier table and returns the next free row.
#[allow(clippy::too_many_arguments)]
fn proficiency_table(
    ws: &mut Worksheet,
    mut row: RowNum,
    (title, name_header): (&str, &str),
    lines: &[ProficiencyLine],
    sheet: &CharacterSheet,
    anchors: &Anchors,
    formulas: bool,
    styles: &Styles,
) -> Result<RowNum, RenderError> {
    ws.merge_range(row, 0, row, 3, title, &styles.heading)?;
    row += 1;
    header_row(ws, row, &[name_header, "Ability", "Rank", "Modifier"], styles)?;
    row += 1;

    for line in lines {
        ws.write_string_with_format(row, 0, &line.name, &styles.cell)?;
        ws.write_string_with_format(row, 1, line.ability.abbreviation(), &styles.cell)?;
        ws.write_string_with_format(row, 2, &line.rank_label, &styles.cell)?;
        if formulas {
            let formula = Formula::new(format!(
                "=Character!{} + (Character!{} + {})",
                anchors.modifier(sheet, line),
                anchors.level,
                line.rank_bonus
            ))
            .set_result(line.bonus.to_string());
            ws.write_formula_with_format(row, 3, formula, &styles.formula)?;
        } else {
            ws.write_number_with_format(row, 3, line.bonus as f64, &styles.formula)?;
        }
        row += 1;
    }
    Ok(row)
}

fn feats_worksheet(sheet: &CharacterSheet, styles: &Styles) -> Result<Worksheet, RenderError> {
    let mut ws = Worksheet::new();
    ws.set_name(FEATS_SHEET)?;

    ws.merge_range(0, 0, 0, 2, "FEATS & FEATURES", &styles.heading)?;
    header_row(&mut ws, 1, &["Feat Name", "Level", "Source"], styles)?;

    let mut row: RowNum = 2;
    for feat in &sheet.feats {
        ws.write_string_with_format(row, 0, &feat.name, &styles.cell)?;
        ws.write_number_with_format(row, 1, feat.level as f64, &styles.centered)?;
        ws.write_string_with_format(row, 2, &feat.source, &styles.cell)?;
        row += 1;
    }

    ws.set_column_width(0, 30)?;
    ws.set_column_width(1, 8)?;
    ws.set_column_width(2, 15)?;
    Ok(ws)
}

fn equipment_worksheet(sheet: &CharacterSheet, styles: &Styles) -> Result<Worksheet, RenderError> {
    let mut ws = Worksheet::new();
    ws.set_name(EQUIPMENT_SHEET)?;

    ws.merge_range(0, 0, 0, 3, "EQUIPMENT & INVENTORY", &styles.heading)?;
    header_row(&mut ws, 1, &["Item", "Qty", "Bulk", "Notes"], styles)?;

    let mut row: RowNum = 2;
    for item in &sheet.equipment {
        ws.write_string_with_format(row, 0, &item.name, &styles.cell)?;
        ws.write_number_with_format(row, 1, item.quantity as f64, &styles.centered)?;
        ws.write_string_with_format(row, 2, &item.bulk, &styles.centered)?;
        ws.write_string_with_format(row, 3, &item.notes, &styles.cell)?;
        row += 1;
    }

    ws.set_column_width(0, 25)?;
    ws.set_column_width(3, 30)?;
    Ok(ws)
}

fn notes_worksheet(sheet: &CharacterSheet, styles: &Styles) -> Result<Worksheet, RenderError> {
    let mut ws = Worksheet::new();
    ws.set_name(NOTES_SHEET)?;

    ws.merge_range(0, 0, 0, 3, "CHARACTER DETAILS", &styles.heading)?;

    let mut row: RowNum = 2;
    for note in &sheet.notes {
        ws.write_string_with_format(row, 0, note.kind.short_title(), &styles.bold)?;
        row += 1;
        ws.merge_range(row, 0, row, 3, &note.body, &styles.wrapped)?;
        ws.set_row_height(row, 60)?;
        row += 2;
    }

    ws.set_column_width(0, 25)?;
    ws.set_column_width(1, 25)?;
    ws.set_column_width(2, 25)?;
    ws.set_column_width(3, 25)?;
    Ok(ws)
}

fn header_row(
    ws: &mut Worksheet,
    row: RowNum,
    headers: &[&str],
    styles: &Styles,
) -> Result<(), RenderError> {
    for (col, header) in headers.iter().enumerate() {
        ws.write_string_with_format(row, col as ColNum, *header, &styles.heading)?;
    }
    Ok(())
}
