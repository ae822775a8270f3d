//! PDF character sheet renderer.

use super::pdf_layout::{Column, FlowLayout, FontStyle};
use super::theme::SheetTheme;
use super::{RenderError, SheetFormat, SheetRenderer};
use crate::config::RenderConfig;
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use pf2e_core::sheet::ProficiencyLine;
use pf2e_core::CharacterSheet;

/// Renders a [`CharacterSheet`] as a multi-page PDF.
pub struct DocumentRenderer {
    config: RenderConfig,
    theme: SheetTheme,
}

impl DocumentRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            theme: SheetTheme::default(),
        }
    }

    /// Lay the sheet out into page contents.
    pub fn layout(&self, sheet: &CharacterSheet) -> Vec<Content> {
        let mut flow = FlowLayout::new(
            self.config.page_size.dimensions(),
            self.config.margin,
            self.theme.clone(),
        );

        overview_page(&mut flow, sheet);
        flow.page_break();
        proficiencies_page(&mut flow, sheet);
        flow.page_break();
        feats_and_equipment_page(&mut flow, sheet);
        flow.page_break();
        combat_page(&mut flow, sheet);
        if sheet.has_notes() {
            flow.page_break();
            details_page(&mut flow, sheet);
        }

        flow.finish()
    }
}

impl SheetRenderer for DocumentRenderer {
    fn format(&self) -> SheetFormat {
        SheetFormat::Document
    }

    fn render(&self, sheet: &CharacterSheet) -> Result<Vec<u8>, RenderError> {
        let pages = self.layout(sheet);
        log::debug!("Laid out {} PDF pages for {}", pages.len(), sheet.name);

        let mut doc = assemble(&sheet.name, pages, self.config.page_size.dimensions())?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

// ============================================================================
// Pages
// ============================================================================

fn overview_page(flow: &mut FlowLayout, sheet: &CharacterSheet) {
    flow.title(&sheet.name);

    flow.heading("CHARACTER IDENTITY");
    flow.key_value_table(&sheet.identity.rows());

    flow.heading("ABILITY SCORES");
    let columns = [
        Column::new("Ability", 2.0),
        Column::new("Score", 1.0),
        Column::new("Modifier", 1.0),
    ];
    let rows: Vec<Vec<String>> = sheet
        .abilities
        .iter()
        .map(|line| {
            vec![
                line.ability.name().to_string(),
                line.score.to_string(),
                line.modifier_label(),
            ]
        })
        .collect();
    flow.table(&columns, &rows);

    flow.heading("CORE STATISTICS");
    let core = &sheet.core;
    flow.key_value_table(&[
        ("Hit Points", core.hit_points.display()),
        ("Armor Class", core.armor_class.to_string()),
        ("Class DC", core.class_dc.to_string()),
        ("Perception", core.perception.display()),
        ("Speed", core.speed_summary()),
    ]);
}

fn proficiencies_page(flow: &mut FlowLayout, sheet: &CharacterSheet) {
    flow.heading("SAVING THROWS");
    flow.table(&proficiency_columns("Save"), &proficiency_rows(&sheet.saves));

    flow.heading("SKILLS");
    if sheet.skills.is_empty() {
        flow.paragraph("No trained skills", FontStyle::Oblique);
    } else {
        flow.table(&proficiency_columns("Skill"), &proficiency_rows(&sheet.skills));
    }

    if !sheet.languages.is_empty() {
        flow.heading("LANGUAGES");
        flow.paragraph(&sheet.languages.join(", "), FontStyle::Regular);
    }
    if !sheet.senses.is_empty() {
        flow.heading("SENSES");
        flow.paragraph(&sheet.senses.join(", "), FontStyle::Regular);
    }
}

fn feats_and_equipment_page(flow: &mut FlowLayout, sheet: &CharacterSheet) {
    flow.heading("FEATS & FEATURES");
    if sheet.feats.is_empty() {
        flow.paragraph("No feats selected", FontStyle::Oblique);
    } else {
        let columns = [
            Column::new("Feat Name", 3.0),
            Column::new("Level", 1.0),
            Column::new("Source", 2.0),
        ];
        let rows: Vec<Vec<String>> = sheet
            .feats
            .iter()
            .map(|feat| vec![feat.name.clone(), feat.level.to_string(), feat.source.clone()])
            .collect();
        flow.table(&columns, &rows);
    }

    flow.heading("EQUIPMENT & INVENTORY");
    if sheet.equipment.is_empty() {
        flow.paragraph("No equipment", FontStyle::Oblique);
    } else {
        let columns = [
            Column::new("Item", 3.0),
            Column::new("Qty", 1.0),
            Column::new("Bulk", 1.0),
            Column::new("Notes", 3.0),
        ];
        let rows: Vec<Vec<String>> = sheet
            .equipment
            .iter()
            .map(|item| {
                vec![
                    item.name.clone(),
                    item.quantity.to_string(),
                    item.bulk.clone(),
                    item.notes.clone(),
                ]
            })
            .collect();
        flow.table(&columns, &rows);
    }
}

fn combat_page(flow: &mut FlowLayout, sheet: &CharacterSheet) {
    flow.heading("ATTACKS");
    if sheet.attacks.is_empty() {
        flow.paragraph("No attacks", FontStyle::Oblique);
    } else {
        let columns = [
            Column::new("Attack", 2.0),
            Column::new("Bonus", 1.0),
            Column::new("Damage", 2.0),
            Column::new("Traits", 3.0),
        ];
        let rows: Vec<Vec<String>> = sheet
            .attacks
            .iter()
            .map(|attack| {
                vec![
                    attack.label.clone(),
                    attack.bonus_label(),
                    attack.damage.clone(),
                    attack.traits.clone(),
                ]
            })
            .collect();
        flow.table(&columns, &rows);
    }

    flow.heading("DEFENSES");
    let list = |items: Vec<String>| {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    };
    flow.key_value_table(&[
        (
            "Resistances",
            list(sheet.resistances.iter().map(|r| r.display()).collect()),
        ),
        (
            "Weaknesses",
            list(sheet.weaknesses.iter().map(|w| w.display()).collect()),
        ),
        ("Immunities", list(sheet.immunities.clone())),
    ]);
}

fn details_page(flow: &mut FlowLayout, sheet: &CharacterSheet) {
    flow.heading("CHARACTER DETAILS");
    for note in &sheet.notes {
        flow.paragraph(note.kind.title(), FontStyle::Bold);
        flow.paragraph(&note.body, FontStyle::Regular);
    }
}

fn proficiency_columns(name: &'static str) -> [Column; 4] {
    [
        Column::new(name, 3.0),
        Column::new("Ability", 1.0),
        Column::new("Rank", 2.0),
        Column::new("Modifier", 1.0),
    ]
}

fn proficiency_rows(lines: &[ProficiencyLine]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|line| {
            vec![
                line.name.clone(),
                line.ability.abbreviation().to_string(),
                line.rank_label.clone(),
                line.bonus_label(),
            ]
        })
        .collect()
}

// ============================================================================
// Document assembly
// ============================================================================

/// Build the PDF object graph: one page per content, standard Helvetica fonts.
fn assemble(
    title: &str,
    pages: Vec<Content>,
    (width, height): (f32, f32),
) -> Result<Document, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for style in FontStyle::all() {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let count = pages.len() as i64;
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for content in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => resources_id,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&format!("{title} - Character Sheet")),
        "Producer" => Object::string_literal("pf2e-sheet"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

/// A text string for the document information dictionary: UTF-16BE with a
/// byte order mark, so any character name survives.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}
