//! Both renderers against the sample character, re-reading what they produce.

use lopdf::content::Content;
use lopdf::Document;
use pf2e_core::record::{FeatSelection, Item};
use pf2e_core::testing::{minimal_record, sample_character_json};
use pf2e_core::{parse_record, CharacterSheet};
use pf2e_sheet::{
    DocumentRenderer, PageSize, RenderConfig, SheetRenderer, SpreadsheetRenderer,
};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn sample_sheet() -> CharacterSheet {
    let record = parse_record(&sample_character_json().to_string()).expect("Sample should parse");
    CharacterSheet::from_record(&record)
}

fn render_pdf(sheet: &CharacterSheet, config: RenderConfig) -> Document {
    let bytes = DocumentRenderer::new(config)
        .render(sheet)
        .expect("PDF render should succeed");
    Document::load_mem(&bytes).expect("PDF should re-parse")
}

fn page_text(doc: &Document, page: u32) -> String {
    let pages = doc.get_pages();
    let id = *pages.get(&page).expect("Page should exist");
    String::from_utf8_lossy(&doc.get_page_content(id).unwrap()).to_string()
}

fn all_text(doc: &Document) -> String {
    doc.get_pages()
        .keys()
        .map(|page| page_text(doc, *page))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_workbook(sheet: &CharacterSheet, config: RenderConfig) -> Vec<u8> {
    SpreadsheetRenderer::new(config)
        .render(sheet)
        .expect("Workbook render should succeed")
}

/// One XML part of an `.xlsx` package.
fn workbook_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Workbook should be a zip");
    let mut part = archive.by_name(name).expect("Part should exist");
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_spreadsheet_is_zip_container() {
    let bytes = SpreadsheetRenderer::new(RenderConfig::default())
        .render(&sample_sheet())
        .expect("Workbook render should succeed");
    assert!(bytes.starts_with(b"PK\x03\x04"));
    assert!(bytes.len() > 1000);
}

#[test]
fn test_pdf_pages_and_values() {
    let doc = render_pdf(&sample_sheet(), RenderConfig::default());
    assert_eq!(doc.get_pages().len(), 5);

    let overview = page_text(&doc, 1);
    assert!(overview.contains("(Valeros)"));
    assert!(overview.contains("(Half Orc)"));
    assert!(overview.contains("(21)"));
    assert!(overview.contains("+8 "));
    assert!(overview.contains("Expert"));

    let proficiencies = page_text(&doc, 2);
    assert!(proficiencies.contains("(Athletics)"));
    assert!(proficiencies.contains("(+11)"));
    assert!(proficiencies.contains("(Common, Orcish)"));

    let feats = page_text(&doc, 3);
    assert!(feats.contains("(Shield Block)"));
    assert!(feats.contains("(Signal Whistle)"));

    assert!(page_text(&doc, 4).contains("(cold iron 1)"));
    assert!(page_text(&doc, 5).contains("(CHARACTER DETAILS)"));
}

#[test]
fn test_pdf_page_size() {
    let doc = render_pdf(
        &sample_sheet(),
        RenderConfig::default().with_page_size(PageSize::A4),
    );
    let pages = doc.get_pages();
    let page = doc.get_dictionary(pages[&1]).unwrap();
    let parent = doc
        .get_dictionary(page.get(b"Parent").unwrap().as_reference().unwrap())
        .unwrap();
    let media_box: Vec<f32> = parent
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect();
    assert_eq!(media_box, vec![0.0, 0.0, 595.0, 842.0]);
}

#[test]
fn test_pdf_without_notes_has_four_pages() {
    let sheet = CharacterSheet::from_record(&minimal_record());
    let doc = render_pdf(&sheet, RenderConfig::default());
    assert_eq!(doc.get_pages().len(), 4);
    assert!(page_text(&doc, 2).contains("(No trained skills)"));
}

#[test]
fn test_pdf_long_feat_list_overflows() {
    let mut record = minimal_record();
    record.feats = (0..80)
        .map(|i| FeatSelection {
            id: format!("feat.training-{i}"),
            level: 1 + i % 20,
            granted_by: "class".to_string(),
        })
        .collect();
    let sheet = CharacterSheet::from_record(&record);
    let doc = render_pdf(&sheet, RenderConfig::default());

    assert!(doc.get_pages().len() > 4);
    let text = all_text(&doc);
    assert!(text.contains("(Training 0)"));
    assert!(text.contains("(Training 79)"));
}

#[test]
fn test_workbook_formulas_carry_results() {
    let bytes = render_workbook(&sample_sheet(), RenderConfig::default());

    let workbook = workbook_part(&bytes, "xl/workbook.xml");
    assert!(workbook.contains(r#"name="Character""#));
    assert!(workbook.contains(r#"name="Skills &amp; Saves""#));
    assert!(workbook.contains(r#"name="Notes""#));

    // STR 18 in A16, its modifier in A17.
    let character = workbook_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(character.contains("<f>INT((A16-10)/2)</f><v>4</v>"));

    // Athletics: STR modifier plus level plus expert.
    let skills = workbook_part(&bytes, "xl/worksheets/sheet2.xml");
    assert!(skills.contains("<f>Character!A17 + (Character!B4 + 4)</f><v>11</v>"));
}

#[test]
fn test_workbook_static_values_have_no_formulas() {
    let bytes = render_workbook(&sample_sheet(), RenderConfig::default().with_formulas(false));

    let character = workbook_part(&bytes, "xl/worksheets/sheet1.xml");
    let skills = workbook_part(&bytes, "xl/worksheets/sheet2.xml");
    assert!(!character.contains("<f>"));
    assert!(!skills.contains("<f>"));
    assert!(character.contains("<v>4</v>"));
    assert!(skills.contains("<v>11</v>"));
}

#[test]
fn test_workbook_without_notes_has_four_sheets() {
    let sheet = CharacterSheet::from_record(&minimal_record());
    let bytes = render_workbook(&sheet, RenderConfig::default());

    let workbook = workbook_part(&bytes, "xl/workbook.xml");
    assert!(workbook.contains(r#"name="Equipment""#));
    assert!(!workbook.contains(r#"name="Notes""#));
    assert_eq!(workbook.matches("<sheet ").count(), 4);
}

#[test]
fn test_pdf_long_item_notes_stay_on_the_page() {
    let mut record = minimal_record();
    record.equipment = vec![Item {
        name: "Journal".to_string(),
        notes: Some("entry ".repeat(2000)),
        ..Item::default()
    }];
    let sheet = CharacterSheet::from_record(&record);
    let doc = render_pdf(&sheet, RenderConfig::default());
    assert!(doc.get_pages().len() > 5);

    let (_, height) = PageSize::Letter.dimensions();
    let margin = RenderConfig::default().margin;
    for id in doc.get_pages().values() {
        let content = Content::decode(&doc.get_page_content(*id).unwrap()).unwrap();
        for op in content.operations.iter().filter(|op| op.operator == "Td") {
            let y = op.operands[1].as_float().unwrap();
            assert!(y >= margin, "text at y={y} is below the bottom margin");
            assert!(y <= height - margin);
        }
    }

    let mut entries = 0;
    for page in doc.get_pages().keys() {
        entries += page_text(&doc, *page).matches("entry").count();
    }
    assert_eq!(entries, 2000);
}
