//! PDF 1.4 output for the resume layout, built on `lopdf`.
//!
//! Uses the standard Type1 fonts (Helvetica, Helvetica-Bold) with
//! WinAnsiEncoding, so no font data is embedded. Characters outside that
//! encoding print as `?`.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::render::layout::ResumeLayout;
use crate::render::metrics::MM_PER_PT;

const PRODUCER: &str = "campus-api";

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// WinAnsi code for `c`, if it has one.
fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match c {
        ' '..='~' => Some(code as u8),
        '\u{A0}'..='\u{FF}' => Some(code as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '™' => Some(0x99),
        _ => None,
    }
}

fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

fn type1_font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn show_text(font: &str, size_pt: f32, x_pt: f32, y_pt: f32, text: &str) -> [Operation; 5] {
    [
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size_pt.into()]),
        Operation::new("Td", vec![x_pt.into(), y_pt.into()]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Renders `layout` to PDF bytes. The title is set in bold on the first
/// page only; blank lines keep their slot but draw nothing.
pub fn render_pdf(
    layout: &ResumeLayout,
    created_at: DateTime<Utc>,
) -> Result<Vec<u8>, lopdf::Error> {
    let geometry = &layout.geometry;
    let width_pt = mm_to_pt(geometry.page_width_mm);
    let height_pt = mm_to_pt(geometry.page_height_mm);
    let x_pt = mm_to_pt(geometry.margin_mm);
    // Layout positions are measured from the top edge.
    let y_pt = |y_mm: f32| height_pt - mm_to_pt(y_mm);

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(type1_font("Helvetica"));
    let bold_id = doc.add_object(type1_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular_id, "F2" => bold_id },
    });

    let page_count = layout.pages.len().max(1);
    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let mut operations = Vec::new();
        if index == 0 {
            operations.extend(show_text(
                "F2",
                geometry.title_size_pt,
                x_pt,
                y_pt(geometry.title_y_mm),
                &layout.title,
            ));
        }
        let lines = layout.pages.get(index).into_iter().flatten();
        for line in lines.filter(|line| !line.text.is_empty()) {
            operations.extend(show_text(
                "F1",
                geometry.body_size_pt,
                x_pt,
                y_pt(line.y_mm),
                &line.text,
            ));
        }

        let content = Content { operations }.encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.set_object(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt),
                Object::Real(height_pt),
            ],
        },
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(&layout.title)),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(
            created_at.format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
