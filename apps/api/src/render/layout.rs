//! Line wrapping and pagination for the resume PDF.

use serde::Serialize;

use crate::render::metrics::{FontMetricTable, HELVETICA};

/// Page geometry in millimetres, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub title_y_mm: f32,
    pub title_size_pt: f32,
    /// Gap between the title baseline and the first body line.
    pub title_gap_mm: f32,
    pub body_size_pt: f32,
    pub line_height_mm: f32,
    /// A line whose baseline would fall below this starts a new page.
    pub page_break_y_mm: f32,
    pub continuation_y_mm: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 15.0,
        title_y_mm: 20.0,
        title_size_pt: 16.0,
        title_gap_mm: 10.0,
        body_size_pt: 11.0,
        line_height_mm: 6.0,
        page_break_y_mm: 280.0,
        continuation_y_mm: 20.0,
    };

    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// A body line with its baseline position on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub y_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeLayout {
    pub title: String,
    pub geometry: PageGeometry,
    /// Body lines per page. The title sits on the first page.
    pub pages: Vec<Vec<PlacedLine>>,
}

/// "Resume Draft - {name}"
pub fn resume_title(name: &str) -> String {
    format!("Resume Draft - {name}")
}

/// Download name: whitespace runs become `_`, e.g. "Asha Rao" →
/// "Asha_Rao_Resume_Draft.pdf".
pub fn resume_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    format!("{stem}_Resume_Draft.pdf")
}

/// Splits one over-wide word into chunks that each fit `max_mm`.
fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_mm: f32,
) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if metrics.width_mm(&current, size_pt) > max_mm && current.chars().count() > 1 {
            current.pop();
            chunks.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Greedy word wrap. Explicit newlines are kept (an empty paragraph yields
/// an empty line); runs of whitespace collapse to one space.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size_pt: f32, max_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let pieces = if metrics.width_mm(word, size_pt) > max_mm {
                split_long_word(word, metrics, size_pt, max_mm)
            } else {
                vec![word.to_string()]
            };

            for piece in pieces {
                if current.is_empty() {
                    current = piece;
                    continue;
                }
                let candidate = format!("{current} {piece}");
                if metrics.width_mm(&candidate, size_pt) > max_mm {
                    lines.push(std::mem::replace(&mut current, piece));
                } else {
                    current = candidate;
                }
            }
        }
        lines.push(current);
    }

    lines
}

/// Places the wrapped draft on pages.
pub fn layout_resume(name: &str, markdown: &str, geometry: PageGeometry) -> ResumeLayout {
    let lines = wrap_text(
        markdown,
        &HELVETICA,
        geometry.body_size_pt,
        geometry.text_width_mm(),
    );

    let mut pages = vec![Vec::new()];
    let mut cursor = geometry.title_y_mm + geometry.title_gap_mm;

    for text in lines {
        if cursor > geometry.page_break_y_mm {
            pages.push(Vec::new());
            cursor = geometry.continuation_y_mm;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { text, y_mm: cursor });
        }
        cursor += geometry.line_height_mm;
    }

    ResumeLayout {
        title: resume_title(name),
        geometry,
        pages,
    }
}
