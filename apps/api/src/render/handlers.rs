use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::render::layout::{layout_resume, resume_file_name, PageGeometry};
use crate::render::pdf::render_pdf;

/// Escaped in `filename*`: everything except alphanumerics and `._-`.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-');

#[derive(Deserialize)]
pub struct ResumePdfRequest {
    pub name: String,
    pub markdown: String,
}

/// POST /api/v1/resume/pdf
/// Returns the draft as a PDF attachment.
pub async fn handle_resume_pdf(Json(req): Json<ResumePdfRequest>) -> Result<Response, AppError> {
    if req.markdown.trim().is_empty() {
        return Err(AppError::Validation("markdown must not be blank".to_string()));
    }

    let layout = layout_resume(&req.name, &req.markdown, PageGeometry::A4);
    let pdf = render_pdf(&layout, Utc::now()).map_err(anyhow::Error::from)?;
    let file_name = resume_file_name(&req.name);
    info!(pages = layout.pages.len(), bytes = pdf.len(), %file_name, "Resume PDF rendered");

    let disposition = HeaderValue::from_str(&content_disposition(&file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"Resume_Draft.pdf\""));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// Attachment header with a quoted ASCII fallback and the exact UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '%' | ';' => '_',
            c if c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, FILENAME_ESCAPE);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_unchanged() {
        assert_eq!(
            content_disposition("Asha_Rao_Resume_Draft.pdf"),
            "attachment; filename=\"Asha_Rao_Resume_Draft.pdf\"; \
             filename*=UTF-8''Asha_Rao_Resume_Draft.pdf"
        );
    }

    #[test]
    fn test_quotes_cannot_break_out_of_the_filename() {
        let header = content_disposition(&resume_file_name("Asha \"Ace\" Rao"));
        assert_eq!(
            header,
            "attachment; filename=\"Asha__Ace__Rao_Resume_Draft.pdf\"; \
             filename*=UTF-8''Asha_%22Ace%22_Rao_Resume_Draft.pdf"
        );
        assert!(HeaderValue::from_str(&header).is_ok());
    }

    #[test]
    fn test_non_ascii_name_keeps_exact_form() {
        let header = content_disposition(&resume_file_name("Zoë"));
        assert!(header.contains("filename=\"Zo__Resume_Draft.pdf\""));
        assert!(header.ends_with("filename*=UTF-8''Zo%C3%AB_Resume_Draft.pdf"));
    }
}
