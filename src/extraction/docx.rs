//! DOCX text extraction backed by `docx-rust`.

use crate::types::{AppError, AppResult};
use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use std::io::Cursor;

/// Join the text of every top-level body paragraph with a single space.
/// Tables and other non-paragraph body content are skipped.
pub fn extract_text(content: &[u8]) -> AppResult<String> {
    let file = DocxFile::from_reader(Cursor::new(content))
        .map_err(|e| AppError::Extraction(format!("failed to open DOCX: {}", e)))?;
    let docx = file
        .parse()
        .map_err(|e| AppError::Extraction(format!("failed to parse DOCX: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .body
        .content
        .iter()
        .filter_map(|item| match item {
            BodyContent::Paragraph(paragraph) => Some(paragraph.text()),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join(" "))
}
