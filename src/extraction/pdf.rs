//! PDF text extraction backed by `lopdf`.

use crate::types::{AppError, AppResult};
use lopdf::Document;
use tracing::warn;

/// Extract the text of every page, in page order, joined by a single space.
///
/// A page whose text cannot be decoded contributes an empty string; only a
/// document that fails to load is an error.
pub fn extract_text(content: &[u8]) -> AppResult<String> {
    let document = Document::load_mem(content)
        .map_err(|e| AppError::Extraction(format!("failed to parse PDF: {}", e)))?;

    // BTreeMap keys: already in page order
    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();

    let pages: Vec<String> = page_numbers
        .iter()
        .map(|&page| match document.extract_text(&[page]) {
            Ok(text) => text.trim_end().to_string(),
            Err(e) => {
                warn!(page, error = %e, "No extractable text on PDF page");
                String::new()
            }
        })
        .collect();

    Ok(pages.join(" "))
}
