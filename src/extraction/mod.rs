//! Text extraction
//!
//! Turns an uploaded document into plain text. The format is picked from the
//! lower-cased extension after the last `.` in the filename:
//!
//! - `pdf`  - page texts joined by a single space, in page order
//! - `docx` - paragraph texts joined by a single space, in document order
//! - `txt`  - the bytes decoded as UTF-8, untouched
//!
//! Anything else is rejected with [`AppError::UnsupportedFormat`] before the
//! content is looked at.

pub mod docx;
pub mod pdf;

use crate::models::UploadedFile;
use crate::types::{AppError, AppResult};
use tracing::debug;

/// Document formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolve the format from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> AppResult<Self> {
        let lowered = filename.to_lowercase();
        let extension = lowered
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| AppError::UnsupportedFormat(format!("'{}' has no extension", filename)))?;

        match extension {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(AppError::UnsupportedFormat(format!(".{}", other))),
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
            DocumentFormat::Txt => write!(f, "txt"),
        }
    }
}

pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from `content`, using `filename` to pick the parser.
    pub fn extract(filename: &str, content: &[u8]) -> AppResult<String> {
        let format = DocumentFormat::from_filename(filename)?;

        if content.is_empty() {
            debug!(filename, %format, "Empty upload, nothing to extract");
            return Ok(String::new());
        }

        let text = match format {
            DocumentFormat::Pdf => pdf::extract_text(content)?,
            DocumentFormat::Docx => docx::extract_text(content)?,
            DocumentFormat::Txt => decode_utf8(content)?,
        };

        debug!(filename, %format, bytes = content.len(), chars = text.len(), "Extracted text");
        Ok(text)
    }

    /// Extract text from an uploaded file
    pub fn extract_file(file: &UploadedFile) -> AppResult<String> {
        Self::extract(&file.filename, &file.content)
    }
}

fn decode_utf8(content: &[u8]) -> AppResult<String> {
    std::str::from_utf8(content)
        .map(str::to_owned)
        .map_err(|e| AppError::Decoding(e.to_string()))
}
