//! Text extraction — turns an uploaded document into plain text.
//!
//! Dispatches on the file extension. Unsupported formats and parse failures
//! yield an empty string: downstream matchers then report empty sets rather
//! than the request failing.

use thiserror::Error;
use tracing::{debug, warn};

pub mod docx;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("DOCX extraction failed: {0}")]
    Docx(#[from] docx_rs::ReaderError),
}

/// Container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Detects the format from the file name's final extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Extracts plain text from `data`, choosing the parser from `file_name`.
///
/// Never fails: unsupported extensions and parser errors produce `""`.
/// Parsing is CPU-bound; async callers should run this on a blocking thread.
pub fn extract_text(file_name: &str, data: &[u8]) -> String {
    let Some(kind) = DocumentKind::from_file_name(file_name) else {
        warn!("Unsupported document type '{file_name}', treating as empty");
        return String::new();
    };

    let result = match kind {
        DocumentKind::Pdf => extract_pdf(data),
        DocumentKind::Docx => docx::extract_docx(data),
        DocumentKind::PlainText => Ok(decode_utf8(data)),
    };

    match result {
        Ok(text) => {
            debug!("Extracted {} chars from '{file_name}' ({kind:?})", text.chars().count());
            text
        }
        Err(e) => {
            warn!("Could not extract text from '{file_name}': {e}");
            String::new()
        }
    }
}

/// Concatenates the text of every page that has any, one page per line block.
fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_utf8(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("Plain-text upload is not valid UTF-8 ({e}); replacing invalid bytes");
            String::from_utf8_lossy(data).into_owned()
        }
    }
}
