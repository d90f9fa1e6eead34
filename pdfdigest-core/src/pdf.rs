//! PDF text extraction.
//!
//! This module turns a stored PDF into a [`TextBundle`]: per-page cleaned
//! text, the concatenated full text, and document-level metadata. The
//! bundle is the only value handed to the summarizer and is rebuilt from
//! the source file on every request.

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error};

/// Errors that can occur during PDF extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open PDF file: {0}")]
    OpenError(String),

    #[error("Failed to read PDF: {0}")]
    ReadError(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Cleaned text of a single page.
///
/// `page` is the 1-based source page number. Pages without extractable
/// text are omitted entirely, but the numbering of the remaining pages
/// still follows the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

/// Document-level metadata from the PDF info dictionary
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub page_count: u32,
}

/// Normalized extraction result for one document.
///
/// `full_text` is exactly the blank-line join of the non-empty cleaned
/// page texts, trimmed. The bundle is immutable once produced; the
/// summarizer only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TextBundle {
    pub full_text: String,
    pub pages: Vec<PageText>,
    pub metadata: DocumentMetadata,
}

impl TextBundle {
    /// Number of pages that yielded text
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }
}

/// Extract a [`TextBundle`] from the PDF at `path`.
///
/// A document whose pages yield no text at all produces an empty bundle,
/// not an error. Parse failures are logged and propagated.
pub fn extract(path: &Path) -> Result<TextBundle, ExtractError> {
    debug!("Extracting text from: {}", path.display());

    let doc = Document::load(path).map_err(|e| {
        error!("Failed to open PDF {}: {}", path.display(), e);
        ExtractError::OpenError(e.to_string())
    })?;

    let source_pages = doc.get_pages();
    let metadata = read_metadata(&doc, source_pages.len() as u32);

    let mut pages = Vec::new();
    let mut buffer = String::new();

    // get_pages() yields 1-based page numbers in source order.
    for (page_num, _object_id) in source_pages {
        let raw = doc
            .extract_text(&[page_num])
            .unwrap_or_else(|_| String::new());
        let cleaned = clean_text(&raw);
        if cleaned.is_empty() {
            continue;
        }

        buffer.push_str(&cleaned);
        buffer.push_str("\n\n");
        pages.push(PageText {
            page: page_num,
            text: cleaned,
        });
    }

    debug!(
        "Extracted {} text-bearing pages of {}",
        pages.len(),
        metadata.page_count
    );

    Ok(TextBundle {
        full_text: buffer.trim().to_string(),
        pages,
        metadata,
    })
}

/// Collapse all whitespace runs (newlines and tabs included) into single
/// spaces and trim the ends. Pure normalization; headers/footers and other
/// boilerplate are left alone.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn read_metadata(doc: &Document, page_count: u32) -> DocumentMetadata {
    let mut metadata = DocumentMetadata {
        page_count,
        ..Default::default()
    };

    if let Ok(info) = doc.trailer.get(b"Info") {
        if let Ok(info_ref) = info.as_reference() {
            if let Ok(info_dict) = doc.get_dictionary(info_ref) {
                metadata.title = info_string(info_dict, b"Title");
                metadata.author = info_string(info_dict, b"Author");
                metadata.subject = info_string(info_dict, b"Subject");
                metadata.creator = info_string(info_dict, b"Creator");
            }
        }
    }

    metadata
}

fn info_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key)
        .ok()
        .and_then(|v| v.as_string().ok())
        .map(|s| s.to_string())
}
