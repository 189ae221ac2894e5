//! Document text extractor
//!
//! Applies the media kind policy, decodes plain text, and walks paged
//! documents page by page.

use std::sync::Arc;

use super::error::{ExtractError, Result};
use super::traits::{PagedDocument, PagedDocumentLoader};
use super::types::{ExtractedText, MediaKind, SourceDocument};

/// Lazy page-at-a-time text sequence over an opened document
///
/// Yields one page text per item, first page first. Each page text is the
/// page's fragments joined with single spaces.
pub struct PageTexts<'a> {
    doc: &'a dyn PagedDocument,
    next: usize,
    count: usize,
}

impl<'a> PageTexts<'a> {
    pub fn new(doc: &'a dyn PagedDocument) -> Self {
        Self {
            doc,
            next: 0,
            count: doc.page_count(),
        }
    }
}

impl Iterator for PageTexts<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;

        Some(self.doc.page_fragments(index).map(|fragments| {
            fragments
                .into_iter()
                .map(|f| f.text)
                .collect::<Vec<_>>()
                .join(" ")
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

/// Extracts plain text from uploaded documents
#[derive(Clone)]
pub struct DocumentExtractor {
    loader: Arc<dyn PagedDocumentLoader>,
}

impl DocumentExtractor {
    pub fn new(loader: Arc<dyn PagedDocumentLoader>) -> Self {
        Self { loader }
    }

    /// Extract the full text of a document.
    ///
    /// Unsupported declared types are rejected before any decoding. Either
    /// the whole text is returned or the extraction fails.
    pub async fn extract(&self, source: SourceDocument) -> Result<ExtractedText> {
        let kind = source.kind()?;
        tracing::debug!(
            "Extracting {} document ({} bytes)",
            kind.mime(),
            source.bytes().len()
        );

        let text = match kind {
            MediaKind::PlainText => decode_plain_text(source.bytes()),
            MediaKind::PagedBinary => {
                let loader = self.loader.clone();
                let bytes = source.bytes().clone();

                // Offload to blocking task since PDF parsing is CPU-bound
                tokio::task::spawn_blocking(move || {
                    let doc = loader.open(&bytes)?;
                    let page_count = doc.page_count();
                    let text = ExtractedText::from_pages(PageTexts::new(doc.as_ref()))?;
                    tracing::debug!("Extracted {} pages", page_count);
                    Ok::<_, ExtractError>(text)
                })
                .await
                .map_err(|e| {
                    ExtractError::UnreadableDocument(format!("Task join error: {}", e))
                })??
            }
        };

        tracing::info!(
            "Extracted {} characters from {} document",
            text.char_count(),
            kind.mime()
        );
        Ok(text)
    }
}

/// Decode as UTF-8, replacing invalid sequences and dropping a leading BOM
fn decode_plain_text(bytes: &[u8]) -> ExtractedText {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(&decoded);
    ExtractedText::verbatim(text.to_string())
}
