//! PDF loading via MuPDF

use mupdf::Document;

use crate::document::{
    ExtractError, PagedDocument, PagedDocumentLoader, Result, TextFragment,
};

use super::stext::line_fragments;

const PDF_MAGIC: &str = "application/pdf";

/// Opens PDF bytes with MuPDF
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfLoader;

impl MupdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl PagedDocumentLoader for MupdfLoader {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>> {
        let doc = MupdfDocument::from_bytes(bytes)?;
        Ok(Box::new(doc))
    }
}

/// An opened PDF
///
/// Holds the MuPDF document for the duration of one extraction. Pages are
/// loaded on demand and dropped after their fragments are read.
pub struct MupdfDocument {
    doc: Document,
    page_count: usize,
}

impl MupdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::from_bytes(bytes, PDF_MAGIC)?;

        if doc.needs_password()? {
            return Err(ExtractError::UnreadableDocument(
                "document is password-protected".to_string(),
            ));
        }

        let page_count = doc.page_count()?;
        let page_count = usize::try_from(page_count).map_err(|_| {
            ExtractError::UnreadableDocument(format!("invalid page count {}", page_count))
        })?;

        Ok(Self { doc, page_count })
    }
}

impl PagedDocument for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<TextFragment>> {
        if index >= self.page_count {
            return Err(ExtractError::UnreadableDocument(format!(
                "page {} not found (document has {} pages)",
                index + 1,
                self.page_count
            )));
        }

        let page = self.doc.load_page(index as i32)?;
        line_fragments(&page)
    }
}
