//! Paged document traits
//!
//! The PDF library is an injected capability: the extractor only needs to
//! open bytes and pull positioned text fragments one page at a time.

use super::error::Result;
use super::types::TextFragment;

/// Opens raw bytes as a paged document
///
/// Implementations are synchronous; the extractor runs them on the
/// blocking pool.
pub trait PagedDocumentLoader: Send + Sync {
    /// Load the document structure, failing with `UnreadableDocument`
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PagedDocument>>;
}

/// An opened paged document
pub trait PagedDocument {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Positioned text fragments of one page (0-indexed), in reading order
    fn page_fragments(&self, index: usize) -> Result<Vec<TextFragment>>;
}

/// In-memory loader for tests
#[cfg(test)]
pub(crate) struct FakeLoader {
    pub pages: Vec<Vec<&'static str>>,
    /// Fail when opening the document
    pub unreadable: bool,
    /// Fail when reading this page
    pub broken_page: Option<usize>,
    pub opened: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FakeLoader {
    pub fn with_pages(pages: Vec<Vec<&'static str>>) -> Self {
        Self {
            pages,
            unreadable: false,
            broken_page: None,
            opened: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opened.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl Default for FakeLoader {
    fn default() -> Self {
        Self::with_pages(Vec::new())
    }
}

#[cfg(test)]
struct FakeDocument {
    pages: Vec<Vec<&'static str>>,
    broken_page: Option<usize>,
}

#[cfg(test)]
impl PagedDocumentLoader for FakeLoader {
    fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PagedDocument>> {
        self.opened.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.unreadable {
            return Err(super::ExtractError::UnreadableDocument(
                "no objects found".to_string(),
            ));
        }
        Ok(Box::new(FakeDocument {
            pages: self.pages.clone(),
            broken_page: self.broken_page,
        }))
    }
}

#[cfg(test)]
impl PagedDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<TextFragment>> {
        if self.broken_page == Some(index) {
            return Err(super::ExtractError::UnreadableDocument(format!(
                "cannot load page {}",
                index
            )));
        }
        Ok(self.pages[index]
            .iter()
            .enumerate()
            .map(|(line, text)| TextFragment::new(*text, 72.0, 72.0 + line as f32 * 14.0))
            .collect())
    }
}
