//! Document text extraction
//!
//! Turns an uploaded file into a single plain-text string. Two media kinds
//! are accepted: `text/plain` (decoded directly) and `application/pdf`
//! (walked page by page through a [`PagedDocumentLoader`]).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  DocumentExtractor                      │
//! │  (media kind policy, page ordering and joining)         │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │              PagedDocumentLoader                     │
//!   │  (MupdfLoader in production, in-memory fake in tests)│
//!   └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use claimcheck_server::document::{DocumentExtractor, SourceDocument};
//! use claimcheck_server::mupdf::MupdfLoader;
//!
//! let extractor = DocumentExtractor::new(Arc::new(MupdfLoader::new()));
//! let text = extractor
//!     .extract(SourceDocument::new(bytes, "application/pdf"))
//!     .await?;
//! ```

mod error;
mod extractor;
mod traits;
mod types;

pub use error::{ExtractError, Result};
pub use extractor::{DocumentExtractor, PageTexts};
pub use traits::{PagedDocument, PagedDocumentLoader};
pub use types::{ExtractedText, MediaKind, SourceDocument, TextFragment};

#[cfg(test)]
pub(crate) use traits::FakeLoader;
