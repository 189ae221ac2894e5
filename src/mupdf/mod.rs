//! MuPDF-backed paged document loader
//!
//! Implements [`PagedDocumentLoader`](crate::document::PagedDocumentLoader)
//! for PDF bytes using the MuPDF library.
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. Each extraction opens a fresh
//! document on the blocking thread that uses it and drops it there; no
//! MuPDF handle crosses threads.

mod loader;
mod stext;

pub use loader::{MupdfDocument, MupdfLoader};
