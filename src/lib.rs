//! ClaimCheck Server Library
//!
//! Policy document text extraction and schema-constrained claim analysis.
//! The server binary in main.rs wires these modules behind HTTP routes.
//!
//! # Modules
//!
//! - `document`: Format-agnostic text extraction (plain text, PDF)
//! - `mupdf`: MuPDF-backed paged document loader
//! - `analysis`: Prompt construction, model provider, response validation
//! - `routes`: HTTP endpoints

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod mupdf;
pub mod routes;
pub mod state;
