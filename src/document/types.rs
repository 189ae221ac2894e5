//! Core document types

use axum::body::Bytes;
use serde::Serialize;

use super::error::{ExtractError, Result};

/// Supported media kinds, serialized as their canonical MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaKind {
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "application/pdf")]
    PagedBinary,
}

impl MediaKind {
    /// Resolve a declared MIME type.
    ///
    /// Parameters (`; charset=utf-8`) and letter case are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::PagedBinary),
            _ => None,
        }
    }

    /// Canonical MIME type for this kind
    pub fn mime(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::PagedBinary => "application/pdf",
        }
    }
}

/// An uploaded file and its declared media type
#[derive(Debug, Clone)]
pub struct SourceDocument {
    bytes: Bytes,
    media_type: String,
}

impl SourceDocument {
    pub fn new(bytes: impl Into<Bytes>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Resolve the declared type, failing with `UnsupportedMediaKind`
    pub fn kind(&self) -> Result<MediaKind> {
        MediaKind::from_mime(&self.media_type)
            .ok_or_else(|| ExtractError::UnsupportedMediaKind(self.media_type.clone()))
    }
}

/// One positioned text run on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    /// Left edge of the run's bounding box (page space)
    pub x: f32,
    /// Top edge of the run's bounding box (page space)
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Plain text produced by extraction
///
/// For PDF input, page texts appear in ascending page order separated by a
/// blank line, with no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

/// Separator between consecutive page texts
pub(crate) const PAGE_SEPARATOR: &str = "\n\n";

impl ExtractedText {
    /// Wrap decoded plain text as-is
    pub fn verbatim(text: String) -> Self {
        Self(text)
    }

    /// Join page texts in iteration order, stopping at the first failure
    pub fn from_pages<I>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut text = String::new();
        for page in pages {
            text.push_str(&page?);
            text.push_str(PAGE_SEPARATOR);
        }
        Ok(Self(text.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters (not bytes)
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
