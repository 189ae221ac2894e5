//! Structured Text Helpers
//!
//! Turns a MuPDF page's structured text into positioned fragments, one per
//! text line, in the order MuPDF reports them.

use mupdf::{Page, TextPageOptions};

use crate::document::{Result, TextFragment};

/// Extract one fragment per non-empty text line of a page
pub fn line_fragments(page: &Page) -> Result<Vec<TextFragment>> {
    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut fragments = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let mut text = String::new();
            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    text.push(c);
                }
            }

            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let bounds = line.bounds();
            fragments.push(TextFragment::new(text, bounds.x0, bounds.y0));
        }
    }

    Ok(fragments)
}
