//! Paragraph fragment extraction.
//!
//! Document-to-HTML converters wrap each run of positioned text in a paragraph
//! element. Only text inside `<p>`…`</p>` carries schedule content; everything
//! else (styles, page containers, images) is discarded. A single raw line may
//! hold several paragraphs, and a paragraph may continue over several raw lines.

use std::str::Lines;

use crate::config::FragmentConfig;

/// Lazily yield the text fragments of `text` in reading order.
///
/// The returned iterator is `Clone`, so a caller can restart the sequence from
/// any point without rescanning the document.
pub fn fragments<'a>(text: &'a str, config: &'a FragmentConfig) -> Fragments<'a> {
    Fragments {
        lines: text.lines(),
        rest: "",
        inside: false,
        open: &config.paragraph_open,
        close: &config.paragraph_close,
    }
}

/// Iterator over paragraph fragments. See [`fragments`].
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    lines: Lines<'a>,
    /// Unscanned remainder of the current raw line.
    rest: &'a str,
    inside: bool,
    open: &'a str,
    close: &'a str,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if self.rest.is_empty() {
                self.rest = self.lines.next()?.trim();
                continue;
            }

            // Without both delimiters there is no paragraph structure to follow.
            if self.open.is_empty() || self.close.is_empty() {
                return Some(std::mem::take(&mut self.rest));
            }

            if !self.inside {
                match self.rest.find(self.open) {
                    Some(idx) => {
                        self.rest = &self.rest[idx + self.open.len()..];
                        self.inside = true;
                    }
                    // Nested paragraphs are not supported: drop the line.
                    None => self.rest = "",
                }
                continue;
            }

            match self.rest.find(self.close) {
                Some(idx) => {
                    let data = &self.rest[..idx];
                    self.rest = &self.rest[idx + self.close.len()..];
                    self.inside = false;
                    if !data.is_empty() {
                        return Some(data);
                    }
                }
                None => return Some(std::mem::take(&mut self.rest)),
            }
        }
    }
}
