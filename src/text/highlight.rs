//! Case-insensitive filter highlighting
//!
//! Rows escape the filter so user text always matches literally. The
//! dropdown-level text pass historically compiles the filter as a pattern;
//! [`FilterMode`] makes that difference explicit.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::error::HighlightError;

/// How filter text becomes a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Filter is literal text
    Literal,
    /// Filter is used as a regular expression
    Pattern,
}

/// A label with the byte ranges that matched the filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlighted {
    pub text: String,
    pub matches: Vec<Range<usize>>,
}

/// A run of label text, emphasized or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl Highlighted {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matches: Vec::new(),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Split the text into matched and unmatched runs, in order
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::with_capacity(self.matches.len() * 2 + 1);
        let mut pos = 0;

        for range in &self.matches {
            if range.start > pos {
                segments.push(Segment {
                    text: &self.text[pos..range.start],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: &self.text[range.clone()],
                matched: true,
            });
            pos = range.end;
        }

        if pos < self.text.len() || segments.is_empty() {
            segments.push(Segment {
                text: &self.text[pos..],
                matched: false,
            });
        }

        segments
    }

    /// Markup form with every match wrapped in `<u>` tags
    pub fn to_markup(&self) -> String {
        self.segments()
            .into_iter()
            .map(|s| {
                if s.matched {
                    format!("<u>{}</u>", s.text)
                } else {
                    s.text.to_string()
                }
            })
            .collect()
    }
}

/// Compile filter text into a case-insensitive pattern.
/// Returns `None` for an empty filter.
pub fn compile(filter: &str, mode: FilterMode) -> Result<Option<Regex>, HighlightError> {
    if filter.is_empty() {
        return Ok(None);
    }

    let pattern = match mode {
        FilterMode::Literal => regex::escape(filter),
        FilterMode::Pattern => filter.to_string(),
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|source| HighlightError::InvalidPattern {
            pattern: filter.to_string(),
            source,
        })
}

/// Highlight `text` with an already compiled pattern.
/// Empty matches (e.g. from `a*`) are not emphasized.
pub fn highlight_with(pattern: Option<&Regex>, text: &str) -> Highlighted {
    let matches = match pattern {
        Some(re) => re
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect(),
        None => Vec::new(),
    };

    Highlighted {
        text: text.to_string(),
        matches,
    }
}

/// Highlight every case-insensitive occurrence of `filter` in `text`
pub fn highlight(text: &str, filter: &str, mode: FilterMode) -> Result<Highlighted, HighlightError> {
    let pattern = compile(filter, mode)?;
    Ok(highlight_with(pattern.as_ref(), text))
}
