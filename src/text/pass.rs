//! Post-render text pass
//!
//! Fitting labels needs the final row width, which is only known once the
//! list has been laid out. The pass therefore works on a staged copy of the
//! rendered rows: every label is truncated and highlighted in the copy, and
//! the copy replaces the live rows only when something differs. The live
//! list is never edited in place, so a pass that changes nothing causes no
//! redraw, and scroll position is untouched by the swap.

use crate::error::HighlightError;
use crate::text::highlight::{compile, highlight_with, FilterMode, Highlighted};
use crate::text::truncate::truncate;

/// Display form of one row label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowText {
    /// Label as supplied by the caller
    pub full: String,
    /// Fitted and highlighted label
    pub display: Highlighted,
    pub truncated: bool,
}

/// Settings for one pass
#[derive(Debug, Clone, Copy)]
pub struct TextPass<'a> {
    pub filter: &'a str,
    pub mode: FilterMode,
    pub width: usize,
    pub ellipsis: &'a str,
}

impl TextPass<'_> {
    /// Stage the fitted rows for `labels`.
    ///
    /// An invalid filter pattern still yields fitted rows, without
    /// highlighting, alongside the error.
    pub fn stage<'l, I>(&self, labels: I) -> (Vec<RowText>, Option<HighlightError>)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let (pattern, error) = match compile(self.filter, self.mode) {
            Ok(pattern) => (pattern, None),
            Err(e) => (None, Some(e)),
        };

        let rows = labels
            .into_iter()
            .map(|label| {
                let fitted = truncate(label, self.width, self.ellipsis);
                RowText {
                    full: label.to_string(),
                    display: highlight_with(pattern.as_ref(), &fitted.text),
                    truncated: fitted.truncated,
                }
            })
            .collect();

        (rows, error)
    }

    /// Run the pass against the live rows, swapping in the staged copy if it
    /// differs. Returns whether the live rows changed, and the pattern error
    /// if the filter could not be compiled. Reporting the error is left to
    /// the caller, which knows whether it already has.
    pub fn apply<'l, I>(&self, labels: I, live: &mut Vec<RowText>) -> (bool, Option<HighlightError>)
    where
        I: IntoIterator<Item = &'l str>,
    {
        let (staged, error) = self.stage(labels);

        if staged == *live {
            return (false, error);
        }

        *live = staged;
        (true, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(filter: &str, width: usize) -> TextPass<'_> {
        TextPass {
            filter,
            mode: FilterMode::Pattern,
            width,
            ellipsis: "…",
        }
    }

    #[test]
    fn test_stage_truncates_then_highlights() {
        let (rows, error) = pass("an", 5).stage(["Apple", "Banana"]);
        assert!(error.is_none());
        assert_eq!(rows[0].display.to_markup(), "Apple");
        assert!(!rows[0].truncated);
        // "Banana" is cut to "Bana…" before matching
        assert_eq!(rows[1].display.to_markup(), "B<u>an</u>a…");
        assert!(rows[1].truncated);
        assert_eq!(rows[1].full, "Banana");
    }

    #[test]
    fn test_apply_swaps_only_on_change() {
        let mut live = Vec::new();
        assert!(pass("an", 10).apply(["Apple", "Banana"], &mut live).0);
        assert_eq!(live.len(), 2);

        // Same input: nothing to swap
        assert!(!pass("an", 10).apply(["Apple", "Banana"], &mut live).0);

        // Filter change swaps
        assert!(pass("pp", 10).apply(["Apple", "Banana"], &mut live).0);
        assert_eq!(live[0].display.to_markup(), "A<u>pp</u>le");
    }

    #[test]
    fn test_invalid_pattern_still_fits_rows() {
        let (rows, error) = pass("(", 3).stage(["Cherry"]);
        assert!(error.is_some());
        assert_eq!(rows[0].display, Highlighted::plain("Ch…"));
    }

    #[test]
    fn test_apply_reports_error_on_every_pass() {
        let mut live = Vec::new();
        let (changed, error) = pass("(", 10).apply(["Cherry"], &mut live);
        assert!(changed);
        assert!(error.is_some());

        // Error is still reported when the rows are unchanged
        let (changed, error) = pass("(", 10).apply(["Cherry"], &mut live);
        assert!(!changed);
        assert!(error.is_some());
    }

    #[test]
    fn test_literal_mode() {
        let literal = TextPass {
            mode: FilterMode::Literal,
            ..pass("(", 20)
        };
        let (rows, error) = literal.stage(["C (beta)"]);
        assert!(error.is_none());
        assert_eq!(rows[0].display.to_markup(), "C <u>(</u>beta)");
    }
}
