//! Display-width aware label truncation

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Result of fitting a label into a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub text: String,
    pub truncated: bool,
}

/// Fit `text` into `max_width` columns, ending with `ellipsis` when cut.
/// When not even the ellipsis fits, the text is cut without one.
pub fn truncate(text: &str, max_width: usize, ellipsis: &str) -> Truncated {
    if text.width() <= max_width {
        return Truncated {
            text: text.to_string(),
            truncated: false,
        };
    }

    let ellipsis_width = ellipsis.width();
    let (budget, suffix) = if ellipsis_width <= max_width {
        (max_width - ellipsis_width, ellipsis)
    } else {
        (max_width, "")
    };

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }

    // Don't leave a dangling space before the ellipsis
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push_str(suffix);

    Truncated {
        text: out,
        truncated: true,
    }
}
