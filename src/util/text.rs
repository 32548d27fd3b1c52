use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// ```
/// use albumshelf::util::display_width;
///
/// assert_eq!(display_width("Asterix"), 7);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: char = '…';

/// Truncate `s` to at most `max_width` columns, ending in `…` when cut.
///
/// Returns the input unchanged (borrowed) when it already fits.
///
/// ```
/// use albumshelf::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Asterix the Gaul", 10), "Asterix t…");
/// assert_eq!(truncate_to_width("Obelix", 10), "Obelix");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    // Room for the ellipsis (one column)
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(s.len().min(max_width * 4));
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Right-pad `s` with spaces to exactly `width` columns, truncating if longer.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&truncated));
    let mut out = String::with_capacity(truncated.len() + pad);
    out.push_str(&truncated);
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Remove terminal control characters (including ESC, so no escape sequence
/// can survive) while keeping newlines and tabs.
///
/// Catalog text comes from user-supplied seed files and is drawn straight
/// into the terminal.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let keep = |c: char| !c.is_control() || c == '\n' || c == '\t';
    if s.chars().all(keep) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|&c| keep(c)).collect())
}

/// Collapse a possibly multi-line string onto one line for list rows.
pub fn single_line(s: &str) -> Cow<'_, str> {
    let cleaned = strip_control_chars(s);
    if !cleaned.contains(['\n', '\t']) {
        return cleaned;
    }
    Cow::Owned(cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}
