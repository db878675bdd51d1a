//! Small string helpers shared across the console

use unicode_width::UnicodeWidthChar;

/// Cut a string to at most `max_bytes` without splitting a UTF-8 sequence.
///
/// Walks back from `max_bytes` to the nearest character boundary, so the
/// slice is always valid UTF-8 and never longer than the limit. Boundary 0
/// always exists, so the walk terminates.
pub fn truncate_utf8_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Fit a string into `max_width` terminal columns, appending `…` when truncated.
///
/// Width is measured in display columns, not bytes, so CJK text (two columns
/// per character) truncates correctly in table cells.
pub fn fit_to_width(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let target = max_width - 1;
    let mut current = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if current + w > target {
            break;
        }
        current += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Fit a string to exactly `width` columns, truncating or space-padding.
///
/// Table cells mixing ASCII and CJK stay aligned because the padding is
/// computed from display columns, not character counts.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = fit_to_width(s, width);
    let used: usize = out.chars().filter_map(UnicodeWidthChar::width).sum();
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_is_unchanged() {
        assert_eq!(truncate_utf8_safe("menu", 10), "menu");
        assert_eq!(truncate_utf8_safe("", 5), "");
    }

    #[test]
    fn test_truncate_cuts_ascii_at_the_limit() {
        assert_eq!(truncate_utf8_safe("table for two", 5), "table");
    }

    #[test]
    fn test_truncate_never_splits_a_hangul_syllable() {
        // Three bytes per syllable; a 4-byte budget fits only the first
        assert_eq!(truncate_utf8_safe("일이삼", 4), "일");
        assert_eq!(truncate_utf8_safe("일이삼", 6), "일이");
        assert_eq!(truncate_utf8_safe("일이삼", 9), "일이삼");
    }

    #[test]
    fn test_fit_short_string_unchanged() {
        assert_eq!(fit_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_fit_ascii_truncates_with_ellipsis() {
        assert_eq!(fit_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_fit_wide_chars_count_two_columns() {
        // Each hangul syllable is two columns wide
        assert_eq!(fit_to_width("강남불백", 8), "강남불백");
        assert_eq!(fit_to_width("강남불백집", 8), "강남불…");
    }

    #[test]
    fn test_fit_zero_width() {
        assert_eq!(fit_to_width("hello", 0), "");
    }

    #[test]
    fn test_pad_fills_to_exact_columns() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_pad_accounts_for_wide_chars() {
        // "강남불…" is seven columns, so one space brings it to eight
        assert_eq!(pad_to_width("강남불백집", 8), "강남불… ");
        assert_eq!(pad_to_width("한식", 6), "한식  ");
    }
}
