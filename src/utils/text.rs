use unicode_width::UnicodeWidthStr;

/// Count how many terminal rows `text` occupies when wrapped at `max_width` columns.
/// Uses Unicode display width so emoji and CJK characters are measured correctly.
pub fn wrapped_line_count(text: &str, max_width: u16) -> u16 {
    let max_width = max_width as usize;
    if max_width == 0 {
        return 1;
    }
    text.split('\n')
        .map(|line| {
            let w = UnicodeWidthStr::width(line);
            if w == 0 { 1 } else { ((w - 1) / max_width + 1) as u16 }
        })
        .sum()
}

/// Truncate `text` to at most `max_width` display columns, appending `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_wrapped_rows() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghij", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghijk", 10), 2);
        assert_eq!(wrapped_line_count("a\nb", 10), 2);
        assert_eq!(wrapped_line_count("anything", 0), 1);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }
}
