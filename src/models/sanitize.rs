/// Returns the longest prefix of `value` that holds at most `max_chars` characters.
///
/// Never splits a code point.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Escapes the five characters with a meaning in HTML text and attribute values.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Inserts `<br />` in front of every line break. `\r\n` and `\n\r` count as one break.
pub(crate) fn nl2br(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' || c == '\n' {
            result.push_str("<br />");
            result.push(c);
            if let Some(&next) = chars.peek() {
                if (next == '\r' || next == '\n') && next != c {
                    result.push(next);
                    chars.next();
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hello", 10, "hello" ; "shorter")]
    #[test_case("hello", 5, "hello" ; "exact")]
    #[test_case("hello", 3, "hel" ; "longer")]
    #[test_case("äöüß", 2, "äö" ; "multi byte")]
    #[test_case("", 0, "" ; "empty")]
    fn truncate(value: &'static str, max: usize, expected: &'static str) {
        assert_eq!(expected, truncate_chars(value, max));
    }

    #[test]
    fn escape_all_special_characters() {
        assert_eq!(
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;",
            escape_html("<a href=\"x\">Tom & Jerry's</a>")
        );
    }

    #[test_case("one\ntwo", "one<br />\ntwo" ; "lf")]
    #[test_case("one\r\ntwo", "one<br />\r\ntwo" ; "crlf")]
    #[test_case("one\n\ntwo", "one<br />\n<br />\ntwo" ; "two lf")]
    #[test_case("one\n\rtwo", "one<br />\n\rtwo" ; "lfcr")]
    #[test_case("no breaks", "no breaks" ; "none")]
    fn line_breaks(value: &'static str, expected: &'static str) {
        assert_eq!(expected, nl2br(value));
    }
}
