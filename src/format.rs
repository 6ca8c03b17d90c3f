//! Bounded, escaped rendering of captured argument values.
//!
//! [`format_argument`] produces the inline markup shown in a back-trace. Long strings are
//! abbreviated and arrays collapsed to their size; the complete value is kept in the `title`
//! attribute, rendered by [`format_value`].

use crate::models::{char_len, escape_html, truncate_chars, Argument, ArrayKey};
use std::fmt::Write;

/// Strings are cut to this many characters before anything else happens to them.
pub const MAX_ARGUMENT_LENGTH: usize = 10_000;

/// Strings longer than this are abbreviated in the inline rendering.
pub const ABBREVIATION_THRESHOLD: usize = 120;

/// Number of characters kept when abbreviating a string.
pub const ABBREVIATED_LENGTH: usize = 100;

/// Arrays nested this deep are summarized by their size.
pub const MAX_ARRAY_DEPTH: usize = 3;

/// Render an argument as inline report markup.
pub fn format_argument(arg: &Argument) -> String {
    match arg {
        Argument::Null => r#"<span class="keyword">NULL</span>"#.into(),
        Argument::Bool(value) => format!(r#"<span class="keyword">{}</span>"#, value),
        Argument::Number(number) => format!("<span class='number'>{}</span>", number),
        Argument::String(value) => {
            let value = truncate_chars(value, MAX_ARGUMENT_LENGTH);
            if char_len(value) > ABBREVIATION_THRESHOLD {
                format!(
                    "<span class='string' title='{}'>&quot;{}...&quot;</span>",
                    escape_html(value),
                    escape_html(truncate_chars(value, ABBREVIATED_LENGTH))
                )
            } else {
                format!("<span class='string'>&quot;{}&quot;</span>", escape_html(value))
            }
        }
        Argument::Array(entries) => format!(
            "<span class='array' title='{}'>Array({})</span>",
            escape_html(&format_value(arg, 0)),
            entries.len()
        ),
        Argument::Object { type_name } => format!("Object of {}", escape_html(type_name)),
    }
}

/// Render an argument as plain, unescaped text.
///
/// Arrays are expanded entry by entry until `depth` reaches [`MAX_ARRAY_DEPTH`]; from there on
/// only their size is shown.
pub fn format_value(arg: &Argument, depth: usize) -> String {
    match arg {
        Argument::Null => "NULL".into(),
        Argument::Bool(value) => value.to_string(),
        Argument::Number(number) => number.to_string(),
        Argument::String(value) => format!("\"{}\"", truncate_chars(value, MAX_ARGUMENT_LENGTH)),
        Argument::Array(entries) if depth >= MAX_ARRAY_DEPTH => format!("Array({})", entries.len()),
        Argument::Array(entries) => {
            let mut text = format!("array({}) [", entries.len());
            for (key, value) in entries {
                text.push('\n');
                match key {
                    ArrayKey::Str(key) => {
                        let _ = write!(text, "\"{}\"", key);
                    }
                    ArrayKey::Int(key) => {
                        let _ = write!(text, "{}", key);
                    }
                }
                text.push_str(" => ");
                text.push_str(&format_value(value, depth + 1));
                text.push(',');
            }
            if !entries.is_empty() {
                text.push('\n');
            }
            text.push(']');
            text
        }
        Argument::Object { type_name } => format!("Object of {}", type_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Number;
    use test_case::test_case;

    fn nested(levels: usize) -> Argument {
        (0..levels).fold(Argument::from(vec![1]), |inner, _| Argument::from(vec![inner]))
    }

    #[test_case(Argument::Null, r#"<span class="keyword">NULL</span>"# ; "null value")]
    #[test_case(Argument::Bool(true), r#"<span class="keyword">true</span>"# ; "bool true")]
    #[test_case(Argument::Bool(false), r#"<span class="keyword">false</span>"# ; "bool false")]
    #[test_case(Argument::Number(Number::Int(5)), "<span class='number'>5</span>" ; "int")]
    #[test_case(Argument::Number(Number::Float(0.25)), "<span class='number'>0.25</span>" ; "float")]
    #[test_case(Argument::from("a<b"), "<span class='string'>&quot;a&lt;b&quot;</span>" ; "string")]
    #[test_case(Argument::object("Db\\Connection"), "Object of Db\\Connection" ; "object")]
    #[test_case(Argument::from(Vec::<i64>::new()), "<span class='array' title='array(0) []'>Array(0)</span>" ; "empty array")]
    fn inline(arg: Argument, expected: &'static str) {
        assert_eq!(expected, format_argument(&arg));
    }

    #[test]
    fn string_at_threshold_is_not_abbreviated() {
        let value = "x".repeat(ABBREVIATION_THRESHOLD);
        assert_eq!(
            format!("<span class='string'>&quot;{}&quot;</span>", value),
            format_argument(&Argument::from(value.as_str()))
        );
    }

    #[test]
    fn long_string_is_abbreviated_with_full_text_in_title() {
        let value = format!("{}{}", "a".repeat(100), "b".repeat(21));
        assert_eq!(
            format!(
                "<span class='string' title='{}'>&quot;{}...&quot;</span>",
                value,
                "a".repeat(100)
            ),
            format_argument(&Argument::from(value))
        );
    }

    #[test]
    fn very_long_string_is_truncated_first() {
        let value = format!("{}{}", "a".repeat(MAX_ARGUMENT_LENGTH), "TAIL");
        let rendered = format_argument(&Argument::from(value));
        assert!(!rendered.contains("TAIL"));
        assert!(rendered.contains(&format!("title='{}'", "a".repeat(MAX_ARGUMENT_LENGTH))));
    }

    #[test]
    fn abbreviation_counts_characters() {
        let value = "ü".repeat(ABBREVIATION_THRESHOLD);
        assert!(!format_argument(&Argument::from(value)).contains("title"));
    }

    #[test]
    fn readable_array() {
        let arg = Argument::array([
            (ArrayKey::from("name"), Argument::from("o'neil")),
            (ArrayKey::from(3i64), Argument::from(2.5)),
            (ArrayKey::from("flag"), Argument::Null),
            (ArrayKey::from("db"), Argument::object("Pdo")),
        ]);
        assert_eq!(
            "array(4) [\n\"name\" => \"o'neil\",\n3 => 2.5,\n\"flag\" => NULL,\n\"db\" => Object of Pdo,\n]",
            format_value(&arg, 0)
        );
    }

    #[test]
    fn nested_arrays_descend_into_the_nested_value() {
        let arg = Argument::array([
            ("outer", Argument::from("o")),
            ("inner", Argument::from(vec!["i"])),
        ]);
        assert_eq!(
            "array(2) [\n\"outer\" => \"o\",\n\"inner\" => array(1) [\n0 => \"i\",\n],\n]",
            format_value(&arg, 0)
        );
    }

    #[test]
    fn nested_strings_are_truncated() {
        let long = format!("{}{}", "a".repeat(MAX_ARGUMENT_LENGTH), "TAIL");
        let arg = Argument::array([("sql", Argument::from(long))]);
        assert_eq!(
            format!("array(1) [\n\"sql\" => \"{}\",\n]", "a".repeat(MAX_ARGUMENT_LENGTH)),
            format_value(&arg, 0)
        );
    }

    #[test]
    fn recursion_stops_at_max_depth() {
        assert_eq!(
            "array(1) [\n0 => array(1) [\n0 => array(1) [\n0 => Array(1),\n],\n],\n]",
            format_value(&nested(5), 0)
        );
        assert_eq!("Array(1)", format_value(&nested(5), MAX_ARRAY_DEPTH));
    }

    #[test]
    fn array_markup_escapes_the_readable_text() {
        let rendered = format_argument(&Argument::from(vec!["<script>"]));
        assert_eq!(
            "<span class='array' title='array(1) [\n0 =&gt; &quot;&lt;script&gt;&quot;,\n]'>Array(1)</span>",
            rendered
        );
    }
}
