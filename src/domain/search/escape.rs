//! Escaping of user input embedded in directory search filters.

/// Escapes the RFC 4515 filter metacharacters in `value`.
///
/// `*`, `(`, `)`, `\` and NUL are replaced by their `\XX` hex form so that
/// an answer can only ever match literally.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\5c"),
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\0' => escaped.push_str("\\00"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Reverses [`escape_filter_value`].
///
/// Any `\XX` hex pair is decoded; a backslash not followed by two hex
/// digits is kept as is.
pub fn unescape_filter_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let pair = bytes.get(i + 1..i + 3).filter(|_| bytes[i] == b'\\');
        match pair
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            Some(byte) => {
                decoded.push(byte);
                i += 3;
            }
            None => {
                decoded.push(bytes[i]);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_filter_value("Jean-Pierre"), "Jean-Pierre");
        assert_eq!(escape_filter_value("Émile"), "Émile");
    }

    #[test]
    fn metacharacters_are_hex_escaped() {
        assert_eq!(escape_filter_value("*"), "\\2a");
        assert_eq!(escape_filter_value("a(b)c"), "a\\28b\\29c");
        assert_eq!(escape_filter_value("back\\slash"), "back\\5cslash");
        assert_eq!(escape_filter_value("nul\0"), "nul\\00");
    }

    #[test]
    fn injection_attempt_is_neutralized() {
        assert_eq!(
            escape_filter_value("x)(objectClass=*"),
            "x\\29\\28objectClass=\\2a"
        );
    }

    #[test]
    fn unescape_decodes_hex_pairs() {
        assert_eq!(unescape_filter_value("a\\28b\\29\\2a"), "a(b)*");
        assert_eq!(unescape_filter_value("trailing\\"), "trailing\\");
        assert_eq!(unescape_filter_value("\\zz"), "\\zz");
    }

    proptest! {
        #[test]
        fn unescape_reverses_escape(value in ".*") {
            prop_assert_eq!(unescape_filter_value(&escape_filter_value(&value)), value);
        }

        #[test]
        fn escaped_value_has_no_raw_metacharacters(value in ".*") {
            let escaped = escape_filter_value(&value);
            prop_assert!(!escaped.contains('*'));
            prop_assert!(!escaped.contains('('));
            prop_assert!(!escaped.contains(')'));
            prop_assert!(!escaped.contains('\0'));
        }
    }
}
