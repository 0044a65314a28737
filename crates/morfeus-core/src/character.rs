// Character classification and case mapping helpers

/// Convert a character to its simple lowercase equivalent.
///
/// Characters whose lowercase form expands to several characters map to
/// the first of them, so word lengths never change.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c != simple_lower(c)
}

/// Check whether a character is a lowercase letter.
pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

/// Lowercase every character of a string (one-to-one mapping).
pub fn to_lower(word: &str) -> String {
    word.chars().map(simple_lower).collect()
}

/// Uppercase every character of a string (one-to-one mapping).
pub fn to_upper(word: &str) -> String {
    word.chars().map(simple_upper).collect()
}

/// Uppercase the first character and keep the rest unchanged.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_upper(first));
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn to_title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_upper(first));
            out.extend(chars.map(simple_lower));
            out
        }
        None => String::new(),
    }
}

/// Number of characters (not bytes) in a string.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Byte offset of the character at `char_index`, or `word.len()` if the
/// index is at or past the end.
pub fn byte_offset(word: &str, char_index: usize) -> usize {
    word.char_indices()
        .nth(char_index)
        .map_or(word.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_case_mapping() {
        assert_eq!(simple_lower('A'), 'a');
        assert_eq!(simple_upper('\u{00E4}'), '\u{00C4}');
        assert_eq!(simple_lower('1'), '1');
    }

    #[test]
    fn upper_and_lower_classification() {
        assert!(is_upper('Q'));
        assert!(!is_upper('q'));
        assert!(is_lower('\u{00F6}'));
        assert!(!is_upper('-') && !is_lower('-'));
    }

    #[test]
    fn string_case_helpers() {
        assert_eq!(to_lower("HeLLo"), "hello");
        assert_eq!(to_upper("k\u{00E4}si"), "K\u{00C4}SI");
        assert_eq!(capitalize("oSLO"), "OSLO");
        assert_eq!(to_title("oSLO"), "Oslo");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn char_offsets_respect_utf8() {
        let w = "k\u{00E4}si";
        assert_eq!(char_len(w), 4);
        assert_eq!(byte_offset(w, 2), 3);
        assert_eq!(byte_offset(w, 9), w.len());
    }
}
