// Character set handling: the `SET` directive and byte decoding

use encoding_rs::{Encoding, UTF_8};

use crate::{FileKind, ParseError};

/// Find the argument of the first `SET` line without decoding the file.
/// Directive lines are ASCII in every supported code page.
pub fn find_set_label(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    bytes.split(|&b| b == b'\n').find_map(|line| {
        let line = std::str::from_utf8(line).ok()?.trim();
        let rest = line.strip_prefix("SET")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        rest.split_whitespace().next().map(str::to_string)
    })
}

/// Map a rule-file encoding label to an `encoding_rs` encoding.
pub fn encoding_for(label: &str) -> Option<&'static Encoding> {
    let normalized = label.trim().to_ascii_lowercase();
    let normalized = match normalized.as_str() {
        "utf-8" | "utf8" => return Some(UTF_8),
        "microsoft-cp1251" => "windows-1251".to_string(),
        "tis620-2533" => "tis-620".to_string(),
        other => match other.strip_prefix("iso8859-") {
            Some(part) => format!("iso-8859-{part}"),
            None => other.to_string(),
        },
    };
    Encoding::for_label(normalized.as_bytes())
}

/// Decode file bytes using the rule file's `SET` label. A byte order mark
/// overrides the label and is removed.
pub fn decode(bytes: &[u8], label: &str, file: FileKind) -> Result<String, ParseError> {
    let encoding = encoding_for(label).ok_or_else(|| ParseError::UnsupportedEncoding {
        file,
        label: label.to_string(),
    })?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!(
            "{file}: malformed {} sequences replaced while decoding",
            used.name()
        );
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_set_after_bom_and_comments() {
        let aff = b"\xEF\xBB\xBF# comment\nSET UTF-8\nTRY abc\n";
        assert_eq!(find_set_label(aff).as_deref(), Some("UTF-8"));
        assert_eq!(find_set_label(b"SETTINGS x\n"), None);
    }

    #[test]
    fn hunspell_labels_map_to_encodings() {
        assert_eq!(encoding_for("UTF-8"), Some(UTF_8));
        assert!(encoding_for("ISO8859-15").is_some());
        assert!(encoding_for("microsoft-cp1251").is_some());
        assert!(encoding_for("KOI8-R").is_some());
        assert!(encoding_for("no-such-set").is_none());
    }

    #[test]
    fn decodes_latin1_bytes() {
        let text = decode(b"k\xE4si", "ISO8859-1", FileKind::Dic).unwrap();
        assert_eq!(text, "k\u{00E4}si");
    }

    #[test]
    fn unknown_label_is_fatal() {
        assert!(matches!(
            decode(b"x", "bogus", FileKind::Aff),
            Err(ParseError::UnsupportedEncoding { .. })
        ));
    }
}
