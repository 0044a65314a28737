// Input/output character conversion (ICONV / OCONV)

use std::borrow::Cow;

/// A list of `from -> to` replacements applied left to right, preferring
/// the longest `from` at each position.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    pairs: Vec<(String, String)>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if from.is_empty() {
            return;
        }
        self.pairs.push((from, to.into()));
        // Longest first so the first hit at a position is the longest one.
        self.pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Convert `word`, borrowing it unchanged when nothing applies.
    pub fn convert<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.pairs.is_empty() {
            return Cow::Borrowed(word);
        }
        let mut out = String::with_capacity(word.len());
        let mut changed = false;
        let mut pos = 0;
        while pos < word.len() {
            let rest = &word[pos..];
            match self.pairs.iter().find(|(from, _)| rest.starts_with(from.as_str())) {
                Some((from, to)) => {
                    out.push_str(to);
                    pos += from.len();
                    changed = true;
                }
                None => {
                    let c = rest.chars().next().unwrap_or_default();
                    out.push(c);
                    pos += c.len_utf8();
                }
            }
        }
        if changed {
            Cow::Owned(out)
        } else {
            Cow::Borrowed(word)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_converter_borrows() {
        let c = Converter::new();
        assert!(matches!(c.convert("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn longest_match_wins() {
        let mut c = Converter::new();
        c.push("a", "1");
        c.push("ab", "2");
        assert_eq!(c.convert("abac"), "21c");
    }

    #[test]
    fn converts_typographic_apostrophe() {
        let mut c = Converter::new();
        c.push("\u{2019}", "'");
        assert_eq!(c.convert("don\u{2019}t"), "don't");
        assert_eq!(c.len(), 1);
    }
}
