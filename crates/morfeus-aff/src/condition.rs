// Affix conditions: a tiny character-class automaton
//
// A condition such as `[^aeiou]y` constrains the characters of the root at
// the affix boundary. Prefix conditions are read from the start of the
// root, suffix conditions from its end. Matching walks the pattern and the
// word in lockstep and never allocates.

use std::fmt;

/// One position of a condition pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    /// `.` -- any single character.
    Any,
    /// A literal character.
    Char(char),
    /// `[...]` or `[^...]`.
    Class { negated: bool, members: Box<[char]> },
}

impl Element {
    fn matches(&self, c: char) -> bool {
        match self {
            Element::Any => true,
            Element::Char(expected) => *expected == c,
            Element::Class { negated, members } => members.contains(&c) != *negated,
        }
    }
}

/// A `[` without its closing `]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unterminated character class in condition `{0}`")]
pub struct ConditionError(pub String);

/// A parsed affix condition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    elements: Vec<Element>,
    source: String,
}

impl Condition {
    /// Parse a condition. A lone `.` is the empty condition and always
    /// matches.
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        if text == "." || text.is_empty() {
            return Ok(Self::default());
        }
        let mut elements = Vec::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => elements.push(Element::Any),
                '[' => {
                    let mut negated = false;
                    let mut members = Vec::new();
                    let mut closed = false;
                    for (i, m) in chars.by_ref().enumerate() {
                        match m {
                            ']' => {
                                closed = true;
                                break;
                            }
                            '^' if i == 0 => negated = true,
                            _ => members.push(m),
                        }
                    }
                    if !closed {
                        return Err(ConditionError(text.to_string()));
                    }
                    elements.push(Element::Class {
                        negated,
                        members: members.into_boxed_slice(),
                    });
                }
                _ => elements.push(Element::Char(c)),
            }
        }
        Ok(Self {
            elements,
            source: text.to_string(),
        })
    }

    /// Number of characters the condition inspects.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Test the condition against the start of `word`.
    ///
    /// A condition longer than the word never matches.
    pub fn matches_prefix(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.elements
            .iter()
            .all(|e| chars.next().is_some_and(|c| e.matches(c)))
    }

    /// Test the condition against the end of `word`, scanning backwards.
    pub fn matches_suffix(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.elements
            .iter()
            .rev()
            .all(|e| chars.next().is_some_and(|c| e.matches(c)))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            f.write_str(".")
        } else {
            f.write_str(&self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(s: &str) -> Condition {
        Condition::parse(s).unwrap()
    }

    #[test]
    fn dot_alone_is_empty_and_matches_anything() {
        let c = cond(".");
        assert!(c.is_empty());
        assert!(c.matches_suffix(""));
        assert!(c.matches_prefix("abc"));
    }

    #[test]
    fn negated_class_before_literal() {
        let c = cond("[^aeiou]y");
        assert_eq!(c.len(), 2);
        assert!(c.matches_suffix("try"));
        assert!(!c.matches_suffix("play"));
        assert!(!c.matches_suffix("tree"));
    }

    #[test]
    fn class_and_wildcard_in_prefix_position() {
        let c = cond("[abc].x");
        assert!(c.matches_prefix("bqxyz"));
        assert!(!c.matches_prefix("dqx"));
    }

    #[test]
    fn dot_inside_class_is_literal() {
        let c = cond("[.]");
        assert!(c.matches_prefix("."));
        assert!(!c.matches_prefix("a"));
    }

    #[test]
    fn oversized_condition_never_matches() {
        let c = cond("[^aeiou]y");
        assert!(!c.matches_suffix("y"));
        assert!(!c.matches_prefix(""));
    }

    #[test]
    fn classes_consume_whole_code_points() {
        let c = cond("[\u{00E4}\u{00F6}]n");
        assert!(c.matches_suffix("s\u{00E4}n"));
        assert!(c.matches_suffix("\u{00F6}n"));
        assert!(!c.matches_suffix("an"));
    }

    #[test]
    fn unterminated_class_is_an_error() {
        assert!(Condition::parse("[ab").is_err());
    }
}
