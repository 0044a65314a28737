// PHONE table: rule-based phonetic transcription
//
// Supported search syntax: literal letters, `(ABC)` one-of groups,
// trailing `-` marks (characters matched but left for the next rule),
// `^` (word start), `$` (word end), `<` (rewrite in place and rescan)
// and a trailing priority digit, which is ignored. `_` as replacement
// means the empty string. Words are transcribed in uppercase.

use morfeus_core::character::simple_upper;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pattern {
    Char(char),
    OneOf(Box<[char]>),
}

impl Pattern {
    fn matches(&self, c: char) -> bool {
        match self {
            Pattern::Char(p) => *p == c,
            Pattern::OneOf(set) => set.contains(&c),
        }
    }
}

#[derive(Debug, Clone)]
struct PhoneRule {
    search: Vec<Pattern>,
    lookahead: usize,
    at_start: bool,
    at_end: bool,
    rescan: bool,
    replacement: Vec<char>,
}

impl PhoneRule {
    fn parse(search: &str, replacement: &str) -> Option<Self> {
        let mut patterns = Vec::new();
        let mut lookahead = 0;
        let mut at_start = false;
        let mut at_end = false;
        let mut rescan = false;
        let mut chars = search.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '(' => {
                    let group: Vec<char> = chars.by_ref().take_while(|&g| g != ')').collect();
                    if group.is_empty() {
                        return None;
                    }
                    patterns.push(Pattern::OneOf(group.into_boxed_slice()));
                }
                '-' => lookahead += 1,
                '^' => at_start = true,
                '$' => at_end = true,
                '<' => rescan = true,
                d if d.is_ascii_digit() && chars.peek().is_none() => {}
                _ => patterns.push(Pattern::Char(simple_upper(c))),
            }
        }
        if patterns.is_empty() || lookahead > patterns.len() {
            return None;
        }
        let replacement = if replacement == "_" {
            Vec::new()
        } else {
            replacement.chars().map(simple_upper).collect()
        };
        Some(Self {
            search: patterns,
            lookahead,
            at_start,
            at_end,
            rescan,
            replacement,
        })
    }

    fn matches_at(&self, word: &[char], pos: usize) -> bool {
        if self.at_start && pos != 0 {
            return false;
        }
        let end = pos + self.search.len();
        if end > word.len() || (self.at_end && end != word.len()) {
            return false;
        }
        self.search
            .iter()
            .zip(&word[pos..end])
            .all(|(p, &c)| p.matches(c))
    }

    fn consumed(&self) -> usize {
        self.search.len() - self.lookahead
    }
}

/// An ordered list of phonetic rules; the first rule matching at a
/// position wins.
#[derive(Debug, Clone, Default)]
pub struct PhoneTable {
    rules: Vec<PhoneRule>,
}

impl PhoneTable {
    /// Add a rule. Returns `false` if the search pattern is malformed.
    pub fn push_rule(&mut self, search: &str, replacement: &str) -> bool {
        match PhoneRule::parse(search, replacement) {
            Some(rule) => {
                self.rules.push(rule);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Transcribe `word` into its phonetic code.
    pub fn transcribe(&self, word: &str) -> String {
        let mut chars: Vec<char> = word.chars().map(simple_upper).collect();
        let mut out = String::with_capacity(word.len());
        let mut pos = 0;
        // Rescanning rules could loop forever on a bad table.
        let mut budget = chars.len() * 8 + 16;

        while pos < chars.len() && budget > 0 {
            budget -= 1;
            let rule = self.rules.iter().find(|r| r.matches_at(&chars, pos));
            match rule {
                Some(rule) if rule.rescan => {
                    let end = pos + rule.consumed();
                    chars.splice(pos..end, rule.replacement.iter().copied());
                }
                Some(rule) => {
                    out.extend(rule.replacement.iter());
                    pos += rule.consumed().max(1);
                }
                None => {
                    out.push(chars[pos]);
                    pos += 1;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rules: &[(&str, &str)]) -> PhoneTable {
        let mut t = PhoneTable::default();
        for (s, r) in rules {
            assert!(t.push_rule(s, r), "bad rule {s}");
        }
        t
    }

    #[test]
    fn literal_rules_replace_in_order() {
        let t = table(&[("PH", "F"), ("CK", "K")]);
        assert_eq!(t.transcribe("phack"), "FAK");
    }

    #[test]
    fn lookahead_keeps_following_characters() {
        let t = table(&[("AH(AEIOUY)-", "A"), ("H", "_")]);
        assert_eq!(t.transcribe("aha"), "AA");
        assert_eq!(t.transcribe("ahx"), "AX");
    }

    #[test]
    fn anchors_restrict_position() {
        let t = table(&[("^KN", "N"), ("E$", "_")]);
        assert_eq!(t.transcribe("knee"), "NE");
        assert_eq!(t.transcribe("akn"), "AKN");
    }

    #[test]
    fn rescan_rewrites_input() {
        let t = table(&[("GH<", "F"), ("F", "V")]);
        assert_eq!(t.transcribe("gh"), "V");
    }

    #[test]
    fn malformed_rule_is_rejected() {
        let mut t = PhoneTable::default();
        assert!(!t.push_rule("()", "X"));
        assert!(t.is_empty());
    }
}
