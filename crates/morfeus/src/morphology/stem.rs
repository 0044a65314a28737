// Stemming

use crate::checker::{Checker, WordMatch};

use super::word_matches;

/// Distinct stems of `word`, in analysis order.
///
/// A simple word yields its root (or the root's `st:` field). A compound
/// keeps its earlier parts as written and replaces the last one by its
/// stem.
pub fn stem(checker: &Checker<'_>, word: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for found in word_matches(checker, word) {
        let stem = match &found {
            WordMatch::Simple(m) => m.stem(),
            WordMatch::Compound(c) => {
                let Some((last, head)) = c.parts.split_last() else {
                    continue;
                };
                let mut stem: String = head.iter().map(|p| p.surface.as_str()).collect();
                stem.push_str(&last.matched.stem());
                stem
            }
        };
        if !out.contains(&stem) {
            out.push(stem);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{AFF, DIC};
    use super::*;
    use crate::checker::test_support::load;

    fn stems(word: &str) -> Vec<String> {
        let (rules, dict) = load(AFF, DIC);
        stem(&Checker::new(&rules, &dict), word)
    }

    #[test]
    fn affixes_are_removed() {
        assert_eq!(stems("tried"), ["try"]);
        assert_eq!(stems("unlocked"), ["lock"]);
        assert_eq!(stems("Dogs"), ["dog"]);
    }

    #[test]
    fn st_field_overrides_the_spelling() {
        assert_eq!(stems("drank"), ["drink"]);
    }

    #[test]
    fn compound_stem_keeps_leading_parts() {
        assert_eq!(stems("sunshine"), ["sunshine"]);
    }

    #[test]
    fn unknown_word_has_no_stem() {
        assert!(stems("xyzzy").is_empty());
    }
}
