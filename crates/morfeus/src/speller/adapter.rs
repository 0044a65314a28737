// Bridges the dictionary checker to the Speller interface

use morfeus_core::enums::SpellResult;

use crate::checker::{Checker, WordMatch};
use crate::speller::Speller;

/// Adapts a [`Checker`] to the [`Speller`] trait.
///
/// Suggestion candidates are validated through this adapter, which also
/// refuses words whose roots carry the NOSUGGEST flag (when built with
/// [`DictionarySpeller::for_suggestions`]).
pub struct DictionarySpeller<'a> {
    checker: Checker<'a>,
    skip_no_suggest: bool,
    allow_compound: bool,
}

impl<'a> DictionarySpeller<'a> {
    pub fn new(checker: Checker<'a>) -> Self {
        Self {
            checker,
            skip_no_suggest: false,
            allow_compound: true,
        }
    }

    /// Speller for validating suggestion candidates.
    pub fn for_suggestions(checker: Checker<'a>, allow_compound: bool) -> Self {
        Self {
            checker,
            skip_no_suggest: true,
            allow_compound,
        }
    }

    pub fn checker(&self) -> &Checker<'a> {
        &self.checker
    }
}

impl Speller for DictionarySpeller<'_> {
    fn spell(&self, word: &[char]) -> SpellResult {
        if word.is_empty() {
            return SpellResult::Failed;
        }
        let text: String = word.iter().collect();
        let verdict = self.checker.check(&text, self.allow_compound);
        let Some(found) = verdict.found else {
            return SpellResult::Failed;
        };
        let no_suggest = self.checker.rules.options.no_suggest;
        if self.skip_no_suggest && found.roots().iter().any(|r| r.has_flag_opt(no_suggest)) {
            return SpellResult::Failed;
        }
        match found {
            WordMatch::Simple(_) => SpellResult::Ok,
            WordMatch::Compound(_) => SpellResult::Compound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::load;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn maps_match_kinds() {
        let (rules, dict) = load("COMPOUNDFLAG X\n", "2\nfoo/X\nbar/X\n");
        let speller = DictionarySpeller::new(Checker::new(&rules, &dict));
        assert_eq!(speller.spell(&chars("foo")), SpellResult::Ok);
        assert_eq!(speller.spell(&chars("foobar")), SpellResult::Compound);
        assert_eq!(speller.spell(&chars("fooba")), SpellResult::Failed);
        assert_eq!(speller.spell(&[]), SpellResult::Failed);
    }

    #[test]
    fn no_suggest_roots_are_refused_for_suggestions() {
        let (rules, dict) = load("NOSUGGEST !\n", "1\ndamn/!\n");
        let checker = Checker::new(&rules, &dict);
        assert_eq!(DictionarySpeller::new(checker).spell(&chars("damn")), SpellResult::Ok);
        assert_eq!(
            DictionarySpeller::for_suggestions(checker, true).spell(&chars("damn")),
            SpellResult::Failed
        );
    }
}
