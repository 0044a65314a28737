// Morphological analysis, stemming and generation
//
// Everything here is derived from the checker's matches: an analysis is
// the root's and the applied affixes' fields, a stem is the root spelling
// (or an explicit `st:` field), and generation expands the roots of one
// word and keeps the forms whose inflection matches an example.

mod generate;
mod stem;

pub use generate::{generate, generate_from_description};
pub use stem::stem;

use hashbrown::HashSet;
use morfeus_core::analysis::MorphDescription;
use morfeus_core::case::{case_variants, detect_case};
use morfeus_core::character::char_len;
use morfeus_core::enums::{MAX_WORD_LEN, SpellInfo};

use crate::checker::{Checker, WordMatch};

/// Trait for morphological analyzers.
pub trait Analyzer {
    /// Every analysis of `word`, without duplicates.
    fn analyze(&self, word: &str) -> Vec<MorphDescription>;
}

impl Analyzer for Checker<'_> {
    fn analyze(&self, word: &str) -> Vec<MorphDescription> {
        analyze(self, word)
    }
}

/// Analyses of `word`, one description per distinct match.
pub fn analyze(checker: &Checker<'_>, word: &str) -> Vec<MorphDescription> {
    let mut seen = HashSet::new();
    word_matches(checker, word)
        .iter()
        .map(WordMatch::description)
        .filter(|desc| seen.insert(desc.clone()))
        .collect()
}

/// All matches of `word` over its case variants.
///
/// A variant that the checker rejects as forbidden ends the walk. Roots
/// flagged KEEPCASE only count for the spelling as given.
pub(crate) fn word_matches<'a>(checker: &Checker<'a>, word: &str) -> Vec<WordMatch<'a>> {
    let word = word.trim();
    if word.is_empty() || char_len(word) > MAX_WORD_LEN {
        return Vec::new();
    }
    let cleaned = checker.rules.options.strip_ignored(word);
    let base = match cleaned.trim_end_matches('.') {
        "" => cleaned.as_str(),
        stripped => stripped,
    };
    let keep_case = checker.rules.options.keep_case;

    let mut out = Vec::new();
    for (i, variant) in case_variants(base, detect_case(base)).iter().enumerate() {
        let verdict = checker.check(variant, true);
        if verdict.info.contains(SpellInfo::FORBIDDEN) {
            break;
        }
        let Some(found) = verdict.found else {
            continue;
        };
        let mut matches = match found {
            WordMatch::Simple(_) => checker
                .simple_matches(variant)
                .into_iter()
                .map(WordMatch::Simple)
                .collect(),
            compound @ WordMatch::Compound(_) => vec![compound],
        };
        if i > 0 {
            matches.retain(|m| !m.roots().iter().any(|r| r.has_flag_opt(keep_case)));
        }
        out.extend(matches);
    }
    out
}


#[cfg(test)]
mod tests {
    use super::fixtures::{AFF, DIC};
    use super::*;
    use crate::checker::test_support::load;

    fn lines(word: &str) -> Vec<String> {
        let (rules, dict) = load(AFF, DIC);
        let checker = Checker::new(&rules, &dict);
        Analyzer::analyze(&checker, word)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn affixed_word_lists_root_and_affix_fields() {
        assert_eq!(lines("cats"), ["st:cat po:noun is:plural"]);
        assert_eq!(lines("tried"), ["st:try po:verb is:past"]);
        assert_eq!(lines("unlocked"), ["st:lock po:verb ip:neg is:past"]);
    }

    #[test]
    fn explicit_stem_field_is_not_duplicated() {
        assert_eq!(lines("drank"), ["po:verb st:drink is:past"]);
    }

    #[test]
    fn capitalised_input_is_analysed_through_lowercase() {
        assert_eq!(lines("Cats"), ["st:cat po:noun is:plural"]);
        assert_eq!(lines("cats."), ["st:cat po:noun is:plural"]);
    }

    #[test]
    fn compound_lists_every_part() {
        assert_eq!(
            lines("sunshine"),
            ["pa:sun st:sun po:noun pa:shine st:shine po:noun"]
        );
    }

    #[test]
    fn unknown_forbidden_and_keepcase_words_have_no_analysis() {
        assert!(lines("catz").is_empty());
        assert!(lines("gonner").is_empty());
        assert!(lines("").is_empty());
        assert_eq!(lines("iOS"), ["st:iOS po:noun"]);
        assert!(lines("IOS").is_empty());
    }
}
