// Suggestion generation
//
// Produces spelling correction candidates for misspelled words by applying
// edit operations (swap, deletion, insertion, replacement, ...) validated
// through the speller, then falls back to a whole-dictionary n-gram ranking.
//
//   - `generators`: individual edit-operation generators (SuggestionGenerator trait)
//   - `status`: abort conditions, cost budget, deadline, deduplication
//   - `strategy`: generator order, compound pass and n-gram fallback
//   - `ngram`: similarity ranking over dictionary roots and their affixed forms

pub mod generators;
pub mod ngram;
pub mod status;
pub mod strategy;

use std::time::{Duration, Instant};

use hashbrown::HashSet;
use log::debug;
use morfeus_aff::AffixRuleSet;
use morfeus_core::case::{CaseType, detect_case, set_case};
use morfeus_core::character::{char_len, to_lower, to_title};
use morfeus_core::enums::{MAX_SUGGESTIONS, MAX_WORD_LEN};

use crate::checker::Checker;
use crate::speller::pipeline::{SpellOptions, spell_check};

pub use generators::SuggestionGenerator;
pub use ngram::NgramSuggester;
pub use status::{Suggestion, SuggestionStatus};
pub use strategy::{DEFAULT_MAX_COST, SuggestionStrategy, typing_strategy};

/// Suggestion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestOptions {
    /// Maximum number of suggestions returned.
    pub max_suggestions: usize,
    /// Soft deadline for one request; whatever was found by then is returned.
    pub time_limit: Duration,
    /// Dictionary checks the edit generators may spend.
    pub max_cost: usize,
    /// Rank the whole dictionary by n-gram similarity when the edit
    /// generators find nothing.
    pub ngram_fallback: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
            time_limit: Duration::from_millis(250),
            max_cost: DEFAULT_MAX_COST,
            ngram_fallback: true,
        }
    }
}

/// Ranked spelling corrections for one loaded dictionary.
pub struct SuggestionEngine {
    strategy: SuggestionStrategy,
    options: SuggestOptions,
}

impl SuggestionEngine {
    pub fn new(rules: &AffixRuleSet, options: SuggestOptions) -> Self {
        let mut strategy = typing_strategy(rules, options.max_cost);
        strategy.set_ngram_enabled(options.ngram_fallback);
        Self { strategy, options }
    }

    pub fn options(&self) -> &SuggestOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SuggestOptions) {
        self.strategy.set_max_cost(options.max_cost);
        self.strategy.set_ngram_enabled(options.ngram_fallback);
        self.options = options;
    }

    /// Ranked corrections for `word`, best first.
    ///
    /// Candidates are generated from the case variants of the input,
    /// re-cased to the input's shape where the dictionary accepts that, and
    /// kept only if they pass the full spell pipeline.
    pub fn suggest(&self, checker: &Checker<'_>, spell_options: &SpellOptions, word: &str) -> Vec<String> {
        let trimmed = word.trim();
        if trimmed.is_empty() || char_len(trimmed) > MAX_WORD_LEN || self.options.max_suggestions == 0 {
            return Vec::new();
        }
        let cleaned = checker.rules.options.strip_ignored(trimmed);
        let base = cleaned.trim_end_matches('.');
        if base.is_empty() {
            return Vec::new();
        }
        let dots = &cleaned[base.len()..];
        let case = detect_case(base);

        let accepts = |candidate: &str| {
            candidate
                .split(' ')
                .filter(|part| !part.is_empty())
                .all(|part| spell_check(checker, part, spell_options).0)
        };
        // The spelling a candidate is returned as, if any.
        let finalize = |word: &str| -> Option<String> {
            let recased = set_case(word, case);
            let chosen = if recased != word && accepts(&recased) {
                recased
            } else {
                word.to_string()
            };
            (chosen != base && accepts(&chosen)).then_some(chosen)
        };
        let keep = |word: &str| finalize(word).is_some();

        let deadline = Instant::now() + self.options.time_limit;
        let mut status = SuggestionStatus::new(base, self.options.max_suggestions)
            .with_deadline(deadline)
            .with_filter(&keep);
        status.set_max_compound(checker.rules.options.suggest.max_compound);
        for variant in generation_variants(base, case) {
            if status.should_abort() {
                break;
            }
            status.set_word(&variant);
            self.strategy.generate_edits(checker, &mut status);
        }
        self.strategy.generate_ngram(checker, &mut status);
        if status.timed_out() {
            debug!("suggestion deadline reached for {base}");
        }
        status.sort_suggestions();

        let with_dots = checker.rules.options.suggest.with_dots;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for suggestion in status.into_suggestions() {
            let Some(chosen) = finalize(&suggestion.word) else {
                continue;
            };
            let chosen = if with_dots { format!("{chosen}{dots}") } else { chosen };
            if seen.insert(chosen.clone()) {
                out.push(chosen);
            }
        }
        out.truncate(self.options.max_suggestions);
        out
    }

    /// Only the n-gram ranking, without edit generators or re-casing.
    pub fn ngram_suggest(&self, checker: &Checker<'_>, word: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() || char_len(word) > MAX_WORD_LEN {
            return Vec::new();
        }
        let deadline = Instant::now() + self.options.time_limit;
        let mut status = SuggestionStatus::new(word, self.options.max_suggestions).with_deadline(deadline);
        self.strategy.ngram().generate(checker, &mut status);
        status.sort_suggestions();
        status.into_suggestions().into_iter().map(|s| s.word).collect()
    }
}

/// Spellings of the input the generators run on, in order.
fn generation_variants(word: &str, case: CaseType) -> Vec<String> {
    let mut variants = vec![];
    match case {
        CaseType::NoLetters | CaseType::AllLower | CaseType::Mixed => variants.push(word.to_string()),
        CaseType::FirstUpper | CaseType::MixedFirstUpper => {
            variants.push(word.to_string());
            variants.push(to_lower(word));
        }
        CaseType::AllUpper => {
            variants.push(to_lower(word));
            variants.push(to_title(word));
        }
    }
    variants.dedup();
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::load;

    const AFF: &str = "\
TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ'
KEY qwertyuiop|asdfghjkl|zxcvbnm
NOSUGGEST %
FORBIDDENWORD !
KEEPCASE k
SFX S Y 1
SFX S 0 s .
";
    const DIC: &str = "9\nworld/S\nword/S\nhello\nParis\nNASA\nbadword/!\nswearword/%\niOS/k\ntest/S\n";

    fn engine_suggest(aff: &str, dic: &str, word: &str) -> Vec<String> {
        let (rules, dict) = load(aff, dic);
        let checker = Checker::new(&rules, &dict);
        let engine = SuggestionEngine::new(&rules, SuggestOptions::default());
        engine.suggest(&checker, &SpellOptions::default(), word)
    }

    #[test]
    fn transposed_word_ranks_first() {
        let got = engine_suggest(AFF, DIC, "wrold");
        assert!(got.iter().take(3).any(|s| s == "world"), "{got:?}");
    }

    #[test]
    fn suggestions_follow_input_case() {
        let got = engine_suggest(AFF, DIC, "Wrold");
        assert_eq!(got.first().map(String::as_str), Some("World"));
        let got = engine_suggest(AFF, DIC, "WROLD");
        assert_eq!(got.first().map(String::as_str), Some("WORLD"));
    }

    #[test]
    fn proper_names_keep_their_capital() {
        let got = engine_suggest(AFF, DIC, "paris");
        assert_eq!(got.first().map(String::as_str), Some("Paris"));
    }

    #[test]
    fn affixed_forms_are_suggested() {
        let got = engine_suggest(AFF, DIC, "wrolds");
        assert_eq!(got.first().map(String::as_str), Some("worlds"));
    }

    #[test]
    fn forbidden_and_nosuggest_words_are_never_suggested() {
        assert!(!engine_suggest(AFF, DIC, "badwords").contains(&"badword".to_string()));
        assert!(!engine_suggest(AFF, DIC, "sweraword").contains(&"swearword".to_string()));
    }

    #[test]
    fn suggest_is_idempotent() {
        let (rules, dict) = load(AFF, DIC);
        let checker = Checker::new(&rules, &dict);
        let engine = SuggestionEngine::new(&rules, SuggestOptions::default());
        let options = SpellOptions::default();
        let first = engine.suggest(&checker, &options, "wrod");
        let second = engine.suggest(&checker, &options, "wrod");
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn result_is_capped() {
        let (rules, dict) = load(AFF, DIC);
        let checker = Checker::new(&rules, &dict);
        let options = SuggestOptions {
            max_suggestions: 1,
            ..SuggestOptions::default()
        };
        let engine = SuggestionEngine::new(&rules, options);
        assert_eq!(engine.suggest(&checker, &SpellOptions::default(), "wrod").len(), 1);
    }

    #[test]
    fn rejected_candidates_do_not_use_up_the_cap() {
        // foobar compounds but needs a capital; foobaz is fine.
        let aff = "TRY rz\nCOMPOUNDFLAG X\nFORCEUCASE U\n";
        let dic = "3\nfoo/X\nbar/XU\nbaz/X\n";
        let (rules, dict) = load(aff, dic);
        let checker = Checker::new(&rules, &dict);
        let options = SuggestOptions {
            max_suggestions: 1,
            ..SuggestOptions::default()
        };
        let engine = SuggestionEngine::new(&rules, options);
        assert_eq!(engine.suggest(&checker, &SpellOptions::default(), "foobaq"), ["foobaz"]);
    }

    #[test]
    fn trailing_dots_kept_only_with_sugswithdots() {
        let got = engine_suggest(AFF, DIC, "wrold.");
        assert_eq!(got.first().map(String::as_str), Some("world"));
        let aff = format!("{AFF}SUGSWITHDOTS\n");
        let got = engine_suggest(&aff, DIC, "wrold.");
        assert_eq!(got.first().map(String::as_str), Some("world."));
    }

    #[test]
    fn degenerate_input_gives_nothing() {
        assert!(engine_suggest(AFF, DIC, "").is_empty());
        assert!(engine_suggest(AFF, DIC, "...").is_empty());
        assert!(engine_suggest(AFF, DIC, &"x".repeat(MAX_WORD_LEN + 1)).is_empty());
    }

    #[test]
    fn ngram_only_entry_point() {
        let (rules, dict) = load(AFF, DIC);
        let checker = Checker::new(&rules, &dict);
        let engine = SuggestionEngine::new(&rules, SuggestOptions::default());
        let got = engine.ngram_suggest(&checker, "helllooo");
        assert_eq!(got.first().map(String::as_str), Some("hello"));
    }

    #[test]
    fn variants_by_case() {
        assert_eq!(generation_variants("Wrold", CaseType::FirstUpper), vec!["Wrold", "wrold"]);
        assert_eq!(generation_variants("WROLD", CaseType::AllUpper), vec!["wrold", "Wrold"]);
        assert_eq!(generation_variants("wrold", CaseType::AllLower), vec!["wrold"]);
    }
}
