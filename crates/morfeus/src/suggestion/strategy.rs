// Suggestion strategy orchestration: generator order, compound pass and
// n-gram fallback

use log::trace;
use morfeus_aff::AffixRuleSet;

use super::generators::*;
use super::ngram::NgramSuggester;
use super::status::SuggestionStatus;
use crate::checker::Checker;
use crate::speller::adapter::DictionarySpeller;

/// Default cost budget: dictionary checks per suggestion request before the
/// edit generators give up.
pub const DEFAULT_MAX_COST: usize = 10_000;

/// An ordered generator list run with a cost budget, followed by the
/// n-gram ranking when the edit generators found no simple word.
pub struct SuggestionStrategy {
    max_cost: usize,
    generators: Vec<Box<dyn SuggestionGenerator + Send + Sync>>,
    ngram: NgramSuggester,
    ngram_enabled: bool,
}

impl SuggestionStrategy {
    pub fn new(
        max_cost: usize,
        generators: Vec<Box<dyn SuggestionGenerator + Send + Sync>>,
        ngram: NgramSuggester,
    ) -> Self {
        Self {
            max_cost,
            generators,
            ngram,
            ngram_enabled: true,
        }
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    pub fn set_ngram_enabled(&mut self, enabled: bool) {
        self.ngram_enabled = enabled;
    }

    pub fn ngram(&self) -> &NgramSuggester {
        &self.ngram
    }

    /// Run the strategy for the word held by `status`: the edit passes,
    /// then the n-gram ranking if they produced no simple word.
    pub fn generate(&self, checker: &Checker<'_>, status: &mut SuggestionStatus) {
        self.generate_edits(checker, status);
        self.generate_ngram(checker, status);
    }

    /// The generators run once with compounding disabled. Only if that pass
    /// finds nothing do they run again accepting compounds.
    pub fn generate_edits(&self, checker: &Checker<'_>, status: &mut SuggestionStatus) {
        status.set_max_cost(self.max_cost);
        let compounds = checker.rules.options.compound.enabled();

        for allow_compound in [false, true] {
            if allow_compound && (!compounds || status.simple_count() > 0) {
                break;
            }
            trace!("edit pass, compounds {allow_compound}");
            let speller = DictionarySpeller::for_suggestions(*checker, allow_compound);
            run_all(&self.generators, &speller, status);
        }
    }

    /// The n-gram ranking, skipped when a simple word was already found.
    pub fn generate_ngram(&self, checker: &Checker<'_>, status: &mut SuggestionStatus) {
        if self.ngram_enabled
            && status.simple_count() == 0
            && status.suggestion_count() < status.max_suggestion_count()
            && !status.timed_out()
        {
            trace!("n-gram pass");
            self.ngram.generate(checker, status);
        }
    }
}

// =========================================================================
// Factory
// =========================================================================

/// The typing-error strategy driven by the rule file's TRY, KEY, REP and
/// MAP tables.
pub fn typing_strategy(rules: &AffixRuleSet, max_cost: usize) -> SuggestionStrategy {
    let options = &rules.options;
    let try_chars: Vec<char> = options.try_chars.chars().collect();

    let mut generators: Vec<Box<dyn SuggestionGenerator + Send + Sync>> = vec![
        Box::new(UpperCase),
        Box::new(Replacement {
            table: rules.rep.clone(),
        }),
        Box::new(MapRelated::new(&rules.map)),
        Box::new(SwapAdjacent),
        Box::new(SwapDistant),
        Box::new(KeyboardNeighbors {
            layout: options.key.chars().collect(),
        }),
        Box::new(Deletion),
        Box::new(Insertion {
            characters: try_chars.clone(),
        }),
        Box::new(MoveChar),
        Box::new(BadChar {
            characters: try_chars,
        }),
        Box::new(DoubleTwoChars),
    ];
    if !options.suggest.no_split {
        // Latin alphabets also get "a-lot" style suggestions.
        let with_dash = options.try_chars.contains('-') || options.try_chars.contains('a');
        generators.push(Box::new(SplitWord { with_dash }));
    }

    SuggestionStrategy::new(max_cost, generators, NgramSuggester::from_rules(rules))
}
