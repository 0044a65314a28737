// Suggestion status tracking: abort conditions, cost budget, deduplication

use std::time::Instant;

use hashbrown::HashSet;

/// How often (in charged checks) the wall clock is consulted.
const CLOCK_INTERVAL: usize = 32;

/// A suggestion candidate with its score.
///
/// Higher scores are better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word: String,
    pub score: i32,
}

/// Tracks the state of suggestion generation: found suggestions,
/// cost budget, deadline and abort conditions.
///
/// Every spell check made while generating suggestions increments
/// `current_cost` by 1 via `charge()`.
pub struct SuggestionStatus<'f> {
    /// The word being corrected. Several case variants of the input may be
    /// processed in turn; see [`SuggestionStatus::set_word`].
    word: Vec<char>,
    max_suggestions: usize,
    max_cost: usize,
    current_cost: usize,
    /// Cap on suggestions that were accepted only as compounds.
    max_compound: usize,
    compounds: usize,
    deadline: Option<Instant>,
    timed_out: bool,
    suggestions: Vec<Suggestion>,
    seen: HashSet<String>,
    /// Final acceptance test; a rejected candidate takes no slot.
    filter: Option<&'f dyn Fn(&str) -> bool>,
}

impl<'f> SuggestionStatus<'f> {
    pub fn new(word: &str, max_suggestions: usize) -> Self {
        Self {
            word: word.chars().collect(),
            max_suggestions,
            max_cost: 0,
            current_cost: 0,
            max_compound: usize::MAX,
            compounds: 0,
            deadline: None,
            timed_out: false,
            suggestions: Vec::with_capacity(max_suggestions),
            seen: HashSet::new(),
            filter: None,
        }
    }

    /// Only store candidates `filter` accepts.
    pub fn with_filter(mut self, filter: &'f dyn Fn(&str) -> bool) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Stop generating once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns `true` if no more suggestions should be generated.
    ///
    /// Abort conditions:
    /// - Maximum suggestion count reached.
    /// - Deadline passed.
    /// - Cost budget exceeded (doubled if no suggestions found yet).
    pub fn should_abort(&self) -> bool {
        if self.suggestions.len() >= self.max_suggestions || self.timed_out {
            return true;
        }
        if self.current_cost < self.max_cost {
            return false;
        }
        // Nothing found yet: allow the search to take twice as long.
        if self.suggestions.is_empty() && self.current_cost < 2 * self.max_cost {
            return false;
        }
        true
    }

    /// Increment the cost counter by one unit (one dictionary check).
    pub fn charge(&mut self) {
        self.current_cost += 1;
        if self.current_cost % CLOCK_INTERVAL == 0 {
            self.poll_clock();
        }
    }

    /// Check the deadline now. Returns `true` if time is up.
    pub fn poll_clock(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
            }
        }
        self.timed_out
    }

    /// Whether generation was cut short by the deadline.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn set_max_cost(&mut self, max_cost: usize) {
        self.max_cost = max_cost;
    }

    pub fn set_max_compound(&mut self, max_compound: usize) {
        self.max_compound = max_compound;
    }

    /// Switch to another spelling of the input word. Collected suggestions
    /// and the spent cost are kept.
    pub fn set_word(&mut self, word: &str) {
        self.word = word.chars().collect();
    }

    /// Add a suggestion with the given score.
    ///
    /// Duplicates, the word itself and candidates the filter rejects are
    /// silently ignored. Returns whether the suggestion was stored.
    pub fn add_suggestion(&mut self, suggestion: String, score: i32) -> bool {
        if self.suggestions.len() >= self.max_suggestions {
            return false;
        }
        if suggestion.chars().eq(self.word.iter().copied()) {
            return false;
        }
        if !self.seen.insert(suggestion.clone()) {
            return false;
        }
        if self.filter.is_some_and(|accept| !accept(&suggestion)) {
            return false;
        }
        self.suggestions.push(Suggestion {
            word: suggestion,
            score,
        });
        true
    }

    /// Add a suggestion that the dictionary accepts only as a compound.
    /// These are capped separately.
    pub fn add_compound_suggestion(&mut self, suggestion: String, score: i32) -> bool {
        if self.compounds >= self.max_compound {
            return false;
        }
        let added = self.add_suggestion(suggestion, score);
        if added {
            self.compounds += 1;
        }
        added
    }

    /// Sort by descending score. Equal scores keep their discovery order.
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    /// Number of suggestions that are not compound-only.
    pub fn simple_count(&self) -> usize {
        self.suggestions.len() - self.compounds
    }

    pub fn max_suggestion_count(&self) -> usize {
        self.max_suggestions
    }

    /// The word being corrected.
    pub fn word(&self) -> &[char] {
        &self.word
    }

    pub fn word_len(&self) -> usize {
        self.word.len()
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }
}
