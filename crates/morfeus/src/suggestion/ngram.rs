// N-gram fallback: rank the whole dictionary by similarity to the word
//
// Three stages. Every root is scored by 3-gram overlap plus a left common
// substring bonus (and optionally by phonetic code overlap); the best roots
// are expanded through their affixes; the expansions that clear a
// word-specific threshold are rescored by LCS, common positions and
// weighted bigrams.

use log::trace;
use morfeus_aff::AffixRuleSet;
use morfeus_aff::dictionary::DictEntry;
use morfeus_core::analysis::TAG_PHON;
use morfeus_core::character::simple_lower;
use morfeus_core::enums::{MAX_GUESSES, MAX_ROOTS, SpellResult};

use super::generators::SCORE_COMPOUND;
use super::status::SuggestionStatus;
use crate::checker::Checker;
use crate::speller::Speller;
use crate::speller::adapter::DictionarySpeller;

/// Extra suggestions taken from the phonetic ranking.
const MAX_PHONETIC_SUGGESTIONS: usize = 2;

/// Bonus for a guess that differs from the word only in letter case.
const SAME_LETTERS_BONUS: i32 = 2000;

/// N-gram scores stay below every edit-generator score.
const SCORE_CAP: i32 = SCORE_COMPOUND - 1;

/// Dictionary entries scanned between deadline checks.
const SCAN_CLOCK_INTERVAL: usize = 1024;

// ---------------------------------------------------------------------------
// Similarity measures
// ---------------------------------------------------------------------------

/// Options of [`ngram`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramMode {
    /// Penalize `s2` being longer than `s1`.
    pub longer_worse: bool,
    /// Penalize any length difference.
    pub any_mismatch: bool,
    /// Missing grams subtract, doubly at the word edges.
    pub weighted: bool,
    /// Lowercase `s2` before comparing.
    pub lowering: bool,
}

impl NgramMode {
    pub const LONGER_WORSE: NgramMode = NgramMode {
        longer_worse: true,
        any_mismatch: false,
        weighted: false,
        lowering: false,
    };
    pub const ANY_MISMATCH: NgramMode = NgramMode {
        longer_worse: false,
        any_mismatch: true,
        weighted: false,
        lowering: false,
    };
    pub const WEIGHTED: NgramMode = NgramMode {
        longer_worse: false,
        any_mismatch: false,
        weighted: true,
        lowering: false,
    };

    pub fn lowered(self) -> NgramMode {
        NgramMode {
            lowering: true,
            ..self
        }
    }
}

/// Count the 1..=n-grams of `s1` that occur in `s2`.
///
/// Without weighting, counting stops at the first gram size with fewer than
/// two hits.
pub fn ngram(n: usize, s1: &[char], s2: &[char], mode: NgramMode) -> i32 {
    let l1 = s1.len();
    if s2.is_empty() {
        return 0;
    }
    let lowered: Vec<char>;
    let t = if mode.lowering {
        lowered = s2.iter().map(|&c| simple_lower(c)).collect();
        &lowered[..]
    } else {
        s2
    };

    let mut score = 0i32;
    for j in 1..=n {
        if j > l1 {
            break;
        }
        let mut hits = 0i32;
        for i in 0..=l1 - j {
            let gram = &s1[i..i + j];
            if t.windows(j).any(|w| w == gram) {
                hits += 1;
            } else if mode.weighted {
                hits -= 1;
                if i == 0 || i == l1 - j {
                    hits -= 1;
                }
            }
        }
        score += hits;
        if hits < 2 && !mode.weighted {
            break;
        }
    }

    let diff = t.len() as i32 - l1 as i32;
    let penalty = if mode.any_mismatch {
        diff.abs() - 2
    } else if mode.longer_worse {
        diff - 2
    } else {
        0
    };
    score - penalty.max(0)
}

/// Length of the common prefix; the first character of `s2` may differ
/// from `s1`'s by case.
pub fn left_common_substring(s1: &[char], s2: &[char]) -> i32 {
    match (s1.first(), s2.first()) {
        (Some(&a), Some(&b)) if a == b || a == simple_lower(b) => {}
        _ => return 0,
    }
    let mut i = 1;
    while i < s1.len() && i < s2.len() && s1[i] == s2[i] {
        i += 1;
    }
    i as i32
}

/// Length of the longest common subsequence.
pub fn lcs_len(s1: &[char], s2: &[char]) -> i32 {
    let mut prev = vec![0i32; s2.len() + 1];
    let mut row = vec![0i32; s2.len() + 1];
    for &a in s1 {
        for (j, &b) in s2.iter().enumerate() {
            row[j + 1] = if a == b {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[s2.len()]
}

/// Number of equal positions, and whether the words differ by exactly one
/// swap of two characters.
pub fn common_character_positions(s1: &[char], s2: &[char]) -> (i32, bool) {
    let mut common = 0;
    let mut diffs = Vec::with_capacity(2);
    for (i, (&a, &b)) in s1.iter().zip(s2).enumerate() {
        if a == simple_lower(b) {
            common += 1;
        } else {
            diffs.push(i);
        }
    }
    let is_swap = s1.len() == s2.len()
        && diffs.len() == 2
        && s1[diffs[0]] == simple_lower(s2[diffs[1]])
        && s1[diffs[1]] == simple_lower(s2[diffs[0]]);
    (common, is_swap)
}

/// Keep the `cap` best `(score, item)` pairs; a newcomer must beat the
/// current minimum.
fn keep_best<T>(best: &mut Vec<(i32, T)>, cap: usize, score: i32, item: T) {
    if best.len() < cap {
        best.push((score, item));
        return;
    }
    let lowest = best
        .iter()
        .enumerate()
        .min_by_key(|(_, (s, _))| *s)
        .map(|(i, (s, _))| (i, *s));
    if let Some((i, s)) = lowest {
        if score > s {
            best[i] = (score, item);
        }
    }
}

// ---------------------------------------------------------------------------
// NgramSuggester
// ---------------------------------------------------------------------------

/// Whole-dictionary similarity ranking, run when the edit generators find
/// nothing better than compounds.
#[derive(Debug, Clone)]
pub struct NgramSuggester {
    /// `MAXNGRAMSUGS`
    pub max_suggestions: usize,
    /// `MAXDIFF`
    pub max_diff: Option<u8>,
    /// `ONLYMAXDIFF`
    pub only_max_diff: bool,
}

impl NgramSuggester {
    pub fn from_rules(rules: &AffixRuleSet) -> Self {
        let tuning = &rules.options.suggest;
        Self {
            max_suggestions: tuning.max_ngram,
            max_diff: tuning.max_diff,
            only_max_diff: tuning.only_max_diff,
        }
    }

    pub fn generate(&self, checker: &Checker<'_>, status: &mut SuggestionStatus) {
        if self.max_suggestions == 0 {
            return;
        }
        let word: Vec<char> = status.word().iter().map(|&c| simple_lower(c)).collect();
        if word.is_empty() {
            return;
        }
        let word_text: String = word.iter().collect();
        let phone = checker.rules.phone.as_ref().filter(|p| !p.is_empty());
        let target: Option<Vec<char>> = phone.map(|p| p.transcribe(&word_text).chars().collect());

        let (mut roots, mut phonetic) = self.scan_roots(checker, status, &word, target.as_deref());
        if status.timed_out() {
            return;
        }
        roots.sort_by(|a, b| b.0.cmp(&a.0));

        let guesses = self.expand_roots(checker, &word, &word_text, &roots);
        trace!(
            "ngram: {} root(s), {} guess(es) for {word_text}",
            roots.len(),
            guesses.len()
        );
        let ranked = self.rank(&word, guesses, phone.is_some());

        let speller = DictionarySpeller::for_suggestions(*checker, false);
        self.select(&speller, status, ranked);

        if phone.is_some() {
            for (score, root) in phonetic.iter_mut() {
                let lowered: Vec<char> = root.word.chars().map(simple_lower).collect();
                *score += 2 * lcs_len(&word, &lowered)
                    - (word.len() as i32 - lowered.len() as i32).abs()
                    + left_common_substring(&word, &lowered);
            }
            phonetic.sort_by(|a, b| b.0.cmp(&a.0));
            self.select_phonetic(&speller, status, &phonetic);
        }
    }

    /// Stage one: best roots by n-gram score and by phonetic score.
    fn scan_roots<'a>(
        &self,
        checker: &Checker<'a>,
        status: &mut SuggestionStatus,
        word: &[char],
        target: Option<&[char]>,
    ) -> (Vec<(i32, &'a DictEntry)>, Vec<(i32, &'a DictEntry)>) {
        let options = &checker.rules.options;
        let phone = checker.rules.phone.as_ref();
        let mode = NgramMode::LONGER_WORSE.lowered();
        let mut roots = Vec::with_capacity(MAX_ROOTS);
        let mut phonetic = Vec::new();

        for (i, entry) in checker.dict.walk().enumerate() {
            if i % SCAN_CLOCK_INTERVAL == SCAN_CLOCK_INTERVAL - 1 && status.poll_clock() {
                break;
            }
            if checker.dict.is_forbidden(entry)
                || entry.has_flag_opt(options.no_suggest)
                || entry.has_flag_opt(options.only_in_compound)
            {
                continue;
            }
            let candidate: Vec<char> = entry.word.chars().collect();
            let mut score = ngram(3, word, &candidate, mode) + left_common_substring(word, &candidate);
            if let Some(spoken) = entry.morph.get(TAG_PHON) {
                let spoken: Vec<char> = spoken.chars().collect();
                score = score.max(ngram(3, word, &spoken, mode) + left_common_substring(word, &spoken));
            }
            if let (Some(table), Some(target)) = (phone, target) {
                if score > 2 && word.len().abs_diff(candidate.len()) <= 3 {
                    let code: Vec<char> = table.transcribe(&entry.word).chars().collect();
                    let phonetic_score = 2 * ngram(3, target, &code, NgramMode::LONGER_WORSE);
                    keep_best(&mut phonetic, MAX_ROOTS, phonetic_score, entry);
                }
            }
            keep_best(&mut roots, MAX_ROOTS, score, entry);
        }
        (roots, phonetic)
    }

    /// Stage two: affixed forms of the best roots that clear the threshold.
    fn expand_roots<'a>(
        &self,
        checker: &Checker<'a>,
        word: &[char],
        word_text: &str,
        roots: &[(i32, &'a DictEntry)],
    ) -> Vec<(i32, String)> {
        let n = word.len();
        let mut threshold = 0;
        for start in 1..4 {
            let mut mangled = word.to_vec();
            for k in (start..n).step_by(4) {
                mangled[k] = '*';
            }
            threshold += ngram(n, word, &mangled, NgramMode::ANY_MISMATCH);
        }
        threshold = threshold / 3 - 1;

        let mode = NgramMode::ANY_MISMATCH.lowered();
        let mut guesses: Vec<(i32, String)> = Vec::new();
        for &(_, root) in roots {
            for expansion in checker.expand_root(root, Some(word_text)) {
                let form: Vec<char> = expansion.word.chars().collect();
                let score = ngram(n, word, &form, mode) + left_common_substring(word, &form);
                if score > threshold && !guesses.iter().any(|(_, g)| *g == expansion.word) {
                    keep_best(&mut guesses, MAX_GUESSES, score, expansion.word);
                }
            }
        }
        guesses.sort_by(|a, b| b.0.cmp(&a.0));
        guesses
    }

    /// Stage three: final similarity score, best first.
    fn rank(&self, word: &[char], guesses: Vec<(i32, String)>, has_phone: bool) -> Vec<(i32, String)> {
        let n = word.len() as i32;
        let fact = match self.max_diff {
            Some(d) => (10.0 - f64::from(d)) / 5.0,
            None => 1.0,
        };
        let mut ranked: Vec<(i32, String)> = guesses
            .into_iter()
            .map(|(first, guess)| {
                let lowered: Vec<char> = guess.chars().map(simple_lower).collect();
                let len = lowered.len() as i32;
                let lcs = lcs_len(word, &lowered);
                if n == len && n == lcs {
                    return (first + SAME_LETTERS_BONUS, guess);
                }
                let re = ngram(2, word, &lowered, NgramMode::WEIGHTED)
                    + ngram(2, &lowered, word, NgramMode::WEIGHTED);
                let (common, is_swap) = common_character_positions(word, &lowered);
                let limit = if has_phone { len } else { n + len };
                let score = 2 * lcs - (n - len).abs()
                    + left_common_substring(word, &lowered)
                    + i32::from(common > 0)
                    + if is_swap { 10 } else { 0 }
                    + ngram(4, word, &lowered, NgramMode::ANY_MISMATCH)
                    + re
                    + if f64::from(re) < f64::from(limit) * fact {
                        -1000
                    } else {
                        0
                    };
                (score, guess)
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked
    }

    fn select(&self, speller: &dyn Speller, status: &mut SuggestionStatus, ranked: Vec<(i32, String)>) {
        let mut added = 0;
        let mut same = false;
        for (score, guess) in ranked {
            if added >= self.max_suggestions || status.suggestion_count() >= status.max_suggestion_count() {
                break;
            }
            if same && score <= 1000 {
                continue;
            }
            if score > 1000 {
                same = true;
            } else if score < -100 {
                same = true;
                // A poor guess is only worth it when there is nothing else.
                if added > 0 || self.only_max_diff {
                    continue;
                }
            }
            if !self.is_new(speller, status, &guess) {
                continue;
            }
            if status.add_suggestion(guess, score.min(SCORE_CAP)) {
                added += 1;
            }
        }
    }

    fn select_phonetic(&self, speller: &dyn Speller, status: &mut SuggestionStatus, ranked: &[(i32, &DictEntry)]) {
        let mut added = 0;
        for (score, root) in ranked {
            if added >= MAX_PHONETIC_SUGGESTIONS || status.suggestion_count() >= status.max_suggestion_count() {
                break;
            }
            if self.is_new(speller, status, &root.word) && status.add_suggestion(root.word.clone(), (*score).min(SCORE_CAP)) {
                added += 1;
            }
        }
    }

    /// Rejects guesses that spell badly or merely extend an earlier
    /// suggestion.
    fn is_new(&self, speller: &dyn Speller, status: &mut SuggestionStatus, guess: &str) -> bool {
        if status.suggestions().iter().any(|s| guess.contains(s.word.as_str())) {
            return false;
        }
        let chars: Vec<char> = guess.chars().collect();
        status.charge();
        speller.spell(&chars) != SpellResult::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::load;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn ngram_words(aff: &str, dic: &str, word: &str) -> Vec<String> {
        let (rules, dict) = load(aff, dic);
        let checker = Checker::new(&rules, &dict);
        let mut status = SuggestionStatus::new(word, 15);
        NgramSuggester::from_rules(&rules).generate(&checker, &mut status);
        status.into_suggestions().into_iter().map(|s| s.word).collect()
    }

    #[test]
    fn ngram_counts_shared_grams() {
        assert_eq!(ngram(3, &chars("abc"), &chars("abc"), NgramMode::default()), 6);
        assert_eq!(ngram(3, &chars("abc"), &chars("xyz"), NgramMode::default()), 0);
        assert_eq!(ngram(3, &chars("abc"), &chars("abcdef"), NgramMode::LONGER_WORSE), 5);
        assert_eq!(ngram(3, &chars("abc"), &chars("ABC"), NgramMode::default().lowered()), 6);
    }

    #[test]
    fn weighted_ngram_punishes_missing_edges() {
        // "xbc" vs "abc": 1-grams b,c hit, x misses at the edge (-2);
        // 2-grams bc hits, xb misses at the edge (-2).
        assert_eq!(ngram(2, &chars("xbc"), &chars("abc"), NgramMode::WEIGHTED), -1);
    }

    #[test]
    fn left_common_substring_ignores_first_letter_case() {
        assert_eq!(left_common_substring(&chars("paris"), &chars("Paris")), 5);
        assert_eq!(left_common_substring(&chars("wrold"), &chars("world")), 1);
        assert_eq!(left_common_substring(&chars("cat"), &chars("dog")), 0);
    }

    #[test]
    fn lcs_and_swap_detection() {
        assert_eq!(lcs_len(&chars("wrold"), &chars("world")), 4);
        assert_eq!(lcs_len(&chars(""), &chars("world")), 0);
        assert_eq!(common_character_positions(&chars("wrold"), &chars("world")), (3, true));
        assert_eq!(common_character_positions(&chars("wxyld"), &chars("world")), (3, false));
    }

    #[test]
    fn keep_best_replaces_the_minimum() {
        let mut best = Vec::new();
        keep_best(&mut best, 2, 5, "a");
        keep_best(&mut best, 2, 3, "b");
        keep_best(&mut best, 2, 3, "c");
        keep_best(&mut best, 2, 9, "d");
        assert_eq!(best, vec![(5, "a"), (9, "d")]);
    }

    #[test]
    fn ranks_the_closest_word() {
        let got = ngram_words("", "4\nexample\nsample\nsimple\ntemple\n", "exampel");
        assert_eq!(got, vec!["example"]);
    }

    #[test]
    fn reaches_affixed_forms() {
        let aff = "SFX S Y 1\nSFX S 0 s .\n";
        let got = ngram_words(aff, "2\nexample/S\ntemple\n", "exampels");
        assert_eq!(got.first().map(String::as_str), Some("examples"));
    }

    #[test]
    fn skips_forbidden_and_nosuggest_roots() {
        let aff = "NOSUGGEST N\nFORBIDDENWORD !\n";
        let got = ngram_words(aff, "2\nexample/N\nbad/!\n", "exampel");
        assert!(got.is_empty());
    }

    #[test]
    fn phonetic_table_is_used() {
        let aff = "PHONE 1\nPHONE PH F\n";
        let got = ngram_words(aff, "1\nphone\n", "fone");
        assert_eq!(got, vec!["phone"]);
    }
}
