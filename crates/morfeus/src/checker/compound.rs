// Compound word recognition
//
// A compound is split left to right at every admissible boundary. The head
// is checked as a beginning (or middle) part, the remainder either as a
// final part or, recursively, as a further compound. The first complete
// decomposition wins.
//
// Running totals (parts, counted words, syllables) live in an explicit
// `CompoundState` that each recursion level clones, so backtracking never
// has to undo anything. Boundary guards are applied as each part is pushed,
// so whether a remainder can complete depends only on the remainder and a
// small summary of the state. Failed summaries are remembered per query.

use hashbrown::HashSet;
use morfeus_aff::compound::{CompoundPattern, CompoundRule, PatternText};
use morfeus_aff::dictionary::DictEntry;
use morfeus_aff::flags::{Flag, FlagSet};
use morfeus_core::character::{byte_offset, char_len, is_upper};
use morfeus_core::enums::MAX_RULE_BACKTRACK;

use super::{AffixMatch, Checker, CompoundPos};

const MAX_PARTS: usize = 100;

/// One component of a recognised compound.
#[derive(Debug, Clone)]
pub struct CompoundPart<'a> {
    /// The component as it was checked. Equals the spelling in the word
    /// except where a simplified triple or a pattern replacement restored
    /// dropped letters.
    pub surface: String,
    pub matched: AffixMatch<'a>,
}

#[derive(Debug, Clone)]
pub struct CompoundMatch<'a> {
    pub parts: Vec<CompoundPart<'a>>,
}

impl<'a> CompoundMatch<'a> {
    /// Root of the final component.
    pub fn last_root(&self) -> Option<&'a DictEntry> {
        self.parts.last().map(|p| p.matched.root)
    }
}

#[derive(Debug, Clone, Default)]
struct CompoundState<'a> {
    parts: Vec<CompoundPart<'a>>,
    /// Words counted against COMPOUNDWORDMAX; COMPOUNDROOT entries count
    /// twice.
    words: usize,
    syllables: usize,
    /// Boundary (index of the left part) admitted by a pattern replacement
    /// and therefore exempt from pattern checks.
    licensed: Option<usize>,
}

impl<'a> CompoundState<'a> {
    fn pushed(&self, checker: &Checker<'a>, surface: &str, matched: AffixMatch<'a>) -> Self {
        let copts = &checker.rules.options.compound;
        let mut next = self.clone();
        next.words += 1 + usize::from(matched.root.has_flag_opt(copts.root));
        next.syllables += surface.chars().filter(|c| copts.vowels.contains(*c)).count();
        next.parts.push(CompoundPart {
            surface: surface.to_string(),
            matched,
        });
        next
    }

    /// Summary of everything that decides whether `rest` can complete
    /// the compound from this state.
    fn key(&self, rest: &str, with_rules: bool) -> SplitKey {
        let last = self.parts.last().map(|p| (p.surface.clone(), entry_id(p.matched.root)));
        SplitKey {
            rest: rest.to_string(),
            parts: self.parts.len(),
            words: self.words,
            syllables: self.syllables,
            last,
            last_licensed: !self.parts.is_empty() && self.licensed == Some(self.parts.len() - 1),
            roots: if with_rules {
                self.parts.iter().map(|p| entry_id(p.matched.root)).collect()
            } else {
                Vec::new()
            },
        }
    }

    fn flag_sets_with<'s>(&'s self, root: &'s DictEntry) -> Vec<&'s FlagSet> {
        self.parts
            .iter()
            .map(|p| &p.matched.root.flags)
            .chain(std::iter::once(&root.flags))
            .collect()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct SplitKey {
    rest: String,
    parts: usize,
    words: usize,
    syllables: usize,
    last: Option<(String, usize)>,
    last_licensed: bool,
    /// Roots of every part, only when COMPOUNDRULE needs the whole history.
    roots: Vec<usize>,
}

/// States already known not to complete.
type FailedSplits = HashSet<SplitKey>;

fn entry_id(entry: &DictEntry) -> usize {
    std::ptr::from_ref(entry) as usize
}

fn same_match(a: &AffixMatch<'_>, b: &AffixMatch<'_>) -> bool {
    fn same<T>(x: Option<&T>, y: Option<&T>) -> bool {
        match (x, y) {
            (Some(x), Some(y)) => std::ptr::eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }
    std::ptr::eq(a.root, b.root)
        && same(a.prefix, b.prefix)
        && same(a.suffix, b.suffix)
        && same(a.outer_suffix, b.outer_suffix)
        && same(a.outer_prefix, b.outer_prefix)
}

fn push_unique<'a>(out: &mut Vec<AffixMatch<'a>>, m: AffixMatch<'a>) {
    if !out.iter().any(|o| same_match(o, &m)) {
        out.push(m);
    }
}

/// Whether `rule` accepts the sequence of flag sets, one per part.
///
/// With `all` unset the rule only has to accept the parts seen so far
/// (further parts may follow); with `all` set the remaining rule elements
/// must all be optional. The search is an explicit stack of
/// (element, part) positions, bounded in depth.
fn rule_matches(rule: &CompoundRule, parts: &[&FlagSet], all: bool) -> bool {
    let elements = &rule.elements;
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    while let Some((e, w)) = stack.pop() {
        if w == parts.len() {
            if !all || elements[e..].iter().all(|el| el.repeat.is_optional()) {
                return true;
            }
            continue;
        }
        let Some(element) = elements.get(e) else {
            continue;
        };
        if stack.len() + 2 > MAX_RULE_BACKTRACK {
            continue;
        }
        if element.repeat.is_optional() {
            stack.push((e + 1, w));
        }
        if parts[w].contains(element.flag) {
            let next = if element.repeat.max() > 1 { e } else { e + 1 };
            stack.push((next, w + 1));
        }
    }
    false
}

impl<'a> Checker<'a> {
    /// Whether some COMPOUNDRULE accepts the parts' flag sets.
    pub fn compound_rule_matches(&self, parts: &[&FlagSet], all: bool) -> bool {
        self.rules
            .options
            .compound
            .rules
            .iter()
            .any(|rule| rule_matches(rule, parts, all))
    }

    /// Whether a CHECKCOMPOUNDPATTERN entry forbids joining `left` and
    /// `right`. A pattern with a replacement forbids the plain boundary as
    /// well; only the replaced spelling is licensed.
    pub fn check_compound_pattern(&self, left: &CompoundPart<'_>, right: &CompoundPart<'_>) -> bool {
        self.pattern_forbids(&left.surface, &left.matched, &right.surface, &right.matched)
    }

    fn pattern_forbids(
        &self,
        left: &str,
        left_match: &AffixMatch<'_>,
        right: &str,
        right_match: &AffixMatch<'_>,
    ) -> bool {
        let matches = |p: &CompoundPattern| {
            let first_ok = match &p.first_end {
                PatternText::Chars(end) => left.ends_with(end.as_str()),
                PatternText::Unaffixed => left.ends_with(left_match.root.word.as_str()),
            };
            let second_ok = match &p.second_begin {
                PatternText::Chars(begin) => right.starts_with(begin.as_str()),
                PatternText::Unaffixed => right.starts_with(right_match.root.word.as_str()),
            };
            first_ok
                && second_ok
                && (p.first_flag.is_none() || left_match.root.has_flag_opt(p.first_flag))
                && (p.second_flag.is_none() || right_match.root.has_flag_opt(p.second_flag))
        };
        self.rules.options.compound.patterns.iter().any(matches)
    }

    /// Decompose `word` into dictionary parts allowed to compound.
    pub fn check_compound(&self, word: &str) -> Option<CompoundMatch<'a>> {
        let copts = &self.rules.options.compound;
        if !copts.enabled() || char_len(word) < 2 * copts.min.max(1) {
            return None;
        }
        let mut failed = FailedSplits::new();
        let found = self
            .split_compound(word, &CompoundState::default(), &mut failed)
            .or_else(|| self.split_with_replacement(word, &mut failed))?;
        if copts.check_rep && self.rep_makes_simple_word(word) {
            return None;
        }
        Some(found)
    }

    fn split_compound(
        &self,
        word: &str,
        state: &CompoundState<'a>,
        failed: &mut FailedSplits,
    ) -> Option<CompoundMatch<'a>> {
        let copts = &self.rules.options.compound;
        let min = copts.min.max(1);
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        if n < 2 * min || state.parts.len() + 2 > MAX_PARTS {
            return None;
        }
        let key = state.key(word, !copts.rules.is_empty());
        if failed.contains(&key) {
            return None;
        }

        for i in min..=n - min {
            let (head, rest) = word.split_at(byte_offset(word, i));
            let heads = self.head_parts(head, state);
            if heads.is_empty() {
                continue;
            }
            if self.boundary_ok(&chars, i) {
                if let Some(found) = self.continue_after(head, &heads, rest, state, failed) {
                    return Some(found);
                }
            }
            // Simplified triple: "schiff|ahrt" stands for schiff + fahrt.
            if copts.simplified_triple && i >= 2 && chars[i - 1] == chars[i - 2] {
                let restored = format!("{}{}", chars[i - 1], rest);
                if let Some(found) = self.continue_after(head, &heads, &restored, state, failed) {
                    return Some(found);
                }
            }
        }
        failed.insert(key);
        None
    }

    /// Push each reading of `head` and complete the compound with `rest`,
    /// either as the final part or by splitting it further.
    fn continue_after(
        &self,
        head: &str,
        heads: &[AffixMatch<'a>],
        rest: &str,
        state: &CompoundState<'a>,
        failed: &mut FailedSplits,
    ) -> Option<CompoundMatch<'a>> {
        for &m in heads {
            if !self.joins(state, head, &m) {
                continue;
            }
            let next = state.pushed(self, head, m);
            // The final part adds at least one word, a further split two.
            if !self.budget_allows(&next, 1) {
                continue;
            }
            if let Some(found) = self.finish_compound(rest, &next) {
                return Some(found);
            }
            if self.budget_allows(&next, 2) {
                if let Some(found) = self.split_compound(rest, &next, failed) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Try the word with a CHECKCOMPOUNDPATTERN replacement undone at each
    /// occurrence, forcing a boundary there.
    fn split_with_replacement(&self, word: &str, failed: &mut FailedSplits) -> Option<CompoundMatch<'a>> {
        let copts = &self.rules.options.compound;
        for pattern in &copts.patterns {
            let Some(replacement) = pattern.replacement.as_deref().filter(|r| !r.is_empty()) else {
                continue;
            };
            for (at, _) in word.match_indices(replacement) {
                let head = format!("{}{}", &word[..at], pattern.first_end.chars());
                let rest = format!("{}{}", pattern.second_begin.chars(), &word[at + replacement.len()..]);
                if char_len(&head) < copts.min || char_len(&rest) < copts.min {
                    continue;
                }
                let start = CompoundState {
                    licensed: Some(0),
                    ..CompoundState::default()
                };
                for m in self.head_parts(&head, &start) {
                    if pattern.first_flag.is_some() && !m.root.has_flag_opt(pattern.first_flag) {
                        continue;
                    }
                    let next = start.pushed(self, &head, m);
                    let found = self
                        .finish_compound(&rest, &next)
                        .or_else(|| self.split_compound(&rest, &next, failed));
                    if let Some(found) = found {
                        let second_ok = pattern.second_flag.is_none()
                            || found.parts[1].matched.root.has_flag_opt(pattern.second_flag);
                        if second_ok {
                            return Some(found);
                        }
                    }
                }
            }
        }
        None
    }

    /// Check `text` as the final part and validate the whole decomposition.
    fn finish_compound(&self, text: &str, state: &CompoundState<'a>) -> Option<CompoundMatch<'a>> {
        let copts = &self.rules.options.compound;
        if char_len(text) < copts.min {
            return None;
        }
        for m in self.tail_parts(text, state) {
            if !self.joins(state, text, &m) {
                continue;
            }
            let done = state.pushed(self, text, m);
            if self.limits_ok(&done) {
                return Some(CompoundMatch { parts: done.parts });
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Part admission
    // ------------------------------------------------------------------

    /// Ways `text` can stand as a beginning or middle part.
    fn head_parts(&self, text: &str, state: &CompoundState<'a>) -> Vec<AffixMatch<'a>> {
        let copts = &self.rules.options.compound;
        let (pos, positional) = if state.parts.is_empty() {
            (CompoundPos::Begin, copts.begin)
        } else {
            (CompoundPos::Middle, copts.middle)
        };
        let mut out = Vec::new();
        for root in self.dict.homonyms(text) {
            if !self.bare_part_usable(root) {
                continue;
            }
            let by_flag = root.has_flag_opt(copts.flag) || root.has_flag_opt(positional);
            let by_rule = !copts.rules.is_empty()
                && self.compound_rule_matches(&state.flag_sets_with(root), false);
            if by_flag || by_rule {
                out.push(AffixMatch::bare(root));
            }
        }
        self.affixed_parts(text, pos, [copts.flag, positional], &mut out);
        out
    }

    /// Ways `text` can stand as the final part.
    fn tail_parts(&self, text: &str, state: &CompoundState<'a>) -> Vec<AffixMatch<'a>> {
        let copts = &self.rules.options.compound;
        let mut out = Vec::new();
        for root in self.dict.homonyms(text) {
            if !self.bare_part_usable(root) {
                continue;
            }
            let by_flag = root.has_flag_opt(copts.flag) || root.has_flag_opt(copts.end);
            let by_rule = !copts.rules.is_empty()
                && self.compound_rule_matches(&state.flag_sets_with(root), true);
            if by_flag || by_rule {
                out.push(AffixMatch::bare(root));
            }
        }
        self.affixed_parts(text, CompoundPos::End, [copts.flag, copts.end], &mut out);
        out
    }

    fn bare_part_usable(&self, root: &DictEntry) -> bool {
        !self.is_forbidden(root) && !root.has_flag_opt(self.rules.options.need_affix)
    }

    fn affixed_parts(
        &self,
        text: &str,
        pos: CompoundPos,
        needs: [Option<Flag>; 2],
        out: &mut Vec<AffixMatch<'a>>,
    ) {
        let forbid = self.rules.options.compound.forbid;
        for need in needs.into_iter().flatten() {
            if let Some(m) = self.check_word(text, pos, Some(need)) {
                if !self.is_forbidden(m.root) && !m.affix_has_cont(forbid) {
                    push_unique(out, m);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Guards
    // ------------------------------------------------------------------

    /// Character-level checks at the boundary before `chars[i]`.
    fn boundary_ok(&self, chars: &[char], i: usize) -> bool {
        let copts = &self.rules.options.compound;
        let left = chars[i - 1];
        let right = chars[i];
        if copts.check_triple && left == right {
            let before = i >= 2 && chars[i - 2] == left;
            let after = chars.get(i + 1) == Some(&right);
            if before || after {
                return false;
            }
        }
        if copts.check_case && left != '-' && right != '-' && (is_upper(left) || is_upper(right)) {
            return false;
        }
        true
    }

    fn limits_ok(&self, state: &CompoundState<'a>) -> bool {
        self.budget_allows(state, 0)
    }

    /// Whether a decomposition that adds at least `more` words to `state`
    /// can still satisfy COMPOUNDWORDMAX or COMPOUNDSYLLABLE. Syllables
    /// only grow, so an exceeded syllable limit stays exceeded.
    fn budget_allows(&self, state: &CompoundState<'a>, more: usize) -> bool {
        let copts = &self.rules.options.compound;
        let words_ok = copts.word_max.is_none_or(|max| state.words + more <= max);
        let syllables_ok = copts.syllable_max.is_some_and(|max| state.syllables <= max);
        words_ok || syllables_ok
    }

    /// Duplicate and pattern guards between the last part of `state` and a
    /// following part.
    fn joins(&self, state: &CompoundState<'a>, surface: &str, matched: &AffixMatch<'a>) -> bool {
        let Some(left) = state.parts.last() else {
            return true;
        };
        if self.rules.options.compound.check_dup && left.surface == surface {
            return false;
        }
        state.licensed == Some(state.parts.len() - 1)
            || !self.pattern_forbids(&left.surface, &left.matched, surface, matched)
    }

    /// Whether a REP substitution turns the compound into a plain word,
    /// which marks the compound as a likely misspelling.
    fn rep_makes_simple_word(&self, word: &str) -> bool {
        self.rules
            .rep
            .candidates(word)
            .iter()
            .filter(|c| !c.contains(' '))
            .any(|c| self.check(c, false).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::super::test_support::load;
    use super::*;

    fn accepts(aff: &str, dic: &str, word: &str) -> bool {
        let (rules, dict) = load(aff, dic);
        Checker::new(&rules, &dict).check_compound(word).is_some()
    }

    const BEGIN_END: &str = "COMPOUNDBEGIN A\nCOMPOUNDEND B\n";
    const SUN_DIC: &str = "2\nsun/A\nshine/B\n";

    #[test]
    fn begin_and_end_positions() {
        assert!(accepts(BEGIN_END, SUN_DIC, "sunshine"));
        assert!(!accepts(BEGIN_END, SUN_DIC, "shinesun"));
    }

    #[test]
    fn parts_are_reported_in_order() {
        let (rules, dict) = load(BEGIN_END, SUN_DIC);
        let c = Checker::new(&rules, &dict).check_compound("sunshine").expect("compound");
        let surfaces: Vec<&str> = c.parts.iter().map(|p| p.surface.as_str()).collect();
        assert_eq!(surfaces, ["sun", "shine"]);
        assert_eq!(c.last_root().map(|r| r.word.as_str()), Some("shine"));
    }

    #[test]
    fn short_words_never_split() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDMIN 3\n";
        let dic = "2\nab/X\ncd/X\n";
        assert!(!accepts(aff, dic, "abcd"));
        let aff1 = "COMPOUNDFLAG X\nCOMPOUNDMIN 2\n";
        assert!(accepts(aff1, dic, "abcd"));
    }

    #[test]
    fn three_parts_through_middle() {
        let aff = "COMPOUNDBEGIN A\nCOMPOUNDMIDDLE M\nCOMPOUNDEND B\n";
        let dic = "3\nfoo/A\nbar/M\nbaz/B\n";
        assert!(accepts(aff, dic, "foobarbaz"));
        assert!(!accepts(aff, dic, "foobazbar"));
    }

    #[test]
    fn word_max_limits_parts() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDWORDMAX 2\n";
        let dic = "1\nfoo/X\n";
        assert!(accepts(aff, dic, "foofoo"));
        assert!(!accepts(aff, dic, "foofoofoo"));
    }

    #[test]
    fn duplication_guard() {
        let dic = "2\nfoo/X\nbar/X\n";
        assert!(accepts("COMPOUNDFLAG X\n", dic, "foofoo"));
        assert!(!accepts("COMPOUNDFLAG X\nCHECKCOMPOUNDDUP\n", dic, "foofoo"));
        assert!(accepts("COMPOUNDFLAG X\nCHECKCOMPOUNDDUP\n", dic, "foobar"));
    }

    #[test]
    fn triple_letter_guard() {
        let aff = "COMPOUNDFLAG X\nCHECKCOMPOUNDTRIPLE\n";
        let dic = "2\nglass/X\nsail/X\n";
        assert!(!accepts(aff, dic, "glasssail"));
        assert!(accepts("COMPOUNDFLAG X\n", dic, "glasssail"));
    }

    #[test]
    fn simplified_triple_restores_letter() {
        let aff = "COMPOUNDFLAG X\nCHECKCOMPOUNDTRIPLE\nSIMPLIFIEDTRIPLE\n";
        let dic = "2\nschiff/X\nfahrt/X\n";
        assert!(accepts(aff, dic, "schiffahrt"));
        assert!(!accepts(aff, dic, "schifffahrt"));
    }

    #[test]
    fn simplified_triple_at_an_inner_boundary() {
        let aff = "COMPOUNDFLAG X\nCHECKCOMPOUNDTRIPLE\nSIMPLIFIEDTRIPLE\n";
        let dic = "3\nschiff/X\nfahrt/X\nkapit\u{e4}n/X\n";
        assert!(accepts(aff, dic, "kapit\u{e4}nschiff"));
        assert!(accepts(aff, dic, "schiffahrtkapit\u{e4}n"));
        assert!(accepts(aff, dic, "kapit\u{e4}nschiffahrt"));
    }

    #[test]
    fn word_budget_cuts_off_deep_splits() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDMIN 1\nCOMPOUNDWORDMAX 2\n";
        let dic = "2\na/X\naa/X\n";
        let word = format!("{}b", "a".repeat(60));
        let started = Instant::now();
        assert!(!accepts(aff, dic, &word));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(accepts(aff, dic, "aaa"));
        assert!(!accepts(aff, dic, "aaaaa"));
    }

    #[test]
    fn failed_remainders_are_not_searched_twice() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDMIN 1\n";
        let dic = "2\na/X\naa/X\n";
        let word = format!("{}b", "a".repeat(48));
        let started = Instant::now();
        assert!(!accepts(aff, dic, &word));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(accepts(aff, dic, &"a".repeat(48)));
    }

    #[test]
    fn case_guard_at_boundary() {
        let dic = "2\nfoo/X\nBar/X\n";
        assert!(accepts("COMPOUNDFLAG X\n", dic, "fooBar"));
        assert!(!accepts("COMPOUNDFLAG X\nCHECKCOMPOUNDCASE\n", dic, "fooBar"));
    }

    #[test]
    fn pattern_forbids_boundary() {
        let aff = "COMPOUNDFLAG X\nCHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o b\n";
        let dic = "3\nfoo/X\nbar/X\nbaz/X\n";
        assert!(!accepts(aff, dic, "foobar"));
        assert!(accepts(aff, dic, "barfoo"));
    }

    #[test]
    fn pattern_replacement_licenses_simplified_spelling() {
        let aff = "COMPOUNDFLAG X\nCHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN o b z\n";
        let dic = "2\nfoo/X\nbar/X\n";
        assert!(accepts(aff, dic, "fozar"));
        assert!(!accepts(aff, dic, "foobar"));
    }

    #[test]
    fn zero_pattern_side_means_unaffixed_part() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDPERMITFLAG P\nCHECKCOMPOUNDPATTERN 1\nCHECKCOMPOUNDPATTERN 0 b\nSFX T Y 1\nSFX T 0 s/P .\n";
        let dic = "2\nfoo/XT\nbar/X\n";
        assert!(!accepts(aff, dic, "foobar"));
        assert!(accepts(aff, dic, "foosbar"));
    }

    #[test]
    fn compound_rules_with_repeats() {
        let aff = "COMPOUNDMIN 1\nCOMPOUNDRULE 2\nCOMPOUNDRULE ABC\nCOMPOUNDRULE n*1t\n";
        let dic = "6\na/A\nb/B\nc/C\n1/n1\n2/n1\nth/t\n";
        assert!(accepts(aff, dic, "abc"));
        assert!(!accepts(aff, dic, "acb"));
        assert!(!accepts(aff, dic, "ab"));
        assert!(accepts(aff, dic, "1th"));
        assert!(accepts(aff, dic, "221th"));
        assert!(!accepts(aff, dic, "12"));
    }

    #[test]
    fn rule_matcher_prefix_and_full() {
        let rule = CompoundRule::parse("AB?C*", morfeus_aff::flags::FlagMode::Char).expect("rule");
        let set = |s: &str| -> FlagSet { s.bytes().map(u16::from).collect() };
        let (a, b, c) = (set("A"), set("B"), set("C"));
        assert!(rule_matches(&rule, &[&a], true));
        assert!(rule_matches(&rule, &[&a, &c, &c], true));
        assert!(rule_matches(&rule, &[&a, &b, &c], true));
        assert!(!rule_matches(&rule, &[&b], false));
        assert!(!rule_matches(&rule, &[&a, &b, &b], true));
    }

    #[test]
    fn forbidden_part_blocks_compound() {
        let aff = "COMPOUNDFLAG X\nFORBIDDENWORD !\n";
        let dic = "2\nfoo/X\nbar/X!\n";
        assert!(!accepts(aff, dic, "foobar"));
    }

    #[test]
    fn affixed_first_part_needs_permit() {
        let aff = "COMPOUNDFLAG X\nCOMPOUNDPERMITFLAG P\nSFX S Y 1\nSFX S 0 s .\nSFX T Y 1\nSFX T 0 s/P .\n";
        assert!(!accepts(aff, "2\nfoo/XS\nbar/X\n", "foosbar"));
        assert!(accepts(aff, "2\nfoo/XT\nbar/X\n", "foosbar"));
        assert!(accepts(aff, "2\nfoo/X\nbar/XS\n", "foobars"));
    }
}
