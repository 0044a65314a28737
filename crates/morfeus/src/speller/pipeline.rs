// Top-level spell check pipeline
//
// Cleans the word, walks its case variants through the checker, and falls
// back to splitting at BREAK patterns.

use morfeus_core::case::{CaseType, case_variants, detect_case};
use morfeus_core::enums::{MAX_WORD_LEN, SpellInfo};

use crate::checker::{Checker, Verdict, WordMatch};

/// Break recursion stops once a word holds this many break points.
const MAX_BREAK_POINTS: usize = 10;

/// Spell check options controlling how words are evaluated.
#[derive(Debug, Clone)]
pub struct SpellOptions {
    /// Strip trailing dots (sentence punctuation, abbreviations).
    pub ignore_dot: bool,
    /// Accept any word containing a digit.
    pub ignore_numbers: bool,
    /// Accept a capitalised word when its lowercase form is correct.
    pub accept_first_uppercase: bool,
    /// Accept an all-uppercase word when its title or lowercase form is
    /// correct.
    pub accept_all_uppercase: bool,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            ignore_dot: true,
            ignore_numbers: false,
            accept_first_uppercase: true,
            accept_all_uppercase: true,
        }
    }
}

/// Digits with single `.`, `,` or `-` separators between them, e.g.
/// `1,000.50` or `2024-10-19`.
fn is_number(word: &str) -> bool {
    let mut prev_digit = false;
    let mut seen_digit = false;
    for c in word.chars() {
        if c.is_ascii_digit() {
            prev_digit = true;
            seen_digit = true;
        } else if matches!(c, '.' | ',' | '-') && prev_digit {
            prev_digit = false;
        } else {
            return false;
        }
    }
    seen_digit && prev_digit
}

/// Whether KEEPCASE forbids accepting `found` through a case-changed
/// variant.
fn keeps_case(checker: &Checker<'_>, found: &WordMatch<'_>) -> bool {
    let keep_case = checker.rules.options.keep_case;
    keep_case.is_some() && found.roots().iter().any(|r| r.has_flag_opt(keep_case))
}

/// FORCEUCASE on the last part of a compound demands a capital letter.
fn needs_capital(checker: &Checker<'_>, found: &WordMatch<'_>) -> bool {
    let force = checker.rules.options.force_upper;
    match found {
        WordMatch::Compound(c) => {
            force.is_some() && c.last_root().is_some_and(|r| r.has_flag_opt(force))
        }
        WordMatch::Simple(_) => false,
    }
}

/// Check one variant, retrying with a single trailing dot for
/// abbreviations when dots were stripped.
fn check_variant<'a>(checker: &Checker<'a>, word: &str, abbreviation: bool) -> Verdict<'a> {
    let verdict = checker.check(word, true);
    if verdict.is_ok() || !abbreviation || verdict.info.contains(SpellInfo::FORBIDDEN) {
        return verdict;
    }
    let dotted = format!("{word}.");
    checker.check(&dotted, true)
}

/// Walk the case variants of `word`. Returns the acceptance and the
/// accumulated info bits.
fn check_cased(
    checker: &Checker<'_>,
    word: &str,
    abbreviation: bool,
    options: &SpellOptions,
) -> (bool, SpellInfo) {
    let case = detect_case(word);
    let mut info = SpellInfo::NONE;
    if case == CaseType::AllUpper {
        info |= SpellInfo::ALLCAP;
    }
    let vary = match case {
        CaseType::AllUpper => options.accept_all_uppercase,
        CaseType::FirstUpper => options.accept_first_uppercase,
        _ => false,
    };
    let variants = if vary {
        case_variants(word, case)
    } else {
        vec![word.to_string()]
    };

    for (i, variant) in variants.iter().enumerate() {
        let verdict = check_variant(checker, variant, abbreviation);
        info |= verdict.info;
        if verdict.info.contains(SpellInfo::FORBIDDEN) {
            return (false, info);
        }
        let Some(found) = verdict.found else {
            continue;
        };
        if i > 0 && keeps_case(checker, &found) {
            continue;
        }
        if needs_capital(checker, &found) && !case.starts_upper() {
            continue;
        }
        return (true, info);
    }
    (false, info)
}

/// Top-level spell check entry point.
///
/// 1. Trims the word and removes IGNORE characters
/// 2. Strips trailing dots (remembered for abbreviation lookups)
/// 3. Accepts numbers
/// 4. Tries the case variants
/// 5. Splits at BREAK points and checks the pieces
pub fn spell_check(checker: &Checker<'_>, word: &str, options: &SpellOptions) -> (bool, SpellInfo) {
    spell_check_depth(checker, word, options, 0)
}

fn spell_check_depth(
    checker: &Checker<'_>,
    word: &str,
    options: &SpellOptions,
    depth: usize,
) -> (bool, SpellInfo) {
    let word = word.trim();
    if word.is_empty() {
        return (true, SpellInfo::NONE);
    }
    if word.chars().count() > MAX_WORD_LEN {
        return (false, SpellInfo::NONE);
    }
    let cleaned = checker.rules.options.strip_ignored(word);

    let (base, abbreviation) = if options.ignore_dot {
        let base = cleaned.trim_end_matches('.');
        (base, base.len() < cleaned.len())
    } else {
        (cleaned.as_str(), false)
    };
    if base.is_empty() {
        return (false, SpellInfo::NONE);
    }
    if is_number(base) || (options.ignore_numbers && base.chars().any(|c| c.is_ascii_digit())) {
        return (true, SpellInfo::NONE);
    }

    let (ok, info) = check_cased(checker, base, abbreviation, options);
    if ok || info.contains(SpellInfo::FORBIDDEN) {
        return (ok, info);
    }
    if depth < MAX_BREAK_POINTS && check_breaks(checker, base, options, depth) {
        return (true, info);
    }
    (false, info)
}

/// Accept a word whose pieces, split at a BREAK pattern, are all correct.
fn check_breaks(checker: &Checker<'_>, word: &str, options: &SpellOptions, depth: usize) -> bool {
    let breaks = &checker.rules.breaks;
    if breaks.is_empty() {
        return false;
    }
    let points: usize = breaks
        .iter()
        .map(|b| b.trim_start_matches('^').trim_end_matches('$'))
        .filter(|b| !b.is_empty())
        .map(|b| word.matches(b).count())
        .sum();
    if points >= MAX_BREAK_POINTS {
        return false;
    }
    let spell = |piece: &str| spell_check_depth(checker, piece, options, depth + 1).0;

    for pattern in breaks {
        if let Some(lead) = pattern.strip_prefix('^').filter(|p| !p.is_empty()) {
            if let Some(rest) = word.strip_prefix(lead) {
                if !rest.is_empty() && spell(rest) {
                    return true;
                }
            }
        }
        if let Some(tail) = pattern.strip_suffix('$').filter(|p| !p.is_empty()) {
            if let Some(rest) = word.strip_suffix(tail) {
                if !rest.is_empty() && spell(rest) {
                    return true;
                }
            }
        }
    }

    for pattern in breaks {
        if pattern.is_empty() || pattern.starts_with('^') || pattern.ends_with('$') {
            continue;
        }
        let Some(first) = word.find(pattern.as_str()) else {
            continue;
        };
        if first == 0 || first + pattern.len() >= word.len() {
            continue;
        }
        // Prefer the second occurrence so words containing the break
        // pattern themselves are still found.
        let step = word[first..].chars().next().map_or(1, char::len_utf8);
        let at = word[first + step..]
            .find(pattern.as_str())
            .map(|j| first + step + j)
            .filter(|&j| j + pattern.len() < word.len())
            .unwrap_or(first);
        if spell(&word[at + pattern.len()..]) && spell(&word[..at]) {
            return true;
        }
        if at != first && spell(&word[first + pattern.len()..]) && spell(&word[..first]) {
            return true;
        }
    }
    false
}
