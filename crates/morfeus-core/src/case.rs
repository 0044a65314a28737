// Capitalization shape detection and conversion

use crate::character::{capitalize, is_lower, is_upper, to_lower, to_title, to_upper};

/// Classification of character casing within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No cased letters at all: "1984", "--".
    NoLetters,
    /// All cased letters are lowercase: "sun".
    AllLower,
    /// First letter uppercase, the rest lowercase: "Sun".
    FirstUpper,
    /// All cased letters are uppercase: "SUN".
    AllUpper,
    /// Mixed case starting with a lowercase letter: "iPhone".
    Mixed,
    /// Mixed case starting with an uppercase letter: "OpenOffice".
    MixedFirstUpper,
}

impl CaseType {
    /// Whether the word starts with an uppercase letter.
    pub fn starts_upper(self) -> bool {
        matches!(
            self,
            CaseType::FirstUpper | CaseType::AllUpper | CaseType::MixedFirstUpper
        )
    }
}

/// Detect the capitalization shape of a word.
///
/// Uncased characters (digits, punctuation) are ignored. A single uppercase
/// letter counts as `FirstUpper`, not `AllUpper`, so "A" can be looked up
/// as "a".
pub fn detect_case(word: &str) -> CaseType {
    let mut upper = 0usize;
    let mut lower = 0usize;
    let mut first_upper = false;

    for (i, c) in word.chars().enumerate() {
        if is_upper(c) {
            upper += 1;
            if i == 0 {
                first_upper = true;
            }
        } else if is_lower(c) {
            lower += 1;
        }
    }

    if upper == 0 {
        if lower == 0 {
            CaseType::NoLetters
        } else {
            CaseType::AllLower
        }
    } else if first_upper && upper == 1 {
        CaseType::FirstUpper
    } else if lower == 0 {
        CaseType::AllUpper
    } else if first_upper {
        CaseType::MixedFirstUpper
    } else {
        CaseType::Mixed
    }
}

/// Re-case a word to the given shape.
///
/// - `NoLetters` / `Mixed` -- no change.
/// - `AllLower` -- every letter is lowercased.
/// - `AllUpper` -- every letter is uppercased.
/// - `FirstUpper` -- first letter uppercased, the rest left as is.
/// - `MixedFirstUpper` -- first letter uppercased, the rest left as is.
pub fn set_case(word: &str, case_type: CaseType) -> String {
    match case_type {
        CaseType::NoLetters | CaseType::Mixed => word.to_string(),
        CaseType::AllLower => to_lower(word),
        CaseType::AllUpper => to_upper(word),
        CaseType::FirstUpper | CaseType::MixedFirstUpper => capitalize(word),
    }
}

/// Produce the lookup variants of a word in the order the checker tries
/// them, e.g. "SUN" -> ["SUN", "Sun", "sun"].
pub fn case_variants(word: &str, case_type: CaseType) -> Vec<String> {
    let mut variants = vec![word.to_string()];
    let mut push = |v: String| {
        if !variants.contains(&v) {
            variants.push(v);
        }
    };
    match case_type {
        CaseType::NoLetters | CaseType::AllLower | CaseType::Mixed | CaseType::MixedFirstUpper => {}
        CaseType::FirstUpper => push(to_lower(word)),
        CaseType::AllUpper => {
            push(to_title(word));
            push(to_lower(word));
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_basic_shapes() {
        assert_eq!(detect_case("sun"), CaseType::AllLower);
        assert_eq!(detect_case("Sun"), CaseType::FirstUpper);
        assert_eq!(detect_case("SUN"), CaseType::AllUpper);
        assert_eq!(detect_case("iPhone"), CaseType::Mixed);
        assert_eq!(detect_case("OpenOffice"), CaseType::MixedFirstUpper);
        assert_eq!(detect_case("1984"), CaseType::NoLetters);
        assert_eq!(detect_case(""), CaseType::NoLetters);
    }

    #[test]
    fn detect_ignores_uncased_characters() {
        assert_eq!(detect_case("UTF-8"), CaseType::AllUpper);
        assert_eq!(detect_case("x-ray"), CaseType::AllLower);
        assert_eq!(detect_case("A"), CaseType::FirstUpper);
    }

    #[test]
    fn set_case_round_trips_shapes() {
        assert_eq!(set_case("sun", CaseType::AllUpper), "SUN");
        assert_eq!(set_case("sun", CaseType::FirstUpper), "Sun");
        assert_eq!(set_case("SUN", CaseType::AllLower), "sun");
        assert_eq!(set_case("iPhone", CaseType::Mixed), "iPhone");
    }

    #[test]
    fn all_upper_variants_in_trial_order() {
        assert_eq!(
            case_variants("SUN", CaseType::AllUpper),
            vec!["SUN", "Sun", "sun"]
        );
        assert_eq!(case_variants("Sun", CaseType::FirstUpper), vec!["Sun", "sun"]);
        assert_eq!(case_variants("sun", CaseType::AllLower), vec!["sun"]);
        assert_eq!(case_variants("OpenOffice", CaseType::MixedFirstUpper), vec!["OpenOffice"]);
    }
}
