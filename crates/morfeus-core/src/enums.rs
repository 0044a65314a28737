// Shared result enums and limits

/// Result of checking one candidate word against the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellResult {
    /// Accepted as a simple or affixed word.
    Ok,
    /// Accepted only as a compound word.
    Compound,
    /// Rejected.
    Failed,
}

impl SpellResult {
    pub fn is_ok(self) -> bool {
        self != SpellResult::Failed
    }
}

/// Auxiliary information returned alongside a spell verdict.
///
/// A small bit set; combine with `|` and query with [`SpellInfo::contains`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SpellInfo(u8);

impl SpellInfo {
    pub const NONE: SpellInfo = SpellInfo(0);
    /// The word was accepted as a compound.
    pub const COMPOUND: SpellInfo = SpellInfo(1);
    /// The word is explicitly forbidden by the dictionary.
    pub const FORBIDDEN: SpellInfo = SpellInfo(1 << 1);
    /// The input was all uppercase and matched through a case variant.
    pub const ALLCAP: SpellInfo = SpellInfo(1 << 2);
    /// The matched root carries the WARN flag (rare or questionable form).
    pub const WARN: SpellInfo = SpellInfo(1 << 3);

    pub fn contains(self, other: SpellInfo) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: SpellInfo) {
        self.0 |= other.0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for SpellInfo {
    type Output = SpellInfo;

    fn bitor(self, rhs: SpellInfo) -> SpellInfo {
        SpellInfo(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SpellInfo {
    fn bitor_assign(&mut self, rhs: SpellInfo) {
        self.0 |= rhs.0;
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of characters in a checked word. Longer input is rejected
/// without lookup.
pub const MAX_WORD_LEN: usize = 100;

/// Default cap on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 15;

/// Number of dictionary roots kept by the n-gram scan.
pub const MAX_ROOTS: usize = 100;

/// Number of inflected guesses kept after root expansion.
pub const MAX_GUESSES: usize = 200;

/// Default cap on n-gram suggestions merged into the result.
pub const MAX_NGRAM_SUGGESTIONS: usize = 4;

/// Default cap on compound-word suggestions.
pub const MAX_COMPOUND_SUGGESTIONS: usize = 3;

/// Maximum number of `*`/`?` backtrack points kept by the compound-rule
/// matcher.
pub const MAX_RULE_BACKTRACK: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_info_bits_combine() {
        let mut info = SpellInfo::COMPOUND | SpellInfo::WARN;
        assert!(info.contains(SpellInfo::COMPOUND));
        assert!(info.contains(SpellInfo::WARN));
        assert!(!info.contains(SpellInfo::FORBIDDEN));
        info.insert(SpellInfo::ALLCAP);
        assert_eq!(info.bits(), 0b1101);
        assert!(SpellInfo::NONE.is_empty());
    }

    #[test]
    fn failed_is_not_ok() {
        assert!(SpellResult::Ok.is_ok());
        assert!(SpellResult::Compound.is_ok());
        assert!(!SpellResult::Failed.is_ok());
    }
}
