// Prefix and suffix entries

use morfeus_core::analysis::MorphDescription;

use crate::condition::Condition;
use crate::flags::{Flag, FlagSet};

/// Which end of the word an affix attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One `PFX`/`SFX` detail line.
///
/// Immutable once the rule file is loaded.
#[derive(Debug, Clone)]
pub struct AffixEntry {
    pub kind: AffixKind,
    pub flag: Flag,
    /// Characters removed from the root before `append` is attached.
    pub strip: String,
    /// Characters attached to the root.
    pub append: String,
    pub condition: Condition,
    /// Continuation classes: affixes this affix may combine with.
    pub cont_flags: FlagSet,
    pub cross_product: bool,
    pub morph: MorphDescription,
}

impl AffixEntry {
    /// The string the index sorts by: `append` for prefixes, `append`
    /// reversed (byte-wise) for suffixes.
    pub fn key(&self) -> &str {
        &self.append
    }

    /// Whether `word` starts (prefix) or ends (suffix) with this affix.
    pub fn is_on(&self, word: &str) -> bool {
        match self.kind {
            AffixKind::Prefix => word.starts_with(&self.append),
            AffixKind::Suffix => word.ends_with(&self.append),
        }
    }

    pub fn has_cont(&self, flag: Flag) -> bool {
        self.cont_flags.contains(flag)
    }

    pub fn has_cont_opt(&self, flag: Option<Flag>) -> bool {
        self.cont_flags.contains_opt(flag)
    }

    /// Undo this affix on `word`: remove `append`, restore `strip`, and test
    /// the condition on the reconstructed root.
    ///
    /// `full_strip` allows the root to be entirely replaced (empty remainder).
    pub fn strip_from(&self, word: &str, full_strip: bool) -> Option<String> {
        if !self.is_on(word) {
            return None;
        }
        let rest_len = word.len() - self.append.len();
        if rest_len == 0 && !full_strip {
            return None;
        }
        if rest_len == 0 && self.strip.is_empty() {
            return None;
        }
        let root = match self.kind {
            AffixKind::Prefix => {
                let mut root = String::with_capacity(self.strip.len() + rest_len);
                root.push_str(&self.strip);
                root.push_str(&word[self.append.len()..]);
                root
            }
            AffixKind::Suffix => {
                let mut root = String::with_capacity(self.strip.len() + rest_len);
                root.push_str(&word[..rest_len]);
                root.push_str(&self.strip);
                root
            }
        };
        let ok = match self.kind {
            AffixKind::Prefix => self.condition.matches_prefix(&root),
            AffixKind::Suffix => self.condition.matches_suffix(&root),
        };
        ok.then_some(root)
    }

    /// Apply this affix to `root`, if the condition allows it.
    pub fn apply_to(&self, root: &str) -> Option<String> {
        let (cond_ok, has_strip) = match self.kind {
            AffixKind::Prefix => (
                self.condition.matches_prefix(root),
                root.starts_with(&self.strip),
            ),
            AffixKind::Suffix => (
                self.condition.matches_suffix(root),
                root.ends_with(&self.strip),
            ),
        };
        if !cond_ok || !has_strip || root.len() < self.strip.len() {
            return None;
        }
        let word = match self.kind {
            AffixKind::Prefix => format!("{}{}", self.append, &root[self.strip.len()..]),
            AffixKind::Suffix => {
                format!("{}{}", &root[..root.len() - self.strip.len()], self.append)
            }
        };
        Some(word)
    }
}
