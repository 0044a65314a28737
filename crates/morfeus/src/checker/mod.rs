// Word acceptance: dictionary lookup, affix reconstruction and compounding
//
// A `Checker` borrows the immutable rule set and word table for the
// duration of one query. It keeps no state between calls: whatever a
// check matched (root, prefix, suffix, compound parts) is returned as a
// value.

pub mod affix;
pub mod compound;
pub mod expand;

use std::ops::ControlFlow;

use morfeus_aff::AffixRuleSet;
use morfeus_aff::affix::AffixEntry;
use morfeus_aff::dictionary::{DictEntry, DictionaryTable};
use morfeus_aff::flags::Flag;
use morfeus_core::analysis::{MorphDescription, TAG_PART, TAG_STEM};
use morfeus_core::enums::SpellInfo;

pub use compound::{CompoundMatch, CompoundPart};

/// Where in a compound the word being checked stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundPos {
    /// A standalone word.
    NotCompound,
    /// First part of a compound.
    Begin,
    /// Neither first nor last.
    Middle,
    /// Last part.
    End,
}

impl CompoundPos {
    pub fn in_compound(self) -> bool {
        self != CompoundPos::NotCompound
    }
}

/// A root reconstructed from a surface word, with the affixes that were
/// undone to reach it.
#[derive(Debug, Clone, Copy)]
pub struct AffixMatch<'a> {
    pub root: &'a DictEntry,
    pub prefix: Option<&'a AffixEntry>,
    /// Suffix attached directly to the root.
    pub suffix: Option<&'a AffixEntry>,
    /// Second-level suffix attached after `suffix`.
    pub outer_suffix: Option<&'a AffixEntry>,
    /// Second-level prefix attached before `prefix`.
    pub outer_prefix: Option<&'a AffixEntry>,
}

impl<'a> AffixMatch<'a> {
    pub fn bare(root: &'a DictEntry) -> Self {
        Self {
            root,
            prefix: None,
            suffix: None,
            outer_suffix: None,
            outer_prefix: None,
        }
    }

    pub fn is_affixed(&self) -> bool {
        self.prefix.is_some() || self.suffix.is_some()
    }

    /// The applied affixes, prefix first.
    pub fn affixes(&self) -> impl Iterator<Item = &'a AffixEntry> + '_ {
        self.outer_prefix
            .into_iter()
            .chain(self.prefix)
            .chain(self.suffix)
            .chain(self.outer_suffix)
    }

    /// Whether any applied affix lists `flag` among its continuation
    /// classes.
    pub fn affix_has_cont(&self, flag: Option<Flag>) -> bool {
        self.affixes().any(|a| a.has_cont_opt(flag))
    }

    /// `st:` followed by the root's and the affixes' fields.
    pub fn description(&self) -> MorphDescription {
        let mut desc = MorphDescription::new();
        if !self.root.morph.contains_tag(TAG_STEM) {
            desc.push(TAG_STEM, self.root.word.clone());
        }
        desc.extend(&self.root.morph);
        for affix in self.affixes() {
            desc.extend(&affix.morph);
        }
        desc
    }

    /// The stem reported for this match: an explicit `st:` field, or the
    /// root spelling.
    pub fn stem(&self) -> String {
        self.root
            .morph
            .get(TAG_STEM)
            .map_or_else(|| self.root.word.clone(), str::to_string)
    }
}

/// A successful acceptance of one spelling.
#[derive(Debug, Clone)]
pub enum WordMatch<'a> {
    Simple(AffixMatch<'a>),
    Compound(CompoundMatch<'a>),
}

impl<'a> WordMatch<'a> {
    pub fn description(&self) -> MorphDescription {
        match self {
            WordMatch::Simple(m) => m.description(),
            WordMatch::Compound(c) => {
                let mut desc = MorphDescription::new();
                for part in &c.parts {
                    desc.push(TAG_PART, part.surface.clone());
                    desc.extend(&part.matched.description());
                }
                desc
            }
        }
    }

    /// Root entries that carry flags relevant to case handling.
    pub fn roots(&self) -> Vec<&'a DictEntry> {
        match self {
            WordMatch::Simple(m) => vec![m.root],
            WordMatch::Compound(c) => c.parts.iter().map(|p| p.matched.root).collect(),
        }
    }
}

/// Outcome of checking one exact spelling.
#[derive(Debug, Clone)]
pub struct Verdict<'a> {
    pub found: Option<WordMatch<'a>>,
    pub info: SpellInfo,
}

impl Verdict<'_> {
    fn rejected(info: SpellInfo) -> Self {
        Self { found: None, info }
    }

    pub fn is_ok(&self) -> bool {
        self.found.is_some()
    }
}

/// Borrowed view over a loaded dictionary that answers acceptance queries.
#[derive(Clone, Copy)]
pub struct Checker<'a> {
    pub rules: &'a AffixRuleSet,
    pub dict: &'a DictionaryTable,
}

impl<'a> Checker<'a> {
    pub fn new(rules: &'a AffixRuleSet, dict: &'a DictionaryTable) -> Self {
        Self { rules, dict }
    }

    pub(crate) fn is_forbidden(&self, entry: &DictEntry) -> bool {
        self.dict.is_forbidden(entry)
    }

    /// Check one exact spelling: plain lookup, then affixes, then (when
    /// `allow_compound`) compounding.
    pub fn check(&self, word: &str, allow_compound: bool) -> Verdict<'a> {
        let opts = &self.rules.options;
        let mut info = SpellInfo::NONE;

        let mut homonyms = self.dict.homonyms(word).peekable();
        if homonyms.peek().is_some() {
            if self.dict.homonyms(word).any(|e| self.is_forbidden(e)) {
                return Verdict::rejected(SpellInfo::FORBIDDEN);
            }
            let usable = homonyms.find(|e| {
                !e.has_flag_opt(opts.need_affix) && !e.has_flag_opt(opts.only_in_compound)
            });
            if let Some(root) = usable {
                return self.accept(WordMatch::Simple(AffixMatch::bare(root)), info);
            }
        }

        if let Some(m) = self.check_word(word, CompoundPos::NotCompound, None) {
            if m.root.has_flag_opt(opts.only_in_compound) {
                return Verdict::rejected(info);
            }
            if self.is_forbidden(m.root) {
                return Verdict::rejected(SpellInfo::FORBIDDEN);
            }
            return self.accept(WordMatch::Simple(m), info);
        }

        if allow_compound && opts.compound.enabled() {
            if let Some(c) = self.check_compound(word) {
                info |= SpellInfo::COMPOUND;
                return self.accept(WordMatch::Compound(c), info);
            }
        }
        Verdict::rejected(info)
    }

    fn accept(&self, found: WordMatch<'a>, mut info: SpellInfo) -> Verdict<'a> {
        let opts = &self.rules.options;
        if found.roots().iter().any(|r| r.has_flag_opt(opts.warn)) {
            info |= SpellInfo::WARN;
            if opts.forbid_warn {
                return Verdict::rejected(info);
            }
        }
        Verdict {
            found: Some(found),
            info,
        }
    }

    /// Every simple (non-compound) analysis of a spelling: bare homonyms
    /// and all affix reconstructions.
    pub fn simple_matches(&self, word: &str) -> Vec<AffixMatch<'a>> {
        let opts = &self.rules.options;
        let mut out: Vec<AffixMatch<'a>> = self
            .dict
            .homonyms(word)
            .filter(|e| {
                !self.is_forbidden(e)
                    && !e.has_flag_opt(opts.need_affix)
                    && !e.has_flag_opt(opts.only_in_compound)
            })
            .map(AffixMatch::bare)
            .collect();
        let _ = self.visit_word(word, CompoundPos::NotCompound, None, &mut |m| {
            if !m.root.has_flag_opt(opts.only_in_compound) && !self.is_forbidden(m.root) {
                out.push(m);
            }
            ControlFlow::Continue(())
        });
        out
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::load;
    use super::*;

    const AFF: &str = "\
FORBIDDENWORD !
NEEDAFFIX n
ONLYINCOMPOUND o
WARN w
COMPOUNDFLAG X
SFX S Y 1
SFX S 0 s .
";
    const DIC: &str = "6\ncat/S\nbad/!\npseudo/nS\nfuge/o\nrare/w\nfoo/X\n";

    #[test]
    fn every_plain_root_is_accepted() {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        assert!(c.check("cat", true).is_ok());
        assert!(c.check("foo", true).is_ok());
    }

    #[test]
    fn forbidden_root_is_rejected_with_info() {
        let (rules, dict) = load(AFF, DIC);
        let v = Checker::new(&rules, &dict).check("bad", true);
        assert!(!v.is_ok());
        assert!(v.info.contains(SpellInfo::FORBIDDEN));
    }

    #[test]
    fn need_affix_root_only_with_affix() {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        assert!(!c.check("pseudo", true).is_ok());
        assert!(c.check("pseudos", true).is_ok());
    }

    #[test]
    fn only_in_compound_root_rejected_alone() {
        let (rules, dict) = load(AFF, DIC);
        assert!(!Checker::new(&rules, &dict).check("fuge", true).is_ok());
    }

    #[test]
    fn warn_flag_is_reported() {
        let (rules, dict) = load(AFF, DIC);
        let v = Checker::new(&rules, &dict).check("rare", true);
        assert!(v.is_ok());
        assert!(v.info.contains(SpellInfo::WARN));
    }

    #[test]
    fn forbid_warn_rejects_warned_words() {
        let aff = format!("{AFF}FORBIDWARN\n");
        let (rules, dict) = load(&aff, DIC);
        assert!(!Checker::new(&rules, &dict).check("rare", true).is_ok());
    }

    #[test]
    fn compound_is_flagged_in_info() {
        let (rules, dict) = load(AFF, DIC);
        let v = Checker::new(&rules, &dict).check("foofoo", true);
        assert!(v.info.contains(SpellInfo::COMPOUND));
        assert!(matches!(v.found, Some(WordMatch::Compound(_))));
        assert!(!Checker::new(&rules, &dict).check("foofoo", false).is_ok());
    }

    #[test]
    fn simple_matches_lists_affixed_analysis() {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        let matches = c.simple_matches("cats");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].root.word, "cat");
        assert_eq!(matches[0].description().to_string(), "st:cat");
    }
}
