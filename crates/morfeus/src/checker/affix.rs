// Affix reconstruction
//
// Each check walks the index candidates for the word, undoes the affix,
// and looks the reconstructed root up in the word table. Results are
// reported through a visitor so the same walk serves "first match" (spell
// checking) and "every match" (analysis).

use std::ops::ControlFlow;

use morfeus_aff::affix::AffixEntry;
use morfeus_aff::dictionary::DictEntry;
use morfeus_aff::flags::Flag;

use super::{AffixMatch, Checker, CompoundPos};

/// Receives matches; `Break` stops the walk.
pub type Visit<'v, 'a> = dyn FnMut(AffixMatch<'a>) -> ControlFlow<()> + 'v;

/// Constraints on a suffix check.
#[derive(Debug, Clone, Copy)]
pub struct SuffixContext<'a> {
    /// Prefix already undone; the suffix must be cross-product capable.
    pub prefix: Option<&'a AffixEntry>,
    /// Flag of an outer suffix the inner suffix must list as a
    /// continuation class (two-level stripping).
    pub cont_class: Option<Flag>,
    /// Flag the root or the suffix must carry.
    pub need: Option<Flag>,
    pub pos: CompoundPos,
}

impl SuffixContext<'_> {
    pub fn new(pos: CompoundPos, need: Option<Flag>) -> Self {
        Self {
            prefix: None,
            cont_class: None,
            need,
            pos,
        }
    }
}

/// Run a visitor walk and keep only the first match.
pub(crate) fn first_match<'a>(
    walk: impl FnOnce(&mut Visit<'_, 'a>) -> ControlFlow<()>,
) -> Option<AffixMatch<'a>> {
    let mut found = None;
    let _ = walk(&mut |m| {
        found = Some(m);
        ControlFlow::Break(())
    });
    found
}

impl<'a> Checker<'a> {
    // ------------------------------------------------------------------
    // First-match entry points
    // ------------------------------------------------------------------

    /// Prefix check, falling through to a cross-product suffix check on the
    /// remainder when the prefix allows it.
    pub fn check_prefix(
        &self,
        word: &str,
        pos: CompoundPos,
        need: Option<Flag>,
    ) -> Option<AffixMatch<'a>> {
        first_match(|v| self.visit_prefix(word, pos, need, v))
    }

    pub fn check_suffix(&self, word: &str, ctx: &SuffixContext<'a>) -> Option<AffixMatch<'a>> {
        first_match(|v| self.visit_suffix(word, ctx, v))
    }

    /// Undo an outer suffix whose flag is a continuation class, then an
    /// inner suffix that names it.
    pub fn check_two_level_suffix(
        &self,
        word: &str,
        prefix: Option<&'a AffixEntry>,
        need: Option<Flag>,
    ) -> Option<AffixMatch<'a>> {
        first_match(|v| self.visit_two_level_suffix(word, prefix, need, v))
    }

    pub fn check_prefix_with_two_level_suffix(
        &self,
        word: &str,
        need: Option<Flag>,
    ) -> Option<AffixMatch<'a>> {
        first_match(|v| self.visit_prefix_two_level(word, need, v))
    }

    /// Prefixes (with cross products), then suffixes, then the two-level
    /// forms when any continuation classes exist. Under `COMPLEXPREFIXES`
    /// the two-level forms strip two prefixes.
    pub fn check_word(
        &self,
        word: &str,
        pos: CompoundPos,
        need: Option<Flag>,
    ) -> Option<AffixMatch<'a>> {
        first_match(|v| self.visit_word(word, pos, need, v))
    }

    // ------------------------------------------------------------------
    // Walks
    // ------------------------------------------------------------------

    pub(crate) fn visit_word(
        &self,
        word: &str,
        pos: CompoundPos,
        need: Option<Flag>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        self.visit_prefix(word, pos, need, visit)?;
        self.visit_suffix(word, &SuffixContext::new(pos, need), visit)?;
        if !self.rules.index.has_cont_classes() {
            return ControlFlow::Continue(());
        }
        if self.rules.options.complex_prefixes {
            self.visit_two_level_prefix(word, need, visit)?;
        } else {
            self.visit_two_level_suffix(word, None, need, visit)?;
            self.visit_prefix_two_level(word, need, visit)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_prefix(
        &self,
        word: &str,
        pos: CompoundPos,
        need: Option<Flag>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        let opts = &self.rules.options;
        for pfx in self.rules.index.prefixes_for(word) {
            if !pos.in_compound() && pfx.has_cont_opt(opts.only_in_compound) {
                continue;
            }
            if pos == CompoundPos::End && !pfx.has_cont_opt(opts.compound.permit) {
                continue;
            }
            let Some(root_word) = pfx.strip_from(word, opts.full_strip) else {
                continue;
            };
            if !pfx.has_cont_opt(opts.need_affix) {
                for root in self.dict.homonyms(&root_word) {
                    let need_ok =
                        need.is_none() || root.has_flag_opt(need) || pfx.has_cont_opt(need);
                    if root.has_flag(pfx.flag) && need_ok {
                        visit(AffixMatch {
                            prefix: Some(pfx),
                            ..AffixMatch::bare(root)
                        })?;
                    }
                }
            }
            if pfx.cross_product && pos != CompoundPos::Begin {
                let ctx = SuffixContext {
                    prefix: Some(pfx),
                    ..SuffixContext::new(pos, need)
                };
                self.visit_suffix(&root_word, &ctx, visit)?;
            }
        }
        ControlFlow::Continue(())
    }

    pub(crate) fn visit_suffix(
        &self,
        word: &str,
        ctx: &SuffixContext<'a>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        let full_strip = self.rules.options.full_strip;
        for sfx in self.rules.index.suffixes_for(word) {
            if !self.suffix_allowed(sfx, ctx) {
                continue;
            }
            let Some(root_word) = sfx.strip_from(word, full_strip) else {
                continue;
            };
            for root in self.dict.homonyms(&root_word) {
                if self.suffix_root_ok(sfx, root, ctx) {
                    visit(AffixMatch {
                        prefix: ctx.prefix,
                        suffix: Some(sfx),
                        ..AffixMatch::bare(root)
                    })?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_two_level_suffix(
        &self,
        word: &str,
        prefix: Option<&'a AffixEntry>,
        need: Option<Flag>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        let full_strip = self.rules.options.full_strip;
        for outer in self.rules.index.suffixes_for(word) {
            if !self.rules.index.is_cont_class(outer.flag) {
                continue;
            }
            if prefix.is_some() && !outer.cross_product {
                continue;
            }
            let Some(rest) = outer.strip_from(word, full_strip) else {
                continue;
            };
            // A prefix named by the outer suffix is satisfied by it, so the
            // inner check runs without the cross-product constraint.
            let inner_prefix = prefix.filter(|p| !outer.has_cont(p.flag));
            let ctx = SuffixContext {
                prefix: inner_prefix,
                cont_class: Some(outer.flag),
                need,
                pos: CompoundPos::NotCompound,
            };
            self.visit_suffix(&rest, &ctx, &mut |m| {
                visit(AffixMatch {
                    prefix,
                    outer_suffix: Some(outer),
                    ..m
                })
            })?;
        }
        ControlFlow::Continue(())
    }

    fn visit_prefix_two_level(
        &self,
        word: &str,
        need: Option<Flag>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        let full_strip = self.rules.options.full_strip;
        for pfx in self.rules.index.prefixes_for(word) {
            if !pfx.cross_product {
                continue;
            }
            let Some(rest) = pfx.strip_from(word, full_strip) else {
                continue;
            };
            self.visit_two_level_suffix(&rest, Some(pfx), need, visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Undo an outer prefix whose flag is a continuation class, then an
    /// inner prefix that names it.
    fn visit_two_level_prefix(
        &self,
        word: &str,
        need: Option<Flag>,
        visit: &mut Visit<'_, 'a>,
    ) -> ControlFlow<()> {
        let opts = &self.rules.options;
        for outer in self.rules.index.prefixes_for(word) {
            if !self.rules.index.is_cont_class(outer.flag)
                || outer.has_cont_opt(opts.need_affix)
                || outer.has_cont_opt(opts.only_in_compound)
            {
                continue;
            }
            let Some(rest) = outer.strip_from(word, opts.full_strip) else {
                continue;
            };
            for inner in self.rules.index.prefixes_for(&rest) {
                if !inner.has_cont(outer.flag) || inner.has_cont_opt(opts.only_in_compound) {
                    continue;
                }
                let Some(root_word) = inner.strip_from(&rest, opts.full_strip) else {
                    continue;
                };
                for root in self.dict.homonyms(&root_word) {
                    let need_ok = need.is_none()
                        || root.has_flag_opt(need)
                        || inner.has_cont_opt(need)
                        || outer.has_cont_opt(need);
                    if root.has_flag(inner.flag)
                        && need_ok
                        && !root.has_flag_opt(opts.only_in_compound)
                    {
                        visit(AffixMatch {
                            prefix: Some(inner),
                            outer_prefix: Some(outer),
                            ..AffixMatch::bare(root)
                        })?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }

    // ------------------------------------------------------------------
    // Suffix admissibility
    // ------------------------------------------------------------------

    /// Conditions on the suffix entry alone, before any lookup.
    fn suffix_allowed(&self, sfx: &AffixEntry, ctx: &SuffixContext<'a>) -> bool {
        let opts = &self.rules.options;
        if ctx.cont_class.is_some() && sfx.cont_flags.is_empty() {
            return false;
        }
        if ctx.prefix.is_some() && !sfx.cross_product {
            return false;
        }
        if matches!(ctx.pos, CompoundPos::Begin | CompoundPos::Middle)
            && !sfx.has_cont_opt(opts.compound.permit)
        {
            return false;
        }
        if let Some(circumfix) = opts.circumfix {
            let on_prefix = ctx.prefix.is_some_and(|p| p.has_cont(circumfix));
            if on_prefix != sfx.has_cont(circumfix) {
                return false;
            }
        }
        if !ctx.pos.in_compound() && sfx.has_cont_opt(opts.only_in_compound) {
            return false;
        }
        if ctx.cont_class.is_none() && sfx.has_cont_opt(opts.need_affix) {
            let prefix_completes = ctx
                .prefix
                .is_some_and(|p| !p.has_cont_opt(opts.need_affix));
            if !prefix_completes {
                return false;
            }
        }
        true
    }

    /// Conditions linking the suffix to one homonym of the root.
    fn suffix_root_ok(&self, sfx: &AffixEntry, root: &DictEntry, ctx: &SuffixContext<'a>) -> bool {
        let opts = &self.rules.options;
        let enabled = root.has_flag(sfx.flag) || ctx.prefix.is_some_and(|p| p.has_cont(sfx.flag));
        let crossed = ctx
            .prefix
            .is_none_or(|p| root.has_flag(p.flag) || sfx.has_cont(p.flag));
        let class_ok = ctx.cont_class.is_none_or(|c| sfx.has_cont(c));
        let placement_ok = ctx.pos.in_compound() || !root.has_flag_opt(opts.only_in_compound);
        let need_ok = ctx.need.is_none() || root.has_flag_opt(ctx.need) || sfx.has_cont_opt(ctx.need);
        enabled && crossed && class_ok && placement_ok && need_ok
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::load;
    use super::*;

    const AFF: &str = "\
PFX U Y 1
PFX U 0 un .

PFX R N 1
PFX R 0 re .

SFX D Y 3
SFX D 0 ed [^y]
SFX D y ied [^aeiou]y
SFX D 0 ed [aeiou]y

SFX S N 1
SFX S 0 s .
";
    const DIC: &str = "4\ntry/D\ndo/UR\nlock/UDS\nplay/D\n";

    fn checker_test(word: &str, expect_root: Option<&str>) {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        let got = c.check_word(word, CompoundPos::NotCompound, None);
        assert_eq!(got.map(|m| m.root.word.clone()).as_deref(), expect_root, "{word}");
    }

    #[test]
    fn suffix_with_strip_restores_root() {
        checker_test("tried", Some("try"));
        checker_test("played", Some("play"));
        checker_test("plaied", None);
    }

    #[test]
    fn prefix_alone() {
        checker_test("undo", Some("do"));
        checker_test("redo", Some("do"));
        checker_test("relock", None);
    }

    #[test]
    fn cross_product_needs_both_sides() {
        checker_test("unlocked", Some("lock"));
        // S is not cross-product capable.
        checker_test("unlocks", None);
        checker_test("locks", Some("lock"));
    }

    #[test]
    fn check_prefix_reports_both_affixes() {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        let m = c
            .check_prefix("unlocked", CompoundPos::NotCompound, None)
            .expect("match");
        assert_eq!(m.prefix.map(|p| p.append.as_str()), Some("un"));
        assert_eq!(m.suffix.map(|s| s.append.as_str()), Some("ed"));
    }

    #[test]
    fn required_flag_must_be_on_root_or_affix() {
        let (rules, dict) = load(AFF, DIC);
        let c = Checker::new(&rules, &dict);
        let s = morfeus_aff::flags::decode_flag("S", rules.flag_mode()).ok();
        let ctx = SuffixContext::new(CompoundPos::NotCompound, s);
        assert!(c.check_suffix("locked", &ctx).is_some());
        assert!(c.check_suffix("tried", &ctx).is_none());
    }

    const TWO_LEVEL_AFF: &str = "\
SFX A Y 1
SFX A 0 able/B .

SFX B Y 1
SFX B 0 ness .
";

    #[test]
    fn two_level_suffix() {
        let (rules, dict) = load(TWO_LEVEL_AFF, "1\ndrink/A\n");
        let c = Checker::new(&rules, &dict);
        assert!(c.check_word("drinkable", CompoundPos::NotCompound, None).is_some());
        let m = c
            .check_two_level_suffix("drinkableness", None, None)
            .expect("two-level");
        assert_eq!(m.root.word, "drink");
        assert_eq!(m.suffix.map(|s| s.append.as_str()), Some("able"));
        assert_eq!(m.outer_suffix.map(|s| s.append.as_str()), Some("ness"));
        assert!(c.check_word("drinkness", CompoundPos::NotCompound, None).is_none());
    }

    const TWO_LEVEL_PREFIX_AFF: &str = "\
PFX A Y 1
PFX A 0 ba/B .

PFX B Y 1
PFX B 0 lu .
";

    #[test]
    fn complex_prefixes_strip_two_prefixes() {
        let aff = format!("COMPLEXPREFIXES\n{TWO_LEVEL_PREFIX_AFF}");
        let (rules, dict) = load(&aff, "1\nkit/A\n");
        let c = Checker::new(&rules, &dict);
        assert!(c.check_word("bakit", CompoundPos::NotCompound, None).is_some());
        let m = c
            .check_word("lubakit", CompoundPos::NotCompound, None)
            .expect("two-level prefix");
        assert_eq!(m.root.word, "kit");
        assert_eq!(m.prefix.map(|p| p.append.as_str()), Some("ba"));
        assert_eq!(m.outer_prefix.map(|p| p.append.as_str()), Some("lu"));
        let order: Vec<&str> = m.affixes().map(|a| a.append.as_str()).collect();
        assert_eq!(order, ["lu", "ba"]);
        assert!(c.check_word("lukit", CompoundPos::NotCompound, None).is_none());
    }

    #[test]
    fn two_prefixes_need_complex_prefixes() {
        let (rules, dict) = load(TWO_LEVEL_PREFIX_AFF, "1\nkit/A\n");
        let c = Checker::new(&rules, &dict);
        assert!(c.check_word("bakit", CompoundPos::NotCompound, None).is_some());
        assert!(c.check_word("lubakit", CompoundPos::NotCompound, None).is_none());
    }

    const CIRCUMFIX_AFF: &str = "\
CIRCUMFIX X
PFX A Y 1
PFX A 0 leg/X .
SFX C Y 2
SFX C 0 obb .
SFX C 0 obb/AX .
";

    #[test]
    fn circumfix_requires_both_halves() {
        let (rules, dict) = load(CIRCUMFIX_AFF, "1\nnagy/C\n");
        let c = Checker::new(&rules, &dict);
        assert!(c.check_word("nagyobb", CompoundPos::NotCompound, None).is_some());
        assert!(c.check_word("legnagyobb", CompoundPos::NotCompound, None).is_some());
        assert!(c.check_word("legnagy", CompoundPos::NotCompound, None).is_none());
    }

    #[test]
    fn need_affix_suffix_cannot_stand_alone() {
        let aff = "NEEDAFFIX n\nSFX S Y 1\nSFX S 0 s/n .\n";
        let (rules, dict) = load(aff, "1\ncat/S\n");
        let c = Checker::new(&rules, &dict);
        assert!(c.check_word("cats", CompoundPos::NotCompound, None).is_none());
    }
}
