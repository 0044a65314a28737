// Root expansion: the surface forms a dictionary entry generates through
// its affix flags.

use morfeus_aff::affix::{AffixEntry, AffixKind};
use morfeus_aff::dictionary::DictEntry;

use super::{AffixMatch, Checker};

/// One generated form.
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    pub word: String,
    pub matched: AffixMatch<'a>,
}

impl<'a> Checker<'a> {
    /// Forms of `root`: the bare root (unless NEEDAFFIX), suffixed,
    /// second-level suffixed, prefixed and cross-product forms.
    ///
    /// With a `hint`, only affixes whose append string occurs at the
    /// matching end of the hint are applied; this keeps guessing for
    /// a misspelled word cheap.
    pub fn expand_root(&self, root: &'a DictEntry, hint: Option<&str>) -> Vec<Expansion<'a>> {
        let opts = &self.rules.options;
        let fits = |a: &AffixEntry| {
            a.append.is_empty()
                || hint.is_none_or(|h| h.len() > a.append.len() && a.is_on(h))
        };
        let standalone = |a: &AffixEntry| {
            !a.has_cont_opt(opts.need_affix)
                && !a.has_cont_opt(opts.only_in_compound)
                && !a.has_cont_opt(opts.circumfix)
        };

        let mut out = Vec::new();
        if !root.has_flag_opt(opts.need_affix) {
            out.push(Expansion {
                word: root.word.clone(),
                matched: AffixMatch::bare(root),
            });
        }

        let own = |kind: AffixKind| {
            root.flags
                .iter()
                .flat_map(move |flag| self.rules.index.by_flag(flag))
                .filter(move |a| a.kind == kind)
        };

        let mut suffixed: Vec<(String, &'a AffixEntry)> = Vec::new();
        for sfx in own(AffixKind::Suffix) {
            if !fits(sfx) {
                continue;
            }
            let Some(word) = sfx.apply_to(&root.word) else {
                continue;
            };
            if standalone(sfx) {
                out.push(Expansion {
                    word: word.clone(),
                    matched: AffixMatch {
                        suffix: Some(sfx),
                        ..AffixMatch::bare(root)
                    },
                });
            }
            suffixed.push((word, sfx));
        }

        for (base, sfx) in &suffixed {
            for outer in sfx
                .cont_flags
                .iter()
                .flat_map(|flag| self.rules.index.by_flag(flag))
                .filter(|a| a.kind == AffixKind::Suffix)
            {
                if !fits(outer) || outer.has_cont_opt(opts.need_affix) {
                    continue;
                }
                if let Some(word) = outer.apply_to(base) {
                    out.push(Expansion {
                        word,
                        matched: AffixMatch {
                            suffix: Some(sfx),
                            outer_suffix: Some(outer),
                            ..AffixMatch::bare(root)
                        },
                    });
                }
            }
        }

        for pfx in own(AffixKind::Prefix) {
            if !fits(pfx) {
                continue;
            }
            if standalone(pfx) {
                if let Some(word) = pfx.apply_to(&root.word) {
                    out.push(Expansion {
                        word,
                        matched: AffixMatch {
                            prefix: Some(pfx),
                            ..AffixMatch::bare(root)
                        },
                    });
                }
            }
            if !pfx.cross_product {
                continue;
            }
            for (base, sfx) in &suffixed {
                if !sfx.cross_product
                    || pfx.has_cont_opt(opts.circumfix) != sfx.has_cont_opt(opts.circumfix)
                {
                    continue;
                }
                if let Some(word) = pfx.apply_to(base) {
                    out.push(Expansion {
                        word,
                        matched: AffixMatch {
                            prefix: Some(pfx),
                            suffix: Some(sfx),
                            ..AffixMatch::bare(root)
                        },
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::load;
    use super::*;

    const AFF: &str = "\
PFX U Y 1
PFX U 0 un .
SFX D Y 2
SFX D y ied [^aeiou]y
SFX D 0 ed [^y]
SFX S N 1
SFX S 0 s .
";

    fn forms(dic: &str, word: &str, hint: Option<&str>) -> Vec<String> {
        let (rules, dict) = load(AFF, dic);
        let c = Checker::new(&rules, &dict);
        let root = dict.lookup(word).expect("root");
        let mut out: Vec<String> = c.expand_root(root, hint).into_iter().map(|e| e.word).collect();
        out.sort();
        out
    }

    #[test]
    fn expands_all_affix_combinations() {
        assert_eq!(
            forms("1\nlock/UDS\n", "lock", None),
            ["lock", "locked", "locks", "unlock", "unlocked"]
        );
        assert_eq!(forms("1\ntry/D\n", "try", None), ["tried", "try"]);
    }

    #[test]
    fn hint_limits_affixes() {
        assert_eq!(forms("1\nlock/UDS\n", "lock", Some("lockd")), ["lock"]);
        assert_eq!(forms("1\nlock/UDS\n", "lock", Some("loks")), ["lock", "locks"]);
    }
}
