// Morphological generation
//
// The roots of a word are expanded through their affix flags and the
// forms whose inflection equals a target are kept. The target comes either
// from an example word (its `is:`/`ds:`/`ts:`/`ip:` fields, or failing
// those, its affix flags) or from a description given directly.

use morfeus_aff::affix::AffixKind;
use morfeus_aff::dictionary::DictEntry;
use morfeus_aff::flags::Flag;
use morfeus_core::analysis::{MorphDescription, TAG_ALLOMORPH};

use crate::checker::{AffixMatch, Checker, WordMatch};

use super::word_matches;

/// What a generated form must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// Inflection fields, compared regardless of order.
    Fields(Vec<String>),
    /// Applied affix flags, prefix first.
    Flags(Vec<(AffixKind, Flag)>),
}

impl Target {
    fn from_description(desc: &MorphDescription) -> Self {
        let mut fields: Vec<String> = desc
            .inflection()
            .fields()
            .iter()
            .map(|f| format!("{}:{}", f.tag, f.value))
            .collect();
        fields.sort();
        Target::Fields(fields)
    }

    /// Inflection of an example match, or its affix flags when it has no
    /// inflection fields.
    fn from_example(m: &AffixMatch<'_>) -> Self {
        let by_fields = Self::from_description(&m.description());
        match &by_fields {
            Target::Fields(fields) if fields.is_empty() => Target::Flags(affix_flags(m)),
            _ => by_fields,
        }
    }

    fn accepts(&self, m: &AffixMatch<'_>) -> bool {
        match self {
            Target::Fields(_) => Self::from_description(&m.description()) == *self,
            Target::Flags(flags) => affix_flags(m) == *flags,
        }
    }
}

fn affix_flags(m: &AffixMatch<'_>) -> Vec<(AffixKind, Flag)> {
    m.affixes().map(|a| (a.kind, a.flag)).collect()
}

/// Split a match into the spelling that precedes the inflected part (the
/// leading parts of a compound) and the match of the inflected part.
fn split_head<'a>(found: &WordMatch<'a>) -> Option<(String, AffixMatch<'a>)> {
    match found {
        WordMatch::Simple(m) => Some((String::new(), *m)),
        WordMatch::Compound(c) => {
            let (last, head) = c.parts.split_last()?;
            Some((head.iter().map(|p| p.surface.as_str()).collect(), last.matched))
        }
    }
}

/// Dictionary entries a form of `m` can be generated from: every homonym
/// of its stem plus the allomorphs (`al:`) those list.
fn generation_roots<'a>(checker: &Checker<'a>, m: &AffixMatch<'a>) -> Vec<&'a DictEntry> {
    let mut roots: Vec<&'a DictEntry> = checker.dict.homonyms(&m.stem()).collect();
    if roots.is_empty() {
        roots.push(m.root);
    }
    let mut i = 0;
    while i < roots.len() {
        let root = roots[i];
        for al in root.morph.get_all(TAG_ALLOMORPH) {
            for entry in checker.dict.homonyms(al) {
                if !roots.iter().any(|r| std::ptr::eq(*r, entry)) {
                    roots.push(entry);
                }
            }
        }
        i += 1;
    }
    roots.retain(|r| !checker.is_forbidden(r));
    roots
}

fn generate_for(checker: &Checker<'_>, word: &str, targets: &[Target]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if targets.is_empty() {
        return out;
    }
    for found in word_matches(checker, word) {
        let Some((head, m)) = split_head(&found) else {
            continue;
        };
        for root in generation_roots(checker, &m) {
            for expansion in checker.expand_root(root, None) {
                if !targets.iter().any(|t| t.accepts(&expansion.matched)) {
                    continue;
                }
                let form = format!("{head}{}", expansion.word);
                if !out.contains(&form) && checker.check(&form, true).is_ok() {
                    out.push(form);
                }
            }
        }
    }
    out
}

/// Forms of `word` inflected like `example`.
pub fn generate(checker: &Checker<'_>, word: &str, example: &str) -> Vec<String> {
    let mut targets: Vec<Target> = Vec::new();
    for found in word_matches(checker, example) {
        if let Some((_, m)) = split_head(&found) {
            let target = Target::from_example(&m);
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    generate_for(checker, word, &targets)
}

/// Forms of `word` carrying the inflection fields of `description`, e.g.
/// `is:plural`. A description without inflection fields asks for the
/// uninflected forms.
pub fn generate_from_description(checker: &Checker<'_>, word: &str, description: &str) -> Vec<String> {
    let target = Target::from_description(&MorphDescription::parse(description));
    generate_for(checker, word, &[target])
}
