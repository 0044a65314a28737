// Subset-pruned affix index
//
// Entries live in one arena and are referenced by index. For each kind
// (prefix/suffix) the index keeps:
//
//   - a bucket of zero-length affixes, which cannot be pruned by first byte,
//   - 256 first-byte buckets, each a list sorted by affix key (suffix keys
//     compared back to front), linked with two extra pointers per node:
//     `next_eq` (the next node, when this key is a leading substring of it)
//     and `next_ne` (the first later node that does not extend this key).
//
// Walking a bucket follows `next_eq` after a key matched the word and
// `next_ne` after it failed, which skips every entry that cannot match.

use std::cmp::Ordering;

use hashbrown::{HashMap, HashSet};

use crate::affix::{AffixEntry, AffixKind};
use crate::flags::Flag;

#[derive(Debug, Clone, Copy)]
struct Node {
    entry: usize,
    next_eq: Option<usize>,
    next_ne: Option<usize>,
}

/// The per-kind search structure.
#[derive(Debug, Clone)]
struct Tree {
    kind: AffixKind,
    empty: Vec<usize>,
    heads: [Option<usize>; 256],
    nodes: Vec<Node>,
}

impl Tree {
    fn new(kind: AffixKind) -> Self {
        Self {
            kind,
            empty: Vec::new(),
            heads: [None; 256],
            nodes: Vec::new(),
        }
    }

    /// Byte `i` of the key in walk order.
    fn key_byte(kind: AffixKind, key: &[u8], i: usize) -> u8 {
        match kind {
            AffixKind::Prefix => key[i],
            AffixKind::Suffix => key[key.len() - 1 - i],
        }
    }

    fn compare(kind: AffixKind, a: &[u8], b: &[u8]) -> Ordering {
        match kind {
            AffixKind::Prefix => a.cmp(b),
            AffixKind::Suffix => a.iter().rev().cmp(b.iter().rev()),
        }
    }

    /// Whether `a` is a leading (prefix) or trailing (suffix) part of `b`.
    fn is_subset(kind: AffixKind, a: &[u8], b: &[u8]) -> bool {
        match kind {
            AffixKind::Prefix => b.starts_with(a),
            AffixKind::Suffix => b.ends_with(a),
        }
    }

    fn build(&mut self, entries: &[AffixEntry]) {
        let kind = self.kind;
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); 256];
        for (idx, entry) in entries.iter().enumerate() {
            if entry.kind != kind {
                continue;
            }
            let key = entry.key().as_bytes();
            if key.is_empty() {
                self.empty.push(idx);
            } else {
                buckets[usize::from(Self::key_byte(kind, key, 0))].push(idx);
            }
        }

        for (byte, mut bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            // Stable: equal keys keep rule-file order.
            bucket.sort_by(|&a, &b| {
                Self::compare(kind, entries[a].key().as_bytes(), entries[b].key().as_bytes())
            });

            let base = self.nodes.len();
            let n = bucket.len();
            for &entry in &bucket {
                self.nodes.push(Node {
                    entry,
                    next_eq: None,
                    next_ne: None,
                });
            }
            let key_of = |i: usize| entries[bucket[i]].key().as_bytes();

            for i in 0..n {
                let key = key_of(i);
                let mut ne = i + 1;
                while ne < n && Self::is_subset(kind, key, key_of(ne)) {
                    ne += 1;
                }
                let node = &mut self.nodes[base + i];
                node.next_ne = (ne < n).then_some(base + ne);
                if i + 1 < n && Self::is_subset(kind, key, key_of(i + 1)) {
                    node.next_eq = Some(base + i + 1);
                }
            }
            // The last extension of a key cannot lead anywhere useful once
            // it fails: the word already matched the shorter key.
            for i in 0..n {
                let key = key_of(i);
                let mut last = None;
                let mut j = i + 1;
                while j < n && Self::is_subset(kind, key, key_of(j)) {
                    last = Some(j);
                    j += 1;
                }
                if let Some(last) = last {
                    self.nodes[base + last].next_ne = None;
                }
            }
            self.heads[byte] = Some(base);
        }
    }
}

/// All prefix and suffix entries of a rule set, indexed by flag and by
/// affix string.
#[derive(Debug, Clone)]
pub struct AffixIndex {
    entries: Vec<AffixEntry>,
    by_flag: HashMap<Flag, Vec<usize>>,
    /// Flags that occur in some entry's continuation classes.
    cont_classes: HashSet<Flag>,
    prefixes: Tree,
    suffixes: Tree,
}

impl Default for AffixIndex {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl AffixIndex {
    /// Build the index. Entry order within a flag follows `entries`.
    pub fn build(entries: Vec<AffixEntry>) -> Self {
        let mut by_flag: HashMap<Flag, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_flag.entry(entry.flag).or_default().push(idx);
        }
        let cont_classes = entries
            .iter()
            .flat_map(|e| e.cont_flags.iter())
            .collect();
        let mut prefixes = Tree::new(AffixKind::Prefix);
        prefixes.build(&entries);
        let mut suffixes = Tree::new(AffixKind::Suffix);
        suffixes.build(&entries);
        Self {
            entries,
            by_flag,
            cont_classes,
            prefixes,
            suffixes,
        }
    }

    pub fn entries(&self) -> &[AffixEntry] {
        &self.entries
    }

    pub fn get(&self, id: usize) -> &AffixEntry {
        &self.entries[id]
    }

    /// Entries defined under `flag`, in rule-file order.
    pub fn by_flag(&self, flag: Flag) -> impl Iterator<Item = &AffixEntry> + '_ {
        self.by_flag
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.entries[i])
    }

    /// Prefix entries whose append string begins `word`, zero-length ones
    /// first, then in key order.
    pub fn prefixes_for<'a, 'w>(&'a self, word: &'w str) -> Candidates<'a, 'w> {
        Candidates::new(self, &self.prefixes, word)
    }

    /// Suffix entries whose append string ends `word`.
    pub fn suffixes_for<'a, 'w>(&'a self, word: &'w str) -> Candidates<'a, 'w> {
        Candidates::new(self, &self.suffixes, word)
    }

    /// Whether `flag` is named as a continuation class anywhere, making
    /// two-level suffix stripping relevant for its entries.
    pub fn is_cont_class(&self, flag: Flag) -> bool {
        self.cont_classes.contains(&flag)
    }

    pub fn has_cont_classes(&self) -> bool {
        !self.cont_classes.is_empty()
    }

    pub fn has_prefixes(&self) -> bool {
        self.entries.iter().any(|e| e.kind == AffixKind::Prefix)
    }

    pub fn has_suffixes(&self) -> bool {
        self.entries.iter().any(|e| e.kind == AffixKind::Suffix)
    }
}

/// Lazy walk over the entries that structurally fit a word.
pub struct Candidates<'a, 'w> {
    index: &'a AffixIndex,
    tree: &'a Tree,
    word: &'w [u8],
    empty: std::slice::Iter<'a, usize>,
    cursor: Option<usize>,
}

impl<'a, 'w> Candidates<'a, 'w> {
    fn new(index: &'a AffixIndex, tree: &'a Tree, word: &'w str) -> Self {
        let word = word.as_bytes();
        let cursor = if word.is_empty() {
            None
        } else {
            tree.heads[usize::from(Tree::key_byte(tree.kind, word, 0))]
        };
        Self {
            index,
            tree,
            word,
            empty: tree.empty.iter(),
            cursor,
        }
    }
}

impl<'a> Iterator for Candidates<'a, '_> {
    type Item = &'a AffixEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(&idx) = self.empty.next() {
            return Some(&self.index.entries[idx]);
        }
        while let Some(pos) = self.cursor {
            let node = self.tree.nodes[pos];
            let entry = &self.index.entries[node.entry];
            if Tree::is_subset(self.tree.kind, entry.key().as_bytes(), self.word) {
                self.cursor = node.next_eq;
                return Some(entry);
            }
            self.cursor = node.next_ne;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::flags::FlagSet;
    use morfeus_core::analysis::MorphDescription;

    fn entry(kind: AffixKind, flag: u8, append: &str) -> AffixEntry {
        AffixEntry {
            kind,
            flag: Flag::from(flag),
            strip: String::new(),
            append: append.to_string(),
            condition: Condition::default(),
            cont_flags: FlagSet::new(),
            cross_product: true,
            morph: MorphDescription::new(),
        }
    }

    fn appends<'a>(it: impl Iterator<Item = &'a AffixEntry>) -> Vec<&'a str> {
        it.map(|e| e.append.as_str()).collect()
    }

    #[test]
    fn prefix_walk_yields_only_matching_keys_in_order() {
        let index = AffixIndex::build(vec![
            entry(AffixKind::Prefix, b'A', "ac"),
            entry(AffixKind::Prefix, b'B', "abc"),
            entry(AffixKind::Prefix, b'C', "a"),
            entry(AffixKind::Prefix, b'D', "ab"),
            entry(AffixKind::Prefix, b'E', ""),
            entry(AffixKind::Prefix, b'F', "b"),
        ]);
        assert_eq!(appends(index.prefixes_for("abcd")), vec!["", "a", "ab", "abc"]);
        assert_eq!(appends(index.prefixes_for("acx")), vec!["", "a", "ac"]);
        assert_eq!(appends(index.prefixes_for("abd")), vec!["", "a", "ab"]);
        assert_eq!(appends(index.prefixes_for("zzz")), vec![""]);
    }

    #[test]
    fn suffix_walk_compares_from_the_end() {
        let index = AffixIndex::build(vec![
            entry(AffixKind::Suffix, b'S', "s"),
            entry(AffixKind::Suffix, b'E', "es"),
            entry(AffixKind::Suffix, b'I', "ies"),
            entry(AffixKind::Suffix, b'D', "ed"),
        ]);
        assert_eq!(appends(index.suffixes_for("tries")), vec!["s", "es", "ies"]);
        assert_eq!(appends(index.suffixes_for("boxes")), vec!["s", "es"]);
        assert_eq!(appends(index.suffixes_for("cats")), vec!["s"]);
        assert_eq!(appends(index.suffixes_for("tried")), vec!["ed"]);
    }

    #[test]
    fn sibling_extensions_are_not_skipped() {
        let index = AffixIndex::build(vec![
            entry(AffixKind::Prefix, b'A', "ab"),
            entry(AffixKind::Prefix, b'B', "abc"),
            entry(AffixKind::Prefix, b'C', "abd"),
        ]);
        assert_eq!(appends(index.prefixes_for("abdx")), vec!["ab", "abd"]);
    }

    #[test]
    fn by_flag_keeps_file_order() {
        let index = AffixIndex::build(vec![
            entry(AffixKind::Suffix, b'S', "s"),
            entry(AffixKind::Suffix, b'S', "es"),
            entry(AffixKind::Prefix, b'P', "un"),
        ]);
        assert_eq!(appends(index.by_flag(Flag::from(b'S'))), vec!["s", "es"]);
        assert_eq!(index.by_flag(Flag::from(b'Q')).count(), 0);
        assert!(index.has_prefixes());
        assert!(index.has_suffixes());
    }

    #[test]
    fn empty_word_matches_only_zero_length_affixes() {
        let index = AffixIndex::build(vec![
            entry(AffixKind::Suffix, b'S', "s"),
            entry(AffixKind::Suffix, b'Z', ""),
        ]);
        assert_eq!(appends(index.suffixes_for("")), vec![""]);
    }
}
