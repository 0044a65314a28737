// Word hash table with homonym chains
//
// Entries live in an arena. Each hash bucket points to the first entry of
// its collision chain (`next`); words spelled identically share one chain
// slot and hang off it through `next_homonym`.

use log::debug;
use morfeus_core::analysis::MorphDescription;
use morfeus_core::character::char_len;

use crate::flags::{Flag, FlagSet};
use crate::{AffixRuleSet, FileKind, ParseError};

/// One word of the dictionary with one of its flag sets.
#[derive(Debug, Clone)]
pub struct DictEntry {
    pub word: String,
    pub flags: FlagSet,
    pub morph: MorphDescription,
    char_len: usize,
    next: Option<usize>,
    next_homonym: Option<usize>,
}

impl DictEntry {
    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(flag)
    }

    pub fn has_flag_opt(&self, flag: Option<Flag>) -> bool {
        self.flags.contains_opt(flag)
    }
}

/// Chained hash table from word to homonym entries.
#[derive(Debug, Clone)]
pub struct DictionaryTable {
    buckets: Vec<Option<usize>>,
    entries: Vec<DictEntry>,
    forbidden_flag: Flag,
}

/// Rotate/XOR fold: the first four bytes are shifted in, the rest are
/// mixed with a 5-bit rotation.
fn hash_word(word: &str) -> u32 {
    let bytes = word.as_bytes();
    let head = bytes.len().min(4);
    let mut hv: u32 = 0;
    for &b in &bytes[..head] {
        hv = (hv << 8) | u32::from(b);
    }
    for &b in &bytes[head..] {
        hv = hv.rotate_left(5) ^ u32::from(b);
    }
    hv
}

impl DictionaryTable {
    /// Create an empty table sized for `declared` words.
    pub fn with_capacity(declared: usize, forbidden_flag: Flag) -> Self {
        let mut size = declared + 5;
        if size % 2 == 0 {
            size += 1;
        }
        Self {
            buckets: vec![None; size],
            entries: Vec::with_capacity(declared),
            forbidden_flag,
        }
    }

    /// Decode and parse a word list using the rule set's `SET` encoding.
    pub fn from_bytes(bytes: &[u8], rules: &AffixRuleSet) -> Result<Self, ParseError> {
        let text = crate::encoding::decode(bytes, &rules.options.encoding, FileKind::Dic)?;
        Self::parse(&text, rules)
    }

    /// Parse a decoded word list: a word count line followed by
    /// `word[/flags] [morphological fields]` lines.
    pub fn parse(text: &str, rules: &AffixRuleSet) -> Result<Self, ParseError> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let mut lines = text.lines().enumerate();

        let (count_line, declared) = loop {
            match lines.next() {
                Some((_, l)) if l.trim().is_empty() => continue,
                Some((i, l)) => {
                    let token = l.split_whitespace().next().unwrap_or_default();
                    let declared = token.parse::<usize>().map_err(|_| ParseError::BadNumber {
                        file: FileKind::Dic,
                        line: i + 1,
                        value: token.to_string(),
                    })?;
                    break (i + 1, declared);
                }
                None => {
                    return Err(ParseError::MissingField {
                        file: FileKind::Dic,
                        line: 1,
                        directive: "word list".to_string(),
                        field: "word count",
                    });
                }
            }
        };

        let mut table = Self::with_capacity(declared, rules.options.forbidden_word);
        for (i, raw) in lines {
            let line = raw.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let (word, flags, morph) = parse_word_line(line, rules, FileKind::Dic, i + 1)?;
            if word.is_empty() {
                continue;
            }
            table.insert(word, flags, morph);
        }
        if table.entries.len() != declared {
            debug!(
                "dic line {count_line}: declared {declared} words, loaded {}",
                table.entries.len()
            );
        }
        Ok(table)
    }

    fn bucket(&self, word: &str) -> usize {
        hash_word(word) as usize % self.buckets.len()
    }

    /// Insert `word` with a flag set; identical spellings become homonyms.
    pub fn insert(&mut self, word: String, flags: FlagSet, morph: MorphDescription) {
        let id = self.entries.len();
        let bucket = self.bucket(&word);
        let entry = DictEntry {
            char_len: char_len(&word),
            word,
            flags,
            morph,
            next: None,
            next_homonym: None,
        };

        let mut cursor = self.buckets[bucket];
        let mut last_in_chain = None;
        while let Some(pos) = cursor {
            if self.entries[pos].word == entry.word {
                let mut tail = pos;
                while let Some(h) = self.entries[tail].next_homonym {
                    tail = h;
                }
                self.entries.push(entry);
                self.entries[tail].next_homonym = Some(id);
                return;
            }
            last_in_chain = Some(pos);
            cursor = self.entries[pos].next;
        }
        self.entries.push(entry);
        match last_in_chain {
            Some(pos) => self.entries[pos].next = Some(id),
            None => self.buckets[bucket] = Some(id),
        }
    }

    fn find(&self, word: &str) -> Option<usize> {
        let mut cursor = self.buckets[self.bucket(word)];
        while let Some(pos) = cursor {
            if self.entries[pos].word == word {
                return Some(pos);
            }
            cursor = self.entries[pos].next;
        }
        None
    }

    /// First entry spelled `word`.
    pub fn lookup(&self, word: &str) -> Option<&DictEntry> {
        self.find(word).map(|i| &self.entries[i])
    }

    /// Every entry spelled `word`, in insertion order.
    pub fn homonyms(&self, word: &str) -> Homonyms<'_> {
        Homonyms {
            table: self,
            cursor: self.find(word),
        }
    }

    /// All entries. Lazy and restartable: call again to start over.
    pub fn walk(&self) -> std::slice::Iter<'_, DictEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn forbidden_flag(&self) -> Flag {
        self.forbidden_flag
    }

    /// Whether `entry` is marked forbidden.
    pub fn is_forbidden(&self, entry: &DictEntry) -> bool {
        entry.has_flag(self.forbidden_flag)
    }

    // -- Personal dictionary ---------------------------------------------

    /// Accept `word`. A previously removed word gets its forbidden mark
    /// cleared; an unknown word is appended without flags.
    pub fn add(&mut self, word: &str) {
        let ids = self.homonym_ids(word);
        if ids.is_empty() {
            self.insert(word.to_string(), FlagSet::new(), MorphDescription::new());
            return;
        }
        let forbidden = self.forbidden_flag;
        for id in ids {
            self.entries[id].flags.remove(forbidden);
        }
    }

    /// Add `word` as a new homonym carrying `flags` (copied from a model word).
    pub fn add_with_flags(&mut self, word: &str, flags: FlagSet, morph: MorphDescription) {
        let forbidden = self.forbidden_flag;
        for id in self.homonym_ids(word) {
            self.entries[id].flags.remove(forbidden);
        }
        let mut flags = flags;
        flags.remove(forbidden);
        self.insert(word.to_string(), flags, morph);
    }

    /// Reject `word` from now on by marking every homonym forbidden. The
    /// entries stay in place so homonym chains remain intact. Returns
    /// whether the word was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let ids = self.homonym_ids(word);
        let forbidden = self.forbidden_flag;
        for &id in &ids {
            self.entries[id].flags.insert(forbidden);
        }
        !ids.is_empty()
    }

    fn homonym_ids(&self, word: &str) -> Vec<usize> {
        let mut ids = Vec::new();
        let mut cursor = self.find(word);
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.entries[id].next_homonym;
        }
        ids
    }
}

/// Iterator over the homonyms of one spelling.
pub struct Homonyms<'a> {
    table: &'a DictionaryTable,
    cursor: Option<usize>,
}

impl<'a> Iterator for Homonyms<'a> {
    type Item = &'a DictEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = &self.table.entries[id];
        self.cursor = entry.next_homonym;
        Some(entry)
    }
}

/// Split a word-list line into word, flags and morphological fields.
///
/// The flag field starts at the first `/` that is not escaped and not the
/// first character. Morphological fields follow a tab, or the first space.
pub fn parse_word_line(
    line: &str,
    rules: &AffixRuleSet,
    file: FileKind,
    number: usize,
) -> Result<(String, FlagSet, MorphDescription), ParseError> {
    let (head, morph_text) = match line.find('\t') {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => match line.find(char::is_whitespace) {
            Some(i) => (&line[..i], &line[i + 1..]),
            None => (line, ""),
        },
    };

    let mut word = String::with_capacity(head.len());
    let mut flag_text = None;
    let mut chars = head.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if chars.peek().is_some_and(|&(_, n)| n == '/') => {
                word.push('/');
                chars.next();
            }
            '/' if i > 0 => {
                flag_text = Some(&head[i + 1..]);
                break;
            }
            _ => word.push(c),
        }
    }

    let flags = match flag_text {
        Some(text) if !text.is_empty() => rules.decode_flag_field(text, file, number)?,
        _ => FlagSet::new(),
    };
    let morph_fields: Vec<&str> = morph_text.split_whitespace().collect();
    let morph = if morph_fields.is_empty() {
        MorphDescription::new()
    } else {
        rules.decode_morph_field(&morph_fields)
    };
    Ok((rules.options.strip_ignored(&word), flags, morph))
}
