// Global settings collected from rule-file directives

use crate::compound::{CompoundPattern, CompoundRule};
use crate::flags::{DEFAULT_FORBIDDEN_FLAG, Flag, FlagMode};

/// Compounding directives.
#[derive(Debug, Clone)]
pub struct CompoundOptions {
    /// `COMPOUNDFLAG`: the word may appear anywhere in a compound.
    pub flag: Option<Flag>,
    /// `COMPOUNDBEGIN`
    pub begin: Option<Flag>,
    /// `COMPOUNDMIDDLE`
    pub middle: Option<Flag>,
    /// `COMPOUNDLAST` / `COMPOUNDEND`
    pub end: Option<Flag>,
    /// `COMPOUNDPERMITFLAG`: affixes allowed inside compounds.
    pub permit: Option<Flag>,
    /// `COMPOUNDFORBIDFLAG`: affixed forms never compound.
    pub forbid: Option<Flag>,
    /// `COMPOUNDROOT`: the word is itself a compound and counts twice.
    pub root: Option<Flag>,
    /// `COMPOUNDMIN`: minimum characters per part.
    pub min: usize,
    /// `COMPOUNDWORDMAX`
    pub word_max: Option<usize>,
    /// `COMPOUNDSYLLABLE` maximum syllables.
    pub syllable_max: Option<usize>,
    /// `COMPOUNDSYLLABLE` vowel characters.
    pub vowels: String,
    pub check_dup: bool,
    pub check_triple: bool,
    pub simplified_triple: bool,
    pub check_case: bool,
    pub check_rep: bool,
    pub rules: Vec<CompoundRule>,
    pub patterns: Vec<CompoundPattern>,
}

impl Default for CompoundOptions {
    fn default() -> Self {
        Self {
            flag: None,
            begin: None,
            middle: None,
            end: None,
            permit: None,
            forbid: None,
            root: None,
            min: 3,
            word_max: None,
            syllable_max: None,
            vowels: String::new(),
            check_dup: false,
            check_triple: false,
            simplified_triple: false,
            check_case: false,
            check_rep: false,
            rules: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

impl CompoundOptions {
    /// Whether any compounding is configured.
    pub fn enabled(&self) -> bool {
        self.flag.is_some() || self.begin.is_some() || self.end.is_some() || !self.rules.is_empty()
    }

    /// Every flag named by a compound rule.
    pub fn rule_mentions(&self, flag: Flag) -> bool {
        self.rules.iter().any(|r| r.mentions(flag))
    }
}

/// Suggestion tuning directives.
#[derive(Debug, Clone)]
pub struct SuggestTuning {
    /// `NOSPLITSUGS`: never split a word in two.
    pub no_split: bool,
    /// `MAXNGRAMSUGS`
    pub max_ngram: usize,
    /// `MAXCPDSUGS`
    pub max_compound: usize,
    /// `MAXDIFF` (0..=10), `None` for the default similarity threshold.
    pub max_diff: Option<u8>,
    /// `ONLYMAXDIFF`
    pub only_max_diff: bool,
    /// `SUGSWITHDOTS`
    pub with_dots: bool,
}

impl Default for SuggestTuning {
    fn default() -> Self {
        Self {
            no_split: false,
            max_ngram: morfeus_core::enums::MAX_NGRAM_SUGGESTIONS,
            max_compound: morfeus_core::enums::MAX_COMPOUND_SUGGESTIONS,
            max_diff: None,
            only_max_diff: false,
            with_dots: false,
        }
    }
}

/// Scalar settings of a rule file.
#[derive(Debug, Clone)]
pub struct AffOptions {
    pub flag_mode: FlagMode,
    /// `SET` label, e.g. `UTF-8` or `ISO8859-1`.
    pub encoding: String,
    pub lang: Option<String>,
    /// `TRY`: characters for insertion/replacement, most frequent first.
    pub try_chars: String,
    /// `KEY`: keyboard rows separated by `|`.
    pub key: String,
    pub word_chars: String,
    /// `IGNORE`: characters removed from words and affixes.
    pub ignore_chars: String,
    /// `COMPLEXPREFIXES`: two-level stripping undoes two prefixes instead
    /// of two suffixes.
    pub complex_prefixes: bool,
    pub full_strip: bool,
    pub forbid_warn: bool,
    pub need_affix: Option<Flag>,
    pub forbidden_word: Flag,
    pub only_in_compound: Option<Flag>,
    pub keep_case: Option<Flag>,
    pub force_upper: Option<Flag>,
    pub circumfix: Option<Flag>,
    pub no_suggest: Option<Flag>,
    pub warn: Option<Flag>,
    pub compound: CompoundOptions,
    pub suggest: SuggestTuning,
}

impl Default for AffOptions {
    fn default() -> Self {
        Self {
            flag_mode: FlagMode::Char,
            encoding: "ISO8859-1".to_string(),
            lang: None,
            try_chars: String::new(),
            key: "qwertyuiop|asdfghjkl|zxcvbnm".to_string(),
            word_chars: String::new(),
            ignore_chars: String::new(),
            complex_prefixes: false,
            full_strip: false,
            forbid_warn: false,
            need_affix: None,
            forbidden_word: DEFAULT_FORBIDDEN_FLAG,
            only_in_compound: None,
            keep_case: None,
            force_upper: None,
            circumfix: None,
            no_suggest: None,
            warn: None,
            compound: CompoundOptions::default(),
            suggest: SuggestTuning::default(),
        }
    }
}

impl AffOptions {
    /// Remove every `IGNORE` character from `word`.
    pub fn strip_ignored(&self, word: &str) -> String {
        if self.ignore_chars.is_empty() {
            word.to_string()
        } else {
            word.chars()
                .filter(|c| !self.ignore_chars.contains(*c))
                .collect()
        }
    }
}
