//! Rule files, word lists and the structures built from them.
//!
//! Everything in this crate is constructed once, before the first query,
//! and is immutable afterwards except for the personal-dictionary
//! operations on [`dictionary::DictionaryTable`].
//!
//! # Architecture
//!
//! - [`flags`] -- flag encodings (`FLAG char|long|num|UTF-8`) and flag sets
//! - [`condition`] -- the affix condition automaton
//! - [`affix`] -- prefix and suffix entries
//! - [`index`] -- the subset-pruned affix index
//! - [`options`] -- scalar directives
//! - [`compound`] -- COMPOUNDRULE and CHECKCOMPOUNDPATTERN data
//! - [`replist`], [`convert`], [`phonetic`] -- REP, ICONV/OCONV, PHONE tables
//! - [`encoding`] -- `SET` handling
//! - [`parse`] -- the rule-file parser
//! - [`dictionary`] -- the word hash table

use std::fmt;

use morfeus_core::analysis::MorphDescription;

pub mod affix;
pub mod compound;
pub mod condition;
pub mod convert;
pub mod dictionary;
pub mod encoding;
pub mod flags;
pub mod index;
pub mod options;
pub mod parse;
pub mod phonetic;
pub mod replist;

use condition::ConditionError;
use convert::Converter;
use flags::{FlagError, FlagSet, decode_flags};
use index::AffixIndex;
use options::AffOptions;
use phonetic::PhoneTable;
use replist::RepTable;

/// Which input a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Aff,
    Dic,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileKind::Aff => "aff",
            FileKind::Dic => "dic",
        })
    }
}

/// Construction-fatal errors. Every variant that concerns a line carries
/// its 1-based number.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{file} line {line}: `{directive}` is missing its {field}")]
    MissingField {
        file: FileKind,
        line: usize,
        directive: String,
        field: &'static str,
    },
    #[error("{file} line {line}: invalid number `{value}`")]
    BadNumber {
        file: FileKind,
        line: usize,
        value: String,
    },
    #[error("{file} line {line}: invalid flag `{value}`: {source}")]
    BadFlag {
        file: FileKind,
        line: usize,
        value: String,
        source: FlagError,
    },
    #[error("aff line {line}: unknown flag type `{value}`")]
    BadFlagMode { line: usize, value: String },
    #[error("aff line {line}: {source}")]
    BadCondition { line: usize, source: ConditionError },
    #[error("aff line {line}: duplicate {directive} table")]
    DuplicateTable { line: usize, directive: String },
    #[error(
        "aff line {line}: {directive} table declares {expected} entries but only {found} follow"
    )]
    EntryCount {
        line: usize,
        directive: String,
        expected: usize,
        found: usize,
    },
    #[error("aff line {line}: affix strip and append exceed {max} characters")]
    AffixTooLong { line: usize, max: usize },
    #[error("{file} line {line}: alias {index} is not defined")]
    BadAlias {
        file: FileKind,
        line: usize,
        index: usize,
    },
    #[error("{file}: unsupported character set `{label}`")]
    UnsupportedEncoding { file: FileKind, label: String },
}

/// A parsed rule file: affix entries, their index, global settings and the
/// suggestion/compounding tables.
#[derive(Debug, Clone, Default)]
pub struct AffixRuleSet {
    pub options: AffOptions,
    pub index: AffixIndex,
    pub rep: RepTable,
    /// MAP groups of related characters (or parenthesized strings).
    pub map: Vec<Vec<String>>,
    /// BREAK patterns, `^`/`$` anchored or free.
    pub breaks: Vec<String>,
    pub iconv: Converter,
    pub oconv: Converter,
    pub phone: Option<PhoneTable>,
    /// AF: flag vectors referenced by 1-based number.
    pub flag_aliases: Vec<FlagSet>,
    /// AM: morphological descriptions referenced by 1-based number.
    pub morph_aliases: Vec<MorphDescription>,
}

impl AffixRuleSet {
    /// Parse a rule file from raw bytes, honoring its `SET` directive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let label = encoding::find_set_label(bytes).unwrap_or_else(|| "ISO8859-1".to_string());
        let text = encoding::decode(bytes, &label, FileKind::Aff)?;
        parse::parse_aff(&text)
    }

    /// Parse a rule file that is already decoded.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse::parse_aff(text)
    }

    /// Decode a flag field of a word or affix, resolving AF aliases.
    pub fn decode_flag_field(
        &self,
        text: &str,
        file: FileKind,
        line: usize,
    ) -> Result<FlagSet, ParseError> {
        if !self.flag_aliases.is_empty() {
            if let Ok(index) = text.parse::<usize>() {
                return index
                    .checked_sub(1)
                    .and_then(|i| self.flag_aliases.get(i))
                    .cloned()
                    .ok_or(ParseError::BadAlias { file, line, index });
            }
        }
        decode_flags(text, self.options.flag_mode)
            .map(FlagSet::from)
            .map_err(|source| ParseError::BadFlag {
                file,
                line,
                value: text.to_string(),
                source,
            })
    }

    /// Decode a morphological field list, resolving a lone AM alias number.
    pub fn decode_morph_field(&self, fields: &[&str]) -> MorphDescription {
        if let [single] = fields {
            if let Ok(index) = single.parse::<usize>() {
                if let Some(desc) = index.checked_sub(1).and_then(|i| self.morph_aliases.get(i)) {
                    return desc.clone();
                }
            }
        }
        MorphDescription::parse(&fields.join(" "))
    }

    /// Flag mode in effect.
    pub fn flag_mode(&self) -> flags::FlagMode {
        self.options.flag_mode
    }
}
