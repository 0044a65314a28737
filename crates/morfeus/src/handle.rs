// Morfeus: top-level integration point for spell checking.
//
// Owns the parsed rule file and the word table, and provides a unified
// API for spell checking, suggestions, morphological analysis, stemming,
// generation and the runtime personal dictionary.
//
// Design notes:
// - The handle owns the rule set and the dictionary. A `Checker` borrowing
//   both is created on the fly in each method call, so the handle never
//   refers to itself.
// - The suggestion engine is created once at construction time from the
//   rule file's TRY/KEY/REP/MAP tables. It keeps no reference to the word
//   table, so personal-dictionary changes are seen immediately.
// - ICONV is applied to every incoming word, OCONV to every suggestion.

use std::path::{Path, PathBuf};
#[cfg(feature = "suggest")]
use std::time::Duration;

use log::debug;
use morfeus_aff::dictionary::DictionaryTable;
use morfeus_aff::flags::FlagSet;
use morfeus_aff::{AffixRuleSet, ParseError};
use morfeus_core::analysis::MorphDescription;
use morfeus_core::enums::SpellInfo;

use crate::checker::Checker;
use crate::speller::pipeline::{SpellOptions, spell_check};
#[cfg(feature = "suggest")]
use crate::suggestion::{SuggestOptions, SuggestionEngine};

/// Error type for `Morfeus` construction failures.
#[derive(Debug, thiserror::Error)]
pub enum MorfeusError {
    /// The rule file or the word list is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A loaded dictionary: rule file plus word list.
pub struct Morfeus {
    rules: AffixRuleSet,
    dict: DictionaryTable,

    #[cfg(feature = "suggest")]
    suggestions: SuggestionEngine,

    // -- Options --
    spell_options: SpellOptions,
}

fn read_file(path: &Path) -> Result<Vec<u8>, MorfeusError> {
    std::fs::read(path).map_err(|source| MorfeusError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Morfeus {
    /// Build from an already decoded rule file and word list.
    pub fn from_strings(aff: &str, dic: &str) -> Result<Self, MorfeusError> {
        let rules = AffixRuleSet::parse(aff)?;
        let dict = DictionaryTable::parse(dic, &rules)?;
        Ok(Self::assemble(rules, dict))
    }

    /// Build from raw file contents. Both are decoded with the rule file's
    /// `SET` encoding.
    pub fn from_bytes(aff: &[u8], dic: &[u8]) -> Result<Self, MorfeusError> {
        let rules = AffixRuleSet::from_bytes(aff)?;
        let dict = DictionaryTable::from_bytes(dic, &rules)?;
        Ok(Self::assemble(rules, dict))
    }

    /// Build from a `.aff` and a `.dic` file.
    pub fn from_paths(aff: impl AsRef<Path>, dic: impl AsRef<Path>) -> Result<Self, MorfeusError> {
        let aff_bytes = read_file(aff.as_ref())?;
        let dic_bytes = read_file(dic.as_ref())?;
        Self::from_bytes(&aff_bytes, &dic_bytes)
    }

    fn assemble(rules: AffixRuleSet, dict: DictionaryTable) -> Self {
        debug!(
            "dictionary loaded: {} affix entries, {} words, encoding {}",
            rules.index.entries().len(),
            dict.len(),
            rules.options.encoding
        );
        Self {
            #[cfg(feature = "suggest")]
            suggestions: SuggestionEngine::new(&rules, SuggestOptions::default()),
            rules,
            dict,
            spell_options: SpellOptions::default(),
        }
    }

    fn checker(&self) -> Checker<'_> {
        Checker::new(&self.rules, &self.dict)
    }

    pub fn rules(&self) -> &AffixRuleSet {
        &self.rules
    }

    pub fn dictionary(&self) -> &DictionaryTable {
        &self.dict
    }

    /// Character set named by the rule file's `SET` directive.
    pub fn encoding(&self) -> &str {
        &self.rules.options.encoding
    }

    // =========================================================================
    // Core methods
    // =========================================================================

    /// Check whether a word is correctly spelled.
    pub fn spell(&self, word: &str) -> bool {
        self.spell_info(word).0
    }

    /// Spell check `word` and report how the verdict was reached:
    /// compound, forbidden, all-caps input, WARN.
    pub fn spell_info(&self, word: &str) -> (bool, SpellInfo) {
        let word = self.rules.iconv.convert(word);
        spell_check(&self.checker(), &word, &self.spell_options)
    }

    /// Generate spelling suggestions for a misspelled word, best first.
    #[cfg(feature = "suggest")]
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let word = self.rules.iconv.convert(word);
        self.suggestions
            .suggest(&self.checker(), &self.spell_options, &word)
            .into_iter()
            .map(|s| self.rules.oconv.convert(&s).into_owned())
            .collect()
    }

    /// Suggestions from the n-gram ranking alone.
    #[cfg(feature = "suggest")]
    pub fn ngram_suggest(&self, word: &str) -> Vec<String> {
        let word = self.rules.iconv.convert(word);
        self.suggestions
            .ngram_suggest(&self.checker(), &word)
            .into_iter()
            .map(|s| self.rules.oconv.convert(&s).into_owned())
            .collect()
    }

    /// Morphological analyses of `word`, one line per analysis.
    #[cfg(feature = "analyze")]
    pub fn analyze(&self, word: &str) -> Vec<String> {
        use crate::morphology::Analyzer;

        let word = self.rules.iconv.convert(word);
        self.checker()
            .analyze(&word)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Distinct stems of `word`.
    #[cfg(feature = "analyze")]
    pub fn stem(&self, word: &str) -> Vec<String> {
        let word = self.rules.iconv.convert(word);
        crate::morphology::stem(&self.checker(), &word)
    }

    /// Forms of `word` inflected like `example`.
    #[cfg(feature = "analyze")]
    pub fn generate(&self, word: &str, example: &str) -> Vec<String> {
        let word = self.rules.iconv.convert(word);
        let example = self.rules.iconv.convert(example);
        crate::morphology::generate(&self.checker(), &word, &example)
    }

    /// Forms of `word` carrying the inflection fields of `description`.
    #[cfg(feature = "analyze")]
    pub fn generate_from_description(&self, word: &str, description: &str) -> Vec<String> {
        let word = self.rules.iconv.convert(word);
        crate::morphology::generate_from_description(&self.checker(), &word, description)
    }

    // =========================================================================
    // Personal dictionary
    // =========================================================================

    /// Accept `word` from now on. Undoes an earlier `remove`.
    pub fn add(&mut self, word: &str) {
        self.dict.add(word);
    }

    /// Accept `word` with the affix flags and fields of the dictionary
    /// word `example`, so that its inflected forms are accepted too.
    /// Returns `false` (and adds nothing) when `example` is not a
    /// dictionary word.
    pub fn add_with_affix(&mut self, word: &str, example: &str) -> bool {
        let Some(model) = self.dict.lookup(example) else {
            return false;
        };
        let flags = model.flags.clone();
        let mut morph = MorphDescription::new();
        morph.extend(&model.morph);
        self.dict.add_with_flags(word, flags, morph);
        true
    }

    /// Reject `word` from now on, including a word that was only accepted
    /// through affixes or compounding.
    pub fn remove(&mut self, word: &str) {
        if !self.dict.remove(word) {
            let forbidden = FlagSet::from(vec![self.dict.forbidden_flag()]);
            self.dict.insert(word.to_string(), forbidden, MorphDescription::new());
        }
    }

    /// Apply a personal word list file. See [`Morfeus::load_personal_text`].
    pub fn load_personal(&mut self, path: impl AsRef<Path>) -> Result<usize, MorfeusError> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let applied = self.load_personal_text(&text);
        debug!("personal dictionary {}: {applied} entries", path.display());
        Ok(applied)
    }

    /// Apply personal word list lines: `word` adds, `word/example` adds
    /// with the example's affixes, `*word` removes. Returns the number of
    /// lines applied.
    pub fn load_personal_text(&mut self, text: &str) -> usize {
        let mut applied = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(word) = line.strip_prefix('*') {
                self.remove(word);
                applied += 1;
                continue;
            }
            match line.split_once('/') {
                Some((word, example)) if !word.is_empty() => {
                    if self.add_with_affix(word, example) {
                        applied += 1;
                    } else {
                        debug!("personal word {word}: unknown example {example}");
                        self.add(word);
                        applied += 1;
                    }
                }
                _ => {
                    self.add(line);
                    applied += 1;
                }
            }
        }
        applied
    }

    // =========================================================================
    // Option setters
    // =========================================================================

    /// Set whether to ignore trailing dots in spell checking.
    pub fn set_ignore_dot(&mut self, value: bool) {
        self.spell_options.ignore_dot = value;
    }

    /// Set whether to accept words made of digits and separators.
    pub fn set_ignore_numbers(&mut self, value: bool) {
        self.spell_options.ignore_numbers = value;
    }

    /// Set whether to accept a capitalized word whose lowercase form is correct.
    pub fn set_accept_first_uppercase(&mut self, value: bool) {
        self.spell_options.accept_first_uppercase = value;
    }

    /// Set whether to accept an uppercase word whose title or lowercase form is correct.
    pub fn set_accept_all_uppercase(&mut self, value: bool) {
        self.spell_options.accept_all_uppercase = value;
    }

    /// Set the maximum number of suggestions to return.
    #[cfg(feature = "suggest")]
    pub fn set_max_suggestions(&mut self, value: usize) {
        self.update_suggest_options(|o| o.max_suggestions = value);
    }

    /// Set the soft deadline of one suggestion request.
    #[cfg(feature = "suggest")]
    pub fn set_suggest_time_limit(&mut self, value: Duration) {
        self.update_suggest_options(|o| o.time_limit = value);
    }

    /// Set the number of dictionary checks the edit generators may spend.
    #[cfg(feature = "suggest")]
    pub fn set_suggest_max_cost(&mut self, value: usize) {
        self.update_suggest_options(|o| o.max_cost = value);
    }

    /// Set whether the n-gram ranking runs when edits find nothing.
    #[cfg(feature = "suggest")]
    pub fn set_ngram_fallback(&mut self, value: bool) {
        self.update_suggest_options(|o| o.ngram_fallback = value);
    }

    #[cfg(feature = "suggest")]
    fn update_suggest_options(&mut self, update: impl FnOnce(&mut SuggestOptions)) {
        let mut options = self.suggestions.options().clone();
        update(&mut options);
        self.suggestions.set_options(options);
    }

    /// Return the crate version (from Cargo.toml).
    pub fn get_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "\
SET UTF-8
TRY esianrtolcdugmphbyfvkwz'
FORBIDDENWORD !
SFX S Y 1
SFX S 0 s . is:plural
";
    const DIC: &str = "5\ncat/S po:noun\ndog/S po:noun\nworld/S\nhello\ncan't\n";

    fn handle() -> Morfeus {
        Morfeus::from_strings(AFF, DIC).expect("handle")
    }

    #[test]
    fn malformed_rule_file_returns_error() {
        let result = Morfeus::from_strings("SFX S Y 2\nSFX S 0 s .\n", "1\ncat\n");
        assert!(matches!(result, Err(MorfeusError::Parse(_))));
    }

    #[test]
    fn malformed_word_count_returns_error() {
        let result = Morfeus::from_strings(AFF, "many\ncat\n");
        assert!(matches!(result, Err(MorfeusError::Parse(_))));
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = Morfeus::from_paths("/nonexistent/xx.aff", "/nonexistent/xx.dic");
        match result {
            Err(MorfeusError::Io { path, .. }) => assert_eq!(path, PathBuf::from("/nonexistent/xx.aff")),
            Err(other) => panic!("expected Io, got: {other}"),
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn spell_and_info() {
        let h = handle();
        assert!(h.spell("cats"));
        assert!(h.spell("Cat"));
        assert!(!h.spell("catz"));
        let (ok, info) = h.spell_info("CATS");
        assert!(ok);
        assert!(info.contains(SpellInfo::ALLCAP));
    }

    #[test]
    fn remove_then_add_round_trips() {
        let mut h = handle();
        h.remove("cat");
        assert!(!h.spell("cat"));
        assert!(h.spell_info("cat").1.contains(SpellInfo::FORBIDDEN));
        h.add("cat");
        assert!(h.spell("cat"));
        assert!(h.spell("cats"));
    }

    #[test]
    fn remove_rejects_affixed_forms_too() {
        let mut h = handle();
        h.remove("dogs");
        assert!(!h.spell("dogs"));
        assert!(h.spell("dog"));
    }

    #[test]
    fn add_with_affix_copies_flags() {
        let mut h = handle();
        assert!(!h.spell("gnus"));
        assert!(h.add_with_affix("gnu", "cat"));
        assert!(h.spell("gnu"));
        assert!(h.spell("gnus"));
        assert!(!h.add_with_affix("yak", "unknownword"));
        assert!(!h.spell("yak"));
    }

    #[test]
    fn personal_word_list_lines() {
        let mut h = handle();
        let applied = h.load_personal_text("foo\nbar/dog\n*hello\n\n");
        assert_eq!(applied, 3);
        assert!(h.spell("foo"));
        assert!(h.spell("bars"));
        assert!(!h.spell("hello"));
    }

    #[test]
    fn missing_personal_file_is_an_error() {
        let mut h = handle();
        assert!(matches!(
            h.load_personal("/nonexistent/personal.dic"),
            Err(MorfeusError::Io { .. })
        ));
    }

    #[test]
    #[cfg(feature = "suggest")]
    fn suggestions_respect_max_and_personal_words() {
        let mut h = handle();
        assert_eq!(h.suggest("wrold").first().map(String::as_str), Some("world"));
        h.set_max_suggestions(0);
        assert!(h.suggest("wrold").is_empty());
        h.set_max_suggestions(5);
        h.remove("world");
        assert!(!h.suggest("wrold").contains(&"world".to_string()));
    }

    #[test]
    #[cfg(feature = "suggest")]
    fn conversion_tables_apply_to_input_and_output() {
        let aff = format!("{AFF}ICONV 1\nICONV \u{2019} '\nOCONV 1\nOCONV ' \u{2019}\n");
        let h = Morfeus::from_strings(&aff, DIC).expect("handle");
        assert!(h.spell("can\u{2019}t"));
        assert_eq!(h.suggest("can;t").first().map(String::as_str), Some("can\u{2019}t"));
    }

    #[test]
    #[cfg(feature = "analyze")]
    fn morphology_through_the_handle() {
        let h = handle();
        assert_eq!(h.analyze("cats"), ["st:cat po:noun is:plural"]);
        assert_eq!(h.stem("dogs"), ["dog"]);
        assert_eq!(h.generate("cat", "dogs"), ["cats"]);
        assert_eq!(h.generate_from_description("dog", "is:plural"), ["dogs"]);
    }

    #[test]
    fn get_version_returns_cargo_version() {
        assert_eq!(Morfeus::get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    #[cfg(feature = "suggest")]
    #[ignore = "requires a Hunspell dictionary (MORFEUS_DICT_PATH)"]
    fn integration_spell_with_real_dict() {
        let dir = std::env::var("MORFEUS_DICT_PATH").expect("MORFEUS_DICT_PATH");
        let lang = std::env::var("MORFEUS_LANG").unwrap_or_else(|_| "en_US".into());
        let dir = PathBuf::from(dir);
        let h = Morfeus::from_paths(dir.join(format!("{lang}.aff")), dir.join(format!("{lang}.dic")))
            .expect("failed to create handle");
        assert!(h.spell("hello"));
        assert!(!h.spell("xyzzyplugh"));
        assert!(!h.suggest("helo").is_empty());
    }
}
