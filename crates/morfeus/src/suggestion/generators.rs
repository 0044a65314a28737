// Individual suggestion generators: each applies one class of edit operation
// to produce candidate words, then validates them via the speller.

use log::trace;
use morfeus_aff::replist::RepTable;
use morfeus_core::character::{simple_lower, simple_upper};
use morfeus_core::enums::SpellResult;

use super::status::SuggestionStatus;
use crate::speller::Speller;

/// Score of a candidate accepted as a simple word.
pub const SCORE_WORD: i32 = 2000;
/// Score of a candidate made of two dictionary words.
pub const SCORE_TWO_WORDS: i32 = 1500;
/// Score of a candidate accepted only as a compound.
pub const SCORE_COMPOUND: i32 = 1000;

/// Largest distance a character is moved or swapped over.
const MAX_CHAR_DISTANCE: usize = 4;

/// Recursion cap for MAP expansion.
const MAX_MAP_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Trait for individual suggestion generators.
///
/// Each generator produces candidate words by applying one class of edit
/// operation to the misspelled word, then validates each candidate through
/// the speller.
pub trait SuggestionGenerator {
    /// Generate suggestions for the word tracked by `status`, using `speller`
    /// to validate candidates.
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus);

    /// Short name used in trace output.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Check a candidate buffer against the speller and, if it passes, add
/// it to the suggestion status.
pub fn suggest_for_buffer(speller: &dyn Speller, status: &mut SuggestionStatus, buffer: &[char]) {
    if status.should_abort() {
        return;
    }
    let result = speller.spell(buffer);
    status.charge();
    match result {
        SpellResult::Failed => {}
        SpellResult::Ok => {
            status.add_suggestion(buffer.iter().collect(), SCORE_WORD);
        }
        SpellResult::Compound => {
            status.add_compound_suggestion(buffer.iter().collect(), SCORE_COMPOUND);
        }
    }
}

/// Check a candidate that may contain spaces. Each space-separated part
/// must be accepted on its own.
fn suggest_phrase(speller: &dyn Speller, status: &mut SuggestionStatus, candidate: &str) {
    if !candidate.contains(' ') {
        let buffer: Vec<char> = candidate.chars().collect();
        suggest_for_buffer(speller, status, &buffer);
        return;
    }
    if status.should_abort() {
        return;
    }
    let mut ok = true;
    for part in candidate.split(' ').filter(|p| !p.is_empty()) {
        let buffer: Vec<char> = part.chars().collect();
        status.charge();
        if speller.spell(&buffer) == SpellResult::Failed {
            ok = false;
            break;
        }
    }
    if ok {
        status.add_suggestion(candidate.to_string(), SCORE_TWO_WORDS);
    }
}

// =========================================================================
// Individual generators
// =========================================================================

// ---------------------------------------------------------------------------
// UpperCase
// ---------------------------------------------------------------------------

/// Try the whole word in uppercase ("nasa" -> "NASA").
pub struct UpperCase;

impl SuggestionGenerator for UpperCase {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let buffer: Vec<char> = status.word().iter().map(|&c| simple_upper(c)).collect();
        if buffer != status.word() {
            suggest_for_buffer(speller, status, &buffer);
        }
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }
}

// ---------------------------------------------------------------------------
// Replacement
// ---------------------------------------------------------------------------

/// Apply each REP table entry at every position where it matches.
///
/// An underscore in a replacement stands for a space; such candidates are
/// accepted when every word of the result spells.
pub struct Replacement {
    pub table: RepTable,
}

impl SuggestionGenerator for Replacement {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        if self.table.is_empty() {
            return;
        }
        let word: String = status.word().iter().collect();
        for candidate in self.table.candidates(&word) {
            if status.should_abort() {
                break;
            }
            suggest_phrase(speller, status, &candidate);
        }
    }

    fn name(&self) -> &'static str {
        "replacement"
    }
}

// ---------------------------------------------------------------------------
// MapRelated
// ---------------------------------------------------------------------------

/// Substitute related characters from the MAP groups, in every combination
/// ("fiancee" -> "fiancée").
pub struct MapRelated {
    /// Each group lists interchangeable strings (usually single characters).
    pub groups: Vec<Vec<Vec<char>>>,
}

impl MapRelated {
    pub fn new(groups: &[Vec<String>]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|m| m.chars().collect()).collect())
                .collect(),
        }
    }

    fn expand(
        &self,
        speller: &dyn Speller,
        status: &mut SuggestionStatus,
        word: &[char],
        pos: usize,
        candidate: &mut Vec<char>,
        depth: usize,
    ) {
        if status.should_abort() || depth > MAX_MAP_DEPTH {
            return;
        }
        if pos == word.len() {
            if candidate.as_slice() != word {
                suggest_for_buffer(speller, status, candidate);
            }
            return;
        }
        let mut in_map = false;
        for group in &self.groups {
            for member in group {
                if member.is_empty() || !word[pos..].starts_with(member) {
                    continue;
                }
                in_map = true;
                let mark = candidate.len();
                for other in group {
                    candidate.truncate(mark);
                    candidate.extend_from_slice(other);
                    self.expand(speller, status, word, pos + member.len(), candidate, depth + 1);
                }
                candidate.truncate(mark);
            }
        }
        if !in_map {
            candidate.push(word[pos]);
            self.expand(speller, status, word, pos + 1, candidate, depth + 1);
            candidate.pop();
        }
    }
}

impl SuggestionGenerator for MapRelated {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        if self.groups.is_empty() {
            return;
        }
        let word = status.word().to_vec();
        let mut candidate = Vec::with_capacity(word.len() + 4);
        self.expand(speller, status, &word, 0, &mut candidate, 0);
    }

    fn name(&self) -> &'static str {
        "map"
    }
}

// ---------------------------------------------------------------------------
// SwapAdjacent
// ---------------------------------------------------------------------------

/// Swap each pair of adjacent characters ("wrold" -> "world").
///
/// Four and five letter words additionally get two simultaneous swaps
/// ("ahev" -> "have").
pub struct SwapAdjacent;

impl SuggestionGenerator for SwapAdjacent {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        let mut buffer = word.clone();
        for i in 0..wlen - 1 {
            if status.should_abort() {
                return;
            }
            if word[i] == word[i + 1] {
                continue;
            }
            buffer.swap(i, i + 1);
            suggest_for_buffer(speller, status, &buffer);
            buffer.swap(i, i + 1);
        }

        if wlen == 4 || wlen == 5 {
            buffer[0] = word[1];
            buffer[1] = word[0];
            buffer[2] = word[2];
            buffer[wlen - 2] = word[wlen - 1];
            buffer[wlen - 1] = word[wlen - 2];
            suggest_for_buffer(speller, status, &buffer);
            if wlen == 5 {
                buffer[0] = word[0];
                buffer[1] = word[2];
                buffer[2] = word[1];
                suggest_for_buffer(speller, status, &buffer);
            }
        }
    }

    fn name(&self) -> &'static str {
        "swap"
    }
}

// ---------------------------------------------------------------------------
// SwapDistant
// ---------------------------------------------------------------------------

/// Swap two characters that are not neighbors ("sdutent" -> "student").
pub struct SwapDistant;

impl SuggestionGenerator for SwapDistant {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        let mut buffer = word.clone();
        for i in 0..wlen {
            for j in i + 2..wlen.min(i + MAX_CHAR_DISTANCE + 1) {
                if status.should_abort() {
                    return;
                }
                if word[i] == word[j] {
                    continue;
                }
                buffer.swap(i, j);
                suggest_for_buffer(speller, status, &buffer);
                buffer.swap(i, j);
            }
        }
    }

    fn name(&self) -> &'static str {
        "long swap"
    }
}

// ---------------------------------------------------------------------------
// KeyboardNeighbors
// ---------------------------------------------------------------------------

/// Replace each character with its uppercase form and with its neighbors on
/// the keyboard layout given by KEY ("qwertyuiop|asdfghjkl|zxcvbnm").
pub struct KeyboardNeighbors {
    pub layout: Vec<char>,
}

impl KeyboardNeighbors {
    fn neighbors(&self, c: char) -> Vec<char> {
        let mut out = Vec::new();
        for (i, &k) in self.layout.iter().enumerate() {
            if k != c {
                continue;
            }
            if i > 0 && self.layout[i - 1] != '|' {
                out.push(self.layout[i - 1]);
            }
            if let Some(&next) = self.layout.get(i + 1) {
                if next != '|' {
                    out.push(next);
                }
            }
        }
        out
    }
}

impl SuggestionGenerator for KeyboardNeighbors {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let mut buffer = word.clone();
        for (i, &original) in word.iter().enumerate() {
            if status.should_abort() {
                return;
            }
            let upper = simple_upper(original);
            if upper != original {
                buffer[i] = upper;
                suggest_for_buffer(speller, status, &buffer);
            }
            for neighbor in self.neighbors(original) {
                buffer[i] = neighbor;
                suggest_for_buffer(speller, status, &buffer);
            }
            buffer[i] = original;
        }
    }

    fn name(&self) -> &'static str {
        "keyboard"
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Try deleting one character at each position.
///
/// Skips positions where the deleted character is the same as its
/// predecessor, since that would produce the same candidate again.
pub struct Deletion;

impl SuggestionGenerator for Deletion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen - 1);
        for i in 0..wlen {
            if status.should_abort() {
                break;
            }
            if i > 0 && word[i] == word[i - 1] {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..i]);
            buffer.extend_from_slice(&word[i + 1..]);
            suggest_for_buffer(speller, status, &buffer);
        }
    }

    fn name(&self) -> &'static str {
        "deletion"
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Try inserting each TRY character at every position in the word.
///
/// The TRY string is ordered by frequency, so common letters are tested
/// first.
pub struct Insertion {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for Insertion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen == 0 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen + 1);
        for &ins in &self.characters {
            for j in 0..=wlen {
                if status.should_abort() {
                    return;
                }
                // Inserting next to an equal letter duplicates an earlier
                // candidate.
                if j > 0 && simple_lower(word[j - 1]) == ins {
                    continue;
                }
                buffer.clear();
                buffer.extend_from_slice(&word[..j]);
                buffer.push(ins);
                buffer.extend_from_slice(&word[j..]);
                suggest_for_buffer(speller, status, &buffer);
            }
        }
    }

    fn name(&self) -> &'static str {
        "insertion"
    }
}

// ---------------------------------------------------------------------------
// MoveChar
// ---------------------------------------------------------------------------

/// Move one character two or more places forward or backward
/// ("rnai" -> "rain").
pub struct MoveChar;

impl SuggestionGenerator for MoveChar {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 3 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen);
        for from in 0..wlen {
            for to in 0..wlen {
                if from.abs_diff(to) < 2 || from.abs_diff(to) >= MAX_CHAR_DISTANCE {
                    continue;
                }
                if status.should_abort() {
                    return;
                }
                buffer.clear();
                buffer.extend_from_slice(&word);
                let c = buffer.remove(from);
                buffer.insert(to, c);
                suggest_for_buffer(speller, status, &buffer);
            }
        }
    }

    fn name(&self) -> &'static str {
        "move"
    }
}

// ---------------------------------------------------------------------------
// BadChar
// ---------------------------------------------------------------------------

/// Replace each character with every TRY character.
pub struct BadChar {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for BadChar {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let mut buffer = word.clone();
        for &replacement in &self.characters {
            for (i, &original) in word.iter().enumerate() {
                if status.should_abort() {
                    return;
                }
                if original == replacement {
                    continue;
                }
                buffer[i] = replacement;
                suggest_for_buffer(speller, status, &buffer);
                buffer[i] = original;
            }
        }
    }

    fn name(&self) -> &'static str {
        "bad char"
    }
}

// ---------------------------------------------------------------------------
// DoubleTwoChars
// ---------------------------------------------------------------------------

/// Remove a doubled two-character sequence ("vacacation" -> "vacation").
pub struct DoubleTwoChars;

impl SuggestionGenerator for DoubleTwoChars {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 5 {
            return;
        }
        let mut state = 0;
        for i in 2..wlen {
            if word[i] != word[i - 2] {
                state = 0;
                continue;
            }
            state += 1;
            if state == 3 || (state == 2 && i >= 4) {
                let mut buffer = Vec::with_capacity(wlen - 2);
                buffer.extend_from_slice(&word[..i - 1]);
                buffer.extend_from_slice(&word[i + 1..]);
                suggest_for_buffer(speller, status, &buffer);
                state = 0;
            }
        }
    }

    fn name(&self) -> &'static str {
        "double two chars"
    }
}

// ---------------------------------------------------------------------------
// SplitWord
// ---------------------------------------------------------------------------

/// Split the word in two at every position; both halves must spell.
///
/// Produces "a lot" from "alot", plus "a-lot" when dashes are allowed.
pub struct SplitWord {
    pub with_dash: bool,
}

impl SuggestionGenerator for SplitWord {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        for split in 1..wlen {
            if status.should_abort() {
                return;
            }
            let (left, right) = word.split_at(split);
            if left.last() == Some(&'-') || right.first() == Some(&'-') {
                continue;
            }
            status.charge();
            if speller.spell(left) == SpellResult::Failed {
                continue;
            }
            status.charge();
            if speller.spell(right) == SpellResult::Failed {
                continue;
            }
            let left: String = left.iter().collect();
            let right: String = right.iter().collect();
            status.add_suggestion(format!("{left} {right}"), SCORE_TWO_WORDS);
            if self.with_dash {
                status.add_suggestion(format!("{left}-{right}"), SCORE_TWO_WORDS);
            }
        }
    }

    fn name(&self) -> &'static str {
        "split"
    }
}

/// Run `generators` in order until the status asks to stop.
pub fn run_all(
    generators: &[Box<dyn SuggestionGenerator + Send + Sync>],
    speller: &dyn Speller,
    status: &mut SuggestionStatus,
) {
    for generator in generators {
        if status.should_abort() {
            trace!("suggestion budget spent before {}", generator.name());
            break;
        }
        let before = status.suggestion_count();
        generator.generate(speller, status);
        trace!(
            "{}: {} new suggestion(s)",
            generator.name(),
            status.suggestion_count() - before
        );
    }
}
