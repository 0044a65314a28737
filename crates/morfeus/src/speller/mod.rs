// Spell checking module

pub mod adapter;
pub mod pipeline;

use morfeus_core::enums::SpellResult;

/// Trait for spell checkers.
///
/// Implementations take a word as a `char` slice (for random-access
/// indexing into character positions) and check that exact spelling; case
/// variation is the pipeline's job.
pub trait Speller {
    fn spell(&self, word: &[char]) -> SpellResult;
}
