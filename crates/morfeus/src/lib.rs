//! Morfeus: a dictionary-driven spell checker for affix-rule languages.
//!
//! A rule file (`.aff`) describes prefixes, suffixes, compounding and
//! suggestion tables; a word list (`.dic`) lists roots with their affix
//! flags. This crate answers queries against a loaded pair.
//!
//! # Architecture
//!
//! - [`checker`] -- Affix reconstruction, compound recognition, root expansion
//! - [`speller`] -- The `Speller` trait and the casing/BREAK pipeline
//! - [`suggestion`] -- Edit generators, strategy, n-gram ranking
//! - [`morphology`] -- Analysis, stemming and generation
//! - [`handle`] -- The [`Morfeus`] facade owning rules and words

pub mod checker;
pub mod handle;
pub mod speller;

#[cfg(feature = "analyze")]
pub mod morphology;
#[cfg(feature = "suggest")]
pub mod suggestion;

pub use handle::{Morfeus, MorfeusError};
pub use morfeus_core::enums::{SpellInfo, SpellResult};
