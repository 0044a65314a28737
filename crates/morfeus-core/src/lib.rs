//! Shared types for the Morfeus spell checker: character case helpers,
//! spell result values, word-length limits and morphological descriptions.

pub mod analysis;
pub mod case;
pub mod character;
pub mod enums;
