// Affix flags: the four on-disk encodings and sorted flag sets

use std::fmt;

/// An opaque 16-bit affix flag.
pub type Flag = u16;

/// Flag used to mark removed personal-dictionary words when the rule file
/// does not name a FORBIDDENWORD flag.
pub const DEFAULT_FORBIDDEN_FLAG: Flag = 65510;

/// How flags are written in the rule file and the word list.
///
/// Decided once by the `FLAG` directive and carried in the rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FlagMode {
    /// One byte per flag (`/ABC`).
    #[default]
    Char,
    /// Two bytes per flag (`/AaBb`).
    Long,
    /// Comma-separated decimal numbers (`/101,2002`).
    Num,
    /// One Unicode scalar per flag, at most U+FFFF.
    Utf8,
}

impl FlagMode {
    /// Parse the argument of the `FLAG` directive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "long" => Some(FlagMode::Long),
            "num" => Some(FlagMode::Num),
            "UTF-8" | "utf-8" | "UTF8" => Some(FlagMode::Utf8),
            "char" => Some(FlagMode::Char),
            _ => None,
        }
    }
}

/// Reasons a flag field cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error("empty flag")]
    Empty,
    #[error("odd number of bytes in long flag")]
    OddLength,
    #[error("`{0}` is not a flag number between 1 and 65535")]
    BadNumber(String),
    #[error("code point U+{0:04X} does not fit in a 16-bit flag")]
    OutOfRange(u32),
    #[error("misplaced repetition marker in compound rule `{0}`")]
    MisplacedRepeat(String),
}

/// Decode a whole flag field (the part after `/`) into flags, in order.
pub fn decode_flags(text: &str, mode: FlagMode) -> Result<Vec<Flag>, FlagError> {
    match mode {
        FlagMode::Char => Ok(text.bytes().map(Flag::from).collect()),
        FlagMode::Long => {
            let bytes = text.as_bytes();
            if bytes.len() % 2 != 0 {
                return Err(FlagError::OddLength);
            }
            Ok(bytes
                .chunks_exact(2)
                .map(|pair| (Flag::from(pair[0]) << 8) | Flag::from(pair[1]))
                .collect())
        }
        FlagMode::Num => text
            .split(',')
            .filter(|part| !part.is_empty())
            .map(|part| match part.trim().parse::<u32>() {
                Ok(n) if (1..=u32::from(Flag::MAX)).contains(&n) => Ok(n as Flag),
                _ => Err(FlagError::BadNumber(part.to_string())),
            })
            .collect(),
        FlagMode::Utf8 => text
            .chars()
            .map(|c| Flag::try_from(u32::from(c)).map_err(|_| FlagError::OutOfRange(c.into())))
            .collect(),
    }
}

/// Decode a field that must hold exactly one flag (PFX/SFX headers,
/// directives such as `COMPOUNDFLAG`).
pub fn decode_flag(text: &str, mode: FlagMode) -> Result<Flag, FlagError> {
    decode_flags(text, mode)?
        .first()
        .copied()
        .ok_or(FlagError::Empty)
}

/// Render a flag the way it would be written in a rule file.
pub fn encode_flag(flag: Flag, mode: FlagMode) -> String {
    match mode {
        FlagMode::Char => char::from(flag as u8).to_string(),
        FlagMode::Long => {
            let hi = char::from((flag >> 8) as u8);
            let lo = char::from((flag & 0xFF) as u8);
            [hi, lo].iter().collect()
        }
        FlagMode::Num => flag.to_string(),
        FlagMode::Utf8 => char::from_u32(u32::from(flag))
            .map(String::from)
            .unwrap_or_else(|| flag.to_string()),
    }
}

// ---------------------------------------------------------------------------
// FlagSet
// ---------------------------------------------------------------------------

/// A sorted, deduplicated vector of flags with binary-search membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    /// `true` when `flag` is set and present.
    pub fn contains_opt(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.contains(f))
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }

    pub fn remove(&mut self, flag: Flag) -> bool {
        match self.0.binary_search(&flag) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Whether the two sets share at least one flag.
    pub fn intersects(&self, other: &FlagSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags: Vec<Flag> = iter.into_iter().collect();
        flags.sort_unstable();
        flags.dedup();
        Self(flags)
    }
}

impl From<Vec<Flag>> for FlagSet {
    fn from(flags: Vec<Flag>) -> Self {
        flags.into_iter().collect()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u16::to_string).collect();
        write!(f, "[{}]", parts.join(","))
    }
}
