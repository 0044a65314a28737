// Declarative compounding data: COMPOUNDRULE and CHECKCOMPOUNDPATTERN

use crate::flags::{Flag, FlagError, FlagMode, decode_flag};

/// Repetition marker after a flag in a compound rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// `?` -- zero or one.
    Optional,
    /// `*` -- zero or more.
    Any,
}

impl Repeat {
    /// Upper bound on consecutive words one element may absorb.
    pub fn max(self) -> usize {
        match self {
            Repeat::Once | Repeat::Optional => 1,
            Repeat::Any => usize::MAX,
        }
    }

    pub fn is_optional(self) -> bool {
        self != Repeat::Once
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleElement {
    pub flag: Flag,
    pub repeat: Repeat,
}

/// One `COMPOUNDRULE` line, e.g. `A*B?C`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundRule {
    pub elements: Vec<RuleElement>,
}

impl CompoundRule {
    /// Parse a rule. With `long` and `num` flag modes every flag is written
    /// in parentheses: `(aa)(bb)*`.
    pub fn parse(text: &str, mode: FlagMode) -> Result<Self, FlagError> {
        let mut elements: Vec<RuleElement> = Vec::new();
        let mut chars = text.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '*' | '?' => {
                    let repeat = if c == '*' { Repeat::Any } else { Repeat::Optional };
                    match elements.last_mut() {
                        Some(last) if last.repeat == Repeat::Once => last.repeat = repeat,
                        _ => return Err(FlagError::MisplacedRepeat(text.to_string())),
                    }
                }
                '(' => {
                    let start = i + 1;
                    let mut end = start;
                    for (j, g) in chars.by_ref() {
                        if g == ')' {
                            end = j;
                            break;
                        }
                        end = j + g.len_utf8();
                    }
                    let flag = decode_flag(&text[start..end], mode)?;
                    elements.push(RuleElement {
                        flag,
                        repeat: Repeat::Once,
                    });
                }
                _ => {
                    let flag = decode_flag(&text[i..i + c.len_utf8()], mode)?;
                    elements.push(RuleElement {
                        flag,
                        repeat: Repeat::Once,
                    });
                }
            }
        }
        if elements.is_empty() {
            return Err(FlagError::Empty);
        }
        Ok(Self { elements })
    }

    /// Whether `flag` appears anywhere in the rule.
    pub fn mentions(&self, flag: Flag) -> bool {
        self.elements.iter().any(|e| e.flag == flag)
    }
}

/// One side of a compound pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternText {
    /// Characters the part must end (first side) or begin (second side)
    /// with. Empty matches any part.
    Chars(String),
    /// `0`: the part keeps its dictionary spelling at the boundary, i.e. no
    /// affix changed that edge.
    Unaffixed,
}

impl PatternText {
    /// Characters this side contributes to the surface word.
    pub fn chars(&self) -> &str {
        match self {
            PatternText::Chars(s) => s,
            PatternText::Unaffixed => "",
        }
    }
}

/// One `CHECKCOMPOUNDPATTERN endchars[/flag] beginchars[/flag] [replacement]`
/// line: forbids a compound boundary where the first part ends with
/// `first_end` and the second begins with `second_begin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundPattern {
    pub first_end: PatternText,
    pub first_flag: Option<Flag>,
    pub second_begin: PatternText,
    pub second_flag: Option<Flag>,
    /// Optional replacement: the surface word may contain this instead of
    /// `first_end + second_begin`, which licenses the simplified spelling
    /// at that boundary.
    pub replacement: Option<String>,
}

impl CompoundPattern {
    pub fn parse(
        first: &str,
        second: &str,
        replacement: Option<&str>,
        mode: FlagMode,
    ) -> Result<Self, FlagError> {
        let (first_end, first_flag) = split_flagged(first, mode)?;
        let (second_begin, second_flag) = split_flagged(second, mode)?;
        Ok(Self {
            first_end,
            first_flag,
            second_begin,
            second_flag,
            replacement: replacement.map(str::to_string),
        })
    }
}

/// `chars/flag` -> (side, flag).
fn split_flagged(text: &str, mode: FlagMode) -> Result<(PatternText, Option<Flag>), FlagError> {
    let (chars, flag) = match text.split_once('/') {
        Some((chars, flag)) => (chars, Some(decode_flag(flag, mode)?)),
        None => (text, None),
    };
    let side = if chars == "0" {
        PatternText::Unaffixed
    } else {
        PatternText::Chars(chars.to_string())
    };
    Ok((side, flag))
}
