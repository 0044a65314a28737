// Morphological descriptions: ordered "tag:value" fields

use std::fmt;

// ---------------------------------------------------------------------------
// Field tags
// ---------------------------------------------------------------------------

/// Stem (dictionary root).
pub const TAG_STEM: &str = "st";
/// Allomorph.
pub const TAG_ALLOMORPH: &str = "al";
/// Part of speech.
pub const TAG_PART_OF_SPEECH: &str = "po";
/// Derivational suffix.
pub const TAG_DERI_SFX: &str = "ds";
/// Inflectional suffix.
pub const TAG_INFL_SFX: &str = "is";
/// Terminal suffix.
pub const TAG_TERM_SFX: &str = "ts";
/// Surface prefix.
pub const TAG_SURF_PFX: &str = "sp";
/// Free-form part.
pub const TAG_PART: &str = "pa";
/// Inflectional prefix.
pub const TAG_INFL_PFX: &str = "ip";
/// Derivational prefix.
pub const TAG_DERI_PFX: &str = "dp";
/// Terminal prefix.
pub const TAG_TERM_PFX: &str = "tp";
/// Phonetic (replacement) form.
pub const TAG_PHON: &str = "ph";

/// Tags that describe inflection and are transferred by generation.
pub const INFLECTION_TAGS: &[&str] = &[TAG_INFL_SFX, TAG_DERI_SFX, TAG_TERM_SFX, TAG_INFL_PFX];

/// One `tag:value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphField {
    pub tag: String,
    pub value: String,
}

/// An ordered list of morphological fields, as written after a dictionary
/// word or an affix entry (`po:noun is:plural`).
///
/// Tokens that are not in `tag:value` form are kept verbatim with an empty
/// tag so that nothing is lost on display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MorphDescription {
    fields: Vec<MorphField>,
}

impl MorphDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace-separated description.
    pub fn parse(text: &str) -> Self {
        let fields = text
            .split_whitespace()
            .map(|token| match split_field(token) {
                Some((tag, value)) => MorphField {
                    tag: tag.to_string(),
                    value: value.to_string(),
                },
                None => MorphField {
                    tag: String::new(),
                    value: token.to_string(),
                },
            })
            .collect();
        Self { fields }
    }

    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.fields.push(MorphField {
            tag: tag.into(),
            value: value.into(),
        });
    }

    /// Append every field of `other`.
    pub fn extend(&mut self, other: &MorphDescription) {
        self.fields.extend(other.fields.iter().cloned());
    }

    /// First value carrying `tag`.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// All values carrying `tag`, in order.
    pub fn get_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// Fields describing inflection (`is:`, `ds:`, `ts:`, `ip:`).
    pub fn inflection(&self) -> MorphDescription {
        MorphDescription {
            fields: self
                .fields
                .iter()
                .filter(|f| INFLECTION_TAGS.contains(&f.tag.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn fields(&self) -> &[MorphField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MorphDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if field.tag.is_empty() {
                f.write_str(&field.value)?;
            } else {
                write!(f, "{}:{}", field.tag, field.value)?;
            }
        }
        Ok(())
    }
}

/// Split `po:noun` into `("po", "noun")`. Tags are exactly two characters.
fn split_field(token: &str) -> Option<(&str, &str)> {
    let (tag, value) = token.split_once(':')?;
    if tag.chars().count() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()) {
        Some((tag, value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_preserve_order() {
        let d = MorphDescription::parse("po:noun  is:plural   extra");
        assert_eq!(d.fields().len(), 3);
        assert_eq!(d.get(TAG_PART_OF_SPEECH), Some("noun"));
        assert_eq!(d.to_string(), "po:noun is:plural extra");
    }

    #[test]
    fn inflection_keeps_only_inflectional_tags() {
        let d = MorphDescription::parse("st:drink po:verb is:past ds:er");
        assert_eq!(d.inflection().to_string(), "is:past ds:er");
    }

    #[test]
    fn get_all_returns_repeated_tags() {
        let d = MorphDescription::parse("is:a is:b po:x");
        let values: Vec<&str> = d.get_all(TAG_INFL_SFX).collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn url_like_tokens_are_not_fields() {
        let d = MorphDescription::parse("http://example");
        assert!(d.fields()[0].tag.is_empty());
    }
}
