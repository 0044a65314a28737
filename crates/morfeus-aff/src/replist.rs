// REP table: typical misspelling replacements

/// One `REP pattern replacement` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepEntry {
    pub pattern: String,
    /// Replacement text; `_` in the rule file is stored as a space.
    pub replacement: String,
    /// `^pattern`: only at the start of the word.
    pub at_start: bool,
    /// `pattern$`: only at the end of the word.
    pub at_end: bool,
}

impl RepEntry {
    /// Parse the two fields of a REP line, handling anchors and `_`.
    pub fn parse(pattern: &str, replacement: &str) -> Option<Self> {
        let mut pattern = pattern;
        let at_start = pattern.starts_with('^');
        if at_start {
            pattern = &pattern[1..];
        }
        let at_end = pattern.len() > 1 && pattern.ends_with('$');
        if at_end {
            pattern = &pattern[..pattern.len() - 1];
        }
        if pattern.is_empty() {
            return None;
        }
        Some(Self {
            pattern: pattern.replace('_', " "),
            replacement: replacement.replace('_', " "),
            at_start,
            at_end,
        })
    }
}

/// Ordered REP replacements.
#[derive(Debug, Clone, Default)]
pub struct RepTable {
    entries: Vec<RepEntry>,
}

impl RepTable {
    pub fn push(&mut self, entry: RepEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RepEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every word obtained by applying one replacement at one position, in
    /// table order then position order.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        let mut out = Vec::new();
        for entry in &self.entries {
            let mut from = 0;
            while let Some(found) = word[from..].find(entry.pattern.as_str()) {
                let start = from + found;
                let end = start + entry.pattern.len();
                let anchored = (!entry.at_start || start == 0)
                    && (!entry.at_end || end == word.len());
                if anchored {
                    let mut candidate = String::with_capacity(word.len() + entry.replacement.len());
                    candidate.push_str(&word[..start]);
                    candidate.push_str(&entry.replacement);
                    candidate.push_str(&word[end..]);
                    out.push(candidate);
                }
                let step = word[start..].chars().next().map_or(1, char::len_utf8);
                from = start + step;
                if entry.at_start {
                    break;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> RepTable {
        let mut t = RepTable::default();
        for (p, r) in pairs {
            t.push(RepEntry::parse(p, r).unwrap());
        }
        t
    }

    #[test]
    fn replaces_at_every_position() {
        let t = table(&[("f", "ph")]);
        assert_eq!(t.candidates("fof"), vec!["phof", "foph"]);
    }

    #[test]
    fn anchors_limit_positions() {
        let t = table(&[("^a", "b"), ("a$", "c")]);
        assert_eq!(t.candidates("aaa"), vec!["baa", "aac"]);
    }

    #[test]
    fn underscore_becomes_space() {
        let t = table(&[("alot", "a_lot")]);
        assert_eq!(t.candidates("alot"), vec!["a lot"]);
    }

    #[test]
    fn bare_anchor_is_rejected() {
        assert!(RepEntry::parse("^", "x").is_none());
    }
}
