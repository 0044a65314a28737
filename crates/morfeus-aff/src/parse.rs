// Rule-file (.aff) parser
//
// Directive lines are whitespace separated. Table directives (REP, MAP,
// AF, PFX, ...) start with a header giving the number of detail lines that
// follow. Structural problems (bad counts, duplicate tables, malformed
// affix lines) abort the load; a malformed detail line of a suggestion
// table is logged and skipped.

use hashbrown::HashSet;
use log::{debug, warn};
use morfeus_core::analysis::MorphDescription;
use morfeus_core::character::char_len;
use morfeus_core::enums::MAX_WORD_LEN;

use crate::affix::{AffixEntry, AffixKind};
use crate::compound::{CompoundPattern, CompoundRule};
use crate::condition::Condition;
use crate::flags::{Flag, FlagMode, FlagSet, decode_flag};
use crate::index::AffixIndex;
use crate::phonetic::PhoneTable;
use crate::replist::RepEntry;
use crate::{AffixRuleSet, FileKind, ParseError};

/// Break patterns used when the rule file defines none.
pub const DEFAULT_BREAKS: &[&str] = &["-", "^-", "-$"];

/// A significant line: its 1-based number and fields.
struct Line<'a> {
    number: usize,
    fields: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn directive(&self) -> &'a str {
        self.fields[0]
    }

    fn field(&self, i: usize, name: &'static str) -> Result<&'a str, ParseError> {
        self.fields
            .get(i)
            .copied()
            .ok_or_else(|| ParseError::MissingField {
                file: FileKind::Aff,
                line: self.number,
                directive: self.directive().to_string(),
                field: name,
            })
    }

    fn number_field(&self, i: usize, name: &'static str) -> Result<usize, ParseError> {
        let value = self.field(i, name)?;
        value.parse().map_err(|_| ParseError::BadNumber {
            file: FileKind::Aff,
            line: self.number,
            value: value.to_string(),
        })
    }
}

struct AffParser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    set: AffixRuleSet,
    entries: Vec<AffixEntry>,
    tables: HashSet<&'static str>,
    affix_headers: HashSet<(AffixKind, Flag)>,
    breaks_defined: bool,
}

/// Parse a decoded rule file.
pub fn parse_aff(text: &str) -> Result<AffixRuleSet, ParseError> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let lines = text
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            match fields.first() {
                None => None,
                Some(first) if first.starts_with('#') => None,
                Some(_) => Some(Line {
                    number: i + 1,
                    fields,
                }),
            }
        })
        .collect();

    let mut parser = AffParser {
        lines,
        pos: 0,
        set: AffixRuleSet::default(),
        entries: Vec::new(),
        tables: HashSet::new(),
        affix_headers: HashSet::new(),
        breaks_defined: false,
    };
    parser.run()?;

    let AffParser {
        mut set,
        entries,
        breaks_defined,
        ..
    } = parser;
    if !breaks_defined {
        set.breaks = DEFAULT_BREAKS.iter().map(|s| s.to_string()).collect();
    }
    debug!(
        "parsed rule file: {} affix entries, {} REP, {} MAP, {} compound rules",
        entries.len(),
        set.rep.entries().len(),
        set.map.len(),
        set.options.compound.rules.len()
    );
    set.index = AffixIndex::build(entries);
    Ok(set)
}

impl<'a> AffParser<'a> {
    fn run(&mut self) -> Result<(), ParseError> {
        while self.pos < self.lines.len() {
            let idx = self.pos;
            self.pos += 1;
            self.directive(idx)?;
        }
        Ok(())
    }

    fn flag_mode(&self) -> FlagMode {
        self.set.options.flag_mode
    }

    fn flag(&self, line: &Line<'_>, i: usize) -> Result<Flag, ParseError> {
        let value = line.field(i, "flag")?;
        decode_flag(value, self.flag_mode()).map_err(|source| ParseError::BadFlag {
            file: FileKind::Aff,
            line: line.number,
            value: value.to_string(),
            source,
        })
    }

    fn directive(&mut self, idx: usize) -> Result<(), ParseError> {
        let line = &self.lines[idx];
        let opts = &mut self.set.options;
        match line.directive() {
            "SET" => opts.encoding = line.field(1, "character set")?.to_string(),
            "FLAG" => {
                let value = line.field(1, "flag type")?;
                opts.flag_mode =
                    FlagMode::from_name(value).ok_or_else(|| ParseError::BadFlagMode {
                        line: line.number,
                        value: value.to_string(),
                    })?;
            }
            "LANG" => opts.lang = Some(line.field(1, "language")?.to_string()),
            "TRY" => opts.try_chars = line.field(1, "characters")?.to_string(),
            "KEY" => opts.key = line.field(1, "keyboard layout")?.to_string(),
            "WORDCHARS" => opts.word_chars = line.field(1, "characters")?.to_string(),
            "IGNORE" => opts.ignore_chars = line.field(1, "characters")?.to_string(),
            "COMPLEXPREFIXES" => opts.complex_prefixes = true,
            "FULLSTRIP" => opts.full_strip = true,
            "FORBIDWARN" => opts.forbid_warn = true,
            "CHECKCOMPOUNDDUP" => opts.compound.check_dup = true,
            "CHECKCOMPOUNDTRIPLE" => opts.compound.check_triple = true,
            "SIMPLIFIEDTRIPLE" => opts.compound.simplified_triple = true,
            "CHECKCOMPOUNDCASE" => opts.compound.check_case = true,
            "CHECKCOMPOUNDREP" => opts.compound.check_rep = true,
            "NOSPLITSUGS" => opts.suggest.no_split = true,
            "ONLYMAXDIFF" => opts.suggest.only_max_diff = true,
            "SUGSWITHDOTS" => opts.suggest.with_dots = true,
            "NEEDAFFIX" | "PSEUDOROOT" => self.set.options.need_affix = Some(self.flag(line, 1)?),
            "FORBIDDENWORD" => self.set.options.forbidden_word = self.flag(line, 1)?,
            "ONLYINCOMPOUND" => self.set.options.only_in_compound = Some(self.flag(line, 1)?),
            "KEEPCASE" => self.set.options.keep_case = Some(self.flag(line, 1)?),
            "FORCEUCASE" => self.set.options.force_upper = Some(self.flag(line, 1)?),
            "CIRCUMFIX" => self.set.options.circumfix = Some(self.flag(line, 1)?),
            "NOSUGGEST" => self.set.options.no_suggest = Some(self.flag(line, 1)?),
            "WARN" => self.set.options.warn = Some(self.flag(line, 1)?),
            "COMPOUNDFLAG" => self.set.options.compound.flag = Some(self.flag(line, 1)?),
            "COMPOUNDBEGIN" => self.set.options.compound.begin = Some(self.flag(line, 1)?),
            "COMPOUNDMIDDLE" => self.set.options.compound.middle = Some(self.flag(line, 1)?),
            "COMPOUNDLAST" | "COMPOUNDEND" => {
                self.set.options.compound.end = Some(self.flag(line, 1)?)
            }
            "COMPOUNDPERMITFLAG" => self.set.options.compound.permit = Some(self.flag(line, 1)?),
            "COMPOUNDFORBIDFLAG" => self.set.options.compound.forbid = Some(self.flag(line, 1)?),
            "COMPOUNDROOT" => self.set.options.compound.root = Some(self.flag(line, 1)?),
            "COMPOUNDMIN" => opts.compound.min = line.number_field(1, "length")?.max(1),
            "COMPOUNDWORDMAX" => opts.compound.word_max = Some(line.number_field(1, "count")?),
            "COMPOUNDSYLLABLE" => {
                opts.compound.syllable_max = Some(line.number_field(1, "count")?);
                opts.compound.vowels = line.field(2, "vowels")?.to_string();
            }
            "MAXNGRAMSUGS" => opts.suggest.max_ngram = line.number_field(1, "count")?,
            "MAXCPDSUGS" => opts.suggest.max_compound = line.number_field(1, "count")?,
            "MAXDIFF" => {
                opts.suggest.max_diff = Some(line.number_field(1, "value")?.min(10) as u8)
            }
            "PFX" | "SFX" => self.affix_block(idx)?,
            "REP" | "MAP" | "BREAK" | "ICONV" | "OCONV" | "PHONE" | "COMPOUNDRULE"
            | "CHECKCOMPOUNDPATTERN" | "AF" | "AM" => self.table(idx)?,
            other => debug!("aff line {}: ignoring directive {other}", line.number),
        }
        Ok(())
    }

    /// Take the `count` detail lines following header `idx`, checking that
    /// each starts with the header's directive.
    fn detail_lines(&mut self, idx: usize, count: usize) -> Result<std::ops::Range<usize>, ParseError> {
        let header = &self.lines[idx];
        let directive = header.directive();
        let start = self.pos;
        let mut found = 0;
        while found < count {
            match self.lines.get(start + found) {
                Some(l) if l.directive() == directive => found += 1,
                _ => {
                    return Err(ParseError::EntryCount {
                        line: header.number,
                        directive: directive.to_string(),
                        expected: count,
                        found,
                    });
                }
            }
        }
        self.pos = start + count;
        Ok(start..start + count)
    }

    fn table(&mut self, idx: usize) -> Result<(), ParseError> {
        let directive: &'static str = match self.lines[idx].directive() {
            "REP" => "REP",
            "MAP" => "MAP",
            "BREAK" => "BREAK",
            "ICONV" => "ICONV",
            "OCONV" => "OCONV",
            "PHONE" => "PHONE",
            "COMPOUNDRULE" => "COMPOUNDRULE",
            "CHECKCOMPOUNDPATTERN" => "CHECKCOMPOUNDPATTERN",
            "AF" => "AF",
            _ => "AM",
        };
        let header_line = self.lines[idx].number;
        if !self.tables.insert(directive) {
            return Err(ParseError::DuplicateTable {
                line: header_line,
                directive: directive.to_string(),
            });
        }
        let count = self.lines[idx].number_field(1, "entry count")?;
        let range = self.detail_lines(idx, count)?;

        let mut phone = PhoneTable::default();
        for i in range {
            let line = &self.lines[i];
            match directive {
                "REP" => match (line.fields.get(1), line.fields.get(2)) {
                    (Some(p), Some(r)) => match RepEntry::parse(p, r) {
                        Some(entry) => self.set.rep.push(entry),
                        None => warn!("aff line {}: empty REP pattern skipped", line.number),
                    },
                    _ => warn!("aff line {}: REP needs two fields", line.number),
                },
                "MAP" => match line.fields.get(1) {
                    Some(group) => self.set.map.push(split_map_group(group)),
                    None => warn!("aff line {}: MAP needs a character group", line.number),
                },
                "BREAK" => match line.fields.get(1) {
                    Some(pattern) => self.set.breaks.push(pattern.to_string()),
                    None => warn!("aff line {}: BREAK needs a pattern", line.number),
                },
                "ICONV" | "OCONV" => match (line.fields.get(1), line.fields.get(2)) {
                    (Some(from), Some(to)) => {
                        let conv = if directive == "ICONV" {
                            &mut self.set.iconv
                        } else {
                            &mut self.set.oconv
                        };
                        conv.push(from.replace('_', " "), to.replace('_', " "));
                    }
                    _ => warn!("aff line {}: {directive} needs two fields", line.number),
                },
                "PHONE" => match (line.fields.get(1), line.fields.get(2)) {
                    (Some(search), Some(replace)) if phone.push_rule(search, replace) => {}
                    _ => warn!("aff line {}: malformed PHONE rule skipped", line.number),
                },
                "COMPOUNDRULE" => {
                    let text = line.field(1, "rule")?;
                    let rule = CompoundRule::parse(text, self.set.options.flag_mode).map_err(
                        |source| ParseError::BadFlag {
                            file: FileKind::Aff,
                            line: line.number,
                            value: text.to_string(),
                            source,
                        },
                    )?;
                    self.set.options.compound.rules.push(rule);
                }
                "CHECKCOMPOUNDPATTERN" => {
                    let first = line.field(1, "first part")?;
                    let second = line.field(2, "second part")?;
                    let pattern = CompoundPattern::parse(
                        first,
                        second,
                        line.fields.get(3).copied(),
                        self.set.options.flag_mode,
                    )
                    .map_err(|source| ParseError::BadFlag {
                        file: FileKind::Aff,
                        line: line.number,
                        value: format!("{first} {second}"),
                        source,
                    })?;
                    self.set.options.compound.patterns.push(pattern);
                }
                "AF" => {
                    let text = line.field(1, "flags")?;
                    let flags = crate::flags::decode_flags(text, self.set.options.flag_mode)
                        .map_err(|source| ParseError::BadFlag {
                            file: FileKind::Aff,
                            line: line.number,
                            value: text.to_string(),
                            source,
                        })?;
                    self.set.flag_aliases.push(FlagSet::from(flags));
                }
                _ => {
                    let desc = MorphDescription::parse(&line.fields[1..].join(" "));
                    self.set.morph_aliases.push(desc);
                }
            }
        }
        match directive {
            "PHONE" => self.set.phone = Some(phone),
            "BREAK" => self.breaks_defined = true,
            _ => {}
        }
        Ok(())
    }

    fn affix_block(&mut self, idx: usize) -> Result<(), ParseError> {
        let header = &self.lines[idx];
        let kind = if header.directive() == "PFX" {
            AffixKind::Prefix
        } else {
            AffixKind::Suffix
        };
        let flag = self.flag(header, 1)?;
        let cross_product = header.field(2, "cross product marker")? == "Y";
        let count = header.number_field(3, "entry count")?;
        if !self.affix_headers.insert((kind, flag)) {
            warn!(
                "aff line {}: {} flag defined more than once",
                header.number,
                header.directive()
            );
        }

        let range = self.detail_lines(idx, count)?;
        for i in range {
            let entry = self.affix_entry(&self.lines[i], kind, flag, cross_product)?;
            self.entries.push(entry);
        }
        Ok(())
    }

    fn affix_entry(
        &self,
        line: &Line<'_>,
        kind: AffixKind,
        flag: Flag,
        cross_product: bool,
    ) -> Result<AffixEntry, ParseError> {
        let entry_flag = self.flag(line, 1)?;
        if entry_flag != flag {
            warn!(
                "aff line {}: affix entry flag differs from its header",
                line.number
            );
        }
        let strip = line.field(2, "strip")?;
        let append_field = line.field(3, "affix")?;
        let condition = line.fields.get(4).copied().unwrap_or(".");

        let strip = if strip == "0" { "" } else { strip };
        let (append, cont) = match append_field.split_once('/') {
            Some((append, cont)) => (append, Some(cont)),
            None => (append_field, None),
        };
        let append = if append == "0" { "" } else { append };
        let append = self.set.options.strip_ignored(append);

        if char_len(strip) + char_len(&append) > MAX_WORD_LEN {
            return Err(ParseError::AffixTooLong {
                line: line.number,
                max: MAX_WORD_LEN,
            });
        }

        let cont_flags = match cont {
            Some(text) => self
                .set
                .decode_flag_field(text, FileKind::Aff, line.number)?,
            None => FlagSet::new(),
        };
        let condition = Condition::parse(condition).map_err(|source| ParseError::BadCondition {
            line: line.number,
            source,
        })?;
        let morph = if line.fields.len() > 5 {
            self.set.decode_morph_field(&line.fields[5..])
        } else {
            MorphDescription::new()
        };

        Ok(AffixEntry {
            kind,
            flag,
            strip: strip.to_string(),
            append,
            condition,
            cont_flags,
            cross_product,
            morph,
        })
    }
}

/// Split a MAP group: single characters, or parenthesized strings.
fn split_map_group(group: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = group.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            let s: String = chars.by_ref().take_while(|&g| g != ')').collect();
            if !s.is_empty() {
                out.push(s);
            }
        } else {
            out.push(c.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::Repeat;

    #[test]
    fn suffix_block_is_indexed() {
        let set = parse_aff("SFX D Y 2\nSFX D y ied [^aeiou]y\nSFX D 0 ed [^y]\n").unwrap();
        let entries: Vec<_> = set.index.suffixes_for("tried").collect();
        // "ed" sorts before "ied" when compared from the end.
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].strip, "y");
        assert!(entries[1].cross_product);
    }

    #[test]
    fn directives_set_options() {
        let aff = "\
# comment
SET UTF-8
TRY esianrtolcdugmphbyfvkwz
COMPOUNDFLAG X
COMPOUNDMIN 1
COMPOUNDSYLLABLE 6 aeiou
CHECKCOMPOUNDTRIPLE
FORBIDDENWORD !
NOSPLITSUGS
";
        let set = parse_aff(aff).unwrap();
        let o = &set.options;
        assert_eq!(o.encoding, "UTF-8");
        assert_eq!(o.compound.flag, Some(Flag::from(b'X')));
        assert_eq!(o.compound.min, 1);
        assert_eq!(o.compound.syllable_max, Some(6));
        assert_eq!(o.compound.vowels, "aeiou");
        assert!(o.compound.check_triple);
        assert_eq!(o.forbidden_word, Flag::from(b'!'));
        assert!(o.suggest.no_split);
        assert_eq!(set.breaks, vec!["-", "^-", "-$"]);
    }

    #[test]
    fn long_flags_and_continuation_classes() {
        let aff = "FLAG long\nSFX Aa Y 1\nSFX Aa 0 s/BbCc .\n";
        let set = parse_aff(aff).unwrap();
        let e = &set.index.entries()[0];
        assert_eq!(e.flag, (u16::from(b'A') << 8) | u16::from(b'a'));
        assert!(e.has_cont((u16::from(b'B') << 8) | u16::from(b'b')));
    }

    #[test]
    fn flag_aliases_resolve_in_affixes() {
        let aff = "AF 2\nAF AB\nAF C\nSFX S Y 1\nSFX S 0 s/2 .\n";
        let set = parse_aff(aff).unwrap();
        assert_eq!(set.flag_aliases.len(), 2);
        assert!(set.index.entries()[0].has_cont(Flag::from(b'C')));
    }

    #[test]
    fn tables_are_collected() {
        let aff = "\
REP 2
REP f ph
REP ^alot$ a_lot
MAP 1
MAP a\u{00E1}(ae)
BREAK 1
BREAK --
ICONV 1
ICONV \u{2019} '
COMPOUNDRULE 1
COMPOUNDRULE A*B
CHECKCOMPOUNDPATTERN 1
CHECKCOMPOUNDPATTERN oo e
PHONE 1
PHONE PH F
";
        let set = parse_aff(aff).unwrap();
        assert_eq!(set.rep.entries().len(), 2);
        assert_eq!(set.map[0], vec!["a", "\u{00E1}", "ae"]);
        assert_eq!(set.breaks, vec!["--"]);
        assert_eq!(set.iconv.convert("it\u{2019}s"), "it's");
        assert_eq!(set.options.compound.rules[0].elements[0].repeat, Repeat::Any);
        assert_eq!(set.options.compound.patterns[0].first_end.chars(), "oo");
        assert_eq!(set.phone.as_ref().map(PhoneTable::len), Some(1));
    }

    #[test]
    fn morph_fields_on_affix_lines() {
        let set = parse_aff("SFX S Y 1\nSFX S 0 s . is:plural\n").unwrap();
        assert_eq!(set.index.entries()[0].morph.to_string(), "is:plural");
    }

    #[test]
    fn short_table_is_fatal_with_line_number() {
        let err = parse_aff("TRY abc\nREP 3\nREP a b\n").unwrap_err();
        match err {
            ParseError::EntryCount {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_table_is_fatal() {
        let err = parse_aff("REP 1\nREP a b\nREP 1\nREP c d\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateTable { line: 3, .. }));
    }

    #[test]
    fn unterminated_condition_is_fatal() {
        let err = parse_aff("SFX S Y 1\nSFX S 0 s [ab\n").unwrap_err();
        assert!(matches!(err, ParseError::BadCondition { line: 2, .. }));
    }

    #[test]
    fn missing_affix_field_is_fatal() {
        let err = parse_aff("PFX P Y 1\nPFX P 0\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { line: 2, .. }));
    }

    #[test]
    fn bad_flag_mode_is_fatal() {
        assert!(matches!(
            parse_aff("FLAG wide\n"),
            Err(ParseError::BadFlagMode { line: 1, .. })
        ));
    }

    #[test]
    fn malformed_rep_line_is_skipped() {
        let set = parse_aff("REP 2\nREP a\nREP b c\n").unwrap();
        assert_eq!(set.rep.entries().len(), 1);
    }
}
