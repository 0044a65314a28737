//! Golden tests: compare query results on the fixture dictionary against
//! the expectations in `tests/data/english.golden.json`.
//!
//! Run: cargo test -p morfeus --test golden

use std::collections::BTreeMap;
use std::path::PathBuf;

use morfeus::Morfeus;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn english() -> Morfeus {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = data_dir();
    Morfeus::from_paths(dir.join("english.aff"), dir.join("english.dic"))
        .unwrap_or_else(|e| panic!("failed to load english fixture: {e}"))
}

#[derive(Debug, Deserialize)]
struct Golden {
    spell: BTreeMap<String, bool>,
    suggest_first: BTreeMap<String, String>,
    suggest_contains: BTreeMap<String, Vec<String>>,
    suggest_excludes: BTreeMap<String, Vec<String>>,
    stem: BTreeMap<String, Vec<String>>,
    analyze: BTreeMap<String, Vec<String>>,
    /// `[word, example, expected forms]`
    generate: Vec<(String, String, Vec<String>)>,
}

fn load_golden() -> Golden {
    let path = data_dir().join("english.golden.json");
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read golden file {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse golden file {}: {}", path.display(), e))
}

/// Fail with every mismatch at once rather than the first one.
fn report(kind: &str, mismatches: Vec<String>) {
    assert!(
        mismatches.is_empty(),
        "{} {kind} mismatches:\n{}",
        mismatches.len(),
        mismatches.join("\n")
    );
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn golden_spell() {
    let handle = english();
    let golden = load_golden();
    let mismatches = golden
        .spell
        .iter()
        .filter(|(word, expected)| handle.spell(word) != **expected)
        .map(|(word, expected)| format!("  [{word}] expected {expected}"))
        .collect();
    report("spell", mismatches);
}

#[test]
fn golden_suggest() {
    let handle = english();
    let golden = load_golden();
    let mut mismatches = Vec::new();

    for (word, first) in &golden.suggest_first {
        let got = handle.suggest(word);
        if got.first() != Some(first) {
            mismatches.push(format!("  [{word}] expected {first} first, got {got:?}"));
        }
    }
    for (word, wanted) in &golden.suggest_contains {
        let got = handle.suggest(word);
        for w in wanted {
            if !got.contains(w) {
                mismatches.push(format!("  [{word}] missing {w} in {got:?}"));
            }
        }
    }
    for (word, unwanted) in &golden.suggest_excludes {
        let got = handle.suggest(word);
        for w in unwanted {
            if got.contains(w) {
                mismatches.push(format!("  [{word}] must not suggest {w}: {got:?}"));
            }
        }
    }
    report("suggest", mismatches);
}

#[test]
fn golden_stem() {
    let handle = english();
    let golden = load_golden();
    let mismatches = golden
        .stem
        .iter()
        .filter_map(|(word, expected)| {
            let got = handle.stem(word);
            (got != *expected).then(|| format!("  [{word}] expected {expected:?}, got {got:?}"))
        })
        .collect();
    report("stem", mismatches);
}

#[test]
fn golden_analyze() {
    let handle = english();
    let golden = load_golden();
    let mismatches = golden
        .analyze
        .iter()
        .filter_map(|(word, expected)| {
            let got = handle.analyze(word);
            (got != *expected).then(|| format!("  [{word}] expected {expected:?}, got {got:?}"))
        })
        .collect();
    report("analyze", mismatches);
}

#[test]
fn golden_generate() {
    let handle = english();
    let golden = load_golden();
    let mismatches = golden
        .generate
        .iter()
        .filter_map(|(word, example, expected)| {
            let got = handle.generate(word, example);
            (got != *expected)
                .then(|| format!("  [{word} like {example}] expected {expected:?}, got {got:?}"))
        })
        .collect();
    report("generate", mismatches);
}
