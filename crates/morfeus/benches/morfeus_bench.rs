// Criterion benchmarks for morfeus.
//
// By default the benchmarks run against the small fixture dictionary in
// tests/data. Set MORFEUS_DICT_PATH to a directory holding a real
// dictionary (MORFEUS_LANG selects the base name, default en_US) to
// measure that instead.
//
// Run:
//   cargo bench -p morfeus
//   MORFEUS_DICT_PATH=/usr/share/hunspell cargo bench -p morfeus

use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use morfeus::Morfeus;

// ---------------------------------------------------------------------------
// Dictionary discovery
// ---------------------------------------------------------------------------

fn find_dictionary() -> (PathBuf, PathBuf) {
    if let Ok(dir) = std::env::var("MORFEUS_DICT_PATH") {
        let lang = std::env::var("MORFEUS_LANG").unwrap_or_else(|_| "en_US".into());
        let aff = PathBuf::from(&dir).join(format!("{lang}.aff"));
        let dic = PathBuf::from(&dir).join(format!("{lang}.dic"));
        if aff.is_file() && dic.is_file() {
            return (aff, dic);
        }
        eprintln!("{lang}.aff/.dic not found in {dir}, using the fixture dictionary");
    }
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    (data.join("english.aff"), data.join("english.dic"))
}

fn load_handle() -> Morfeus {
    let (aff, dic) = find_dictionary();
    Morfeus::from_paths(&aff, &dic).expect("Morfeus")
}

const CORRECT: &[&str] = &[
    "world", "worlds", "tried", "working", "replayed", "unlocked", "cities", "boxes", "Paris",
    "NASA", "hello", "students", "baking", "examples", "phones", "hello-world",
];

const MISSPELLED: &[&str] = &["wrold", "helo", "exampel", "recieve", "fone", "alot", "sdutent"];

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_load(c: &mut Criterion) {
    let (aff, dic) = find_dictionary();
    let aff_bytes = std::fs::read(&aff).expect("failed to read aff");
    let dic_bytes = std::fs::read(&dic).expect("failed to read dic");

    c.bench_function("load_dictionary", |b| {
        b.iter(|| std::hint::black_box(Morfeus::from_bytes(&aff_bytes, &dic_bytes).expect("load")));
    });
}

fn bench_spell_words(c: &mut Criterion) {
    let handle = load_handle();
    c.bench_function("spell_words", |b| {
        b.iter(|| {
            for word in CORRECT.iter().chain(MISSPELLED) {
                std::hint::black_box(handle.spell(word));
            }
        });
    });
}

fn bench_suggest_misspelled(c: &mut Criterion) {
    let handle = load_handle();
    c.bench_function("suggest_misspelled", |b| {
        b.iter(|| {
            for word in MISSPELLED {
                std::hint::black_box(handle.suggest(word));
            }
        });
    });
}

fn bench_ngram(c: &mut Criterion) {
    let handle = load_handle();
    c.bench_function("ngram_suggest", |b| {
        b.iter(|| std::hint::black_box(handle.ngram_suggest("xamplez")));
    });
}

fn bench_analyze_words(c: &mut Criterion) {
    let handle = load_handle();
    c.bench_function("analyze_words", |b| {
        b.iter(|| {
            for word in CORRECT {
                std::hint::black_box(handle.analyze(word));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_load,
    bench_spell_words,
    bench_suggest_misspelled,
    bench_ngram,
    bench_analyze_words
);
criterion_main!(benches);
