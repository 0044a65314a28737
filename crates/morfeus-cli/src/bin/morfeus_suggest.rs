// morfeus-suggest: Generate spelling suggestions.
//
// Prints suggestions for misspelled words given as arguments or read from
// stdin (one per line). Correctly spelled words are reported as such.
//
// Usage:
//   morfeus-suggest [-d DIR] [-l LANG] [-p FILE] [-n N] [WORD...]

use std::io::{self, BufRead, Write};

use morfeus::Morfeus;

fn suggest_word(word: &str, handle: &Morfeus, out: &mut impl Write) {
    if handle.spell(word) {
        let _ = writeln!(out, "{word} (correct)");
        return;
    }
    let suggestions = handle.suggest(word);
    if suggestions.is_empty() {
        let _ = writeln!(out, "{word}: (no suggestions)");
    } else {
        let _ = writeln!(out, "{word}:");
        for s in &suggestions {
            let _ = writeln!(out, "  {s}");
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let common = morfeus_cli::parse_common_args(&args);

    if morfeus_cli::wants_help(&common.rest) {
        println!("morfeus-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: morfeus-suggest [-d DIR] [-l LANG] [-p FILE] [-n N] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path DIR      Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG          Dictionary base name (default: from $LANG)");
        println!("  -p, --personal FILE      Personal word list");
        println!("  -n, --max-suggestions N  Maximum number of suggestions (default: 15)");
        println!("  -h, --help               Print this help");
        return;
    }

    let (max_suggestions, rest) = morfeus_cli::parse_max_suggestions(&common.rest, 15);
    let words = morfeus_cli::word_args(&rest);

    let mut handle = morfeus_cli::load_handle(&common).unwrap_or_else(|e| morfeus_cli::fatal(&e));
    handle.set_max_suggestions(max_suggestions);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if !words.is_empty() {
        for word in &words {
            suggest_word(word, &handle, &mut out);
        }
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if !word.is_empty() {
            suggest_word(word, &handle, &mut out);
        }
    }
}
