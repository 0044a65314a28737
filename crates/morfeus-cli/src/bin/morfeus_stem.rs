// morfeus-stem: Print the stems of words.
//
// Reads words from stdin (one per line), or takes them as arguments, and
// prints `word<TAB>stem` for every stem. Unknown words are printed with
// no stem.
//
// Usage:
//   morfeus-stem [-d DIR] [-l LANG] [-p FILE] [WORD...]

use std::io::{self, BufRead, Write};

use morfeus::Morfeus;

fn stem_word(word: &str, handle: &Morfeus, out: &mut impl Write) {
    let stems = handle.stem(word);
    if stems.is_empty() {
        let _ = writeln!(out, "{word}");
    }
    for stem in stems {
        let _ = writeln!(out, "{word}\t{stem}");
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let common = morfeus_cli::parse_common_args(&args);

    if morfeus_cli::wants_help(&common.rest) {
        println!("morfeus-stem: Print the stems of words.");
        println!();
        println!("Usage: morfeus-stem [-d DIR] [-l LANG] [-p FILE] [WORD...]");
        println!();
        println!("If WORD arguments are given, stems each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path DIR    Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG        Dictionary base name (default: from $LANG)");
        println!("  -p, --personal FILE    Personal word list");
        println!("  -h, --help             Print this help");
        return;
    }

    let words = morfeus_cli::word_args(&common.rest);
    let handle = morfeus_cli::load_handle(&common).unwrap_or_else(|e| morfeus_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if !words.is_empty() {
        for word in &words {
            stem_word(word, &handle, &mut out);
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
            stem_word(word, &handle, &mut out);
        }
    }
}
