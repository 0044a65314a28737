// morfeus-spell: Check spelling of words from stdin.
//
// Reads words from stdin (one per line) and reports whether each word
// is correctly spelled:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//   F: word    (forbidden by the dictionary)
//
// Usage:
//   morfeus-spell [-d DIR] [-l LANG] [-p FILE] [OPTIONS]

use std::io::{self, BufRead, Write};

use morfeus_core::enums::SpellInfo;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let common = morfeus_cli::parse_common_args(&args);

    if morfeus_cli::wants_help(&common.rest) {
        println!("morfeus-spell: Check spelling of words from stdin.");
        println!();
        println!("Usage: morfeus-spell [-d DIR] [-l LANG] [-p FILE] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!("  F: word    (forbidden)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path DIR    Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG        Dictionary base name (default: from $LANG)");
        println!("  -p, --personal FILE    Personal word list");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  --no-ignore-dot        Do not strip trailing dots");
        println!("  --ignore-numbers       Accept numbers");
        println!("  -h, --help             Print this help");
        return;
    }

    let show_suggestions = common.rest.iter().any(|a| a == "-s" || a == "--suggest");
    let keep_dots = common.rest.iter().any(|a| a == "--no-ignore-dot");
    let ignore_numbers = common.rest.iter().any(|a| a == "--ignore-numbers");

    let mut handle = morfeus_cli::load_handle(&common).unwrap_or_else(|e| morfeus_cli::fatal(&e));
    if keep_dots {
        handle.set_ignore_dot(false);
    }
    if ignore_numbers {
        handle.set_ignore_numbers(true);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let (ok, info) = handle.spell_info(word);
        if ok {
            let _ = writeln!(out, "C: {word}");
            continue;
        }
        if info.contains(SpellInfo::FORBIDDEN) {
            let _ = writeln!(out, "F: {word}");
        } else {
            let _ = writeln!(out, "W: {word}");
        }
        if show_suggestions {
            for suggestion in handle.suggest(word) {
                let _ = writeln!(out, "S: {suggestion}");
            }
        }
    }
}
