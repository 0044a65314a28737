// morfeus-analyze: Morphological analysis of words.
//
// Prints every analysis of each word, one `tag:value` line per analysis.
// With `-g EXAMPLE`, prints the forms of each word inflected like EXAMPLE
// instead.
//
// Usage:
//   morfeus-analyze [-d DIR] [-l LANG] [-p FILE] [-g EXAMPLE] [WORD...]

use std::io::{self, BufRead, Write};

use morfeus::Morfeus;

fn analyze_word(word: &str, handle: &Morfeus, example: Option<&str>, out: &mut impl Write) {
    let (lines, empty) = match example {
        Some(example) => (handle.generate(word, example), "(no forms)"),
        None => (handle.analyze(word), "(no analysis)"),
    };
    if lines.is_empty() {
        let _ = writeln!(out, "{word}: {empty}");
        return;
    }
    let _ = writeln!(out, "{word}:");
    for line in &lines {
        let _ = writeln!(out, "  {line}");
    }
}

/// Pull `-g EXAMPLE` / `--generate EXAMPLE` out of `args`.
fn parse_example(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut example = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-g" || arg == "--generate" {
            match iter.next() {
                Some(value) => example = Some(value.clone()),
                None => morfeus_cli::fatal("--generate requires a value"),
            }
        } else {
            rest.push(arg.clone());
        }
    }
    (example, rest)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let common = morfeus_cli::parse_common_args(&args);

    if morfeus_cli::wants_help(&common.rest) {
        println!("morfeus-analyze: Morphological analysis of words.");
        println!();
        println!("Usage: morfeus-analyze [-d DIR] [-l LANG] [-p FILE] [-g EXAMPLE] [WORD...]");
        println!();
        println!("If WORD arguments are given, analyzes each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path DIR    Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG        Dictionary base name (default: from $LANG)");
        println!("  -p, --personal FILE    Personal word list");
        println!("  -g, --generate WORD    Print forms inflected like WORD");
        println!("  -h, --help             Print this help");
        return;
    }

    let (example, rest) = parse_example(&common.rest);
    let words = morfeus_cli::word_args(&rest);

    let handle = morfeus_cli::load_handle(&common).unwrap_or_else(|e| morfeus_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if !words.is_empty() {
        for word in &words {
            analyze_word(word, &handle, example.as_deref(), &mut out);
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
            analyze_word(word, &handle, example.as_deref(), &mut out);
        }
    }
}
