// morfeus-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use log::debug;
use morfeus::Morfeus;

/// Dictionary used when neither `-l` nor `LANG` names one.
const DEFAULT_LANG: &str = "en_US";

/// Options shared by every tool.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommonArgs {
    /// Directory holding `<lang>.aff` and `<lang>.dic`.
    pub dict_path: Option<String>,
    /// Base name of the dictionary files.
    pub lang: Option<String>,
    /// Personal word list applied after loading.
    pub personal: Option<String>,
    /// Arguments not consumed here, in order.
    pub rest: Vec<String>,
}

/// Parse `-d/--dict-path`, `-l/--lang` and `-p/--personal`, each as
/// `-x VALUE` or `--long=VALUE`.
pub fn parse_common_args(args: &[String]) -> CommonArgs {
    let mut parsed = CommonArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (slot, inline) = match arg.as_str() {
            "-d" | "--dict-path" => (&mut parsed.dict_path, None),
            "-l" | "--lang" => (&mut parsed.lang, None),
            "-p" | "--personal" => (&mut parsed.personal, None),
            other => {
                if let Some(v) = other.strip_prefix("--dict-path=") {
                    (&mut parsed.dict_path, Some(v))
                } else if let Some(v) = other.strip_prefix("--lang=") {
                    (&mut parsed.lang, Some(v))
                } else if let Some(v) = other.strip_prefix("--personal=") {
                    (&mut parsed.personal, Some(v))
                } else {
                    parsed.rest.push(arg.clone());
                    continue;
                }
            }
        };
        match inline.or_else(|| iter.next().map(String::as_str)) {
            Some(value) => *slot = Some(value.to_string()),
            None => fatal(&format!("{arg} requires a value")),
        }
    }
    parsed
}

/// Dictionary base name: `-l`, else the language part of `LANG`
/// (`de_DE.UTF-8` -> `de_DE`), else `en_US`.
fn language(args: &CommonArgs) -> String {
    if let Some(lang) = &args.lang {
        return lang.clone();
    }
    std::env::var("LANG")
        .ok()
        .and_then(|l| l.split('.').next().map(str::to_string))
        .filter(|l| !l.is_empty() && l != "C" && l != "POSIX")
        .unwrap_or_else(|| DEFAULT_LANG.to_string())
}

/// Search for `<lang>.aff`/`<lang>.dic` and create a `Morfeus` handle,
/// then apply the personal word list if one was given.
///
/// Search order:
/// 1. `-d` argument (if provided)
/// 2. `MORFEUS_DICT_PATH` environment variable
/// 3. `~/.hunspell`
/// 4. `/usr/share/hunspell`, `/usr/share/myspell`
/// 5. Current working directory
pub fn load_handle(args: &CommonArgs) -> Result<Morfeus, String> {
    let lang = language(args);
    let search_paths = build_search_paths(args.dict_path.as_deref());

    for dir in &search_paths {
        let aff = dir.join(format!("{lang}.aff"));
        let dic = dir.join(format!("{lang}.dic"));
        if !aff.is_file() || !dic.is_file() {
            continue;
        }
        debug!("using {}", aff.display());
        let mut handle = Morfeus::from_paths(&aff, &dic)
            .map_err(|e| format!("failed to load {}: {e}", aff.display()))?;
        if let Some(personal) = &args.personal {
            handle
                .load_personal(personal)
                .map_err(|e| format!("failed to load personal dictionary: {e}"))?;
        }
        return Ok(handle);
    }

    Err(format!(
        "could not find {lang}.aff and {lang}.dic in any of the search paths:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Build the list of directories to search for dictionary files.
fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }
    if let Ok(env_path) = std::env::var("MORFEUS_DICT_PATH") {
        paths.extend(std::env::split_paths(&env_path));
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(".hunspell"));
        #[cfg(target_os = "macos")]
        paths.push(home.join("Library").join("Spelling"));
    }
    paths.push(PathBuf::from("/usr/share/hunspell"));
    paths.push(PathBuf::from("/usr/share/myspell"));
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse `-n N` / `--max-suggestions N` out of `args`.
///
/// Returns `(max_suggestions, remaining_args)`.
pub fn parse_max_suggestions(args: &[String], default: usize) -> (usize, Vec<String>) {
    let mut max = default;
    let mut remaining = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-n" || arg == "--max-suggestions" {
            let Some(value) = iter.next() else {
                fatal("--max-suggestions requires a value");
            };
            max = value
                .parse()
                .unwrap_or_else(|_| fatal("invalid number for --max-suggestions"));
        } else {
            remaining.push(arg.clone());
        }
    }
    (max, remaining)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Words given on the command line (arguments not starting with `-`).
pub fn word_args(args: &[String]) -> Vec<String> {
    args.iter().filter(|a| !a.starts_with('-')).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn common_args_short_and_long_forms() {
        let parsed = parse_common_args(&strings(&[
            "-d", "/dicts", "--lang=de_DE", "--personal", "my.dic", "word",
        ]));
        assert_eq!(parsed.dict_path.as_deref(), Some("/dicts"));
        assert_eq!(parsed.lang.as_deref(), Some("de_DE"));
        assert_eq!(parsed.personal.as_deref(), Some("my.dic"));
        assert_eq!(parsed.rest, ["word"]);
    }

    #[test]
    fn explicit_lang_wins() {
        let parsed = parse_common_args(&strings(&["-l", "fr"]));
        assert_eq!(language(&parsed), "fr");
    }

    #[test]
    fn explicit_dict_path_is_searched_first() {
        let paths = build_search_paths(Some("/opt/dicts"));
        assert_eq!(paths[0], PathBuf::from("/opt/dicts"));
        assert!(paths.contains(&PathBuf::from("/usr/share/hunspell")));
    }

    #[test]
    fn max_suggestions_is_extracted() {
        let (max, rest) = parse_max_suggestions(&strings(&["-n", "3", "wrod"]), 15);
        assert_eq!(max, 3);
        assert_eq!(rest, ["wrod"]);
        let (max, _) = parse_max_suggestions(&[], 15);
        assert_eq!(max, 15);
    }

    #[test]
    fn words_skip_flags() {
        assert_eq!(word_args(&strings(&["-s", "cat", "dog"])), ["cat", "dog"]);
        assert!(wants_help(&strings(&["x", "--help"])));
    }
}
