use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper, Result};

const CATALOG_COMMANDS: &[&str] = &["add", "get", "search", "author", "category", "list"];

const DOT_COMMANDS: &[&str] = &[
    ".help",
    ".exit",
    ".quit",
    ".clear",
    ".stats",
    ".check",
    ".authors",
    ".categories",
    ".timing",
    ".color",
    ".mode",
    ".width",
    ".history",
];

const OUTPUT_MODES: &[&str] = &["table", "json", "plain"];

pub struct CatalogHelper;

impl CatalogHelper {
    pub fn new() -> Self {
        Self
    }

    fn get_completions(&self, line: &str, pos: usize) -> Vec<Pair> {
        let before = &line[..pos];
        let words: Vec<&str> = before.split_whitespace().collect();
        let at_word_start = before.is_empty() || before.ends_with(char::is_whitespace);

        let (candidates, partial): (&[&str], &str) = match (words.as_slice(), at_word_start) {
            ([], _) => (CATALOG_COMMANDS, ""),
            ([first], false) if first.starts_with('.') => (DOT_COMMANDS, *first),
            ([first], false) => (CATALOG_COMMANDS, *first),
            ([".mode"], true) => (OUTPUT_MODES, ""),
            ([".mode", mode], false) => (OUTPUT_MODES, *mode),
            _ => return Vec::new(),
        };

        let partial_lower = partial.to_lowercase();
        candidates
            .iter()
            .filter(|candidate| candidate.starts_with(&partial_lower))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: format!("{} ", candidate),
            })
            .collect()
    }
}

impl Completer for CatalogHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>)> {
        let completions = self.get_completions(line, pos);

        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);

        Ok((start, completions))
    }
}

impl Hinter for CatalogHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        let hint = match line.to_lowercase().as_str() {
            "add " => "<key> | <title> | <author; ...> | <year> | <category; ...>",
            "get " => "<key>",
            "search " => "<title fragment>",
            "author " => "<author name>",
            "category " => "<category name>",
            ".mode " => "table | json | plain",
            ".width " => "<columns>",
            ".history " => "<n>",
            _ => return None,
        };

        Some(hint.to_string())
    }
}

impl Highlighter for CatalogHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> std::borrow::Cow<'h, str> {
        std::borrow::Cow::Owned(format!("\x1b[2m{}\x1b[0m", hint))
    }
}

impl Validator for CatalogHelper {}

impl Helper for CatalogHelper {}
