//! Command history persisted between console sessions

use crate::completer::CatalogHelper;
use crate::display;
use anyhow::bail;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History, SearchDirection};
use rustyline::Editor;
use std::io;
use std::path::PathBuf;

const RECENT_LIMIT: usize = 20;
const ENTRY_WIDTH: usize = 60;

/// Where the console keeps its history; the entries live in the editor
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load saved entries into the editor, returning how many it now holds.
    /// A missing file just means a first session.
    pub fn load(&self, editor: &mut Editor<CatalogHelper, DefaultHistory>) -> usize {
        match editor.load_history(&self.path) {
            Ok(()) => {
                let count = editor.history().len();
                tracing::debug!("Loaded {} history entries from {}", count, self.path.display());
                count
            }
            Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => {
                tracing::warn!("Could not load history from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, editor: &mut Editor<CatalogHelper, DefaultHistory>) -> rustyline::Result<()> {
        editor.save_history(&self.path)?;
        tracing::debug!(
            "Saved {} history entries to {}",
            editor.history().len(),
            self.path.display()
        );
        Ok(())
    }
}

/// One `.history` listing row, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLine {
    pub number: usize,
    pub text: String,
}

/// The newest entries, oldest first, each cut to fit one row
pub fn recent<H: History>(history: &H) -> Vec<HistoryLine> {
    let len = history.len();

    (len.saturating_sub(RECENT_LIMIT)..len)
        .filter_map(|index| {
            entry_at(history, index).map(|text| HistoryLine {
                number: index + 1,
                text: shorten(&text),
            })
        })
        .collect()
}

pub fn print_recent<H: History>(history: &H) {
    let lines = recent(history);
    if lines.is_empty() {
        display::print_info("No history yet");
        return;
    }

    println!("\n{}", "Command History".bright_cyan().bold());
    println!("{}", "─".repeat(ENTRY_WIDTH).bright_black());
    for line in &lines {
        println!("{} │ {}", format!("{:4}", line.number).bright_black(), line.text);
    }
    println!("{}", "─".repeat(ENTRY_WIDTH).bright_black());
    display::print_hint("Use .history <n> to run entry n again");
}

/// The full text of entry `number`, ready to run again.
///
/// Replaying a `.history` line is refused, since it could replay itself.
pub fn replay_entry<H: History>(history: &H, number: usize) -> anyhow::Result<String> {
    let Some(index) = number.checked_sub(1) else {
        bail!("History entries are numbered from 1");
    };
    let Some(line) = entry_at(history, index) else {
        bail!("History entry {} not found", number);
    };
    if is_history_command(&line) {
        bail!("Cannot replay a .history command");
    }

    Ok(line)
}

fn is_history_command(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some(".history" | ".hist"))
}

fn entry_at<H: History>(history: &H, index: usize) -> Option<String> {
    history
        .get(index, SearchDirection::Forward)
        .ok()
        .flatten()
        .map(|found| found.entry.into_owned())
}

fn shorten(text: &str) -> String {
    if text.chars().count() <= ENTRY_WIDTH {
        return text.to_string();
    }

    let kept: String = text.chars().take(ENTRY_WIDTH - 3).collect();
    format!("{}...", kept)
}
