mod commands;
mod completer;
pub mod display;
mod executor;
mod history;
mod input;
mod prompt;

use catalog_core::Catalog;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{filter::EnvFilter, fmt};

pub use self::commands::CommandHandler;
pub use self::display::DisplayConfig;
use self::input::CatalogCommand;

const HISTORY_FILE: &str = ".catalog_history";

/// A failure that has already been shown to the user and ends the session
#[derive(Debug)]
struct StoppedOnError(String);

impl std::fmt::Display for StoppedOnError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "stopped on error: {}", self.0)
	}
}

impl std::error::Error for StoppedOnError {}

fn stop_session(msg: &str) -> ReadlineError {
	ReadlineError::Io(io::Error::other(StoppedOnError(msg.to_string())))
}

fn stopped_on_error(err: &ReadlineError) -> bool {
	match err {
		ReadlineError::Io(e) => e
			.get_ref()
			.is_some_and(|inner| inner.is::<StoppedOnError>()),
		_ => false,
	}
}

/// Interactive console for the in-memory catalog
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
struct ReplArgs {
	/// Execute commands from a script file, one per line
	#[arg(short, long, conflicts_with = "stdin")]
	file: Option<PathBuf>,

	/// Execute the given command (repeatable)
	#[arg(short = 'c', long = "command")]
	commands: Vec<String>,

	/// Read commands from standard input
	#[arg(long)]
	stdin: bool,

	/// Suppress banners and result output
	#[arg(short, long)]
	quiet: bool,

	/// Stop at the first failing command
	#[arg(long)]
	exit_on_error: bool,

	/// Do not load or save command history
	#[arg(long)]
	no_history: bool,

	/// Disable colored output
	#[arg(long)]
	no_color: bool,

	/// Output format for records
	#[arg(long, value_enum)]
	mode: Option<display::OutputMode>,

	/// Log filter used when RUST_LOG is unset
	#[arg(long, default_value = "warn")]
	log: String,
}

#[derive(Debug, Clone)]
pub enum InputSource {
	Interactive,
	File(PathBuf),
	Stdin,
	CommandLine(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct ReplOptions {
	pub input_source: InputSource,
	pub quiet: bool,
	pub exit_on_error: bool,
	pub no_history: bool,
	pub no_color: bool,
	pub output_format: Option<display::OutputMode>,
}

impl Default for ReplOptions {
	fn default() -> Self {
		Self {
			input_source: InputSource::Interactive,
			quiet: false,
			exit_on_error: false,
			no_history: false,
			no_color: false,
			output_format: None,
		}
	}
}

impl From<&ReplArgs> for ReplOptions {
	fn from(args: &ReplArgs) -> Self {
		let input_source = if let Some(path) = &args.file {
			InputSource::File(path.clone())
		} else if args.stdin {
			InputSource::Stdin
		} else if !args.commands.is_empty() {
			InputSource::CommandLine(args.commands.clone())
		} else {
			InputSource::Interactive
		};

		Self {
			input_source,
			quiet: args.quiet,
			exit_on_error: args.exit_on_error,
			no_history: args.no_history,
			no_color: args.no_color,
			output_format: args.mode,
		}
	}
}

pub struct Repl {
	editor: Editor<completer::CatalogHelper, DefaultHistory>,
	command_handler: CommandHandler,
	display_config: DisplayConfig,
	catalog: Catalog,
	history: Option<history::HistoryFile>,
	command_count: usize,
	start_time: Instant,
}

impl Repl {
	pub fn with_options(options: &ReplOptions) -> Result<Self> {
		let config = Config::builder()
			.history_ignore_space(true)
			.completion_type(rustyline::CompletionType::List)
			.edit_mode(rustyline::EditMode::Emacs)
			.build();

		let mut editor = Editor::with_config(config)?;
		editor.set_helper(Some(completer::CatalogHelper::new()));

		let history = if options.no_history {
			None
		} else {
			let file = history::HistoryFile::new(HISTORY_FILE);
			file.load(&mut editor);
			Some(file)
		};

		let mut display_config = DisplayConfig::default();

		// Apply command line options
		if options.quiet {
			display_config.show_timing = false;
		}

		if options.no_color {
			display_config.use_colors = false;
		}

		if let Some(format) = options.output_format {
			display_config.output_mode = format;
		}

		display::apply_colors(&display_config);

		Ok(Self {
			editor,
			command_handler: CommandHandler::new(),
			display_config,
			catalog: Catalog::new(),
			history,
			command_count: 0,
			start_time: Instant::now(),
		})
	}

	pub fn run(&mut self, options: &ReplOptions) -> Result<()> {
		match &options.input_source {
			InputSource::Interactive => self.run_interactive(options),
			InputSource::File(path) => self.run_file(path, options),
			InputSource::Stdin => self.run_stdin(options),
			InputSource::CommandLine(commands) => self.run_commands(commands, options),
		}
	}

	fn run_interactive(&mut self, options: &ReplOptions) -> Result<()> {
		if !options.quiet {
			display::print_welcome();
		}

		let mut stopped = None;

		loop {
			let prompt_str = prompt::generate_prompt(
				self.command_count,
				self.catalog.len(),
				&self.display_config,
			);

			match self.editor.readline(&prompt_str) {
				Ok(line) => {
					if !line.trim().is_empty() {
						self.editor.add_history_entry(&line)?;
					}

					match self.execute_line(&line, options) {
						Ok(true) => {}
						Ok(false) => break,
						Err(e) => {
							stopped = Some(e);
							break;
						}
					}
				}
				Err(ReadlineError::Interrupted) => {
					display::print_hint("Use .exit or Ctrl+D to quit");
				}
				Err(ReadlineError::Eof) => {
					println!(); // New line before exit
					display::print_goodbye(self.command_count, self.start_time.elapsed());
					break;
				}
				Err(err) => {
					display::print_error(&format!("Readline error: {:?}", err));
					break;
				}
			}
		}

		// History is saved even when the session stops on an error
		self.cleanup()?;
		match stopped {
			Some(e) => Err(e),
			None => Ok(()),
		}
	}

	fn run_file(&mut self, path: &Path, options: &ReplOptions) -> Result<()> {
		if !options.quiet {
			display::print_info(&format!("Executing file: {}", path.display()));
		}

		let content = fs::read_to_string(path)?;
		self.execute_script(&content, options)
	}

	fn run_stdin(&mut self, options: &ReplOptions) -> Result<()> {
		if !options.quiet {
			display::print_info("Reading from standard input...");
		}

		let mut content = String::new();
		io::stdin().read_to_string(&mut content)?;

		self.execute_script(&content, options)
	}

	fn run_commands(&mut self, commands: &[String], options: &ReplOptions) -> Result<()> {
		for command in commands {
			if !self.execute_line(command, options)? {
				break;
			}
		}

		Ok(())
	}

	fn execute_script(&mut self, content: &str, options: &ReplOptions) -> Result<()> {
		for (line_num, line) in content.lines().enumerate() {
			let trimmed = line.trim();

			// Skip empty lines and comments
			if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("--") {
				continue;
			}

			match self.execute_line(trimmed, options) {
				Ok(true) => continue,
				Ok(false) => break,
				Err(e) => {
					display::print_warning(&format!("Stopped at line {}", line_num + 1));
					return Err(e);
				}
			}
		}

		Ok(())
	}

	/// Execute one line; returns false when the session should end
	fn execute_line(&mut self, line: &str, options: &ReplOptions) -> Result<bool> {
		let trimmed = line.trim();
		if trimmed.is_empty() {
			return Ok(true);
		}

		if trimmed.starts_with('.') {
			return self.handle_command(trimmed, options);
		}

		self.command_count += 1;

		let command = match CatalogCommand::parse(trimmed) {
			Ok(command) => command,
			Err(e) => return self.fail(&e.to_string(), options),
		};

		let result = executor::execute(&mut self.catalog, command);
		if !options.quiet {
			display::print_execution_result(&result, &self.display_config);
		} else if !result.success {
			display::print_error(&result.message);
		}

		if !result.success && options.exit_on_error {
			tracing::warn!("Stopping on error: {}", result.message);
			return Err(stop_session(&result.message));
		}
		Ok(true)
	}

	fn handle_command(&mut self, line: &str, options: &ReplOptions) -> Result<bool> {
		match self
			.command_handler
			.handle(line, &mut self.display_config, &self.catalog)
		{
			commands::CommandResult::Continue => Ok(true),
			commands::CommandResult::Exit => {
				if !options.quiet {
					display::print_goodbye(self.command_count, self.start_time.elapsed());
				}
				Ok(false)
			}
			commands::CommandResult::Error(msg) => self.fail(&msg, options),
			commands::CommandResult::ClearScreen => {
				display::clear_screen();
				if !options.quiet {
					display::print_welcome();
				}
				Ok(true)
			}
			commands::CommandResult::ShowHistory => {
				match &self.history {
					Some(_) => history::print_recent(self.editor.history()),
					None => display::print_info("History is disabled"),
				}
				Ok(true)
			}
			commands::CommandResult::ExecuteFromHistory(n) => {
				if self.history.is_none() {
					return self.fail("History is disabled", options);
				}

				match history::replay_entry(self.editor.history(), n) {
					Ok(line) => self.execute_line(&line, options),
					Err(e) => self.fail(&e.to_string(), options),
				}
			}
		}
	}

	/// Report a failed command once; ends the session under --exit-on-error
	fn fail(&self, msg: &str, options: &ReplOptions) -> Result<bool> {
		display::print_error(msg);
		if options.exit_on_error {
			tracing::warn!("Stopping on error: {}", msg);
			return Err(stop_session(msg));
		}
		Ok(true)
	}

	fn cleanup(&mut self) -> Result<()> {
		if let Some(history) = &self.history {
			history.save(&mut self.editor)?;
		}
		Ok(())
	}
}

fn main() -> anyhow::Result<()> {
	let args = ReplArgs::parse();

	let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log))?;
	fmt().with_env_filter(filter).with_writer(io::stderr).init();

	let options = ReplOptions::from(&args);
	tracing::debug!("Starting catalog console with {:?}", options);

	let mut repl = Repl::with_options(&options)?;
	match repl.run(&options) {
		Ok(()) => Ok(()),
		Err(e) if stopped_on_error(&e) => {
			tracing::debug!("Session ended: {}", e);
			std::process::exit(1);
		}
		Err(e) => Err(e.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stop_is_told_apart_from_io_failures() {
		let stop = stop_session("Duplicate key: 001");
		assert!(stopped_on_error(&stop));
		assert_eq!(stop.to_string(), "stopped on error: Duplicate key: 001");

		let missing = ReadlineError::Io(io::Error::new(io::ErrorKind::NotFound, "books.catalog"));
		assert!(!stopped_on_error(&missing));
		assert!(!stopped_on_error(&ReadlineError::Eof));
	}
}
