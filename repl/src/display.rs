use crate::executor::ExecutionResult;
use catalog_core::{CatalogStats, Record};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
	Table,
	Json,
	Plain,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
	pub show_timing: bool,
	pub use_colors: bool,
	pub output_mode: OutputMode,
	pub max_column_width: usize,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			show_timing: true,
			use_colors: true,
			output_mode: OutputMode::Table,
			max_column_width: 40,
		}
	}
}

pub fn print_welcome() {
	println!(
		"\n{}",
		"╔═══════════════════════════════════════╗".bright_cyan()
	);
	println!(
		"{}",
		"║        Catalog Engine Console         ║"
			.bright_cyan()
			.bold()
	);
	println!(
		"{}",
		"╚═══════════════════════════════════════╝".bright_cyan()
	);
	println!();
	println!(
		"Type {} for help, {} to exit",
		".help".bright_green(),
		".exit".bright_green()
	);
	println!();
}

pub fn print_goodbye(command_count: usize, duration: Duration) {
	println!();
	println!("{}", "─".repeat(40).bright_black());
	println!("👋 {}", "Closing catalog".bright_cyan());
	println!("   Executed {} commands in {:.1?}", command_count, duration);
	println!();
}

pub fn clear_screen() {
	print!("\x1B[2J\x1B[1;1H");
}

pub fn print_error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_red());
}

pub fn print_warning(msg: &str) {
	println!("{} {}", "⚠".bright_yellow(), msg.bright_yellow());
}

pub fn print_info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue(), msg.bright_white());
}

pub fn print_success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_green());
}

pub fn print_hint(msg: &str) {
	println!("{} {}", "💡".bright_white(), msg.bright_white().dimmed());
}

pub fn print_toggle(feature: &str, enabled: bool) {
	let status = if enabled {
		"ON".bright_green().bold()
	} else {
		"OFF".bright_red()
	};
	println!("{}: {}", feature, status);
}

pub fn apply_colors(config: &DisplayConfig) {
	colored::control::set_override(config.use_colors);
}

pub fn print_execution_result(result: &ExecutionResult, config: &DisplayConfig) {
	if let Some(warning) = &result.warning {
		print_warning(warning);
	}

	match &result.records {
		_ if !result.success => print_error(&result.message),
		Some(records) if records.is_empty() => print_info(&result.message),
		Some(records) => {
			print_success(&result.message);
			println!("\n{}", format_records(records, config));
		}
		None => print_success(&result.message),
	}

	if config.show_timing {
		println!(
			"  {} {:.3}ms",
			"Time:".bright_black(),
			result.execution_time.as_secs_f64() * 1000.0
		);
	}
}

pub fn print_stats(stats: &CatalogStats, config: &DisplayConfig) {
	match config.output_mode {
		OutputMode::Json => println!("{}", format_stats_json(stats)),
		OutputMode::Table | OutputMode::Plain => {
			println!("\n{}", "Catalog Statistics".bright_cyan().bold());
			println!("{}", "─".repeat(30).bright_black());
			println!("  {:12} {}", "Records:".bright_green(), stats.records);
			println!("  {:12} {}", "Authors:".bright_green(), stats.authors);
			println!("  {:12} {}", "Categories:".bright_green(), stats.categories);
			println!();
		}
	}
}

fn format_stats_json(stats: &CatalogStats) -> String {
	serde_json::to_string_pretty(stats)
		.unwrap_or_else(|e| format!("Failed to serialize stats: {}", e))
}

pub fn print_values(label: &str, values: &[&str]) {
	if values.is_empty() {
		print_info(&format!("No {} indexed", label));
		return;
	}

	print_info(&format!("{} distinct {}:", values.len(), label));
	for value in values {
		println!("  • {}", value.bright_green());
	}
}

pub fn format_records(records: &[Record], config: &DisplayConfig) -> String {
	match config.output_mode {
		OutputMode::Table => format_table(records, config.max_column_width),
		OutputMode::Json => serde_json::to_string_pretty(records)
			.unwrap_or_else(|e| format!("Failed to serialize records: {}", e)),
		OutputMode::Plain => records
			.iter()
			.map(format_plain)
			.collect::<Vec<_>>()
			.join("\n\n"),
	}
}

fn format_table(records: &[Record], max_width: usize) -> String {
	let mut table = Table::new();
	table
		.load_preset(UTF8_FULL)
		.set_header(vec!["Key", "Title", "Authors", "Year", "Categories"]);

	for record in records {
		table.add_row(vec![
			truncate(record.key(), max_width),
			truncate(record.title(), max_width),
			truncate(&join(record.authors().iter()), max_width),
			record.year().to_string(),
			truncate(&join(record.categories().iter()), max_width),
		]);
	}

	table.to_string()
}

fn format_plain(record: &Record) -> String {
	format!(
		"Key:        {}\nTitle:      {}\nAuthors:    {}\nYear:       {}\nCategories: {}",
		record.key(),
		record.title(),
		join(record.authors().iter()),
		record.year(),
		join(record.categories().iter())
	)
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
	values.collect::<Vec<_>>().join(", ")
}

fn truncate(value: &str, max_width: usize) -> String {
	if max_width < 4 || value.chars().count() <= max_width {
		return value.to_string();
	}

	let kept: String = value.chars().take(max_width - 3).collect();
	format!("{}...", kept)
}
