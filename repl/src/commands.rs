use super::display::{self, DisplayConfig, OutputMode};
use catalog_core::Catalog;
use colored::Colorize;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
    Error(String),
    ClearScreen,
    ShowHistory,
    ExecuteFromHistory(usize),
}

pub struct CommandHandler {
    // No fields needed for now
}

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler {}
    }

    pub fn handle(
        &self,
        line: &str,
        display_config: &mut DisplayConfig,
        catalog: &Catalog,
    ) -> CommandResult {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            return CommandResult::Continue;
        }

        match parts[0] {
            ".help" | ".h" | ".?" => {
                self.show_help();
                CommandResult::Continue
            }
            ".exit" | ".quit" | ".q" => CommandResult::Exit,
            ".clear" | ".cls" => CommandResult::ClearScreen,
            ".stats" => {
                display::print_stats(&catalog.stats(), display_config);
                CommandResult::Continue
            }
            ".check" => match catalog.verify_integrity() {
                Ok(()) => {
                    display::print_success(&format!(
                        "Indices consistent across {} record(s)",
                        catalog.len()
                    ));
                    CommandResult::Continue
                }
                Err(e) => CommandResult::Error(e.to_string()),
            },
            ".authors" => {
                display::print_values("authors", &catalog.authors());
                CommandResult::Continue
            }
            ".categories" => {
                display::print_values("categories", &catalog.categories());
                CommandResult::Continue
            }
            ".timing" | ".time" => {
                display_config.show_timing = !display_config.show_timing;
                display::print_toggle("Command timing", display_config.show_timing);
                CommandResult::Continue
            }
            ".color" | ".colors" => {
                display_config.use_colors = !display_config.use_colors;
                display::apply_colors(display_config);
                display::print_toggle("Colors", display_config.use_colors);
                CommandResult::Continue
            }
            ".history" | ".hist" => {
                if parts.len() > 1 {
                    if let Ok(n) = parts[1].parse::<usize>() {
                        CommandResult::ExecuteFromHistory(n)
                    } else {
                        CommandResult::Error(format!("Invalid history number: {}", parts[1]))
                    }
                } else {
                    CommandResult::ShowHistory
                }
            }
            ".mode" => {
                if parts.len() > 1 {
                    match parts[1] {
                        "table" => display_config.output_mode = OutputMode::Table,
                        "json" => display_config.output_mode = OutputMode::Json,
                        "plain" => display_config.output_mode = OutputMode::Plain,
                        _ => {
                            return CommandResult::Error(format!("Unknown mode: {}", parts[1]));
                        }
                    }
                    display::print_info(&format!("Output mode set to: {}", parts[1]));
                } else {
                    display::print_info(&format!(
                        "Current output mode: {:?}",
                        display_config.output_mode
                    ));
                }
                CommandResult::Continue
            }
            ".width" => {
                if parts.len() > 1 {
                    if let Ok(width) = parts[1].parse::<usize>() {
                        display_config.max_column_width = width;
                        display::print_info(&format!("Max column width set to: {}", width));
                    } else {
                        return CommandResult::Error(format!("Invalid width: {}", parts[1]));
                    }
                } else {
                    display::print_info(&format!(
                        "Current max column width: {}",
                        display_config.max_column_width
                    ));
                }
                CommandResult::Continue
            }
            _ => CommandResult::Error(format!(
                "Unknown command: {}. Type .help for help.",
                parts[0]
            )),
        }
    }

    fn show_help(&self) {
        println!("\n{}", "Catalog Commands".bright_cyan().bold());
        println!("{}", "─".repeat(60).bright_black());

        let commands = vec![
            ("Records:", ""),
            ("add <key>|<title>|<a;b>|<year>|<c;d>", "Add a record"),
            ("get <key>", "Look up a record by key"),
            ("search <text>", "Find titles containing text"),
            ("author <name>", "List records by author"),
            ("category <name>", "List records in category"),
            ("list", "List every record"),
            ("", ""),
            ("Console:", ""),
            (".help, .h, .?", "Show this help message"),
            (".exit, .quit, .q", "Exit the console"),
            (".clear, .cls", "Clear the screen"),
            (".stats", "Show record and index counts"),
            (".check", "Verify index consistency"),
            (".authors", "List indexed authors"),
            (".categories", "List indexed categories"),
            ("", ""),
            ("Display Options:", ""),
            (".timing, .time", "Toggle command timing"),
            (".color, .colors", "Toggle colors"),
            (".mode <format>", "Set output format (table/json/plain)"),
            (".width <n>", "Set maximum column width"),
            ("", ""),
            ("History:", ""),
            (".history, .hist", "Show command history"),
            (".history <n>", "Execute history entry n"),
        ];

        for (cmd, desc) in commands {
            if cmd.is_empty() {
                println!();
            } else if desc.is_empty() {
                println!("\n{}", cmd.bright_yellow());
            } else {
                println!("  {:38} {}", cmd.bright_green(), desc.bright_white());
            }
        }

        println!("\n{}", "Notes:".bright_yellow());
        println!("  • Keys, authors and categories ignore case");
        println!("  • A year that does not parse is stored as 0");
        println!("  • Ctrl+D exits the console");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Record;

    #[test]
    fn test_mode_and_width() {
        let handler = CommandHandler::new();
        let catalog = Catalog::new();
        let mut config = DisplayConfig::default();

        assert_eq!(
            handler.handle(".mode json", &mut config, &catalog),
            CommandResult::Continue
        );
        assert_eq!(config.output_mode, OutputMode::Json);

        assert!(matches!(
            handler.handle(".mode csv", &mut config, &catalog),
            CommandResult::Error(_)
        ));
        assert_eq!(config.output_mode, OutputMode::Json);

        handler.handle(".width 12", &mut config, &catalog);
        assert_eq!(config.max_column_width, 12);
    }

    #[test]
    fn test_history_and_exit() {
        let handler = CommandHandler::new();
        let catalog = Catalog::new();
        let mut config = DisplayConfig::default();

        assert_eq!(
            handler.handle(".history 3", &mut config, &catalog),
            CommandResult::ExecuteFromHistory(3)
        );
        assert_eq!(
            handler.handle(".hist", &mut config, &catalog),
            CommandResult::ShowHistory
        );
        assert_eq!(
            handler.handle(".q", &mut config, &catalog),
            CommandResult::Exit
        );
        assert!(matches!(
            handler.handle(".bogus", &mut config, &catalog),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_check_on_consistent_catalog() {
        let handler = CommandHandler::new();
        let mut catalog = Catalog::new();
        let mut config = DisplayConfig::default();
        assert!(catalog.insert(Record::new("001", "Dune", 1965).with_authors(["Frank Herbert"])));

        assert_eq!(
            handler.handle(".check", &mut config, &catalog),
            CommandResult::Continue
        );
    }
}
