use super::display::DisplayConfig;
use colored::Colorize;

pub fn generate_prompt(
    command_count: usize,
    record_count: usize,
    config: &DisplayConfig,
) -> String {
    let base = "catalog";

    if config.use_colors {
        format!(
            "{}{}> ",
            base.bright_cyan().bold(),
            format!("[{}:{}]", record_count, command_count).bright_black()
        )
    } else {
        format!("{}[{}:{}]> ", base, record_count, command_count)
    }
}
