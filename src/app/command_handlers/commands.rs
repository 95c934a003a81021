use crate::app::cli::command_help_lines;
use crate::app::command_support::{load_settings, CliFailure};
use crate::commands::default_registry;
use std::path::Path;

pub fn cmd_commands(config_path: Option<&Path>, args: &[String]) -> Result<String, CliFailure> {
    if !args.is_empty() {
        return Err(CliFailure::usage("usage: commands"));
    }

    let settings = load_settings(config_path)?;
    let mut lines = vec!["Chat commands:".to_string()];
    lines.extend(command_help_lines(
        &default_registry(),
        settings.command_marker,
    ));
    Ok(lines.join("\n"))
}
