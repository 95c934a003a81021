use crate::dispatch::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Chat,
    Send,
    Commands,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "chat" => CliVerb::Chat,
        "send" => CliVerb::Send,
        "commands" => CliVerb::Commands,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: boardbot [--config <path>] <command>".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  chat                                 Chat with the bot from this terminal".to_string(),
        "  send [--as <participant>] <message>  Dispatch one message and print the replies"
            .to_string(),
        "  commands                             List chat commands and their arguments"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn command_help_lines(registry: &CommandRegistry, marker: char) -> Vec<String> {
    registry
        .commands()
        .iter()
        .map(|command| {
            format!(
                "  {0:36} {1}",
                command.usage(marker),
                command.description
            )
        })
        .collect()
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
