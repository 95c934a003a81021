use super::{CommandContext, CommandError};
use crate::arguments::{ArgumentParser, ArgumentSpec, Arguments};
use std::fmt;

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// The user was told why nothing changed.
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotFound,
    Ambiguous,
    NotAssigned,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Ambiguous => "ambiguous",
            Self::NotAssigned => "not_assigned",
        }
    }
}

pub type CommandRun = fn(&CommandContext<'_>, &Arguments) -> Result<CommandOutcome, CommandError>;

#[derive(Clone, Copy)]
pub struct CommandDef {
    pub name: &'static str,
    pub command_name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [ArgumentSpec],
    pub run: CommandRun,
}

impl CommandDef {
    pub fn parser(&self) -> ArgumentParser {
        ArgumentParser::new(self.arguments)
    }

    pub fn usage(&self, marker: char) -> String {
        let synopsis = self.parser().usage();
        if synopsis.is_empty() {
            format!("{marker}{}", self.command_name)
        } else {
            format!("{marker}{} {synopsis}", self.command_name)
        }
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("command_name", &self.command_name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<CommandDef>) -> Self {
        Self { commands }
    }

    pub fn register(&mut self, command: CommandDef) {
        self.commands.push(command);
    }

    /// Exact, case-sensitive lookup by the name typed after the marker.
    pub fn find(&self, command_name: &str) -> Option<&CommandDef> {
        self.commands
            .iter()
            .find(|command| command.command_name == command_name)
    }

    pub fn commands(&self) -> &[CommandDef] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgumentType;

    const ECHO_ARGS: &[ArgumentSpec] = &[ArgumentSpec::new(ArgumentType::Text).named("text")];

    fn echo(_ctx: &CommandContext<'_>, _args: &Arguments) -> Result<CommandOutcome, CommandError> {
        Ok(CommandOutcome::Completed)
    }

    const ECHO: CommandDef = CommandDef {
        name: "Echo",
        command_name: "echo",
        description: "Repeat text",
        arguments: ECHO_ARGS,
        run: echo,
    };

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = CommandRegistry::new(vec![ECHO]);
        assert!(registry.find("echo").is_some());
        assert!(registry.find("Echo").is_none());
        assert!(registry.find("ech").is_none());
    }

    #[test]
    fn usage_prefixes_marker_and_name() {
        assert_eq!(ECHO.usage('!'), "!echo <text>");
    }
}
