use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::app::command_support::CliFailure;
use std::path::PathBuf;

pub mod chat;
pub mod commands;
pub mod send;

/// Global options that precede the verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
}

pub fn run_cli(args: Vec<String>) -> Result<String, CliFailure> {
    let (options, args) = split_global_options(args)?;
    if args.is_empty() {
        return Ok(help_text());
    }

    let config_path = options.config_path.as_deref();
    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Chat => chat::cmd_chat(config_path, &args[1..]),
        CliVerb::Send => send::cmd_send(config_path, &args[1..]),
        CliVerb::Commands => commands::cmd_commands(config_path, &args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(CliFailure::usage(format!(
            "unknown command `{}`\n\n{}",
            args[0],
            help_text()
        ))),
    }
}

pub fn split_global_options(
    args: Vec<String>,
) -> Result<(GlobalOptions, Vec<String>), CliFailure> {
    let mut options = GlobalOptions::default();
    let mut rest = args.into_iter();
    let mut remaining = Vec::new();
    while let Some(arg) = rest.next() {
        if arg == "--config" {
            let path = rest
                .next()
                .ok_or_else(|| CliFailure::usage("usage: --config <path>"))?;
            options.config_path = Some(PathBuf::from(path));
            continue;
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            options.config_path = Some(PathBuf::from(path));
            continue;
        }
        remaining.push(arg);
        remaining.extend(rest);
        break;
    }
    Ok((options, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn global_config_option_is_split_before_the_verb() {
        let (options, rest) =
            split_global_options(args(&["--config", "/tmp/bot.yaml", "send", "--config", "x"]))
                .expect("split");
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/bot.yaml")));
        assert_eq!(rest, args(&["send", "--config", "x"]));
    }

    #[test]
    fn config_option_without_value_is_a_usage_error() {
        let err = split_global_options(args(&["--config"])).expect_err("missing path");
        assert_eq!(err.exit_code, 1);
    }

    #[test]
    fn unknown_verb_is_a_usage_error() {
        let err = run_cli(args(&["start"])).expect_err("unknown verb");
        assert_eq!(err.exit_code, 1);
        assert!(err.message.contains("unknown command `start`"));
    }
}
