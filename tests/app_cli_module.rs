use boardbot::app::command_handlers::run_cli;
use boardbot::app::command_support::{
    EXIT_ARGUMENTS, EXIT_REJECTED, EXIT_UNKNOWN_COMMAND, EXIT_USAGE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(
        &path,
        format!(
            r#"
log_path: {}
default_board: board
tracker:
  kind: memory
  cards:
    - {{ id: "1", name: "Card 1" }}
    - {{ id: "2", name: "Card 2" }}
    - {{ id: "3", name: "Attach" }}
participants:
  "1": Author
  "7": Helper
local:
  author_id: "1"
"#,
            dir.join("logs/boardbot.log").display()
        ),
    )
    .expect("write config");
    path
}

fn cli(config: &Path, rest: &[&str]) -> Vec<String> {
    let mut args = vec!["--config".to_string(), config.display().to_string()];
    args.extend(rest.iter().map(|value| value.to_string()));
    args
}

#[test]
fn no_arguments_prints_help() {
    let output = run_cli(Vec::new()).expect("help");
    assert!(output.contains("Usage: boardbot [--config <path>] <command>"));
    assert!(output.contains("send [--as <participant>] <message>"));
}

#[test]
fn send_prints_replies_and_succeeds() {
    let temp = tempdir().expect("tempdir");
    let config = write_config(temp.path());

    let output = run_cli(cli(&config, &["send", "!assign", "Attach"])).expect("send");
    assert_eq!(output, "Assigned <@!1> to Attach");

    let output = run_cli(cli(&config, &["send", "--as", "7", "!assign", "Card", "2"]))
        .expect("send as helper");
    assert_eq!(output, "Assigned <@!7> to Card 2");

    let log = fs::read_to_string(temp.path().join("logs/boardbot.log")).expect("log");
    assert!(log.contains("dispatch.command"));
}

#[test]
fn send_ignores_plain_messages() {
    let temp = tempdir().expect("tempdir");
    let config = write_config(temp.path());
    let output = run_cli(cli(&config, &["send", "hello"])).expect("ignored");
    assert_eq!(output, "ignored: messages must start with `!`");
}

#[test]
fn send_exit_codes_reflect_the_dispatch_result() {
    let temp = tempdir().expect("tempdir");
    let config = write_config(temp.path());

    let err = run_cli(cli(&config, &["send", "!assign", "Card"])).expect_err("ambiguous");
    assert_eq!(err.exit_code, EXIT_REJECTED);
    assert_eq!(
        err.message,
        "Name \"Card\" too ambiguous, 2 matches found: Card 1, Card 2"
    );

    let err = run_cli(cli(&config, &["send", "!assign", "<@!5>", "to", "Attach"]))
        .expect_err("unknown participant");
    assert_eq!(err.exit_code, EXIT_ARGUMENTS);
    assert_eq!(err.message, "Unable to find user from id 5");

    let err = run_cli(cli(&config, &["send", "!deploy", "now"])).expect_err("unknown");
    assert_eq!(err.exit_code, EXIT_UNKNOWN_COMMAND);
    assert_eq!(err.message, "Command `deploy` not found");
}

#[test]
fn send_usage_and_config_errors_exit_with_usage_code() {
    let temp = tempdir().expect("tempdir");
    let config = write_config(temp.path());

    let err = run_cli(cli(&config, &["send"])).expect_err("no message");
    assert_eq!(err.exit_code, EXIT_USAGE);

    let err = run_cli(cli(&config, &["send", "--as", "42", "!assign", "Attach"]))
        .expect_err("unknown author");
    assert_eq!(err.exit_code, EXIT_USAGE);
    assert!(err.message.contains("unknown participant `42`"));

    let missing = temp.path().join("missing.yaml");
    let err = run_cli(cli(&missing, &["send", "!assign", "Attach"])).expect_err("no config");
    assert_eq!(err.exit_code, EXIT_USAGE);
    assert!(err.message.contains("missing.yaml"));
}

#[test]
fn commands_lists_usage_with_configured_marker() {
    let temp = tempdir().expect("tempdir");
    let config = write_config(temp.path());
    let output = run_cli(cli(&config, &["commands"])).expect("commands");
    assert!(output.starts_with("Chat commands:"));
    assert!(output.contains("!assign [<user> to] <cards>, ..."));
    assert!(output.contains("!unassign [<user> from] <cards>, ..."));
}
