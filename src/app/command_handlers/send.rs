use crate::app::command_support::{
    build_dispatcher, exit_code_for, load_settings, CliFailure, EXIT_OK,
};
use crate::channels::local::LocalChatSession;
use crate::dispatch::DispatchOutcome;
use std::path::Path;

const SEND_USAGE: &str = "usage: send [--as <participant_id>] <message>";

pub fn cmd_send(config_path: Option<&Path>, args: &[String]) -> Result<String, CliFailure> {
    let (author_id, words) = match args {
        [flag, id, rest @ ..] if flag == "--as" => (Some(id.as_str()), rest),
        [flag, ..] if flag == "--as" => return Err(CliFailure::usage(SEND_USAGE)),
        _ => (None, args),
    };
    if words.is_empty() {
        return Err(CliFailure::usage(SEND_USAGE));
    }

    let settings = load_settings(config_path)?;
    let author = match author_id {
        Some(id) => settings
            .participant(id)
            .ok_or_else(|| CliFailure::usage(format!("unknown participant `{id}`")))?,
        None => settings.local_author()?,
    };
    let dispatcher = build_dispatcher(&settings)?;
    let session = LocalChatSession::new(&settings, &dispatcher, author);

    let exchange = session.exchange(&words.join(" "));
    let exit_code = exit_code_for(&exchange.result);
    let mut output = exchange.replies.join("\n");
    if let Ok(DispatchOutcome::Ignored) = exchange.result {
        output = format!(
            "ignored: messages must start with `{}`",
            dispatcher.marker()
        );
    }
    if exit_code == EXIT_OK {
        return Ok(output);
    }

    if output.is_empty() {
        if let Err(err) = &exchange.result {
            output = err.to_string();
        }
    }
    Err(CliFailure::new(exit_code, output))
}
