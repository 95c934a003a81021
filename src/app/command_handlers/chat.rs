use crate::app::command_support::{build_dispatcher, load_settings, CliFailure};
use crate::channels::local::run_local_chat_session_stdio;
use std::path::Path;

pub fn cmd_chat(config_path: Option<&Path>, args: &[String]) -> Result<String, CliFailure> {
    if !args.is_empty() {
        return Err(CliFailure::usage("usage: chat"));
    }

    let settings = load_settings(config_path)?;
    let dispatcher = build_dispatcher(&settings)?;
    run_local_chat_session_stdio(&settings, &dispatcher).map_err(CliFailure::usage)
}
