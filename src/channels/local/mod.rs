mod session;

pub use session::{
    build_message, is_chat_exit_command, LocalChatSession, LocalExchange, CHAT_EXIT_COMMANDS,
};

use crate::config::Settings;
use crate::dispatch::Dispatcher;
use std::io::{self, BufRead, Write};

pub fn run_local_chat_session_stdio(
    settings: &Settings,
    dispatcher: &Dispatcher,
) -> Result<String, String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    run_local_chat_session(settings, dispatcher, &mut input, &mut output)
}

/// Reads one message per line and prints the bot's replies until EOF or an exit command.
pub fn run_local_chat_session<R: BufRead, W: Write>(
    settings: &Settings,
    dispatcher: &Dispatcher,
    input: &mut R,
    output: &mut W,
) -> Result<String, String> {
    let author = settings.local_author().map_err(|err| err.to_string())?;
    let session = LocalChatSession::new(settings, dispatcher, author);

    writeln!(
        output,
        "chat as {} (commands start with `{}`)",
        session.author.name,
        dispatcher.marker()
    )
    .map_err(|e| format!("failed to write chat output: {e}"))?;
    writeln!(output, "type `/exit` to quit")
        .map_err(|e| format!("failed to write chat output: {e}"))?;

    let mut handled = 0usize;
    loop {
        write!(output, "you> ").map_err(|e| format!("failed to write chat prompt: {e}"))?;
        output
            .flush()
            .map_err(|e| format!("failed to flush chat prompt: {e}"))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| format!("failed to read chat input: {e}"))?;
        if read == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if is_chat_exit_command(message) {
            break;
        }

        // Errors were already replied to the channel by the dispatcher.
        let exchange = session.exchange(message);
        for reply in &exchange.replies {
            writeln!(output, "bot> {reply}")
                .map_err(|e| format!("failed to write chat output: {e}"))?;
        }
        output
            .flush()
            .map_err(|e| format!("failed to flush chat output: {e}"))?;
        handled += 1;
    }

    Ok(format!("chat ended\nmessages={handled}"))
}
