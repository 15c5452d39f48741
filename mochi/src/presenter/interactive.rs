use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::Presenter;
use crate::FactCheckResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Connect,
    Disconnect,
    Last,
    Clear,
    Quit,
    Ask(String),
    Unknown(String),
    Blank,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => Self::Blank,
            ":connect" => Self::Connect,
            ":disconnect" => Self::Disconnect,
            ":last" => Self::Last,
            ":clear" => Self::Clear,
            ":quit" | ":q" | ":exit" => Self::Quit,
            command if command.starts_with(':') => Self::Unknown(command.to_string()),
            claim => Self::Ask(claim.to_string()),
        }
    }
}

/// Line oriented session over `input`. One claim is in flight at a time; a failed request is
/// shown and the session goes on. Ctrl-C abandons the current request only.
pub async fn run_interactive<R>(presenter: &Presenter, input: R, out: &mut impl Write) -> FactCheckResult<()>
where
    R: AsyncBufRead + Unpin,
{
    info!(log_type = "starting", category = "interactive", "Interactive session started.");
    writeln!(out, "Type a cat fact, or :connect, :disconnect, :last, :clear, :quit")?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        // Failures were already rendered by the presenter
        let outcome = match SessionCommand::parse(&line) {
            SessionCommand::Blank => Ok(()),
            SessionCommand::Quit => break,
            SessionCommand::Connect => presenter.connect(out).await,
            SessionCommand::Disconnect => presenter.disconnect(out),
            SessionCommand::Last => presenter.last(out).map(|_| ()),
            SessionCommand::Clear => presenter.clear(out),
            SessionCommand::Unknown(command) => {
                writeln!(out, "Unknown command {command}")?;
                Ok(())
            }
            SessionCommand::Ask(claim) => {
                let finished = tokio::select! {
                    result = presenter.ask(&claim, out) => Some(result),
                    _ = tokio::signal::ctrl_c() => None,
                };
                match finished {
                    Some(result) => result.map(|_| ()),
                    None => {
                        writeln!(out, "Request abandoned.")?;
                        Ok(())
                    }
                }
            }
        };
        if let Err(e) = outcome {
            debug!(error = %e, "Session command failed");
        }
        out.flush()?;
    }

    info!(log_type = "completed", category = "interactive", "Interactive session ended.");
    Ok(())
}
