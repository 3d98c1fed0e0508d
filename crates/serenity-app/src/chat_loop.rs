//! Interactive terminal conversation.

use std::io::Write;

use serenity_ai::{ConversationEvent, ConversationManager, Role};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

const QUIT_COMMAND: &str = "/quit";
const PROMPT: &str = "you> ";
const SPEAKER: &str = "Serenity";

/// Read lines from `input` until EOF or `/quit`, submitting each one and
/// rendering the reply to `out` as transcript events arrive.
pub(crate) async fn run<R, W>(
    manager: &ConversationManager,
    greeting: &str,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut events = manager.subscribe();
    let mut lines = input.lines();

    writeln!(out, "{SPEAKER}: {greeting}")?;
    writeln!(out, "(type {QUIT_COMMAND} to leave)")?;

    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let submit = manager.submit_message(line);
        tokio::pin!(submit);
        let outcome = loop {
            tokio::select! {
                outcome = &mut submit => break outcome,
                event = events.recv() => match event {
                    Ok(event) => render(&event, out)?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "terminal view fell behind the conversation");
                    }
                    Err(RecvError::Closed) => break (&mut submit).await,
                },
            }
        };
        // Events published in the same poll that completed the submission.
        while let Ok(event) = events.try_recv() {
            render(&event, out)?;
        }
        writeln!(out)?;
        debug!(?outcome, "exchange settled");
    }

    writeln!(out, "\n{SPEAKER}: Take care of yourself. Goodbye.")?;
    out.flush()
}

fn render<W: Write>(event: &ConversationEvent, out: &mut W) -> std::io::Result<()> {
    match event {
        ConversationEvent::TurnAppended(turn) if turn.role == Role::Model => {
            write!(out, "{SPEAKER}: {}", turn.text)?;
        }
        ConversationEvent::TurnExtended { fragment, .. } => {
            write!(out, "{fragment}")?;
        }
        ConversationEvent::TurnReplaced(turn) => {
            write!(out, "\n{SPEAKER}: {}", turn.text)?;
        }
        // User turns were typed by the user; the busy flag has no indicator here.
        _ => return Ok(()),
    }
    out.flush()
}
