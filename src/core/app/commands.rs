//! Asynchronous work items issued by state transitions.
//!
//! A transition never performs a side effect inline; it hands back a
//! [`Command`], the driver runs it off the fold step, and the outcome
//! re-enters the loop as a single [`SessionEvent`].

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiError, ChatCreator};
use crate::core::app::SessionEvent;
use crate::core::prompt::{compile_for_crafting, compile_for_direct};
use crate::utils::clipboard::ClipboardSink;

/// Which phase of the two-phase exchange a send belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// Phase 1: refine the user's rough text into an optimized prompt.
    Craft,
    /// Phase 2: run text unmodified for a final answer.
    Direct,
}

#[derive(Debug, Clone)]
pub enum Command {
    Send {
        model: String,
        temperature: f32,
        text: String,
        mode: SendMode,
    },
    CopyToClipboard {
        text: String,
    },
    ExpireStatus {
        epoch: u64,
        after: Duration,
    },
}

/// Execute one command to completion. Every command yields exactly one
/// completion event; the driver feeds it back into the fold.
pub async fn run_command(
    command: Command,
    chat: Arc<dyn ChatCreator>,
    clipboard: Arc<dyn ClipboardSink>,
) -> SessionEvent {
    match command {
        Command::Send {
            model,
            temperature,
            text,
            mode,
        } => SessionEvent::SendCompleted {
            mode,
            result: send_prompt(chat.as_ref(), &model, temperature, &text, mode).await,
        },
        Command::CopyToClipboard { text } => SessionEvent::CopyCompleted {
            result: clipboard.write_all(&text).map_err(ApiError::ClipboardWrite),
        },
        Command::ExpireStatus { epoch, after } => {
            tokio::time::sleep(after).await;
            SessionEvent::StatusExpired { epoch }
        }
    }
}

/// One complete exchange: create a session, compile for the given mode,
/// send once. Empty input short-circuits before the factory is touched.
pub async fn send_prompt(
    chat: &dyn ChatCreator,
    model: &str,
    temperature: f32,
    text: &str,
    mode: SendMode,
) -> Result<String, ApiError> {
    if text.is_empty() {
        return Err(ApiError::EmptyPrompt);
    }

    let mut session = chat.create(model, temperature).await?;

    let payload = match mode {
        SendMode::Craft => compile_for_crafting(text),
        SendMode::Direct => compile_for_direct(text),
    };

    session.send(&payload).await
}
