//! Gemini API payloads, the chat-session contract, and the model catalog.

pub mod chat;
pub mod models;

use std::error::Error;
use std::fmt;

pub use chat::{ChatCreator, ChatSession, GeminiClient};
pub use models::{model_options, ModelOption};

/// Failures that can surface from a single prompt exchange or clipboard
/// write. Everything here is recoverable in-session; startup failures use
/// [`crate::core::config::ConfigError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The chat session could not be constructed.
    SessionCreation(String),
    /// Transport-level failure while talking to the model endpoint.
    MessageSend(String),
    /// The endpoint answered with zero candidates or zero content parts.
    NoResponseCandidates,
    /// The user submitted an empty prompt; never reaches the network.
    EmptyPrompt,
    /// The clipboard command failed or was unavailable.
    ClipboardWrite(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::SessionCreation(msg) => {
                write!(f, "failed to create chat session: {msg}")
            }
            ApiError::MessageSend(msg) => {
                write!(f, "error sending message to Gemini: {msg}")
            }
            ApiError::NoResponseCandidates => {
                write!(f, "received no response candidates from model")
            }
            ApiError::EmptyPrompt => write!(f, "prompt cannot be empty"),
            ApiError::ClipboardWrite(msg) => {
                write!(f, "failed to write to clipboard: {msg}")
            }
        }
    }
}

impl Error for ApiError {}
