//! The interactive session state machine.
//!
//! All mutable UI state lives in [`App`]. Events — keystrokes, paste,
//! resize, timer ticks, and command completions — are folded one at a time
//! through [`App::update`], which may hand back at most one [`Command`] for
//! the driver to execute asynchronously. Only the fold mutates state, and
//! the fold is never concurrent with itself, so no locking is needed.

pub mod commands;


use std::time::Duration;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{ApiError, ModelOption};
use crate::core::app::commands::{Command, SendMode};
use crate::utils::input::sanitize_prompt_input;

pub const APP_NAME: &str = "Promptforge";
pub const INPUT_CHAR_LIMIT: usize = 2000;

pub const PLACEHOLDER_ROUGH_PROMPT: &str = "Enter your rough prompt here...";
pub const PLACEHOLDER_NEW_PROMPT: &str = "Press Enter to start a new prompt.";
pub const PLACEHOLDER_RESUBMIT: &str = "Press 'r' to resubmit, or type a new prompt.";
pub const BUSY_CRAFTING: &str = "Crafting prompt...";
pub const BUSY_ANSWERING: &str = "Getting a response...";
pub const INITIAL_INSTRUCTION: &str = "Enter a rough prompt for Lyra to improve.";
pub const ERROR_PREFIX: &str = "Error: ";
pub const COPIED_STATUS: &str = "Copied!";

const STATUS_DURATION: Duration = Duration::from_secs(2);
const PAGE_SCROLL: u16 = 10;

/// Exactly one view is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SelectingModel,
    Ready,
    Busy,
    Result,
    Error,
}

/// Discrete messages folded into the session, in arrival order.
#[derive(Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
    SendCompleted {
        mode: SendMode,
        result: Result<String, ApiError>,
    },
    CopyCompleted {
        result: Result<(), ApiError>,
    },
    StatusExpired {
        epoch: u64,
    },
}

/// The single mutable aggregate for one interactive run.
pub struct App {
    pub view: View,
    pub catalog: Vec<ModelOption>,
    pub model_cursor: usize,
    /// Empty until model selection is confirmed; immutable thereafter.
    pub selected_model: String,
    pub input: String,
    pub placeholder: &'static str,
    pub is_prompt_crafted: bool,
    pub crafted_prompt: String,
    /// Raw (unrendered) text shown in the scrollable result area.
    pub display_content: String,
    pub status: Option<String>,
    pub last_error: Option<ApiError>,
    pub busy_text: &'static str,
    pub spinner_frame: usize,
    pub scroll: u16,
    pub width: u16,
    pub height: u16,
    pub quitting: bool,
    pub version: &'static str,
    status_epoch: u64,
    temperature: f32,
}

impl App {
    pub fn new(catalog: Vec<ModelOption>, version: &'static str, temperature: f32) -> Self {
        Self {
            view: View::SelectingModel,
            catalog,
            model_cursor: 0,
            selected_model: String::new(),
            input: String::new(),
            placeholder: PLACEHOLDER_ROUGH_PROMPT,
            is_prompt_crafted: false,
            crafted_prompt: String::new(),
            display_content: String::new(),
            status: None,
            last_error: None,
            busy_text: BUSY_CRAFTING,
            spinner_frame: 0,
            scroll: 0,
            width: 0,
            height: 0,
            quitting: false,
            version,
            status_epoch: 0,
            temperature,
        }
    }

    /// The fold step. Quit is checked first, unconditionally, in every
    /// state; everything else routes by the current view.
    pub fn update(&mut self, event: SessionEvent) -> Option<Command> {
        match event {
            SessionEvent::Key(key) if is_quit_key(&key) => {
                self.quitting = true;
                None
            }
            SessionEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                None
            }
            SessionEvent::Tick => {
                if self.view == View::Busy {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                None
            }
            SessionEvent::StatusExpired { epoch } => {
                // A stale timer must not clear a newer status.
                if epoch == self.status_epoch {
                    self.status = None;
                }
                None
            }
            SessionEvent::SendCompleted { mode, result } => {
                self.fold_send_completed(mode, result);
                None
            }
            SessionEvent::CopyCompleted { result } => self.fold_copy_completed(result),
            SessionEvent::Key(key) => self.fold_key(key),
            SessionEvent::Paste(text) => {
                self.fold_paste(&text);
                None
            }
        }
    }

    fn fold_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.view {
            View::SelectingModel => {
                self.fold_selection_key(key);
                None
            }
            View::Ready => self.fold_ready_key(key),
            // While a command is in flight, user events are dropped, not
            // queued. This keeps at most one command outstanding.
            View::Busy => None,
            View::Result | View::Error => self.fold_finished_key(key),
        }
    }

    fn fold_selection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.model_cursor = self.model_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.model_cursor + 1 < self.catalog.len() {
                    self.model_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(option) = self.catalog.get(self.model_cursor) {
                    self.selected_model = option.id.to_string();
                    self.view = View::Ready;
                }
            }
            _ => {}
        }
    }

    fn fold_ready_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('c') if !self.display_content.is_empty() => {
                Some(Command::CopyToClipboard {
                    text: self.display_content.clone(),
                })
            }
            KeyCode::Char('r') if self.is_prompt_crafted => {
                let crafted = self.crafted_prompt.clone();
                Some(self.begin_send(crafted, SendMode::Direct))
            }
            KeyCode::Enter => {
                let mode = if self.is_prompt_crafted {
                    SendMode::Direct
                } else {
                    SendMode::Craft
                };
                let text = self.input.clone();
                Some(self.begin_send(text, mode))
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(ch) => {
                self.push_input_char(ch);
                None
            }
            code => {
                self.fold_scroll_key(code);
                None
            }
        }
    }

    fn fold_finished_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('c') => Some(Command::CopyToClipboard {
                text: self.display_content.clone(),
            }),
            KeyCode::Enter => {
                self.reset_to_ready();
                None
            }
            code => {
                self.fold_scroll_key(code);
                None
            }
        }
    }

    fn fold_scroll_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE_SCROLL),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn fold_paste(&mut self, text: &str) {
        if self.view != View::Ready {
            return;
        }
        for ch in sanitize_prompt_input(text).chars() {
            self.push_input_char(ch);
        }
    }

    fn push_input_char(&mut self, ch: char) {
        if self.input.chars().count() < INPUT_CHAR_LIMIT {
            self.input.push(ch);
        }
    }

    fn begin_send(&mut self, text: String, mode: SendMode) -> Command {
        self.view = View::Busy;
        self.busy_text = match mode {
            SendMode::Craft => BUSY_CRAFTING,
            SendMode::Direct => BUSY_ANSWERING,
        };
        self.spinner_frame = 0;
        Command::Send {
            model: self.selected_model.clone(),
            temperature: self.temperature,
            text,
            mode,
        }
    }

    fn fold_send_completed(&mut self, mode: SendMode, result: Result<String, ApiError>) {
        match result {
            Ok(text) => match mode {
                SendMode::Craft => {
                    self.is_prompt_crafted = true;
                    self.crafted_prompt = text.clone();
                    self.display_content = text;
                    self.input.clear();
                    self.placeholder = PLACEHOLDER_RESUBMIT;
                    self.scroll = 0;
                    self.view = View::Ready;
                }
                SendMode::Direct => {
                    self.is_prompt_crafted = false;
                    self.crafted_prompt.clear();
                    self.display_content = text;
                    self.input.clear();
                    self.placeholder = PLACEHOLDER_NEW_PROMPT;
                    self.scroll = 0;
                    self.view = View::Result;
                }
            },
            Err(err) => {
                self.display_content = format!("{ERROR_PREFIX}{err}");
                self.last_error = Some(err);
                self.scroll = 0;
                self.view = View::Error;
            }
        }
    }

    fn fold_copy_completed(&mut self, result: Result<(), ApiError>) -> Option<Command> {
        // Clipboard failure is surfaced as a transient status; it is not an
        // AI exchange in progress, so the view stays put.
        let status = match result {
            Ok(()) => COPIED_STATUS.to_string(),
            Err(err) => format!("{ERROR_PREFIX}{err}"),
        };
        self.set_status(status)
    }

    fn set_status(&mut self, text: String) -> Option<Command> {
        self.status = Some(text);
        self.status_epoch += 1;
        Some(Command::ExpireStatus {
            epoch: self.status_epoch,
            after: STATUS_DURATION,
        })
    }

    fn reset_to_ready(&mut self) {
        self.is_prompt_crafted = false;
        self.crafted_prompt.clear();
        self.display_content.clear();
        self.input.clear();
        self.placeholder = PLACEHOLDER_ROUGH_PROMPT;
        self.last_error = None;
        self.scroll = 0;
        self.view = View::Ready;
    }

    /// Whether the resubmit shortcut is currently live (drives the help
    /// bar as well as the key handling).
    pub fn can_resubmit(&self) -> bool {
        self.view == View::Ready && self.is_prompt_crafted
    }

    /// Whether the copy shortcut is currently live.
    pub fn can_copy(&self) -> bool {
        match self.view {
            View::Ready => !self.display_content.is_empty(),
            View::Result | View::Error => true,
            View::SelectingModel | View::Busy => false,
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
