//! The interactive event loop.
//!
//! A single cooperative loop: draw, wait for the next discrete message
//! (keystroke, paste, resize, tick, or a command completion re-entering
//! through the channel), fold it, and hand any issued command to a spawned
//! task. The fold is the only writer of session state.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::{model_options, ChatCreator, GeminiClient};
use crate::core::app::commands::run_command;
use crate::core::app::{App, SessionEvent};
use crate::core::config::{Config, DEFAULT_TEMPERATURE};
use crate::ui::renderer::ui;
use crate::utils::clipboard::{ClipboardSink, SystemClipboard};

/// Poll timeout doubling as the spinner cadence.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_chat(config: Config, version: &'static str) -> Result<(), Box<dyn Error>> {
    let chat: Arc<dyn ChatCreator> = Arc::new(GeminiClient::new(config.api_key));
    let clipboard: Arc<dyn ClipboardSink> = Arc::new(SystemClipboard);
    let mut app = App::new(model_options(), version, DEFAULT_TEMPERATURE);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_event_loop(&mut terminal, &mut app, chat, clipboard).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    run_result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    chat: Arc<dyn ChatCreator>,
    clipboard: Arc<dyn ClipboardSink>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SessionEvent>();

    loop {
        terminal.draw(|frame| ui(frame, app))?;

        if app.quitting {
            // Dropping the receiver discards any completion still in
            // flight; quit never waits for it.
            return Ok(());
        }

        let session_event = if let Ok(completion) = rx.try_recv() {
            completion
        } else if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => SessionEvent::Key(key),
                Event::Paste(text) => SessionEvent::Paste(text),
                Event::Resize(width, height) => SessionEvent::Resize(width, height),
                _ => continue,
            }
        } else {
            SessionEvent::Tick
        };

        if let Some(command) = app.update(session_event) {
            let tx = tx.clone();
            let chat = Arc::clone(&chat);
            let clipboard = Arc::clone(&clipboard);
            tokio::spawn(async move {
                let _ = tx.send(run_command(command, chat, clipboard).await);
            });
        }
    }
}
