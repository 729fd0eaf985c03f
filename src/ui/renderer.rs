//! Per-state terminal rendering.
//!
//! The renderer is a pure function of [`App`]: it draws whatever the fold
//! left behind and never mutates session state.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::core::app::{App, View, APP_NAME, INITIAL_INSTRUCTION};
use crate::ui::markdown::render_markdown;

const SPINNER_FRAMES: &[&str] = &["○", "◐", "●", "◐"];
const SELECTION_TITLE: &str = "Select a Gemini Model";

fn accent_style() -> Style {
    Style::default()
        .fg(Color::Indexed(35))
        .add_modifier(Modifier::BOLD)
}

fn model_style() -> Style {
    Style::default().fg(Color::Indexed(208))
}

fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(241))
}

pub fn ui(frame: &mut Frame, app: &App) {
    if app.view == View::SelectingModel {
        draw_model_selection(frame, app);
        return;
    }

    // The input field is hidden while a final result is on screen.
    let chunks = if app.view == View::Result {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area())
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area())
    };

    draw_header(frame, app, chunks[0]);
    draw_content(frame, app, chunks[1]);
    if app.view == View::Result {
        draw_status_bar(frame, app, chunks[2]);
    } else {
        draw_input(frame, app, chunks[2]);
        draw_status_bar(frame, app, chunks[3]);
    }
}

fn draw_model_selection(frame: &mut Frame, app: &App) {
    let mut lines = vec![
        Line::from(Span::styled(SELECTION_TITLE, accent_style())),
        Line::default(),
    ];

    for (index, option) in app.catalog.iter().enumerate() {
        let entry = format!("{}. {} ({})", index + 1, option.id, option.description);
        if index == app.model_cursor {
            lines.push(Line::from(Span::styled(
                format!("> {entry}"),
                model_style(),
            )));
        } else {
            lines.push(Line::from(Span::raw(format!("  {entry}"))));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "↑/↓: move | enter: select | esc: quit",
        dim_style(),
    )));

    frame.render_widget(Paragraph::new(lines), frame.area());
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let left = format!("{APP_NAME} (v{})", app.version);
    let right = format!("Model: {}", app.selected_model);
    let padding = (area.width as usize).saturating_sub(left.width() + right.width());

    let line = Line::from(vec![
        Span::styled(left, accent_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, model_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_content(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.view {
        View::Busy => {
            let frame_glyph = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            vec![Line::from(vec![
                Span::styled(frame_glyph, Style::default().fg(Color::Indexed(205))),
                Span::raw(" "),
                Span::raw(app.busy_text),
            ])]
        }
        View::Ready if app.display_content.is_empty() => {
            vec![Line::from(Span::styled(INITIAL_INSTRUCTION, dim_style()))]
        }
        _ => render_markdown(&app.display_content),
    };

    let max_scroll = (lines.len() as u16).saturating_sub(area.height);
    let scroll = app.scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let text: Line = if app.input.is_empty() {
        Line::from(Span::styled(app.placeholder, dim_style()))
    } else {
        Line::from(Span::raw(app.input.as_str()))
    };

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);

    if app.view == View::Ready {
        let cursor_x = area.x + 1 + app.input.width().min(area.width.saturating_sub(2) as usize) as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(Line::from(Span::raw(status.as_str()))),
            area,
        );
        return;
    }

    let mut spans: Vec<Span> = Vec::new();
    if app.can_resubmit() {
        spans.push(Span::styled("r: resubmit", accent_style()));
        spans.push(Span::styled(" | ", dim_style()));
    }
    if app.can_copy() {
        spans.push(Span::styled("c: copy | ", dim_style()));
    }
    if matches!(app.view, View::Result | View::Error) {
        spans.push(Span::styled("enter: new prompt | ", dim_style()));
    }
    spans.push(Span::styled("esc: quit", dim_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::api::model_options;
    use crate::core::app::{SessionEvent, ERROR_PREFIX};
    use crate::core::config::DEFAULT_TEMPERATURE;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn test_app() -> App {
        App::new(model_options(), "test", DEFAULT_TEMPERATURE)
    }

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| ui(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn press(app: &mut App, code: KeyCode) {
        let _ = app.update(SessionEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn selection_view_renders_every_catalog_entry() {
        let app = test_app();
        let text = render_to_text(&app);
        assert!(text.contains(SELECTION_TITLE));
        for option in &app.catalog {
            assert!(text.contains(option.id), "missing {}", option.id);
        }
        assert!(text.contains("> 1. gemini-2.5-flash-lite"));
    }

    #[test]
    fn ready_view_shows_header_placeholder_and_instruction() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        let text = render_to_text(&app);
        assert!(text.contains(APP_NAME));
        assert!(text.contains("Model: gemini-2.5-flash-lite"));
        assert!(text.contains(INITIAL_INSTRUCTION));
        assert!(text.contains("Enter your rough prompt here..."));
        assert!(text.contains("esc: quit"));
    }

    #[test]
    fn busy_view_shows_the_busy_label() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        app.input = "idea".to_string();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Busy);
        let text = render_to_text(&app);
        assert!(text.contains("Crafting prompt..."));
    }

    #[test]
    fn error_view_shows_prefixed_message_and_recovery_help() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        app.view = View::Error;
        app.display_content = format!("{ERROR_PREFIX}something broke");
        let text = render_to_text(&app);
        assert!(text.contains("Error: something broke"));
        assert!(text.contains("enter: new prompt"));
    }

    #[test]
    fn crafted_ready_view_advertises_resubmit_and_copy() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        app.is_prompt_crafted = true;
        app.crafted_prompt = "Crafted.".to_string();
        app.display_content = "Crafted.".to_string();
        let text = render_to_text(&app);
        assert!(text.contains("r: resubmit"));
        assert!(text.contains("c: copy"));
    }

    #[test]
    fn transient_status_replaces_the_help_bar() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        app.status = Some("Copied!".to_string());
        let text = render_to_text(&app);
        assert!(text.contains("Copied!"));
        assert!(!text.contains("esc: quit"));
    }
}
