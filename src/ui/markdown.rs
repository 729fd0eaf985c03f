//! Markdown rendering for the terminal viewport.
//!
//! Walks pulldown-cmark events into styled ratatui lines. Wrapping is left
//! to the `Paragraph` widget, so the same lines survive a resize.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub fn render_markdown(source: &str) -> Vec<Line<'static>> {
    LineBuilder::default().render(source)
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold_depth: u8,
    italic_depth: u8,
    heading: Option<HeadingLevel>,
    in_code_block: bool,
    list_markers: Vec<Option<u64>>,
}

impl LineBuilder {
    fn render(mut self, source: &str) -> Vec<Line<'static>> {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
        for event in Parser::new_ext(source, options) {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.push_text(&text),
                Event::Code(text) => self
                    .current
                    .push(Span::styled(text.into_string(), inline_code_style())),
                Event::SoftBreak | Event::HardBreak => self.flush_line(),
                Event::Rule => {
                    self.flush_line();
                    self.lines.push(Line::from(Span::styled(
                        "─".repeat(24),
                        Style::default().fg(Color::DarkGray),
                    )));
                    self.blank_line();
                }
                Event::TaskListMarker(done) => self
                    .current
                    .push(Span::raw(if done { "[x] " } else { "[ ] " })),
                _ => {}
            }
        }
        self.flush_line();
        while matches!(self.lines.last(), Some(line) if line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                self.heading = Some(level);
            }
            Tag::Strong => self.bold_depth += 1,
            Tag::Emphasis => self.italic_depth += 1,
            Tag::CodeBlock(_) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Tag::List(start) => self.list_markers.push(start),
            Tag::Item => {
                self.flush_line();
                let depth = self.list_markers.len().saturating_sub(1);
                let marker = match self.list_markers.last_mut() {
                    Some(Some(number)) => {
                        let text = format!("{number}. ");
                        *number += 1;
                        text
                    }
                    _ => "- ".to_string(),
                };
                self.current
                    .push(Span::raw(format!("{}{marker}", "  ".repeat(depth))));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.blank_line();
            }
            TagEnd::Heading(_) => {
                self.flush_line();
                self.heading = None;
                self.blank_line();
            }
            TagEnd::Strong => self.bold_depth = self.bold_depth.saturating_sub(1),
            TagEnd::Emphasis => self.italic_depth = self.italic_depth.saturating_sub(1),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::List(_) => {
                self.list_markers.pop();
                if self.list_markers.is_empty() {
                    self.blank_line();
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.lines.push(Line::from(Span::styled(
                    format!("  {line}"),
                    code_block_style(),
                )));
            }
            return;
        }
        self.current
            .push(Span::styled(text.to_string(), self.inline_style()));
    }

    fn inline_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(level) = self.heading {
            style = style
                .fg(heading_color(level))
                .add_modifier(Modifier::BOLD);
        }
        if self.bold_depth > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic_depth > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank_line(&mut self) {
        if matches!(self.lines.last(), Some(line) if !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }
}

fn heading_color(level: HeadingLevel) -> Color {
    match level {
        HeadingLevel::H1 => Color::Cyan,
        HeadingLevel::H2 => Color::LightCyan,
        _ => Color::Blue,
    }
}

fn inline_code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn code_block_style() -> Style {
    Style::default().fg(Color::Green)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn paragraph_text_is_preserved() {
        let lines = render_markdown("Hello, world.");
        assert_eq!(plain_text(&lines), vec!["Hello, world."]);
    }

    #[test]
    fn headings_are_bold() {
        let lines = render_markdown("# Title");
        let span = &lines[0].spans[0];
        assert_eq!(span.content.as_ref(), "Title");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn strong_text_is_bold_and_plain_text_is_not() {
        let lines = render_markdown("normal **loud** normal");
        let spans = &lines[0].spans;
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[1].content.as_ref(), "loud");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_is_styled() {
        let lines = render_markdown("run `cargo fmt` now");
        let code = lines[0]
            .spans
            .iter()
            .find(|span| span.content.as_ref() == "cargo fmt")
            .expect("code span present");
        assert_eq!(code.style.fg, Some(Color::Yellow));
    }

    #[test]
    fn fenced_code_blocks_keep_their_lines() {
        let lines = render_markdown("```\nlet x = 1;\nlet y = 2;\n```");
        let text = plain_text(&lines);
        assert!(text.contains(&"  let x = 1;".to_string()));
        assert!(text.contains(&"  let y = 2;".to_string()));
    }

    #[test]
    fn unordered_lists_get_bullets() {
        let lines = render_markdown("- one\n- two");
        let text = plain_text(&lines);
        assert_eq!(text[0], "- one");
        assert_eq!(text[1], "- two");
    }

    #[test]
    fn ordered_lists_count_up() {
        let lines = render_markdown("1. first\n2. second");
        let text = plain_text(&lines);
        assert_eq!(text[0], "1. first");
        assert_eq!(text[1], "2. second");
    }

    #[test]
    fn blank_input_renders_no_lines() {
        assert!(render_markdown("").is_empty());
    }
}
