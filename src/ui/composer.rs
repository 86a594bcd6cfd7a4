use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_textarea::TextArea;

use crate::action::Action;
use crate::models::editor::MAX_CONTENT_CHARS;
use crate::ui::Component;

/// "New Post" modal.
pub struct Composer {
    textarea: TextArea<'static>,
    submitting: bool,
}

impl Composer {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" New Post "),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("What's happening?");

        Composer {
            textarea,
            submitting: false,
        }
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    fn char_count(&self) -> usize {
        self.textarea
            .lines()
            .iter()
            .map(|l| l.chars().count())
            .sum::<usize>()
            + self.textarea.lines().len().saturating_sub(1)
    }

    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

impl Component for Composer {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::CloseComposer),
            (KeyModifiers::CONTROL, KeyCode::Enter)
            | (KeyModifiers::ALT, KeyCode::Enter)
            | (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                let text = self.text();
                if text.trim().is_empty() {
                    return None;
                }
                return Some(Action::SubmitPost(text));
            }
            _ => {
                // Check character limit before allowing input
                if matches!(key.code, KeyCode::Char(_) | KeyCode::Enter)
                    && self.char_count() >= MAX_CONTENT_CHARS
                {
                    return None;
                }
                self.textarea.input(key);
            }
        }
        None
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let modal_width = 60.min(area.width.saturating_sub(4));
        let modal_height = 12.min(area.height.saturating_sub(4));
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(modal_width)) / 2,
            y: area.y + (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        frame.render_widget(&self.textarea, chunks[0]);

        let count = self.char_count();
        let counter_style = if count >= MAX_CONTENT_CHARS {
            Style::default().fg(Color::Red)
        } else if count > MAX_CONTENT_CHARS - 20 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let hint = if self.submitting {
            Span::styled("Posting...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                "Ctrl+S: post  Esc: cancel",
                Style::default().fg(Color::DarkGray),
            )
        };

        let status = Line::from(vec![
            Span::styled(format!("{}/{}", count, MAX_CONTENT_CHARS), counter_style),
            Span::raw("  "),
            hint,
        ]);
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}
