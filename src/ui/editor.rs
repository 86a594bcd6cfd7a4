use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::action::Action;
use crate::models::editor::MAX_CONTENT_CHARS;
use crate::models::post::PostId;
use crate::ui::Component;

/// Editable field that replaces a post's content while it is in edit mode.
pub struct InlineEditor {
    post_id: PostId,
    textarea: TextArea<'static>,
}

impl InlineEditor {
    pub fn new(post_id: PostId, content: &str) -> Self {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let mut textarea = TextArea::new(lines);
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        InlineEditor { post_id, textarea }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn char_count(&self) -> usize {
        self.textarea
            .lines()
            .iter()
            .map(|l| l.chars().count())
            .sum::<usize>()
            + self.textarea.lines().len().saturating_sub(1)
    }

    /// Rows the field needs, borders included.
    pub fn height(&self) -> u16 {
        (self.textarea.lines().len() as u16).clamp(1, 8) + 2
    }
}

impl Component for InlineEditor {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::CancelEdit),
            (KeyModifiers::CONTROL, KeyCode::Enter)
            | (KeyModifiers::ALT, KeyCode::Enter)
            | (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                return Some(Action::SaveEdit(self.text()));
            }
            _ => {
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
        frame.render_widget(&self.textarea, area);
    }
}
