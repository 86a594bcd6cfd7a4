use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::action::Action;
use crate::api::auth::Registration;
use crate::ui::Component;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FormMode {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoginField {
    Username,
    Email,
    Password,
    Confirmation,
}

impl LoginField {
    fn label(self) -> &'static str {
        match self {
            LoginField::Username => "Username:",
            LoginField::Email => "Email:",
            LoginField::Password => "Password:",
            LoginField::Confirmation => "Confirm password:",
        }
    }

    fn is_secret(self) -> bool {
        matches!(self, LoginField::Password | LoginField::Confirmation)
    }
}

/// Sign-in modal; `Ctrl+R` switches it to account registration.
pub struct LoginForm {
    mode: FormMode,
    username: String,
    email: String,
    password: String,
    confirmation: String,
    focused_field: LoginField,
    error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    pub fn new(default_username: Option<String>) -> Self {
        let focused_field = if default_username.is_some() {
            LoginField::Password
        } else {
            LoginField::Username
        };
        LoginForm {
            mode: FormMode::SignIn,
            username: default_username.unwrap_or_default(),
            email: String::new(),
            password: String::new(),
            confirmation: String::new(),
            focused_field,
            error: None,
            submitting: false,
        }
    }

    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
        self.submitting = false;
        self.password.clear();
        self.confirmation.clear();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.submitting = false;
    }

    fn fields(&self) -> &'static [LoginField] {
        match self.mode {
            FormMode::SignIn => &[LoginField::Username, LoginField::Password],
            FormMode::Register => &[
                LoginField::Username,
                LoginField::Email,
                LoginField::Password,
                LoginField::Confirmation,
            ],
        }
    }

    fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
            LoginField::Confirmation => &self.confirmation,
        }
    }

    fn value_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::Username => &mut self.username,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::Confirmation => &mut self.confirmation,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields
            .iter()
            .position(|f| *f == self.focused_field)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.focused_field = fields[next];
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FormMode::SignIn => FormMode::Register,
            FormMode::Register => FormMode::SignIn,
        };
        self.error = None;
        if !self.fields().contains(&self.focused_field) {
            self.focused_field = LoginField::Username;
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.fields().iter().any(|f| self.value(*f).trim().is_empty()) {
            return None;
        }

        let action = match self.mode {
            FormMode::SignIn => Action::SubmitLogin {
                username: self.username.trim().to_string(),
                password: self.password.clone(),
            },
            FormMode::Register => {
                if self.password != self.confirmation {
                    self.set_error("Passwords must match.".to_string());
                    self.focused_field = LoginField::Password;
                    return None;
                }
                Action::SubmitRegister(Registration {
                    username: self.username.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    confirmation: self.confirmation.clone(),
                })
            }
        };
        self.submitting = true;
        self.error = None;
        Some(action)
    }
}

impl Component for LoginForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::CloseLogin),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => self.toggle_mode(),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.cycle_focus(true)
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.cycle_focus(false)
            }
            (KeyModifiers::NONE, KeyCode::Enter) => return self.submit(),
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.value_mut(self.focused_field).pop();
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.value_mut(self.focused_field).push(c);
            }
            _ => {}
        }
        None
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let fields = self.fields();
        let modal_width = 50.min(area.width.saturating_sub(4));
        let modal_height = (8 + 2 * fields.len() as u16).min(area.height.saturating_sub(4));
        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2 + area.x,
            y: (area.height.saturating_sub(modal_height)) / 2 + area.y,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let title = match self.mode {
            FormMode::SignIn => " Network - Sign in ",
            FormMode::Register => " Network - Register ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        // Heading, blank, a label and value row per field, blank, message
        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        constraints.extend(fields.iter().flat_map(|_| [Constraint::Length(1), Constraint::Length(1)]));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let heading = match self.mode {
            FormMode::SignIn => "Sign in to like, post and follow",
            FormMode::Register => "Create an account",
        };
        frame.render_widget(
            Paragraph::new(heading)
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            chunks[0],
        );

        for (i, field) in fields.iter().enumerate() {
            let active = self.focused_field == *field;
            let (label_style, value_style) = if active {
                (
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                )
            } else {
                (
                    Style::default().fg(Color::Gray),
                    Style::default().fg(Color::DarkGray),
                )
            };

            let raw = self.value(*field);
            let mut shown = if field.is_secret() {
                "•".repeat(raw.chars().count())
            } else {
                raw.to_string()
            };
            if active {
                shown.push('█');
            }

            let row = 2 + 2 * i;
            frame.render_widget(Paragraph::new(field.label()).style(label_style), chunks[row]);
            frame.render_widget(Paragraph::new(shown).style(value_style), chunks[row + 1]);
        }

        let message_area = chunks[chunks.len() - 1];
        if let Some(ref error) = self.error {
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                message_area,
            );
        } else if self.submitting {
            frame.render_widget(
                Paragraph::new("Signing in...").style(Style::default().fg(Color::Yellow)),
                message_area,
            );
        } else {
            let hint = match self.mode {
                FormMode::SignIn => "Tab: next field  Enter: submit  Ctrl+R: register  Esc: cancel",
                FormMode::Register => "Tab: next field  Enter: submit  Ctrl+R: sign in  Esc: cancel",
            };
            frame.render_widget(
                Paragraph::new(hint)
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true }),
                message_area,
            );
        }
    }
}
