use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::models::pagination::PageDelta;

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm's poll/read block, so they run off the async workers.
        let task = tokio::task::spawn_blocking(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(evt).is_err() {
                        break;
                    }
                }
            } else if tx.is_closed() {
                break;
            }
        });

        EventHandler { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Keys for the post list. Modals (login, composer, inline editor) take
/// their keys before this is consulted.
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
            Some(Action::SelectNext)
        }
        (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
            Some(Action::SelectPrev)
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) => Some(Action::ScrollToTop),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => Some(Action::ScrollToBottom),
        (KeyModifiers::NONE, KeyCode::Char('['))
        | (KeyModifiers::NONE, KeyCode::Char('h'))
        | (KeyModifiers::NONE, KeyCode::Left) => Some(Action::Paginate(PageDelta::Previous)),
        (KeyModifiers::NONE, KeyCode::Char(']')) | (KeyModifiers::NONE, KeyCode::Right) => {
            Some(Action::Paginate(PageDelta::Next))
        }
        (KeyModifiers::NONE, KeyCode::Char('1')) => Some(Action::SwitchTab(0)),
        (KeyModifiers::NONE, KeyCode::Char('2')) => Some(Action::SwitchTab(1)),
        (KeyModifiers::NONE, KeyCode::Char('3')) => Some(Action::SwitchTab(2)),
        (KeyModifiers::NONE, KeyCode::Char('u')) | (KeyModifiers::NONE, KeyCode::Enter) => {
            Some(Action::ViewPosterProfile)
        }
        (KeyModifiers::NONE, KeyCode::Char('l')) => Some(Action::ToggleLike),
        (KeyModifiers::NONE, KeyCode::Char('e')) => Some(Action::BeginEdit),
        (KeyModifiers::NONE, KeyCode::Char('f')) => Some(Action::ToggleFollow),
        (KeyModifiers::NONE, KeyCode::Char('n')) => Some(Action::OpenComposer),
        (KeyModifiers::SHIFT, KeyCode::Char('R')) => Some(Action::Reload),
        (KeyModifiers::SHIFT, KeyCode::Char('L')) => Some(Action::ShowLogin),
        (KeyModifiers::SHIFT, KeyCode::Char('X')) => Some(Action::Logout),
        _ => None,
    }
}
