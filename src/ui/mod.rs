pub mod composer;
pub mod editor;
pub mod login;
pub mod pagination;
pub mod post_widget;
pub mod profile;
pub mod statusbar;
pub mod tabs;
pub mod timeline;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::action::Action;

/// Trait for **modal components** (`LoginForm`, `Composer`, `InlineEditor`)
/// that own input state and intercept keyboard input while active.
///
/// The post lists and profile header are drawn by stateless `draw_*()`
/// functions that read `App` state instead.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action>;
    fn draw(&self, frame: &mut Frame, area: ratatui::prelude::Rect);
}
