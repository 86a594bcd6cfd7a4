use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Tabs as RatatuiTabs};

use crate::models::view::{NavTab, View, ViewerSession};

pub fn draw_tabs(frame: &mut Frame, area: Rect, view: &View, viewer: Option<&ViewerSession>) {
    let tabs = NavTab::visible(viewer);
    let titles: Vec<String> = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("[{}] {}", i + 1, tab.label()))
        .collect();

    let title = match viewer {
        Some(v) => format!(" Network · {} ", v.username),
        None => " Network · L: sign in ".to_string(),
    };

    let active = NavTab::active_for(view, viewer).and_then(|a| tabs.iter().position(|t| *t == a));
    let highlight = match active {
        Some(_) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        // Another user's profile: no tab is lit
        None => Style::default().fg(Color::DarkGray),
    };

    let widget = RatatuiTabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM).title(title))
        .select(active.unwrap_or(0))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(highlight);
    frame.render_widget(widget, area);
}
