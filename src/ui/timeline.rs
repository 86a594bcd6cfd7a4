use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::feed::FeedState;
use crate::models::post::PostId;
use crate::ui::editor::InlineEditor;
use crate::ui::{pagination, post_widget};

pub fn draw_timeline(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    feed: &FeedState,
    signed_in: bool,
    editor: Option<&InlineEditor>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let heading = Paragraph::new(title)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(heading, chunks[0]);

    draw_feed(frame, chunks[1], feed, signed_in, editor);
}

/// Post list with the pagination bar under it. Shared with the profile view.
pub fn draw_feed(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedState,
    signed_in: bool,
    editor: Option<&InlineEditor>,
) {
    if feed.loading && feed.posts.is_empty() {
        let loading = Paragraph::new("Loading posts...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if feed.posts.is_empty() {
        let empty = Paragraph::new("No posts here. Press R to retry.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(pagination::bar_height(&feed.pagination)),
        ])
        .split(area);

    draw_posts(frame, chunks[0], feed, signed_in, editor);
    pagination::draw_pagination(frame, chunks[1], &feed.pagination);
}

fn draw_posts(
    frame: &mut Frame,
    area: Rect,
    feed: &FeedState,
    signed_in: bool,
    editor: Option<&InlineEditor>,
) {
    let editor_for = |id: PostId| editor.filter(|e| e.post_id() == id);
    let height_of = |i: usize| {
        let post = &feed.posts[i];
        post_widget::post_height(post, area.width, editor_for(post.id())) as usize
    };

    // Virtual scrolling: keep the selected post in view
    let mut offset = feed.scroll_offset;
    let visible_height = area.height as usize;

    let selected_start: usize = (0..feed.selected_index.min(feed.posts.len())).map(&height_of).sum();
    let selected_height = if feed.selected_index < feed.posts.len() {
        height_of(feed.selected_index)
    } else {
        0
    };

    if selected_start < offset {
        offset = selected_start;
    } else if selected_start + selected_height > offset + visible_height {
        offset = (selected_start + selected_height).saturating_sub(visible_height);
    }

    let mut y = area.y;
    let max_y = area.bottom();
    let mut running_height: usize = 0;
    for (i, post) in feed.posts.iter().enumerate() {
        let h = height_of(i);

        if running_height + h <= offset {
            running_height += h;
            continue;
        }

        if y >= max_y {
            break;
        }

        let available_h = (max_y - y).min(h as u16);
        let post_area = Rect::new(area.x, y, area.width, available_h);
        post_widget::draw_post(
            frame,
            post_area,
            post,
            i == feed.selected_index,
            signed_in,
            editor_for(post.id()),
        );

        y += available_h;
        running_height += h;
    }
}
