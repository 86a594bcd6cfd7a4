use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::models::post::{PendingOp, PostUnit};
use crate::ui::editor::InlineEditor;
use crate::ui::Component;
use crate::utils::text::wrapped_line_count;
use crate::utils::time::relative_time;

/// `editor` is the inline editor when it belongs to this post.
pub fn post_height(post: &PostUnit, width: u16, editor: Option<&InlineEditor>) -> u16 {
    let body = match editor {
        Some(editor) => editor.height(),
        None => wrapped_line_count(&post.record.content, width.saturating_sub(4)),
    };

    1  // author line
        + body
        + 1  // likes line
        + 1 // padding
}

pub fn draw_post(
    frame: &mut Frame,
    area: Rect,
    post: &PostUnit,
    selected: bool,
    signed_in: bool,
    editor: Option<&InlineEditor>,
) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let mut y = inner.y;
    let x = inner.x + 1;
    let w = inner.width.saturating_sub(1);
    let bottom = inner.bottom();

    // Author line; only the title while editing
    let author = if post.editor.is_open() {
        vec![Span::styled(
            "Edit Post",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]
    } else {
        let mut spans = vec![Span::styled(
            post.record.poster_name.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        let stamp = match post.posted_at.as_ref() {
            Some(posted_at) => format!("  {} ({})", post.record.timestamp, relative_time(posted_at)),
            None => format!("  {}", post.record.timestamp),
        };
        spans.push(Span::styled(stamp, Style::default().fg(Color::DarkGray)));
        if post.shows_edit(signed_in) {
            spans.push(Span::styled("  [e] Edit", Style::default().fg(Color::Magenta)));
        }
        spans
    };
    frame.render_widget(Paragraph::new(Line::from(author)), Rect::new(x, y, w, 1));
    y += 1;

    // Content, or the editor in its place
    if y >= bottom {
        return;
    }
    let remaining = bottom.saturating_sub(y);
    match editor {
        Some(editor) => {
            let h = editor.height().min(remaining);
            editor.draw(frame, Rect::new(x, y, w, h));
            y += h;
        }
        None => {
            let text_height = remaining.saturating_sub(1).max(1).min(remaining);
            frame.render_widget(
                Paragraph::new(post.record.content.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: false }),
                Rect::new(x, y, w, text_height),
            );
            y += wrapped_line_count(&post.record.content, w).min(remaining);
        }
    }

    if y >= bottom {
        return;
    }

    let footer = if post.editor.is_open() {
        if post.editor.is_saving() {
            Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow)))
        } else {
            Line::from(Span::styled(
                "Esc: Cancel  Ctrl+S: Save",
                Style::default().fg(Color::DarkGray),
            ))
        }
    } else {
        let like_style = if post.record.viewer_has_liked {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = Vec::new();
        if post.shows_like(signed_in) {
            let label = if post.pending == Some(PendingOp::Like) {
                "[l] ...".to_string()
            } else {
                format!("[l] {}", post.like_label())
            };
            spans.push(Span::styled(label, like_style));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(post.like_count_label(), like_style));
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(footer), Rect::new(x, y, w, 1));
}
