use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::feed::FeedState;
use crate::models::profile::ProfileState;
use crate::ui::editor::InlineEditor;
use crate::ui::timeline::draw_feed;

pub fn draw_profile(
    frame: &mut Frame,
    area: Rect,
    profile: Option<&ProfileState>,
    feed: &FeedState,
    signed_in: bool,
    editor: Option<&InlineEditor>,
) {
    let profile = match profile {
        Some(p) => p,
        None => {
            let text = if feed.loading {
                "Loading profile..."
            } else {
                "Profile unavailable. Press R to retry."
            };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    draw_profile_header(frame, chunks[0], profile, signed_in);
    draw_feed(frame, chunks[1], feed, signed_in, editor);
}

fn draw_profile_header(frame: &mut Frame, area: Rect, profile: &ProfileState, signed_in: bool) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut name = vec![Span::styled(
        profile.username.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if profile.shows_follow(signed_in) {
        let label = if profile.follow_pending {
            "[f] ...".to_string()
        } else {
            format!("[f] {}", profile.follow_label())
        };
        let style = if profile.viewer_is_following {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        name.push(Span::raw("  "));
        name.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(name)), chunks[0]);

    frame.render_widget(
        Paragraph::new(format!("Joined {}", profile.joined_date))
            .style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );

    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let stats = Line::from(vec![
        Span::styled(profile.followers_label(), bold),
        Span::raw("  "),
        Span::styled(profile.following_label(), bold),
    ]);
    frame.render_widget(Paragraph::new(stats), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::profile_of;
    use ratatui::backend::TestBackend;

    fn render(profile: &ProfileState, signed_in: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let feed = FeedState::new();
        terminal
            .draw(|frame| draw_profile(frame, frame.area(), Some(profile), &feed, signed_in, None))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn header_shows_counts_and_follow() {
        let (profile, _) = profile_of("bob", Vec::new(), 1, 1).into_parts();
        let text = render(&profile, true);
        assert!(text.contains("bob"));
        assert!(text.contains("Joined March 2021"));
        assert!(text.contains("3 Follower(s)"));
        assert!(text.contains("1 Following"));
        assert!(text.contains("[f] Follow"));
    }

    #[test]
    fn anonymous_sees_no_follow_button() {
        let (profile, _) = profile_of("bob", Vec::new(), 1, 1).into_parts();
        assert!(!render(&profile, false).contains("[f]"));
    }
}
