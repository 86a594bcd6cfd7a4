use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::models::pagination::{PageDelta, PaginationControls};

/// Rows the bar takes: none for a single page.
pub fn bar_height(controls: &PaginationControls) -> u16 {
    if controls.is_visible() {
        1
    } else {
        0
    }
}

pub fn draw_pagination(frame: &mut Frame, area: Rect, controls: &PaginationControls) {
    let Some(envelope) = controls.envelope().filter(|_| controls.is_visible()) else {
        return;
    };

    let style_for = |delta: PageDelta| {
        if controls.is_enabled(delta) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    };

    let line = Line::from(vec![
        Span::styled("‹ Previous", style_for(PageDelta::Previous)),
        Span::raw("  "),
        Span::styled(
            format!("Page {} of {}", envelope.current_page, envelope.total_pages),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled("Next ›", style_for(PageDelta::Next)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::PaginationEnvelope;
    use ratatui::backend::TestBackend;

    fn controls(current: u32, total: u32) -> PaginationControls {
        let mut controls = PaginationControls::new();
        controls.configure(PaginationEnvelope::new(current, total));
        controls
    }

    #[test]
    fn single_page_takes_no_room() {
        assert_eq!(bar_height(&controls(1, 1)), 0);
        assert_eq!(bar_height(&PaginationControls::new()), 0);
        assert_eq!(bar_height(&controls(2, 3)), 1);
    }

    #[test]
    fn first_page_dims_previous() {
        let mut terminal = Terminal::new(TestBackend::new(50, 1)).unwrap();
        terminal
            .draw(|frame| draw_pagination(frame, frame.area(), &controls(1, 3)))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("‹ Previous  Page 1 of 3  Next ›"));

        let prev_x = text.chars().position(|c| c == 'P').unwrap() as u16;
        assert!(buffer[(prev_x, 0)].modifier.contains(Modifier::DIM));
        let next_x = text.chars().position(|c| c == 'N').unwrap() as u16;
        assert!(!buffer[(next_x, 0)].modifier.contains(Modifier::DIM));
    }
}
