use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::models::view::View;
use crate::utils::text::truncate_to_width;

/// What the key hints depend on.
pub struct StatusContext<'a> {
    pub view: &'a View,
    pub signed_in: bool,
    pub compose_enabled: bool,
    pub editing: bool,
    pub in_modal: bool,
}

fn hints(ctx: &StatusContext<'_>) -> String {
    if ctx.in_modal {
        return "Esc: close".to_string();
    }
    if ctx.editing {
        return "Ctrl+S: save | Esc: cancel".to_string();
    }

    let mut hints = vec!["j/k: navigate", "[/]: page", "u: profile"];
    if ctx.signed_in {
        hints.push("l: like");
        hints.push("e: edit");
        if ctx.view.is_profile() {
            hints.push("f: follow");
        }
        if ctx.compose_enabled {
            hints.push("n: post");
        }
        hints.push("R: reload");
        hints.push("X: sign out");
    } else {
        hints.push("R: reload");
        hints.push("L: sign in");
    }
    hints.push("q: quit");
    hints.join(" | ")
}

pub fn draw_statusbar(frame: &mut Frame, area: Rect, ctx: StatusContext<'_>, notice: Option<&str>) {
    if let Some(text) = notice {
        let text = truncate_to_width(text, area.width.saturating_sub(2) as usize);
        let bar = Paragraph::new(format!(" {}", text))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        frame.render_widget(bar, area);
        return;
    }

    let bar = Paragraph::new(format!(" {}", hints(&ctx)))
        .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
    frame.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(view: &View, signed_in: bool) -> StatusContext<'_> {
        StatusContext {
            view,
            signed_in,
            compose_enabled: true,
            editing: false,
            in_modal: false,
        }
    }

    #[test]
    fn anonymous_hints_offer_sign_in_only() {
        let text = hints(&ctx(&View::AllPosts, false));
        assert!(text.contains("L: sign in"));
        assert!(!text.contains("like"));
        assert!(!text.contains("n: post"));
    }

    #[test]
    fn follow_hint_only_on_profiles() {
        assert!(!hints(&ctx(&View::AllPosts, true)).contains("follow"));
        assert!(hints(&ctx(&View::Profile("bob".into()), true)).contains("f: follow"));
    }

    #[test]
    fn compose_hint_follows_flag() {
        let view = View::AllPosts;
        let mut c = ctx(&view, true);
        c.compose_enabled = false;
        assert!(!hints(&c).contains("n: post"));
    }
}
