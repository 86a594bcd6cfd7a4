use std::fmt;

/// The three mutually exclusive top-level content modes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    AllPosts,
    Following,
    Profile(String),
}

impl View {
    pub fn title(&self) -> String {
        match self {
            View::AllPosts => "All Posts".to_string(),
            View::Following => "Posts from Following".to_string(),
            View::Profile(username) => username.clone(),
        }
    }

    /// Whether fetching this view needs a signed-in viewer.
    pub fn requires_viewer(&self) -> bool {
        matches!(self, View::Following)
    }

    pub fn is_profile(&self) -> bool {
        matches!(self, View::Profile(_))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::AllPosts => write!(f, "all"),
            View::Following => write!(f, "following"),
            View::Profile(username) => write!(f, "profile:{}", username),
        }
    }
}

/// One fetch: a view and a 1-based page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub view: View,
    pub page: u32,
}

impl PageRequest {
    pub fn new(view: View, page: u32) -> Self {
        PageRequest {
            view,
            page: page.max(1),
        }
    }

    pub fn first(view: View) -> Self {
        Self::new(view, 1)
    }
}

/// The signed-in user consuming the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    pub username: String,
}

impl ViewerSession {
    pub fn new(username: impl Into<String>) -> Self {
        ViewerSession {
            username: username.into(),
        }
    }

    pub fn owns_profile(&self, view: &View) -> bool {
        matches!(view, View::Profile(u) if *u == self.username)
    }
}

/// Stamp of one view activation. Completions carrying an older stamp are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// Navigation tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    AllPosts,
    Following,
    OwnProfile,
}

impl NavTab {
    pub fn label(self) -> &'static str {
        match self {
            NavTab::AllPosts => "All Posts",
            NavTab::Following => "Following",
            NavTab::OwnProfile => "Profile",
        }
    }

    /// Tabs visible to the given viewer. Anonymous users only see All Posts.
    pub fn visible(viewer: Option<&ViewerSession>) -> Vec<NavTab> {
        match viewer {
            Some(_) => vec![NavTab::AllPosts, NavTab::Following, NavTab::OwnProfile],
            None => vec![NavTab::AllPosts],
        }
    }

    /// The tab marked active for `view`. Someone else's profile marks none.
    pub fn active_for(view: &View, viewer: Option<&ViewerSession>) -> Option<NavTab> {
        match view {
            View::AllPosts => Some(NavTab::AllPosts),
            View::Following => Some(NavTab::Following),
            View::Profile(_) => viewer
                .filter(|v| v.owns_profile(view))
                .map(|_| NavTab::OwnProfile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_numbers_are_clamped_to_one() {
        assert_eq!(PageRequest::new(View::AllPosts, 0).page, 1);
        assert_eq!(PageRequest::new(View::Following, 4).page, 4);
    }

    #[test]
    fn own_profile_marks_profile_tab() {
        let viewer = ViewerSession::new("alice");
        let own = View::Profile("alice".into());
        let other = View::Profile("bob".into());

        assert_eq!(NavTab::active_for(&own, Some(&viewer)), Some(NavTab::OwnProfile));
        assert_eq!(NavTab::active_for(&other, Some(&viewer)), None);
        assert_eq!(NavTab::active_for(&own, None), None);
        assert_eq!(NavTab::active_for(&View::Following, Some(&viewer)), Some(NavTab::Following));
    }

    #[test]
    fn anonymous_viewers_only_see_all_posts() {
        assert_eq!(NavTab::visible(None), vec![NavTab::AllPosts]);
        assert_eq!(NavTab::visible(Some(&ViewerSession::new("a"))).len(), 3);
    }

    #[test]
    fn generations_increase() {
        let g = Generation::default();
        assert!(g.next() > g);
        assert_ne!(g.next(), g.next().next());
    }
}
