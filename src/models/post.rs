use chrono::NaiveDateTime;
use serde::Deserialize;

use super::editor::EditorState;
use crate::utils::time::parse_server_timestamp;

pub type PostId = u64;

/// One post as returned by the server. Viewer-relative flags are computed
/// server-side for the requesting session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "post_id")]
    pub id: PostId,
    #[serde(rename = "poster")]
    pub poster_name: String,
    pub content: String,
    pub timestamp: String,
    pub like_count: u64,
    #[serde(rename = "user_liked")]
    pub viewer_has_liked: bool,
    #[serde(rename = "user_is_poster")]
    pub viewer_is_poster: bool,
}

/// A mutating request outstanding for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Like,
    Edit,
}

/// A rendered post: the record plus the interaction state attached to it.
#[derive(Debug, Clone)]
pub struct PostUnit {
    pub record: PostRecord,
    pub editor: EditorState,
    pub pending: Option<PendingOp>,
    pub posted_at: Option<NaiveDateTime>,
}

impl PostUnit {
    pub fn render(record: PostRecord) -> Self {
        let posted_at = parse_server_timestamp(&record.timestamp);
        PostUnit {
            record,
            editor: EditorState::Display,
            pending: None,
            posted_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.record.id
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn like_label(&self) -> &'static str {
        if self.record.viewer_has_liked {
            "Unlike"
        } else {
            "Like"
        }
    }

    pub fn like_count_label(&self) -> String {
        format!("{} Like(s)", self.record.like_count)
    }

    /// Like affordance is shown only to a signed-in viewer, and hidden while editing.
    pub fn shows_like(&self, signed_in: bool) -> bool {
        signed_in && !self.editor.is_open()
    }

    /// `viewer_is_poster` alone is not trusted without a signed-in viewer.
    pub fn shows_edit(&self, signed_in: bool) -> bool {
        signed_in && self.record.viewer_is_poster && !self.editor.is_open()
    }

    /// Marks a like toggle in flight and returns the desired state to send.
    /// Returns `None` if another mutation for this post is outstanding.
    pub fn begin_like(&mut self) -> Option<bool> {
        if self.is_busy() || self.editor.is_open() {
            return None;
        }
        self.pending = Some(PendingOp::Like);
        Some(!self.record.viewer_has_liked)
    }

    /// Applies the server-confirmed count. The count is never computed locally.
    pub fn finish_like(&mut self, liked: bool, like_count: u64) {
        self.record.viewer_has_liked = liked;
        self.record.like_count = like_count;
        self.pending = None;
    }

    pub fn fail_like(&mut self) {
        if self.pending == Some(PendingOp::Like) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;

    #[test]
    fn like_toggle_round_trip_restores_display() {
        let mut unit = PostUnit::render(record(1, "hi"));
        let before = (unit.like_label(), unit.like_count_label());

        let desired = unit.begin_like().unwrap();
        assert!(desired);
        unit.finish_like(desired, 3);
        assert_eq!(unit.like_label(), "Unlike");
        assert_eq!(unit.like_count_label(), "3 Like(s)");

        let desired = unit.begin_like().unwrap();
        assert!(!desired);
        unit.finish_like(desired, 2);
        assert_eq!((unit.like_label(), unit.like_count_label()), before);
    }

    #[test]
    fn second_like_while_pending_is_refused() {
        let mut unit = PostUnit::render(record(1, "hi"));
        assert!(unit.begin_like().is_some());
        assert!(unit.begin_like().is_none());
        unit.fail_like();
        assert!(unit.begin_like().is_some());
    }

    #[test]
    fn failed_like_keeps_last_good_state() {
        let mut unit = PostUnit::render(record(1, "hi"));
        unit.begin_like();
        unit.fail_like();
        assert!(!unit.record.viewer_has_liked);
        assert_eq!(unit.record.like_count, 2);
    }

    #[test]
    fn affordances_follow_viewer_flags() {
        let mut rec = record(1, "hi");
        rec.viewer_is_poster = false;
        let unit = PostUnit::render(rec);
        assert!(!unit.shows_edit(true));
        assert!(!unit.shows_like(false));
        assert!(unit.shows_like(true));
    }

    #[test]
    fn edit_needs_a_signed_in_poster() {
        let unit = PostUnit::render(record(1, "hi"));
        assert!(unit.shows_edit(true));
        assert!(!unit.shows_edit(false));
    }

    #[test]
    fn parses_server_timestamp() {
        let unit = PostUnit::render(record(1, "hi"));
        assert!(unit.posted_at.is_some());
    }
}
