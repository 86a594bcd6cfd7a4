use serde::Deserialize;

use super::page::{PaginationEnvelope, PostsPage};
use super::post::PostRecord;

/// `GET /profile/{username}/{page}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    #[serde(rename = "is_signed_in_user")]
    pub viewer_is_same_user: bool,
    #[serde(rename = "user_is_following")]
    pub viewer_is_following: bool,
    #[serde(rename = "num_followers")]
    pub follower_count: u64,
    #[serde(rename = "num_following")]
    pub following_count: u64,
    #[serde(rename = "date_joined")]
    pub joined_date: String,
    #[serde(rename = "user_posts")]
    pub posts: Vec<PostRecord>,
    #[serde(flatten)]
    pub envelope: PaginationEnvelope,
}

impl ProfileRecord {
    /// Splits the header from the embedded posts page.
    pub fn into_parts(self) -> (ProfileState, PostsPage) {
        let page = PostsPage {
            posts: self.posts,
            envelope: self.envelope,
        };
        let state = ProfileState {
            username: self.username,
            viewer_is_same_user: self.viewer_is_same_user,
            viewer_is_following: self.viewer_is_following,
            follower_count: self.follower_count,
            following_count: self.following_count,
            joined_date: self.joined_date,
            follow_pending: false,
        };
        (state, page)
    }
}

/// Profile header of the active profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileState {
    pub username: String,
    pub viewer_is_same_user: bool,
    pub viewer_is_following: bool,
    pub follower_count: u64,
    pub following_count: u64,
    pub joined_date: String,
    pub follow_pending: bool,
}

impl ProfileState {
    /// Follow is offered only to a signed-in viewer looking at someone else.
    pub fn shows_follow(&self, signed_in: bool) -> bool {
        signed_in && !self.viewer_is_same_user
    }

    pub fn follow_label(&self) -> &'static str {
        if self.viewer_is_following {
            "Unfollow"
        } else {
            "Follow"
        }
    }

    pub fn followers_label(&self) -> String {
        format!("{} Follower(s)", self.follower_count)
    }

    pub fn following_label(&self) -> String {
        format!("{} Following", self.following_count)
    }

    /// Returns the desired follow state to send, or `None` if a toggle is in flight.
    pub fn begin_follow(&mut self) -> Option<bool> {
        if self.follow_pending {
            return None;
        }
        self.follow_pending = true;
        Some(!self.viewer_is_following)
    }

    pub fn finish_follow(&mut self, following: bool, follower_count: u64) {
        self.viewer_is_following = following;
        self.follower_count = follower_count;
        self.follow_pending = false;
    }

    pub fn fail_follow(&mut self) {
        self.follow_pending = false;
    }
}
