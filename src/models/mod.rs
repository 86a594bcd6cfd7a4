pub mod editor;
pub mod feed;
pub mod page;
pub mod pagination;
pub mod post;
pub mod profile;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::post::{PostId, PostRecord};

    pub fn record(id: PostId, content: &str) -> PostRecord {
        PostRecord {
            id,
            poster_name: "alice".to_string(),
            content: content.to_string(),
            timestamp: "3/14/21 9:05 PM".to_string(),
            like_count: 2,
            viewer_has_liked: false,
            viewer_is_poster: true,
        }
    }
}
