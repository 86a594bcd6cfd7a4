use serde::Deserialize;

use super::post::PostRecord;

/// Server-reported position within a paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationEnvelope {
    #[serde(rename = "current_page")]
    pub current_page: u32,
    #[serde(rename = "num_pages")]
    pub total_pages: u32,
}

impl PaginationEnvelope {
    #[cfg(test)]
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        PaginationEnvelope {
            current_page,
            total_pages,
        }
    }

    /// Checks `1 <= current_page <= total_pages`.
    pub fn validate(self) -> Result<Self, String> {
        if self.total_pages == 0 {
            return Err("num_pages must be at least 1".to_string());
        }
        if self.current_page == 0 || self.current_page > self.total_pages {
            return Err(format!(
                "current_page {} outside 1..={}",
                self.current_page, self.total_pages
            ));
        }
        Ok(self)
    }

    pub fn is_single_page(&self) -> bool {
        self.total_pages == 1
    }
}

/// One page of posts: `GET /posts/{filter}/{page}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<PostRecord>,
    #[serde(flatten)]
    pub envelope: PaginationEnvelope,
}
