use super::editor::EditorState;
use super::page::PostsPage;
use super::pagination::PaginationControls;
use super::post::{PostId, PostUnit};

/// Rendered content of the active view: one unit per post plus its paginator.
/// Replaced wholesale on every activation.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub posts: Vec<PostUnit>,
    pub pagination: PaginationControls,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub loading: bool,
}

impl FeedState {
    pub fn new() -> Self {
        FeedState {
            posts: Vec::new(),
            pagination: PaginationControls::new(),
            selected_index: 0,
            scroll_offset: 0,
            loading: false,
        }
    }

    /// Empty feed waiting for its first page.
    pub fn loading() -> Self {
        FeedState {
            loading: true,
            ..Self::new()
        }
    }

    pub fn select_next(&mut self) {
        if !self.posts.is_empty() && self.selected_index < self.posts.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        if !self.posts.is_empty() {
            self.selected_index = self.posts.len() - 1;
        }
    }

    pub fn selected_post(&self) -> Option<&PostUnit> {
        self.posts.get(self.selected_index)
    }

    pub fn selected_post_mut(&mut self) -> Option<&mut PostUnit> {
        self.posts.get_mut(self.selected_index)
    }

    pub fn post_mut(&mut self, id: PostId) -> Option<&mut PostUnit> {
        self.posts.iter_mut().find(|p| p.id() == id)
    }

    /// The unit currently in edit mode, if any.
    pub fn editing_post(&self) -> Option<&PostUnit> {
        self.posts.iter().find(|p| p.editor.is_open())
    }

    /// The same posts with no edit open and nothing in flight, for redisplay
    /// after the requests that touched them were abandoned.
    pub fn settled(mut self) -> Self {
        for post in &mut self.posts {
            post.editor = EditorState::Display;
            post.pending = None;
        }
        self.loading = false;
        self
    }

    /// Renders every record of `page` and configures pagination from its envelope.
    pub fn render_page(&mut self, page: PostsPage) {
        self.posts = page.posts.into_iter().map(PostUnit::render).collect();
        self.pagination.configure(page.envelope);
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.loading = false;
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
