use crate::api::auth::Registration;
use crate::api::error::ApiError;
use crate::models::page::PostsPage;
use crate::models::pagination::PageDelta;
use crate::models::post::PostId;
use crate::models::profile::ProfileRecord;
use crate::models::view::{Generation, PageRequest, ViewerSession};

#[derive(Debug)]
pub enum Action {
    Quit,
    Tick,

    // Navigation
    SelectNext,
    SelectPrev,
    ScrollToTop,
    ScrollToBottom,
    /// Tear down the current view and load `request`.
    Activate(PageRequest),
    /// Re-activate the current view and page.
    Reload,
    Paginate(PageDelta),
    /// `[1]`, `[2]`, `[3]` in the nav bar.
    SwitchTab(usize),
    ViewPosterProfile,

    // Loads. Each completion carries the generation of the activation that issued it.
    PageLoaded {
        generation: Generation,
        result: Result<PostsPage, ApiError>,
    },
    ProfileLoaded {
        generation: Generation,
        result: Result<ProfileRecord, ApiError>,
    },

    // Auth
    ShowLogin,
    CloseLogin,
    SubmitLogin {
        username: String,
        password: String,
    },
    SubmitRegister(Registration),
    LoginFinished(Result<ViewerSession, ApiError>),
    Logout,
    LogoutFinished,

    // Composer
    OpenComposer,
    CloseComposer,
    SubmitPost(String),
    PostCreated(Result<(), ApiError>),

    // Like
    ToggleLike,
    LikeFinished {
        post_id: PostId,
        liked: bool,
        result: Result<u64, ApiError>,
    },

    // Edit in place
    BeginEdit,
    CancelEdit,
    SaveEdit(String),
    EditFinished {
        post_id: PostId,
        result: Result<(), ApiError>,
    },

    // Follow
    ToggleFollow,
    FollowFinished {
        username: String,
        following: bool,
        result: Result<u64, ApiError>,
    },
}
