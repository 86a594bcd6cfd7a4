//! In-memory `PostsApi` that records every request, for driving the app in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{Endpoint, PostsApi, PostsFilter};
use super::error::ApiError;
use crate::models::page::{PaginationEnvelope, PostsPage};
use crate::models::post::{PostId, PostRecord};
use crate::models::profile::ProfileRecord;

#[derive(Default)]
pub struct FakeApi {
    requests: Mutex<Vec<String>>,
    pages: Mutex<HashMap<String, PostsPage>>,
    profiles: Mutex<HashMap<String, ProfileRecord>>,
    like_counts: Mutex<HashMap<PostId, u64>>,
    follower_count: Mutex<u64>,
    credentials: Mutex<HashMap<String, String>>,
    session: Mutex<Option<String>>,
    fail_mutations: AtomicBool,
    fail_profiles: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, filter: PostsFilter, page: PostsPage) -> Self {
        let path = Endpoint::Posts {
            filter,
            page: page.envelope.current_page,
        }
        .path();
        {
            let mut counts = self.like_counts.lock().unwrap();
            for post in &page.posts {
                counts.entry(post.id).or_insert(post.like_count);
            }
        }
        self.pages.lock().unwrap().insert(path, page);
        self
    }

    pub fn with_profile(self, profile: ProfileRecord) -> Self {
        let path = Endpoint::Profile {
            username: &profile.username,
            page: profile.envelope.current_page,
        }
        .path();
        self.profiles.lock().unwrap().insert(path, profile);
        self
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.credentials
            .lock()
            .unwrap()
            .insert(username.into(), password.into());
        self
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Profile reads fail as if the server were unreachable.
    pub fn fail_profiles(&self, fail: bool) {
        self.fail_profiles.store(fail, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record(&self, method: &str, endpoint: Endpoint<'_>) {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, endpoint.path()));
    }

    fn check_mutation(&self) -> Result<(), ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(400, "Nothing was changed."));
        }
        Ok(())
    }
}

pub fn page_of(posts: Vec<PostRecord>, current: u32, total: u32) -> PostsPage {
    PostsPage {
        posts,
        envelope: PaginationEnvelope::new(current, total),
    }
}

pub fn profile_of(username: &str, posts: Vec<PostRecord>, current: u32, total: u32) -> ProfileRecord {
    ProfileRecord {
        username: username.to_string(),
        viewer_is_same_user: false,
        viewer_is_following: false,
        follower_count: 3,
        following_count: 1,
        joined_date: "March 2021".to_string(),
        posts,
        envelope: PaginationEnvelope::new(current, total),
    }
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list_posts(&self, filter: PostsFilter, page: u32) -> Result<PostsPage, ApiError> {
        let endpoint = Endpoint::Posts { filter, page };
        let path = endpoint.path();
        self.record("GET", endpoint);
        self.pages
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| ApiError::rejected(404, "That page contains no results"))
    }

    async fn get_profile(&self, username: &str, page: u32) -> Result<ProfileRecord, ApiError> {
        let endpoint = Endpoint::Profile { username, page };
        let path = endpoint.path();
        self.record("GET", endpoint);
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(ApiError::rejected(503, "Service unavailable"));
        }
        let mut profile = self
            .profiles
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| ApiError::rejected(404, "User not found."))?;
        // Any known account counts as the session's owner.
        let known = self.credentials.lock().unwrap().contains_key(username);
        let has_session = self.session.lock().unwrap().is_some();
        profile.viewer_is_same_user = has_session && known;
        Ok(profile)
    }

    async fn create_post(&self, _content: &str) -> Result<(), ApiError> {
        self.record("POST", Endpoint::MakePost);
        self.check_mutation()
    }

    async fn set_follow(&self, username: &str, page: u32, follow: bool) -> Result<u64, ApiError> {
        self.record("POST", Endpoint::Profile { username, page });
        self.check_mutation()?;
        let mut count = self.follower_count.lock().unwrap();
        *count = if follow { *count + 1 } else { count.saturating_sub(1) };
        Ok(*count)
    }

    async fn set_like(&self, id: PostId, like: bool) -> Result<u64, ApiError> {
        self.record("PUT", Endpoint::Post { id });
        self.check_mutation()?;
        let mut counts = self.like_counts.lock().unwrap();
        let count = counts.entry(id).or_insert(0);
        *count = if like { *count + 1 } else { count.saturating_sub(1) };
        Ok(*count)
    }

    async fn edit_post(&self, id: PostId, _content: &str) -> Result<(), ApiError> {
        self.record("PUT", Endpoint::Post { id });
        self.check_mutation()
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.record("POST", Endpoint::Login);
        let ok = self
            .credentials
            .lock()
            .unwrap()
            .get(username)
            .is_some_and(|p| p == password);
        if !ok {
            return Err(ApiError::rejected(401, "Invalid username and/or password."));
        }
        *self.session.lock().unwrap() = Some("fake-session".to_string());
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("GET", Endpoint::Logout);
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn register(
        &self,
        username: &str,
        _email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        self.record("POST", Endpoint::Register);
        if password != confirmation {
            return Err(ApiError::rejected(400, "Passwords must match."));
        }
        let mut credentials = self.credentials.lock().unwrap();
        if credentials.contains_key(username) {
            return Err(ApiError::rejected(400, "Username already taken."));
        }
        credentials.insert(username.to_string(), password.to_string());
        *self.session.lock().unwrap() = Some("fake-session".to_string());
        Ok(())
    }

    fn session_cookie(&self) -> Option<String> {
        self.session.lock().unwrap().clone()
    }

    fn restore_session_cookie(&self, value: &str) {
        *self.session.lock().unwrap() = Some(value.to_string());
    }

    fn clear_session_cookie(&self) {
        *self.session.lock().unwrap() = None;
    }
}
