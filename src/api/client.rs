use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::models::page::PostsPage;
use crate::models::post::PostId;
use crate::models::profile::ProfileRecord;

pub const SESSION_COOKIE: &str = "sessionid";
const CSRF_COOKIE: &str = "csrftoken";

/// Which listing `GET /posts/{filter}/{page}` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostsFilter {
    All,
    Following,
}

impl PostsFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PostsFilter::All => "all",
            PostsFilter::Following => "following",
        }
    }
}

/// Routes of the posts service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Posts { filter: PostsFilter, page: u32 },
    MakePost,
    Profile { username: &'a str, page: u32 },
    Post { id: PostId },
    Login,
    Logout,
    Register,
}

impl Endpoint<'_> {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Posts { filter, page } => format!("/posts/{}/{}", filter.as_str(), page),
            Endpoint::MakePost => "/make-post".to_string(),
            Endpoint::Profile { username, page } => {
                format!("/profile/{}/{}", urlencoding::encode(username), page)
            }
            Endpoint::Post { id } => format!("/post/{}", id),
            Endpoint::Login => "/login".to_string(),
            Endpoint::Logout => "/logout".to_string(),
            Endpoint::Register => "/register".to_string(),
        }
    }
}

/// Everything the UI needs from the server.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self, filter: PostsFilter, page: u32) -> Result<PostsPage, ApiError>;

    async fn get_profile(&self, username: &str, page: u32) -> Result<ProfileRecord, ApiError>;

    async fn create_post(&self, content: &str) -> Result<(), ApiError>;

    /// Returns the server's follower count after the change.
    async fn set_follow(&self, username: &str, page: u32, follow: bool) -> Result<u64, ApiError>;

    /// Returns the server's like count after the change.
    async fn set_like(&self, id: PostId, like: bool) -> Result<u64, ApiError>;

    async fn edit_post(&self, id: PostId, content: &str) -> Result<(), ApiError>;

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// Creates an account and signs it in. The server checks that
    /// `confirmation` matches `password`.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError>;

    /// Current session cookie value, if the server has issued one.
    fn session_cookie(&self) -> Option<String>;

    fn restore_session_cookie(&self, value: &str);

    /// Drops the session cookie so later requests go out anonymous.
    fn clear_session_cookie(&self);
}

/// Messages the registration page re-renders with on failure.
const REGISTER_FAILURES: [&str; 2] = ["Passwords must match.", "Username already taken."];

fn register_failure(body: &str) -> ApiError {
    let message = REGISTER_FAILURES
        .iter()
        .find(|m| body.contains(*m))
        .copied()
        .unwrap_or("Registration failed.");
    ApiError::rejected(400, message)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LikeResponse {
    like_count: u64,
}

#[derive(Deserialize)]
struct FollowResponse {
    follower_count: u64,
}

/// `PostsApi` over HTTP with a cookie-backed session.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()?;
        Ok(HttpClient {
            http,
            base_url,
            jar,
        })
    }

    fn url(&self, endpoint: &Endpoint<'_>) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, endpoint.path()))
            .map_err(|e| ApiError::MalformedResponse(format!("bad url: {}", e)))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name && !v.is_empty()).then(|| v.to_string())
        })
    }

    async fn send(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let url = self.url(&endpoint)?;
        debug!("{} {}", method, url.path());
        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(rejection(status, &text));
        }
        Ok(text)
    }

    /// Fetches a CSRF-protected form page, then posts `fields` to it.
    /// Returns the response body of the post.
    async fn post_form(
        &self,
        endpoint: Endpoint<'_>,
        fields: &[(&str, &str)],
    ) -> Result<String, ApiError> {
        // Fetching the form sets the token cookie.
        self.send(Method::GET, endpoint.clone(), None).await?;
        let csrf = self.cookie(CSRF_COOKIE).unwrap_or_default();

        let mut form: Vec<(&str, &str)> = fields.to_vec();
        form.push(("csrfmiddlewaretoken", csrf.as_str()));

        let url = self.url(&endpoint)?;
        debug!("POST {}", url.path());
        let resp = self
            .http
            .post(url.clone())
            .header(reqwest::header::REFERER, url.as_str())
            .header("X-CSRFToken", &csrf)
            .form(&form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, endpoint, body).await?;
        decode(&text)
    }
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();
    warn!("request rejected: {} {}", status, message);
    ApiError::rejected(status.as_u16(), message)
}

pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl PostsApi for HttpClient {
    async fn list_posts(&self, filter: PostsFilter, page: u32) -> Result<PostsPage, ApiError> {
        let mut result: PostsPage = self
            .send_json(Method::GET, Endpoint::Posts { filter, page }, None)
            .await?;
        result.envelope = result
            .envelope
            .validate()
            .map_err(ApiError::MalformedResponse)?;
        Ok(result)
    }

    async fn get_profile(&self, username: &str, page: u32) -> Result<ProfileRecord, ApiError> {
        let mut result: ProfileRecord = self
            .send_json(Method::GET, Endpoint::Profile { username, page }, None)
            .await?;
        result.envelope = result
            .envelope
            .validate()
            .map_err(ApiError::MalformedResponse)?;
        Ok(result)
    }

    async fn create_post(&self, content: &str) -> Result<(), ApiError> {
        self.send(Method::POST, Endpoint::MakePost, Some(json!({ "content": content })))
            .await?;
        Ok(())
    }

    async fn set_follow(&self, username: &str, page: u32, follow: bool) -> Result<u64, ApiError> {
        let resp: FollowResponse = self
            .send_json(
                Method::POST,
                Endpoint::Profile { username, page },
                Some(json!({ "follow": follow })),
            )
            .await?;
        Ok(resp.follower_count)
    }

    async fn set_like(&self, id: PostId, like: bool) -> Result<u64, ApiError> {
        let resp: LikeResponse = self
            .send_json(Method::PUT, Endpoint::Post { id }, Some(json!({ "like": like })))
            .await?;
        Ok(resp.like_count)
    }

    async fn edit_post(&self, id: PostId, content: &str) -> Result<(), ApiError> {
        self.send(Method::PUT, Endpoint::Post { id }, Some(json!({ "edit": content })))
            .await?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.post_form(
            Endpoint::Login,
            &[("username", username), ("password", password)],
        )
        .await?;

        // A failed login re-renders the form with 200, so the cookie is the signal.
        if self.cookie(SESSION_COOKIE).is_none() {
            return Err(ApiError::rejected(401, "Invalid username and/or password."));
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send(Method::GET, Endpoint::Logout, None).await?;
        Ok(())
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        let body = self
            .post_form(
                Endpoint::Register,
                &[
                    ("username", username),
                    ("email", email),
                    ("password", password),
                    ("confirmation", confirmation),
                ],
            )
            .await?;

        if self.cookie(SESSION_COOKIE).is_none() {
            return Err(register_failure(&body));
        }
        Ok(())
    }

    fn session_cookie(&self) -> Option<String> {
        self.cookie(SESSION_COOKIE)
    }

    fn restore_session_cookie(&self, value: &str) {
        self.jar
            .add_cookie_str(&format!("{}={}; Path=/", SESSION_COOKIE, value), &self.base_url);
    }

    fn clear_session_cookie(&self) {
        self.jar
            .add_cookie_str(&format!("{}=; Max-Age=0; Path=/", SESSION_COOKIE), &self.base_url);
    }
}
