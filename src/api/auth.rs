use tracing::{info, warn};

use super::client::PostsApi;
use super::error::ApiError;
use super::session::{SessionData, SessionStore};
use crate::models::view::ViewerSession;

pub enum AuthResult {
    Success(ViewerSession),
    Anonymous,
}

/// The server reports `is_signed_in_user` on the viewer's own profile, which
/// is how a session cookie is confirmed to still be live.
async fn verify(client: &dyn PostsApi, username: &str) -> Result<bool, ApiError> {
    let profile = client.get_profile(username, 1).await?;
    Ok(profile.viewer_is_same_user)
}

pub async fn try_restore_session(client: &dyn PostsApi, store: &SessionStore) -> AuthResult {
    match store.load() {
        Ok(Some(session_data)) => {
            info!("Found saved session for {}", session_data.username);
            client.restore_session_cookie(&session_data.session_cookie);
            match verify(client, &session_data.username).await {
                Ok(true) => {
                    info!("Session restored for {}", session_data.username);
                    AuthResult::Success(ViewerSession::new(session_data.username))
                }
                Ok(false) => {
                    warn!("Saved session for {} has expired", session_data.username);
                    client.clear_session_cookie();
                    let _ = store.clear();
                    AuthResult::Anonymous
                }
                Err(e) => {
                    // Saved file is kept for the next start; this run stays anonymous.
                    warn!("Failed to restore session: {}", e);
                    client.clear_session_cookie();
                    AuthResult::Anonymous
                }
            }
        }
        Ok(None) => {
            info!("No saved session found");
            AuthResult::Anonymous
        }
        Err(e) => {
            warn!("Error loading session: {}", e);
            AuthResult::Anonymous
        }
    }
}

pub async fn login(
    client: &dyn PostsApi,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> Result<ViewerSession, ApiError> {
    client.login(username, password).await?;
    establish(client, store, username).await
}

/// Creates the account and signs it in, persisting the session as `login` does.
pub async fn register(
    client: &dyn PostsApi,
    store: &SessionStore,
    form: &Registration,
) -> Result<ViewerSession, ApiError> {
    client
        .register(&form.username, &form.email, &form.password, &form.confirmation)
        .await?;
    establish(client, store, &form.username).await
}

/// Fields of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

async fn establish(
    client: &dyn PostsApi,
    store: &SessionStore,
    username: &str,
) -> Result<ViewerSession, ApiError> {
    if !verify(client, username).await? {
        client.clear_session_cookie();
        return Err(ApiError::rejected(401, "Invalid username and/or password."));
    }

    match client.session_cookie() {
        Some(session_cookie) => {
            let data = SessionData {
                username: username.to_string(),
                session_cookie,
            };
            if let Err(e) = store.save(&data) {
                warn!("Could not save session: {}", e);
            }
        }
        None => warn!("Signed in without a session cookie; session will not persist"),
    }

    info!("Signed in as {}", username);
    Ok(ViewerSession::new(username))
}

pub async fn logout(client: &dyn PostsApi, store: &SessionStore) -> Result<(), ApiError> {
    if let Err(e) = store.clear() {
        warn!("Could not clear saved session: {}", e);
    }
    client.logout().await
}
