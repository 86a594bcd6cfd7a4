/// Failure of one request against the posts service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("sign in to do that")]
    NotSignedIn,
}

impl ApiError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::ServerRejected {
            status,
            message: message.into(),
        }
    }

    /// Short form for the status bar notice.
    pub fn notice(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server".to_string(),
            ApiError::ServerRejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::ServerRejected { status, .. } => format!("Server error ({})", status),
            ApiError::MalformedResponse(_) => "Unexpected response from the server".to_string(),
            ApiError::NotSignedIn => "Sign in to do that".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_prefers_server_message() {
        let err = ApiError::rejected(400, "User cannot edit other user's posts.");
        assert_eq!(err.notice(), "User cannot edit other user's posts.");
        assert_eq!(ApiError::rejected(502, "").notice(), "Server error (502)");
        assert!(ApiError::MalformedResponse("x".into()).to_string().contains("x"));
    }
}
