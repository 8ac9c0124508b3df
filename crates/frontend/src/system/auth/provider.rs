use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::http::TransportError;

/// The signed-in user as shown by the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl SessionUser {
    /// Display name, falling back to the e-mail address
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid e-mail or password")]
    InvalidCredentials,
    #[error("session expired, sign in again")]
    SessionExpired,
    #[error("user account is disabled")]
    UserDisabled,
    #[error("too many attempts, try again later")]
    TooManyAttempts,
    #[error("no active session")]
    NoSession,
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to parse identity provider response: {0}")]
    Decode(String),
}

/// External source of user identity and short-lived id tokens.
///
/// Implementations own their session state and may cache tokens; callers
/// ask for a token on every use.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// User of the current session, if any
    fn current_user(&self) -> Option<SessionUser>;

    /// A valid id token for `user`; may hit the network
    async fn id_token(&self, user: &SessionUser) -> Result<String, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;

    /// Reloads a persisted session, if one exists
    fn restore(&self) -> Option<SessionUser>;

    fn sign_out(&self);
}
