//! Firebase Authentication over its REST API.
//!
//! Email/password sign-in goes to the Identity Toolkit, id tokens are
//! refreshed through the Secure Token service. The refresh token and the
//! user profile are persisted so a reload keeps the session.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::provider::{AuthError, IdentityProvider, SessionUser};
use super::storage::SessionStorage;
use crate::shared::http::{ApiRequest, ApiResponse, Transport};

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Cached id tokens closer than this to expiry are refreshed before use
const REFRESH_MARGIN_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub identity_url: String,
    pub token_url: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: IDENTITY_TOOLKIT_URL.to_string(),
            token_url: SECURE_TOKEN_URL.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ApiKey<'a> {
    key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    display_name: Option<String>,
    photo_url: Option<String>,
}

#[derive(Serialize)]
struct RefreshRequest {
    grant_type: &'static str,
    refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// What survives a page reload
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    user: SessionUser,
    refresh_token: String,
}

#[derive(Debug, Clone)]
struct ActiveSession {
    user: SessionUser,
    id_token: Option<String>,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl ActiveSession {
    fn fresh_token(&self, now: DateTime<Utc>) -> Option<String> {
        let token = self.id_token.as_ref()?;
        if self.expires_at - now > Duration::seconds(REFRESH_MARGIN_SECS) {
            Some(token.clone())
        } else {
            None
        }
    }
}

/// Maps an Identity Toolkit / Secure Token error message to [`AuthError`].
///
/// Messages look like `INVALID_PASSWORD` or `TOO_MANY_ATTEMPTS_TRY_LATER : ...`.
fn map_error_message(message: &str) -> AuthError {
    let code = message
        .split(|c: char| c == ' ' || c == ':')
        .next()
        .unwrap_or(message);

    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL"
        | "MISSING_PASSWORD" => AuthError::InvalidCredentials,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" => {
            AuthError::SessionExpired
        }
        "USER_DISABLED" => AuthError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::Provider(message.to_string()),
    }
}

fn provider_error(response: &ApiResponse) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => map_error_message(&envelope.error.message),
        Err(_) => AuthError::Provider(format!("HTTP {}", response.status)),
    }
}

fn parse_expires_in(expires_in: &str) -> Result<Duration, AuthError> {
    expires_in
        .trim()
        .parse::<i64>()
        .map(Duration::seconds)
        .map_err(|_| AuthError::Decode(format!("invalid expiresIn: {}", expires_in)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn post_json<B, T>(
    transport: &dyn Transport,
    api_key: &str,
    url: &str,
    body: &B,
) -> Result<T, AuthError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = ApiRequest::post(url)
        .query(&ApiKey { key: api_key })
        .and_then(|r| r.json(body))
        .map_err(|e| AuthError::Provider(e.to_string()))?;

    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(provider_error(&response));
    }

    response
        .json::<T>()
        .map_err(|e| AuthError::Decode(e.to_string()))
}

type RefreshFuture = Shared<LocalBoxFuture<'static, Result<RefreshResponse, AuthError>>>;

/// Refresh request shared by every caller holding the same refresh token
struct PendingRefresh {
    refresh_token: String,
    future: RefreshFuture,
}

pub struct FirebaseIdentity {
    config: FirebaseConfig,
    transport: Rc<dyn Transport>,
    storage: Rc<dyn SessionStorage>,
    state: RefCell<Option<ActiveSession>>,
    pending: RefCell<Option<PendingRefresh>>,
}

impl FirebaseIdentity {
    pub fn new(
        config: FirebaseConfig,
        transport: Rc<dyn Transport>,
        storage: Rc<dyn SessionStorage>,
    ) -> Self {
        Self {
            config,
            transport,
            storage,
            state: RefCell::new(None),
            pending: RefCell::new(None),
        }
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        post_json(self.transport.as_ref(), &self.config.api_key, url, body).await
    }

    /// Joins the in-flight refresh for `refresh_token`, or starts one
    fn refresh(&self, refresh_token: &str) -> RefreshFuture {
        let mut pending = self.pending.borrow_mut();
        if let Some(in_flight) = pending
            .as_ref()
            .filter(|p| p.refresh_token == refresh_token)
        {
            return in_flight.future.clone();
        }

        let transport = self.transport.clone();
        let api_key = self.config.api_key.clone();
        let url = format!("{}/token", self.config.token_url);
        let body = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token: refresh_token.to_string(),
        };
        let future = async move { post_json(transport.as_ref(), &api_key, &url, &body).await }
            .boxed_local()
            .shared();

        *pending = Some(PendingRefresh {
            refresh_token: refresh_token.to_string(),
            future: future.clone(),
        });
        future
    }

    /// Drops the session that was refreshed with `refresh_token`, if it is
    /// still the current one
    fn expire(&self, uid: &str, refresh_token: &str) {
        let mut state = self.state.borrow_mut();
        let current = state
            .as_ref()
            .is_some_and(|s| s.user.uid == uid && s.refresh_token == refresh_token);
        if current {
            *state = None;
            self.storage.clear();
            log::warn!("Session of {} is no longer valid, signed out", uid);
        }
    }

    async fn lookup_profile(&self, id_token: &str) -> Result<Option<LookupUser>, AuthError> {
        let url = format!("{}/accounts:lookup", self.config.identity_url);
        let response: LookupResponse = self.post(&url, &LookupRequest { id_token }).await?;
        Ok(response.users.into_iter().next())
    }

    fn persist(&self, session: &ActiveSession) {
        let persisted = PersistedSession {
            user: session.user.clone(),
            refresh_token: session.refresh_token.clone(),
        };
        match serde_json::to_string(&persisted) {
            Ok(json) => self.storage.save(&json),
            Err(e) => log::warn!("Failed to serialize session: {}", e),
        }
    }

    fn activate(&self, session: ActiveSession) {
        self.persist(&session);
        *self.state.borrow_mut() = Some(session);
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseIdentity {
    fn current_user(&self) -> Option<SessionUser> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    async fn id_token(&self, user: &SessionUser) -> Result<String, AuthError> {
        let refresh_token = {
            let state = self.state.borrow();
            let session = state
                .as_ref()
                .filter(|s| s.user.uid == user.uid)
                .ok_or(AuthError::NoSession)?;
            if let Some(token) = session.fresh_token(Utc::now()) {
                return Ok(token);
            }
            session.refresh_token.clone()
        };

        log::debug!("Refreshing id token for {}", user.uid);
        let result = self.refresh(&refresh_token).await;
        {
            let mut pending = self.pending.borrow_mut();
            if pending
                .as_ref()
                .is_some_and(|p| p.refresh_token == refresh_token)
            {
                *pending = None;
            }
        }

        let response = match result {
            Ok(response) => response,
            Err(e @ (AuthError::SessionExpired | AuthError::UserDisabled)) => {
                self.expire(&user.uid, &refresh_token);
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let lifetime = parse_expires_in(&response.expires_in)?;

        // Only the first waiter applies the rotation; a sign-out while the
        // refresh was in flight wins
        let updated = {
            let mut state = self.state.borrow_mut();
            match state
                .as_mut()
                .filter(|s| s.user.uid == user.uid && s.refresh_token == refresh_token)
            {
                Some(session) => {
                    session.id_token = Some(response.id_token.clone());
                    session.refresh_token = response.refresh_token;
                    session.expires_at = Utc::now() + lifetime;
                    Some(session.clone())
                }
                None => None,
            }
        };
        if let Some(session) = updated {
            self.persist(&session);
        }

        Ok(response.id_token)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let url = format!("{}/accounts:signInWithPassword", self.config.identity_url);
        let response: SignInResponse = self
            .post(
                &url,
                &SignInRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let lifetime = parse_expires_in(&response.expires_in)?;

        let mut user = SessionUser {
            uid: response.local_id,
            email: non_empty(response.email),
            display_name: non_empty(response.display_name),
            photo_url: None,
        };

        match self.lookup_profile(&response.id_token).await {
            Ok(Some(profile)) => {
                user.display_name = non_empty(profile.display_name).or(user.display_name);
                user.photo_url = non_empty(profile.photo_url);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Profile lookup failed: {}", e),
        }

        self.activate(ActiveSession {
            user: user.clone(),
            id_token: Some(response.id_token),
            refresh_token: response.refresh_token,
            expires_at: Utc::now() + lifetime,
        });

        Ok(user)
    }

    fn restore(&self) -> Option<SessionUser> {
        let raw = self.storage.load()?;
        let persisted: PersistedSession = match serde_json::from_str(&raw) {
            Ok(persisted) => persisted,
            Err(e) => {
                log::warn!("Discarding unreadable persisted session: {}", e);
                self.storage.clear();
                return None;
            }
        };

        let user = persisted.user.clone();
        *self.state.borrow_mut() = Some(ActiveSession {
            user: persisted.user,
            id_token: None,
            refresh_token: persisted.refresh_token,
            expires_at: Utc::now(),
        });
        Some(user)
    }

    fn sign_out(&self) {
        *self.state.borrow_mut() = None;
        *self.pending.borrow_mut() = None;
        self.storage.clear();
    }
}
