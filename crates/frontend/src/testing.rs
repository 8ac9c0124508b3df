//! Test doubles shared by unit tests across the crate.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::shared::http::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::system::auth::provider::{AuthError, IdentityProvider, SessionUser};
use crate::system::auth::storage::SessionStorage;

pub fn sample_user() -> SessionUser {
    SessionUser {
        uid: "uid-1".to_string(),
        email: Some("ana@example.com".to_string()),
        display_name: Some("Ana Souza".to_string()),
        photo_url: None,
    }
}

/// Records every request and answers from routes, held channels or a default
pub struct RecordingTransport {
    requests: RefCell<Vec<ApiRequest>>,
    routes: RefCell<Vec<(String, VecDeque<Result<ApiResponse, TransportError>>)>>,
    held: RefCell<HashMap<String, oneshot::Receiver<ApiResponse>>>,
    default: ApiResponse,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_default(ApiResponse::new(200, "{}"))
    }

    pub fn with_default(default: ApiResponse) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            routes: RefCell::new(Vec::new()),
            held: RefCell::new(HashMap::new()),
            default,
        }
    }

    /// Queues a response for requests whose URL contains `fragment`.
    /// Queued responses are consumed in order; the last one repeats.
    pub fn route(&self, fragment: &str, response: ApiResponse) {
        self.push_route(fragment, Ok(response));
    }

    pub fn route_error(&self, fragment: &str, error: TransportError) {
        self.push_route(fragment, Err(error));
    }

    fn push_route(&self, fragment: &str, result: Result<ApiResponse, TransportError>) {
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|(f, _)| f == fragment) {
            Some((_, queue)) => queue.push_back(result),
            None => routes.push((fragment.to_string(), VecDeque::from([result]))),
        }
    }

    /// The request to exactly `url` stays pending until the sender fires
    pub fn hold(&self, url: &str) -> oneshot::Sender<ApiResponse> {
        let (tx, rx) = oneshot::channel();
        self.held.borrow_mut().insert(url.to_string(), rx);
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    fn routed(&self, url: &str) -> Option<Result<ApiResponse, TransportError>> {
        let mut routes = self.routes.borrow_mut();
        let (_, queue) = routes.iter_mut().find(|(f, _)| url.contains(f.as_str()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);

        let held = self.held.borrow_mut().remove(&url);
        if let Some(rx) = held {
            return rx
                .await
                .map_err(|_| TransportError::Network("held response dropped".to_string()));
        }

        self.routed(&url).unwrap_or_else(|| Ok(self.default.clone()))
    }
}

/// Identity provider with scripted users and tokens
pub struct StubIdentity {
    user: RefCell<Option<SessionUser>>,
    persisted: Option<SessionUser>,
    tokens: RefCell<VecDeque<Result<String, AuthError>>>,
    fallback_token: Option<String>,
    token_calls: Cell<usize>,
    restore_calls: Cell<usize>,
}

impl StubIdentity {
    fn build(
        user: Option<SessionUser>,
        persisted: Option<SessionUser>,
        fallback_token: Option<String>,
    ) -> Self {
        Self {
            user: RefCell::new(user),
            persisted,
            tokens: RefCell::new(VecDeque::new()),
            fallback_token,
            token_calls: Cell::new(0),
            restore_calls: Cell::new(0),
        }
    }

    pub fn signed_in(user: SessionUser, token: &str) -> Self {
        Self::build(Some(user), None, Some(token.to_string()))
    }

    pub fn signed_out() -> Self {
        Self::build(None, None, Some("fresh-token".to_string()))
    }

    pub fn persisted(user: SessionUser) -> Self {
        Self::build(None, Some(user), Some("restored-token".to_string()))
    }

    /// Signed in, but every token request fails with `error`
    pub fn failing(user: SessionUser, error: AuthError) -> Self {
        let stub = Self::build(Some(user), None, None);
        stub.tokens.borrow_mut().push_back(Err(error));
        stub
    }

    /// Tokens handed out one per call before falling back to the default
    pub fn queue_tokens(&self, tokens: &[&str]) {
        self.tokens
            .borrow_mut()
            .extend(tokens.iter().map(|t| Ok(t.to_string())));
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.get()
    }

    pub fn restore_calls(&self) -> usize {
        self.restore_calls.get()
    }
}

#[async_trait(?Send)]
impl IdentityProvider for StubIdentity {
    fn current_user(&self) -> Option<SessionUser> {
        self.user.borrow().clone()
    }

    async fn id_token(&self, _user: &SessionUser) -> Result<String, AuthError> {
        self.token_calls.set(self.token_calls.get() + 1);
        let mut tokens = self.tokens.borrow_mut();
        if let Some(next) = tokens.pop_front() {
            if tokens.is_empty() && self.fallback_token.is_none() {
                // failing stubs keep failing
                tokens.push_back(next.clone());
            }
            return next;
        }
        self.fallback_token
            .clone()
            .ok_or_else(|| AuthError::Provider("no token".to_string()))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<SessionUser, AuthError> {
        let user = SessionUser {
            email: Some(email.to_string()),
            ..sample_user()
        };
        *self.user.borrow_mut() = Some(user.clone());
        Ok(user)
    }

    fn restore(&self) -> Option<SessionUser> {
        self.restore_calls.set(self.restore_calls.get() + 1);
        if let Some(user) = &self.persisted {
            *self.user.borrow_mut() = Some(user.clone());
        }
        self.user.borrow().clone()
    }

    fn sign_out(&self) {
        *self.user.borrow_mut() = None;
    }
}

/// In-memory stand-in for `localStorage`
#[derive(Default)]
pub struct MemoryStorage {
    value: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.value()
    }

    fn save(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}
