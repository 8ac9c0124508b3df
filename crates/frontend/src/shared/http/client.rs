use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse, AUTHORIZATION};
use super::transport::Transport;
use crate::system::auth::session::SessionContext;

/// Backend client that authenticates every request with the session's
/// current id token.
///
/// Tokens are never cached here: each call asks the session again and
/// relies on the identity provider's own caching. When the token cannot be
/// obtained the request still goes out, unauthenticated, and the backend
/// decides.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn Transport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Rc<dyn Transport>, session: SessionContext) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    /// Sets `Authorization: Bearer <token>` when a session is active
    async fn authorize(&self, request: &mut ApiRequest) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        match self.session.id_token(&user).await {
            Ok(token) => request.set_header(AUTHORIZATION, format!("Bearer {}", token)),
            Err(e) => log::error!("Failed to obtain id token, sending request without it: {}", e),
        }
    }

    /// Authenticates and dispatches `request`; non-2xx statuses become
    /// [`ApiError::Status`]
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.authorize(&mut request).await;
        request.url = self.resolve(&request.url);

        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        log::debug!("{} {} -> {}", method.as_str(), url, response.status);

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let request = ApiRequest::get(path).query(query)?;
        self.send(request).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::TransportError;
    use crate::system::auth::provider::AuthError;
    use crate::testing::{sample_user, RecordingTransport, StubIdentity};

    const BASE: &str = "https://api.controleja.test/api";

    fn client_with(identity: StubIdentity) -> (Rc<RecordingTransport>, Rc<StubIdentity>, ApiClient) {
        let transport = Rc::new(RecordingTransport::new());
        let identity = Rc::new(identity);
        let session = SessionContext::new(identity.clone());
        session.initialize();
        let client = ApiClient::new(BASE, transport.clone(), session);
        (transport, identity, client)
    }

    #[tokio::test]
    async fn test_active_session_sets_bearer_header() {
        let (transport, _, client) = client_with(StubIdentity::signed_in(sample_user(), "tok-1"));

        client.send(ApiRequest::get("/transactions")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value(AUTHORIZATION), Some("Bearer tok-1"));
    }

    #[tokio::test]
    async fn test_token_is_resolved_for_every_request() {
        let (transport, identity, client) =
            client_with(StubIdentity::signed_in(sample_user(), "fallback"));
        identity.queue_tokens(&["first", "second"]);

        client.send(ApiRequest::get("/a")).await.unwrap();
        client.send(ApiRequest::get("/b")).await.unwrap();

        let headers: Vec<_> = transport
            .requests()
            .iter()
            .map(|r| r.header_value(AUTHORIZATION).map(str::to_string))
            .collect();
        assert_eq!(
            headers,
            vec![Some("Bearer first".to_string()), Some("Bearer second".to_string())]
        );
        assert_eq!(identity.token_calls(), 2);
    }

    #[tokio::test]
    async fn test_no_session_sends_without_header() {
        let (transport, identity, client) = client_with(StubIdentity::signed_out());

        client.send(ApiRequest::get("/transactions")).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value(AUTHORIZATION), None);
        assert_eq!(identity.token_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_failure_still_dispatches_unauthenticated() {
        let (transport, identity, client) = client_with(StubIdentity::failing(
            sample_user(),
            AuthError::Transport(TransportError::Network("offline".to_string())),
        ));

        let result = client.send(ApiRequest::get("/transactions")).await;

        assert!(result.is_ok());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header_value(AUTHORIZATION), None);
        assert_eq!(identity.token_calls(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_session_sends_without_header() {
        let (transport, _, client) = client_with(StubIdentity::signed_in(sample_user(), "t"));
        client.session().sign_out();

        client.send(ApiRequest::get("/x")).await.unwrap();

        assert_eq!(transport.requests()[0].header_value(AUTHORIZATION), None);
    }

    #[tokio::test]
    async fn test_paths_resolve_against_base() {
        let (transport, _, client) = client_with(StubIdentity::signed_out());

        client.send(ApiRequest::get("/transactions")).await.unwrap();
        client.send(ApiRequest::get("health")).await.unwrap();
        client.send(ApiRequest::get("https://other.test/x")).await.unwrap();

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                format!("{}/transactions", BASE),
                format!("{}/health", BASE),
                "https://other.test/x".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let (transport, _, client) = client_with(StubIdentity::signed_out());
        transport.route("/transactions", ApiResponse::new(401, "unauthorized"));

        let result = client.send(ApiRequest::get("/transactions")).await;

        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 401,
                body: "unauthorized".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let (transport, _, client) = client_with(StubIdentity::signed_out());
        transport.route_error("/x", TransportError::Timeout(crate::shared::http::REQUEST_TIMEOUT));

        let result = client.send(ApiRequest::get("/x")).await;
        assert!(matches!(result, Err(ApiError::Transport(TransportError::Timeout(_)))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let (_, _, client) = client_with(StubIdentity::signed_out());
        let client = ApiClient::new("http://localhost:3000/api/", client.transport.clone(), client.session.clone());
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }
}
