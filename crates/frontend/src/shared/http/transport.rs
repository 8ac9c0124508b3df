use std::time::Duration;

use async_trait::async_trait;
use gloo_net::http::RequestBuilder;
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

use super::error::TransportError;
use super::request::{ApiRequest, ApiResponse, Method};

/// Client-side limit for a single request. Not retried.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a fully resolved request and returns the raw response.
///
/// Non-2xx statuses are not errors at this level.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Browser `fetch` transport built on gloo-net
#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    timeout: Duration,
}

impl FetchTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(REQUEST_TIMEOUT)
    }
}

fn gloo_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Patch => gloo_net::http::Method::PATCH,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let controller = AbortController::new()
            .map_err(|e| TransportError::Build(format!("AbortController: {:?}", e)))?;
        let signal = controller.signal();

        let mut builder = RequestBuilder::new(&request.url)
            .method(gloo_method(request.method))
            .abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        // Dropping the timer before it fires cancels it
        let timer = Timeout::new(self.timeout.as_millis() as u32, move || controller.abort());

        let result = prepared.send().await;
        drop(timer);

        let response = result.map_err(|e| {
            if signal.aborted() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}
