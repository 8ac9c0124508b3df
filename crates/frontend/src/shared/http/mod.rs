//! HTTP plumbing: request/response types, the transport seam and the
//! authenticated API client.

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, TransportError};
pub use request::{ApiRequest, ApiResponse, Method, AUTHORIZATION};
pub use transport::{FetchTransport, Transport, REQUEST_TIMEOUT};
