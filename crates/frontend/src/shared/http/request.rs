use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Outgoing request description.
///
/// `url` is either a path relative to the API base (`/transactions/summary`)
/// or, once it reaches a [`Transport`](super::Transport), an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Appends `params` as a query string
    pub fn query<Q: Serialize>(mut self, params: &Q) -> Result<Self, ApiError> {
        let query = serde_qs::to_string(params).map_err(|e| ApiError::Encode(e.to_string()))?;
        if !query.is_empty() {
            let separator = if self.url.contains('?') { '&' } else { '?' };
            self.url = format!("{}{}{}", self.url, separator, query);
        }
        Ok(self)
    }

    /// Sets a JSON body and the matching content type
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.set_header("Content-Type", "application/json");
        self.body = Some(body);
        Ok(self)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replaces any header with the same (case-insensitive) name
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Params {
        month: u32,
        year: i32,
    }

    #[test]
    fn test_query_appends_parameters() {
        let request = ApiRequest::get("/transactions/summary")
            .query(&Params {
                month: 3,
                year: 2025,
            })
            .unwrap();
        assert_eq!(request.url, "/transactions/summary?month=3&year=2025");

        let request = ApiRequest::get("/accounts?key=abc")
            .query(&Params {
                month: 1,
                year: 2024,
            })
            .unwrap();
        assert_eq!(request.url, "/accounts?key=abc&month=1&year=2024");
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut request = ApiRequest::get("/x").header("authorization", "Bearer old");
        request.set_header(AUTHORIZATION, "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header_value("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn test_json_sets_body_and_content_type() {
        let request = ApiRequest::post("/login")
            .json(&serde_json::json!({"email": "a@b.c"}))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
        assert_eq!(request.header_value("content-type"), Some("application/json"));
    }

    #[test]
    fn test_response_status_and_decode() {
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(401, "").is_success());

        let response = ApiResponse::new(200, "not json");
        assert!(matches!(response.json::<Vec<u8>>(), Err(ApiError::Decode(_))));
    }
}
