//! Backend API: tree generation, server-side rendering and auth status.
//!
//! Requests go through a [`Transport`] so the client logic runs the same
//! against `fetch` in the browser and an in-memory script in tests.

mod client;
pub mod sse;

#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

pub use client::{ApiClient, AuthStatus, GenerateRequest, User};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 401 from any endpoint.
    #[error("Session expired. Please log in again.")]
    AuthRequired,
    /// Non-success response; `detail` is what the user sees.
    #[error("{detail}")]
    Backend { status: u16, detail: String },
    /// The generation stream reported an error or ended without a tree.
    #[error("{0}")]
    GenerationFailed(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request to the backend. Bodies are always JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the content type names `mime`, ignoring parameters.
    pub fn has_content_type(&self, mime: &str) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(mime))
        })
    }
}

/// Sends one HTTP request. Implementations never retry.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>>;
}
