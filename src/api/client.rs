use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::sse::{self, EVENT_STREAM};
use super::{ClientError, HttpRequest, HttpResponse, Method, Result, Transport};
use crate::render::ExportFormat;
use crate::tree::AttackTree;

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name, else email, else `"User"`.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("User")
    }
}

/// Response of `GET /auth/user`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthStatus {
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("User", User::display_name)
    }
}

/// Client for the attack tree backend.
///
/// One request per call and no retries.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> ApiClient<T> {
    /// `base_url` may be empty for same-origin requests.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { transport, base_url }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn login_url(&self) -> String {
        self.url("/auth/login")
    }

    pub fn logout_url(&self) -> String {
        self.url("/auth/logout")
    }

    /// `POST /generate`. Accepts a plain JSON tree or an event stream.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<AttackTree> {
        info!(title = %request.title, "requesting attack tree");
        let response = self
            .send(Method::Post, "/generate", Some(serde_json::to_string(request)?))
            .await?;

        let tree = if response.has_content_type(EVENT_STREAM) {
            sse::read_tree(&String::from_utf8_lossy(&response.body))?
        } else {
            serde_json::from_slice(&response.body)?
        };
        debug!(nodes = tree.nodes.len(), "received attack tree");
        Ok(tree)
    }

    /// `POST /render?format=..`. Returns the image bytes.
    pub async fn render(&self, tree: &AttackTree, format: ExportFormat) -> Result<Vec<u8>> {
        let path = format!("/render?format={}", format.as_str());
        let response = self
            .send(Method::Post, &path, Some(serde_json::to_string(tree)?))
            .await?;
        debug!(%format, bytes = response.body.len(), "received server rendering");
        Ok(response.body)
    }

    /// `GET /auth/user`.
    pub async fn auth_status(&self) -> Result<AuthStatus> {
        let response = self.send(Method::Get, "/auth/user", None).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            body,
        };
        let response = self.transport.send(request).await?;
        check_status(response)
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    if response.status == 401 {
        warn!("backend rejected request: session expired");
        return Err(ClientError::AuthRequired);
    }
    let detail = error_detail(&response);
    warn!(status = response.status, %detail, "backend request failed");
    Err(ClientError::Backend {
        status: response.status,
        detail,
    })
}

/// `detail` from a JSON error body, or a generic message with the status.
fn error_detail(response: &HttpResponse) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| body.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        Some(serde_json::Value::Null | serde_json::Value::String(_)) | None => {
            format!("HTTP error! status: {}", response.status)
        }
        Some(other) => other.to_string(),
    }
}
