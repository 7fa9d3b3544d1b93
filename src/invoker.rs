//! Request invocation
//!
//! The transport seam. The engine hands an invoker a method, a concrete
//! path, and an identity claim; everything transport-specific — base URLs,
//! credential material, anti-forgery tokens — lives behind this trait so
//! only authorization semantics are measured.

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use http::StatusCode;
use tracing::debug;

use crate::route::HttpMethod;

/// The identity a request is issued under, in the wire-level shape the
/// service's authentication layer consumes: nothing, or a role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityClaim<'a> {
    Anonymous,
    Role(&'a str),
}

/// Issues one request and reports the raw response status.
///
/// Contract: for mutating methods (`HttpMethod::is_mutating`) the invoker
/// must satisfy any transport-level anti-forgery requirement, so a missing
/// token cannot masquerade as an authorization outcome. Invokers hold no
/// per-request state; every call is independent.
#[async_trait]
pub trait RequestInvoker: Send + Sync {
    async fn invoke(
        &self,
        method: HttpMethod,
        path: &str,
        identity: IdentityClaim<'_>,
    ) -> anyhow::Result<StatusCode>;
}

/// A [`RequestInvoker`] over a live HTTP service.
///
/// Authenticates with a bearer credential configured per role label and
/// attaches a fixed anti-forgery header to mutating requests. Services with
/// per-session anti-forgery tokens implement [`RequestInvoker`] directly.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
    base_url: String,
    credentials: HashMap<String, String>,
    anti_forgery: Option<(String, String)>,
}

impl HttpInvoker {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: HashMap::new(),
            anti_forgery: None,
        }
    }

    /// Registers the bearer token presented when probing as `role_label`.
    pub fn with_role_credential(
        mut self,
        role_label: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.credentials.insert(role_label.into(), token.into());
        self
    }

    /// Header attached to every mutating request.
    pub fn with_anti_forgery_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.anti_forgery = Some((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl RequestInvoker for HttpInvoker {
    async fn invoke(
        &self,
        method: HttpMethod,
        path: &str,
        identity: IdentityClaim<'_>,
    ) -> anyhow::Result<StatusCode> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.as_http(), &url);

        if let IdentityClaim::Role(label) = identity {
            let token = self
                .credentials
                .get(label)
                .ok_or_else(|| anyhow!("no credential configured for role {label}"))?;
            request = request.bearer_auth(token);
        }
        if method.is_mutating() {
            if let Some((name, value)) = &self.anti_forgery {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        debug!(%method, path, identity = ?identity, "issuing authorization probe");
        let response = request
            .send()
            .await
            .with_context(|| format!("{method} {url} did not complete"))?;
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_role_credential_is_a_transport_error() {
        let invoker = HttpInvoker::new("http://127.0.0.1:1");
        let err = invoker
            .invoke(HttpMethod::Get, "/user/0", IdentityClaim::Role("ADMIN"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no credential configured for role ADMIN"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let invoker = HttpInvoker::new("http://localhost:8080/");
        assert_eq!(invoker.base_url, "http://localhost:8080");
    }
}
