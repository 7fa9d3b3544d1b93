//! Route identification
//!
//! A route is an (HTTP method, raw path template) pair. Catalog and registry
//! must describe routes in the identical template syntax: equality here is
//! exact string equality on the template, never semantic path matching.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;
use crate::policy::{AccessPolicy, Role};

/// The closed set of HTTP methods the engine knows how to construct
/// requests for.
///
/// Anything outside this set is a [`ConfigError::UnsupportedMethod`] at
/// setup time, never a panic deep in request construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Methods that mutate state and therefore need an anti-forgery token
    /// attached by the invoker, so token validation failures cannot be
    /// mistaken for authorization outcomes.
    pub fn is_mutating(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch | Self::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Parses a method name as reported by framework routing metadata.
    pub fn parse(method: &str) -> Result<Self, ConfigError> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(ConfigError::UnsupportedMethod { method: other.to_string() }),
        }
    }

    pub fn as_http(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Head => http::Method::HEAD,
            Self::Post => http::Method::POST,
            Self::Put => http::Method::PUT,
            Self::Patch => http::Method::PATCH,
            Self::Delete => http::Method::DELETE,
        }
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = ConfigError;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        Self::parse(method.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniquely identifies a declared endpoint by method and raw path template.
///
/// The template may contain named placeholders (`/user/{id}`); they stay
/// raw here and are only concretized by the path normalizer at probe time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteKey {
    pub method: HttpMethod,
    pub template: String,
}

impl RouteKey {
    pub fn new(method: HttpMethod, template: impl Into<String>) -> Self {
        Self { method, template: template.into() }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// A declared authorization policy for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAuthSpec<R: Role> {
    pub route: RouteKey,
    pub access: AccessPolicy<R>,
}

impl<R: Role> RouteAuthSpec<R> {
    pub fn new(method: HttpMethod, template: impl Into<String>, access: AccessPolicy<R>) -> Self {
        Self { route: RouteKey::new(method, template), access }
    }
}
