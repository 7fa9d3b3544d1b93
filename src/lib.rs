//! # Authz Coverage - Authorization Conformance Testing
//!
//! Verifies that every HTTP endpoint a service exposes carries a declared
//! authorization policy that is actually enforced, and that no declared
//! policy points at a route that no longer exists.
//!
//! The crate is consumed by a test suite. The suite declares a catalog of
//! route/policy pairs, wires up two narrow collaborators (a route registry
//! and a request invoker), and gets back:
//!
//! - a [`coverage::CoverageReport`] diffing the catalog against the live
//!   route set, and
//! - a fully materialized matrix of independently executable test cases,
//!   one per route for the anonymous caller plus one per (route, role) pair.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authz_coverage::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum AppRole { Admin, Basic }
//!
//! impl Role for AppRole {
//!     fn label(&self) -> &'static str {
//!         match self {
//!             AppRole::Admin => "ADMIN",
//!             AppRole::Basic => "BASIC",
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> authz_coverage::Result<()> {
//!     let catalog = SpecCatalog::builder()
//!         .route(HttpMethod::Get, "/user/{id}", AccessPolicy::unauthenticated())
//!         .route(HttpMethod::Post, "/user", AccessPolicy::any_role([AppRole::Admin])?)
//!         .build()?;
//!
//!     let invoker = HttpInvoker::new("http://127.0.0.1:8080")
//!         .with_role_credential("ADMIN", "admin-token")
//!         .with_role_credential("BASIC", "basic-token");
//!     let probe = AuthorizationProbe::new(invoker);
//!
//!     for case in generate_matrix(&catalog, &[AppRole::Admin, AppRole::Basic]) {
//!         let result = case.execute(&probe).await;
//!         assert!(result.outcome.is_pass(), "{}: {:?}", result.name, result.outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - The catalog is an immutable value passed explicitly into the analyzer,
//!   probe, and generator; there is no ambient state, so cases have no
//!   initialization-order dependency and may run concurrently.
//! - Malformed declarations (empty role sets, duplicate routes, unsupported
//!   methods) abort at build time with a [`ConfigError`]; runtime failures
//!   stay isolated to the single case that observed them.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]

pub mod catalog;
pub mod coverage;
pub mod decision;
pub mod error;
pub mod invoker;
pub mod matrix;
pub mod normalize;
pub mod policy;
pub mod probe;
pub mod registry;
pub mod route;

pub use error::{AuditError, ConfigError, CoverageFailure, ProbeError, Result};

/// Convenient re-exports for common use cases
pub mod prelude {
    pub use crate::catalog::{CatalogBuilder, SpecCatalog};
    pub use crate::coverage::{analyze_coverage, CoverageReport, Whitelist};
    pub use crate::decision::{decide, Verdict};
    pub use crate::error::{AuditError, ConfigError, CoverageFailure, ProbeError, Result};
    pub use crate::invoker::{HttpInvoker, IdentityClaim, RequestInvoker};
    pub use crate::matrix::{generate_matrix, run_matrix, AuthTestCase, CaseOutcome, CaseResult};
    pub use crate::normalize::normalize_path;
    pub use crate::policy::{AccessPolicy, Identity, Role, RoleSet};
    pub use crate::probe::AuthorizationProbe;
    pub use crate::registry::{RouteRegistry, StaticRegistry};
    pub use crate::route::{HttpMethod, RouteAuthSpec, RouteKey};
}

/// Current version of the authz-coverage crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
