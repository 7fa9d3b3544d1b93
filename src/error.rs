//! Error types for the authz-coverage crate
//!
//! The taxonomy separates programmer error from service misbehavior:
//! [`ConfigError`] means the catalog itself is malformed and aborts the run
//! before any case executes; everything else is isolated to the single case
//! or coverage check that observed it.

use std::time::Duration;

use thiserror::Error;

use crate::coverage::CoverageReport;
use crate::route::RouteKey;

/// Result type alias for authz-coverage operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// A malformed declaration, detected at setup/build time.
///
/// These are fatal: they indicate the catalog is wrong, not that the service
/// under test misbehaves, and must be fixed before any case runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("access policy declares an empty role set; an unreachable route is a declaration error")]
    EmptyRoleSet,

    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("duplicate route in catalog: {route}")]
    DuplicateRoute { route: RouteKey },
}

/// A single probe that failed to complete.
///
/// Reported as that case's failure with the transport error as context.
/// There is no retry: a flaky authorization result is itself a signal.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe timed out after {limit:?}")]
    Timeout { limit: Duration },

    #[error("transport failure: {source}")]
    Transport {
        #[from]
        source: anyhow::Error,
    },
}

/// Drift between the declared catalog and the live route set.
///
/// Carries the full report so the failure enumerates both the untested and
/// the nonexistent routes in one diagnostic.
#[derive(Debug, Error)]
#[error("route coverage drift detected\n{report}")]
pub struct CoverageFailure {
    pub report: CoverageReport,
}

/// Top-level error for authz-coverage
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Coverage(#[from] CoverageFailure),

    #[error(transparent)]
    Probe(#[from] ProbeError),
}
