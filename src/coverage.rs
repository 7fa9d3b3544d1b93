//! Coverage analysis
//!
//! Diffs the declared catalog against the live route set. This is the
//! mechanism that keeps the catalog synchronized with the service as routes
//! are added and removed: drift in either direction is one combined failure
//! enumerating both sets, never a silent pass.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::SpecCatalog;
use crate::error::CoverageFailure;
use crate::policy::Role;
use crate::registry::FRAMEWORK_ERROR_PATH;
use crate::route::RouteKey;

/// Routes implicitly exempt from the "nonexistent" check.
///
/// An explicit, named, finite set. The reference case is a single well-known
/// implicit route (a default view route the registry never reports); nothing
/// else is exempted, and registry-side exclusions do not belong here.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    routes: BTreeSet<RouteKey>,
}

impl Whitelist {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(routes: impl IntoIterator<Item = RouteKey>) -> Self {
        Self { routes: routes.into_iter().collect() }
    }

    pub fn contains(&self, route: &RouteKey) -> bool {
        self.routes.contains(route)
    }
}

/// The symmetric difference between registry and catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Served by the registry, missing from the catalog.
    pub untested: BTreeSet<RouteKey>,
    /// Declared in the catalog, unknown to the registry (whitelist applied).
    pub nonexistent: BTreeSet<RouteKey>,
}

impl CoverageReport {
    pub fn is_clean(&self) -> bool {
        self.untested.is_empty() && self.nonexistent.is_empty()
    }

    /// A clean report passes; anything else becomes one combined
    /// [`CoverageFailure`] listing both sets.
    pub fn check(self) -> Result<(), CoverageFailure> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(CoverageFailure { report: self })
        }
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "catalog and registry agree");
        }
        if !self.untested.is_empty() {
            writeln!(f, "routes served but not declared in the catalog:")?;
            for route in &self.untested {
                writeln!(f, "  {route}")?;
            }
        }
        if !self.nonexistent.is_empty() {
            writeln!(f, "routes declared in the catalog but not served:")?;
            for route in &self.nonexistent {
                writeln!(f, "  {route}")?;
            }
        }
        Ok(())
    }
}

/// Computes `untested = R \ keys(C)` and `nonexistent = (keys(C) \ W) \ R`.
///
/// Both differences are over raw [`RouteKey`] equality (method plus raw
/// template), never over matched or normalized paths. The framework error
/// route is stripped from the registry's contribution unconditionally.
pub fn analyze_coverage<R: Role>(
    registry: &BTreeSet<RouteKey>,
    catalog: &SpecCatalog<R>,
    whitelist: &Whitelist,
) -> CoverageReport {
    let declared = catalog.keys();
    let live: BTreeSet<&RouteKey> = registry
        .iter()
        .filter(|route| route.template != FRAMEWORK_ERROR_PATH)
        .collect();

    let untested: BTreeSet<RouteKey> =
        live.iter().filter(|route| !declared.contains(**route)).map(|r| (*r).clone()).collect();

    let nonexistent: BTreeSet<RouteKey> = declared
        .iter()
        .filter(|route| !whitelist.contains(route))
        .filter(|route| !live.contains(route))
        .cloned()
        .collect();

    let report = CoverageReport { untested, nonexistent };
    if report.is_clean() {
        debug!(declared = declared.len(), live = live.len(), "route coverage is clean");
    } else {
        warn!(
            untested = report.untested.len(),
            nonexistent = report.nonexistent.len(),
            "route coverage drift detected"
        );
    }
    report
}
