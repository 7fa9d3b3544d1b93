//! Route registry adapter
//!
//! The live side of the coverage diff. An adapter queries its framework's
//! routing metadata and reshapes it into [`RouteKey`]s; that query is
//! framework-specific and lives with the service under test, behind this
//! trait.

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::route::RouteKey;

/// Path of the framework's diagnostic route for rendering unhandled errors.
/// It is plumbing, not an application endpoint, and is excluded from the
/// coverage diff unconditionally.
pub const FRAMEWORK_ERROR_PATH: &str = "/error";

/// Supplies the set of routes the service actually serves.
///
/// Must reflect the live routing configuration at call time. Adapters that
/// translate framework metadata fail with [`ConfigError::UnsupportedMethod`]
/// when they meet a method the engine has no request-construction rule for.
pub trait RouteRegistry {
    fn registered_routes(&self) -> Result<BTreeSet<RouteKey>, ConfigError>;
}

/// A registry over a fixed, hand-enumerated route set.
///
/// Useful in tests and for services that maintain their route list as a
/// source-level declaration.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    routes: BTreeSet<RouteKey>,
}

impl StaticRegistry {
    pub fn new(routes: impl IntoIterator<Item = RouteKey>) -> Self {
        Self { routes: routes.into_iter().collect() }
    }
}

impl RouteRegistry for StaticRegistry {
    fn registered_routes(&self) -> Result<BTreeSet<RouteKey>, ConfigError> {
        Ok(self.routes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HttpMethod;

    #[test]
    fn static_registry_returns_its_routes() {
        let registry = StaticRegistry::new([
            RouteKey::new(HttpMethod::Get, "/widgets"),
            RouteKey::new(HttpMethod::Get, "/widgets"),
            RouteKey::new(HttpMethod::Post, "/widgets"),
        ]);
        let routes = registry.registered_routes().unwrap();
        assert_eq!(routes.len(), 2);
    }
}
