//! Route spec catalog
//!
//! The declared mapping from route to access policy. Authored by engineers,
//! validated once at build time, read-only afterwards. Declaration order is
//! preserved so the generated matrix is deterministic across runs.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::error::ConfigError;
use crate::policy::{AccessPolicy, Role};
use crate::route::{HttpMethod, RouteAuthSpec, RouteKey};

/// An immutable set of [`RouteAuthSpec`]s keyed by [`RouteKey`].
///
/// At most one spec per (method, template); duplicates are a declaration
/// error caught at build time.
#[derive(Debug, Clone)]
pub struct SpecCatalog<R: Role> {
    specs: Vec<RouteAuthSpec<R>>,
}

impl<R: Role> SpecCatalog<R> {
    pub fn builder() -> CatalogBuilder<R> {
        CatalogBuilder { specs: Vec::new() }
    }

    /// Validates that no [`RouteKey`] appears twice.
    pub fn from_specs(specs: Vec<RouteAuthSpec<R>>) -> Result<Self, ConfigError> {
        let mut seen: HashSet<RouteKey> = HashSet::with_capacity(specs.len());
        for spec in &specs {
            if !seen.insert(spec.route.clone()) {
                return Err(ConfigError::DuplicateRoute { route: spec.route.clone() });
            }
        }
        debug!(specs = specs.len(), "built route spec catalog");
        Ok(Self { specs })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteAuthSpec<R>> {
        self.specs.iter()
    }

    pub fn get(&self, route: &RouteKey) -> Option<&RouteAuthSpec<R>> {
        self.specs.iter().find(|spec| &spec.route == route)
    }

    /// The declared route set, for diffing against the registry.
    pub fn keys(&self) -> BTreeSet<RouteKey> {
        self.specs.iter().map(|spec| spec.route.clone()).collect()
    }
}

/// Fluent builder for [`SpecCatalog`].
#[derive(Debug)]
pub struct CatalogBuilder<R: Role> {
    specs: Vec<RouteAuthSpec<R>>,
}

impl<R: Role> CatalogBuilder<R> {
    pub fn route(
        mut self,
        method: HttpMethod,
        template: impl Into<String>,
        access: AccessPolicy<R>,
    ) -> Self {
        self.specs.push(RouteAuthSpec::new(method, template, access));
        self
    }

    pub fn spec(mut self, spec: RouteAuthSpec<R>) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn build(self) -> Result<SpecCatalog<R>, ConfigError> {
        SpecCatalog::from_specs(self.specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestRole {
        Admin,
    }

    impl Role for TestRole {
        fn label(&self) -> &'static str {
            "ADMIN"
        }
    }

    fn admin_only() -> AccessPolicy<TestRole> {
        AccessPolicy::any_role([TestRole::Admin]).unwrap()
    }

    #[test]
    fn builder_preserves_declaration_order() {
        let catalog = SpecCatalog::builder()
            .route(HttpMethod::Get, "/b", AccessPolicy::unauthenticated())
            .route(HttpMethod::Get, "/a", admin_only())
            .build()
            .unwrap();

        let templates: Vec<&str> =
            catalog.iter().map(|spec| spec.route.template.as_str()).collect();
        assert_eq!(templates, vec!["/b", "/a"]);
    }

    #[test]
    fn duplicate_route_key_is_rejected() {
        let err = SpecCatalog::builder()
            .route(HttpMethod::Get, "/user/{id}", AccessPolicy::unauthenticated())
            .route(HttpMethod::Get, "/user/{id}", admin_only())
            .build()
            .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateRoute { ref route }
            if route.template == "/user/{id}"));
    }

    #[test]
    fn same_template_different_method_is_fine() {
        let catalog = SpecCatalog::builder()
            .route(HttpMethod::Get, "/user", AccessPolicy::unauthenticated())
            .route(HttpMethod::Post, "/user", admin_only())
            .build()
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn lookup_by_key() {
        let catalog = SpecCatalog::builder()
            .route(HttpMethod::Post, "/user", admin_only())
            .build()
            .unwrap();

        let key = RouteKey::new(HttpMethod::Post, "/user");
        assert!(catalog.get(&key).is_some());
        assert!(catalog.get(&RouteKey::new(HttpMethod::Get, "/user")).is_none());
    }
}
