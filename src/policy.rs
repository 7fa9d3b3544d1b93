//! Access policy model
//!
//! Declares "who may call this route" as a closed tagged union. Adding a new
//! access kind is a deliberate schema change, so the union has exactly two
//! cases and every consumer matches exhaustively.

use std::fmt;
use std::hash::Hash;

use crate::error::ConfigError;

/// One identity classification recognized by the service under test.
///
/// Implementors are closed, enumerable sets (typically a fieldless enum).
/// Equality is identity equality; `label` is the stable name used in case
/// names, failure diagnostics, and the role claim handed to the invoker.
pub trait Role: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn label(&self) -> &'static str;
}

/// A validated, non-empty set of roles.
///
/// An empty set would declare a route nobody can reach, which is almost
/// certainly a declaration error, so construction rejects it outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet<R: Role> {
    roles: Vec<R>,
}

impl<R: Role> RoleSet<R> {
    pub fn new(roles: impl IntoIterator<Item = R>) -> Result<Self, ConfigError> {
        let mut deduped: Vec<R> = Vec::new();
        for role in roles {
            if !deduped.contains(&role) {
                deduped.push(role);
            }
        }
        if deduped.is_empty() {
            return Err(ConfigError::EmptyRoleSet);
        }
        Ok(Self { roles: deduped })
    }

    pub fn contains(&self, role: R) -> bool {
        self.roles.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = R> + '_ {
        self.roles.iter().copied()
    }

    /// Role labels in declaration order, for diagnostics.
    pub fn labels(&self) -> Vec<&'static str> {
        self.roles.iter().map(|r| r.label()).collect()
    }
}

/// The rule determining which identities may invoke a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy<R: Role> {
    /// No identity required. This means "anyone may call", never
    /// "identity forbidden".
    Unauthenticated,
    /// Access granted to any identity presenting at least one role in the set.
    AnyRole(RoleSet<R>),
}

impl<R: Role> AccessPolicy<R> {
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    /// Fails with [`ConfigError::EmptyRoleSet`] when `roles` is empty.
    pub fn any_role(roles: impl IntoIterator<Item = R>) -> Result<Self, ConfigError> {
        Ok(Self::AnyRole(RoleSet::new(roles)?))
    }

    /// Whether an identity holding `role` satisfies this policy.
    /// Total; no side effects.
    pub fn allows(&self, role: R) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::AnyRole(roles) => roles.contains(role),
        }
    }
}

/// The identity a probe presents to the service under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<R: Role> {
    Anonymous,
    Authenticated(R),
}

impl<R: Role> Identity<R> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated(role) => role.label(),
        }
    }

    pub fn role(&self) -> Option<R> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(role) => Some(*role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestRole {
        Admin,
        Basic,
    }

    impl Role for TestRole {
        fn label(&self) -> &'static str {
            match self {
                TestRole::Admin => "ADMIN",
                TestRole::Basic => "BASIC",
            }
        }
    }

    #[test]
    fn empty_role_set_is_rejected() {
        let err = AccessPolicy::<TestRole>::any_role([]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRoleSet));
    }

    #[test]
    fn any_role_allows_members_only() {
        let policy = AccessPolicy::any_role([TestRole::Admin]).unwrap();
        assert!(policy.allows(TestRole::Admin));
        assert!(!policy.allows(TestRole::Basic));
    }

    #[test]
    fn unauthenticated_allows_everyone() {
        let policy = AccessPolicy::<TestRole>::unauthenticated();
        assert!(policy.allows(TestRole::Admin));
        assert!(policy.allows(TestRole::Basic));
    }

    #[test]
    fn role_set_dedupes_but_keeps_order() {
        let set = RoleSet::new([TestRole::Basic, TestRole::Admin, TestRole::Basic]).unwrap();
        assert_eq!(set.labels(), vec!["BASIC", "ADMIN"]);
    }

    #[test]
    fn identity_labels() {
        assert_eq!(Identity::<TestRole>::Anonymous.label(), "anonymous");
        assert_eq!(Identity::Authenticated(TestRole::Admin).label(), "ADMIN");
        assert_eq!(Identity::Authenticated(TestRole::Admin).role(), Some(TestRole::Admin));
    }
}
