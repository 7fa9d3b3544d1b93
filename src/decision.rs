//! Decision table
//!
//! The deterministic mapping from (policy, identity, observed status) to
//! pass/fail. Pure and exhaustive: every combination is covered by the match
//! and every failure carries a diagnostic naming the method, route, role,
//! and the status mismatch.

use http::StatusCode;

use crate::policy::{AccessPolicy, Identity, Role};
use crate::route::RouteAuthSpec;

/// The outcome of checking one observed status against one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message),
        }
    }
}

/// Applies the decision table to one observation.
///
/// Precedence:
/// 1. 405 always fails: the spec references a method the route does not
///    implement, whatever the identity.
/// 2. Anonymous callers: an open route must not answer 401; a role-gated
///    route must answer exactly 401 (missing authentication, not merely
///    insufficient authorization).
/// 3. Authenticated callers: a permitted role must not see 403; a
///    non-permitted role must see exactly 403.
pub fn decide<R: Role>(
    spec: &RouteAuthSpec<R>,
    identity: Identity<R>,
    status: StatusCode,
) -> Verdict {
    let route = &spec.route;

    if status == StatusCode::METHOD_NOT_ALLOWED {
        return Verdict::Fail(format!(
            "{route}: route/method pair does not exist (got 405 Method Not Allowed)"
        ));
    }

    match (&spec.access, identity) {
        (AccessPolicy::Unauthenticated, Identity::Anonymous) => {
            if status == StatusCode::UNAUTHORIZED {
                Verdict::Fail(format!(
                    "expected {route} not to require authentication, got 401 Unauthorized"
                ))
            } else {
                Verdict::Pass
            }
        }
        (AccessPolicy::AnyRole(_), Identity::Anonymous) => {
            if status == StatusCode::UNAUTHORIZED {
                Verdict::Pass
            } else {
                Verdict::Fail(format!(
                    "expected {route} to reject anonymous callers with 401 Unauthorized, got {status}"
                ))
            }
        }
        (AccessPolicy::Unauthenticated, Identity::Authenticated(role)) => {
            if status == StatusCode::FORBIDDEN {
                Verdict::Fail(format!(
                    "expected {route} to permit any authenticated role, but role {} got 403 Forbidden",
                    role.label()
                ))
            } else {
                Verdict::Pass
            }
        }
        (AccessPolicy::AnyRole(roles), Identity::Authenticated(role)) if roles.contains(role) => {
            if status == StatusCode::FORBIDDEN {
                Verdict::Fail(format!(
                    "expected role {} to be PERMITTED on {route}, got 403 Forbidden",
                    role.label()
                ))
            } else {
                Verdict::Pass
            }
        }
        (AccessPolicy::AnyRole(_), Identity::Authenticated(role)) => {
            if status == StatusCode::FORBIDDEN {
                Verdict::Pass
            } else {
                Verdict::Fail(format!(
                    "expected role {} to be DENIED on {route} with 403 Forbidden, got {status}",
                    role.label()
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HttpMethod;

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

    fn open_spec() -> RouteAuthSpec<TestRole> {
        RouteAuthSpec::new(HttpMethod::Get, "/user/{id}", AccessPolicy::unauthenticated())
    }

    fn admin_spec() -> RouteAuthSpec<TestRole> {
        RouteAuthSpec::new(
            HttpMethod::Post,
            "/user",
            AccessPolicy::any_role([TestRole::Admin]).unwrap(),
        )
    }

    #[test]
    fn method_not_allowed_fails_for_every_identity() {
        for identity in [Identity::Anonymous, Identity::Authenticated(TestRole::Admin)] {
            let verdict = decide(&admin_spec(), identity, StatusCode::METHOD_NOT_ALLOWED);
            let message = verdict.message().unwrap().to_string();
            assert!(message.contains("route/method pair does not exist"));
            assert!(message.contains("POST /user"));
        }
    }

    #[test]
    fn open_route_accepts_anonymous() {
        assert!(decide(&open_spec(), Identity::Anonymous, StatusCode::OK).is_pass());
        assert!(decide(&open_spec(), Identity::Anonymous, StatusCode::NOT_FOUND).is_pass());
    }

    #[test]
    fn open_route_demanding_authentication_fails() {
        let verdict = decide(&open_spec(), Identity::Anonymous, StatusCode::UNAUTHORIZED);
        let message = verdict.message().unwrap();
        assert!(message.contains("not to require authentication"));
        assert!(message.contains("GET /user/{id}"));
    }

    #[test]
    fn gated_route_must_reject_anonymous_with_401() {
        assert!(decide(&admin_spec(), Identity::Anonymous, StatusCode::UNAUTHORIZED).is_pass());
        // 403 is the wrong signal: it conflates missing authentication with
        // insufficient authorization.
        let verdict = decide(&admin_spec(), Identity::Anonymous, StatusCode::FORBIDDEN);
        assert!(verdict.message().unwrap().contains("401 Unauthorized"));
    }

    #[test]
    fn permitted_role_must_not_be_forbidden() {
        let spec = admin_spec();
        assert!(decide(&spec, Identity::Authenticated(TestRole::Admin), StatusCode::OK).is_pass());

        let verdict =
            decide(&spec, Identity::Authenticated(TestRole::Admin), StatusCode::FORBIDDEN);
        let message = verdict.message().unwrap();
        assert!(message.contains("expected role ADMIN to be PERMITTED"));
        assert!(message.contains("POST /user"));
    }

    #[test]
    fn non_permitted_role_must_be_forbidden() {
        let spec = admin_spec();
        assert!(
            decide(&spec, Identity::Authenticated(TestRole::Basic), StatusCode::FORBIDDEN)
                .is_pass()
        );

        let verdict = decide(&spec, Identity::Authenticated(TestRole::Basic), StatusCode::OK);
        let message = verdict.message().unwrap();
        assert!(message.contains("expected role BASIC to be DENIED"));
    }

    #[test]
    fn open_route_must_not_forbid_authenticated_roles() {
        let verdict =
            decide(&open_spec(), Identity::Authenticated(TestRole::Basic), StatusCode::FORBIDDEN);
        assert!(verdict.message().unwrap().contains("permit any authenticated role"));

        // Only 403 fails here; other statuses are outside the table's concern.
        assert!(
            decide(&open_spec(), Identity::Authenticated(TestRole::Basic), StatusCode::OK)
                .is_pass()
        );
    }
}
