//! Test matrix generation
//!
//! Expands the catalog into the full, fully materialized set of test cases:
//! one anonymous case per spec, plus one case per (spec, role) pair. The
//! whole list exists before anything executes so a harness can report
//! total/pass/fail counts upfront; cases are immutable, independent, and
//! order-insensitive, so a harness may run them concurrently.

use tracing::{debug, info};

use crate::catalog::SpecCatalog;
use crate::decision::{decide, Verdict};
use crate::error::ProbeError;
use crate::invoker::RequestInvoker;
use crate::policy::{Identity, Role};
use crate::probe::AuthorizationProbe;
use crate::route::RouteAuthSpec;

/// One independently executable, independently reportable test case.
#[derive(Debug, Clone)]
pub struct AuthTestCase<R: Role> {
    name: String,
    spec: RouteAuthSpec<R>,
    identity: Identity<R>,
}

impl<R: Role> AuthTestCase<R> {
    fn new(spec: RouteAuthSpec<R>, identity: Identity<R>) -> Self {
        let name = format!("{} {}", identity.label(), spec.route);
        Self { name, spec, identity }
    }

    /// Deterministic, unique within one matrix: identity label, method,
    /// raw route template.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &RouteAuthSpec<R> {
        &self.spec
    }

    pub fn identity(&self) -> Identity<R> {
        self.identity
    }

    /// Probes the route under this case's identity and applies the decision
    /// table. A failed round trip fails this case only.
    pub async fn execute<I: RequestInvoker>(&self, probe: &AuthorizationProbe<I>) -> CaseResult {
        let outcome = match probe.probe(&self.spec, self.identity).await {
            Ok(status) => match decide(&self.spec, self.identity, status) {
                Verdict::Pass => CaseOutcome::Pass,
                Verdict::Fail(message) => CaseOutcome::Mismatch { message },
            },
            Err(error) => CaseOutcome::Transport { error },
        };
        debug!(case = self.name.as_str(), pass = outcome.is_pass(), "case executed");
        CaseResult { name: self.name.clone(), outcome }
    }
}

/// How one executed case ended.
#[derive(Debug)]
pub enum CaseOutcome {
    Pass,
    /// The observed status contradicts the decision table.
    Mismatch { message: String },
    /// The probe did not complete; carries the timeout or transport error.
    Transport { error: ProbeError },
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn failure(&self) -> Option<String> {
        match self {
            Self::Pass => None,
            Self::Mismatch { message } => Some(message.clone()),
            Self::Transport { error } => Some(error.to_string()),
        }
    }
}

/// The (name, outcome) pair a reporting surface consumes.
#[derive(Debug)]
pub struct CaseResult {
    pub name: String,
    pub outcome: CaseOutcome,
}

/// Produces exactly `|catalog| + |catalog| * |roles|` cases: the anonymous
/// block first in declaration order, then one block per role.
pub fn generate_matrix<R: Role>(
    catalog: &SpecCatalog<R>,
    roles: &[R],
) -> Vec<AuthTestCase<R>> {
    let mut cases = Vec::with_capacity(catalog.len() * (1 + roles.len()));

    for spec in catalog.iter() {
        cases.push(AuthTestCase::new(spec.clone(), Identity::Anonymous));
    }
    for role in roles {
        for spec in catalog.iter() {
            cases.push(AuthTestCase::new(spec.clone(), Identity::Authenticated(*role)));
        }
    }

    info!(specs = catalog.len(), roles = roles.len(), cases = cases.len(), "generated test matrix");
    cases
}

/// Executes a matrix sequentially and collects per-case results.
///
/// Cases carry no ordering dependency; harnesses wanting parallelism can
/// execute cases themselves, bounded only by what the service tolerates.
pub async fn run_matrix<R: Role, I: RequestInvoker>(
    cases: &[AuthTestCase<R>],
    probe: &AuthorizationProbe<I>,
) -> Vec<CaseResult> {
    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        results.push(case.execute(probe).await);
    }
    results
}
