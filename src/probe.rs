//! Authorization probe
//!
//! One probe is one round trip: normalize the spec's template, issue the
//! request under the given identity, hand back the raw status code. No state
//! survives between invocations and there is no retry; a transient transport
//! failure is that case's failure and a signal in its own right.

use std::time::Duration;

use http::StatusCode;
use tokio::time::timeout;
use tracing::debug;

use crate::error::ProbeError;
use crate::invoker::{IdentityClaim, RequestInvoker};
use crate::normalize::normalize_path;
use crate::policy::{Identity, Role};
use crate::route::RouteAuthSpec;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues authorization probes through a [`RequestInvoker`].
#[derive(Debug, Clone)]
pub struct AuthorizationProbe<I> {
    invoker: I,
    limit: Duration,
}

impl<I: RequestInvoker> AuthorizationProbe<I> {
    pub fn new(invoker: I) -> Self {
        Self { invoker, limit: DEFAULT_TIMEOUT }
    }

    /// Per-probe deadline. A timeout fails only the case that hit it.
    pub fn with_timeout(self, limit: Duration) -> Self {
        Self { limit, ..self }
    }

    /// Probes `spec` under `identity` and returns the observed status.
    pub async fn probe<R: Role>(
        &self,
        spec: &RouteAuthSpec<R>,
        identity: Identity<R>,
    ) -> Result<StatusCode, ProbeError> {
        let path = normalize_path(&spec.route.template);
        let claim = match identity {
            Identity::Anonymous => IdentityClaim::Anonymous,
            Identity::Authenticated(role) => IdentityClaim::Role(role.label()),
        };

        let status = timeout(self.limit, self.invoker.invoke(spec.route.method, &path, claim))
            .await
            .map_err(|_| ProbeError::Timeout { limit: self.limit })?
            .map_err(ProbeError::from)?;

        debug!(
            route = %spec.route,
            path = %path,
            identity = identity.label(),
            status = status.as_u16(),
            "probe completed"
        );
        Ok(status)
    }
}
