use crate::error::ProbeFailure;
use crate::models::{JvmCandidate, JvmInstallation, SelectionPurpose, SelectionResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Turns a candidate home into an installation by asking the JVM about itself.
#[async_trait]
pub trait JvmProber: Send + Sync {
    async fn probe(&self, candidate: &JvmCandidate) -> Result<JvmInstallation, ProbeFailure>;
}

/// Query surface handed to build-tool integrations.
#[async_trait]
pub trait JvmResolver: Send + Sync {
    /// Pick the JVM for the given purpose. The first call populates the
    /// installation registry unless an explicit override short-circuits it.
    async fn resolve(&self, purpose: SelectionPurpose) -> SelectionResult;

    /// All validated installations, sorted by home.
    async fn installations(&self) -> Arc<[JvmInstallation]>;
}
