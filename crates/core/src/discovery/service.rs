//! Resolution service facade.
//!
//! Wires scanner, probe, registry and selector together from a [`JvmConfig`]
//! and answers "which JVM for the build" / "which JVM for the tests".

use super::probe::LauncherProbe;
use super::registry::InstallationRegistry;
use super::scanner::InstallationScanner;
use super::selector::InstallationSelector;
use crate::config::JvmConfig;
use crate::error::Result;
use async_trait::async_trait;
use jvmscope_api::{
    JvmInstallation, JvmProber, JvmResolver, SelectionPurpose, SelectionRequirement,
    SelectionResult, VersionConstraint,
};
use std::sync::Arc;

pub struct AvailableJavaInstallations {
    selector: InstallationSelector,
    build: SelectionRequirement,
    test: SelectionRequirement,
}

impl AvailableJavaInstallations {
    /// Build the service with the launcher probe described by `config.probe`.
    pub fn new(config: &JvmConfig) -> Result<Self> {
        let prober = LauncherProbe::from_config(&config.probe)?;
        Self::with_prober(config, Arc::new(prober))
    }

    /// Build the service around a custom prober.
    pub fn with_prober(config: &JvmConfig, prober: Arc<dyn JvmProber>) -> Result<Self> {
        let build = requirement_for(config, SelectionPurpose::Build)?;
        let test = requirement_for(config, SelectionPurpose::Test)?;

        let current = config.current_java_home.clone().or_else(|| {
            if config.detect_current_jvm {
                InstallationScanner::detect_current_jvm()
            } else {
                None
            }
        });

        let registry = InstallationRegistry::new(
            InstallationScanner::new(current),
            prober,
            config.search_roots.clone(),
            config.env_hints.clone(),
        )
        .with_max_parallel(config.probe.max_parallel);

        Ok(Self {
            selector: InstallationSelector::new(Arc::new(registry)),
            build,
            test,
        })
    }

    /// The requirement `resolve` uses for a purpose.
    pub fn requirement(&self, purpose: SelectionPurpose) -> &SelectionRequirement {
        match purpose {
            SelectionPurpose::Build => &self.build,
            SelectionPurpose::Test => &self.test,
        }
    }

    pub async fn resolve(&self, purpose: SelectionPurpose) -> SelectionResult {
        self.selector.select(self.requirement(purpose)).await
    }

    /// Select with an ad-hoc requirement instead of the configured one.
    pub async fn select(&self, requirement: &SelectionRequirement) -> SelectionResult {
        self.selector.select(requirement).await
    }

    pub async fn installations(&self) -> Arc<[JvmInstallation]> {
        self.registry().installations().await
    }

    pub async fn by_version(&self, constraint: Option<&VersionConstraint>) -> Vec<JvmInstallation> {
        self.registry().by_version(constraint).await
    }

    pub fn registry(&self) -> &Arc<InstallationRegistry> {
        self.selector.registry()
    }
}

#[async_trait]
impl JvmResolver for AvailableJavaInstallations {
    async fn resolve(&self, purpose: SelectionPurpose) -> SelectionResult {
        AvailableJavaInstallations::resolve(self, purpose).await
    }

    async fn installations(&self) -> Arc<[JvmInstallation]> {
        AvailableJavaInstallations::installations(self).await
    }
}

fn requirement_for(config: &JvmConfig, purpose: SelectionPurpose) -> Result<SelectionRequirement> {
    Ok(SelectionRequirement {
        purpose,
        version_constraint: config.constraint(purpose)?,
        explicit_override_path: config.override_home(purpose),
    })
}
