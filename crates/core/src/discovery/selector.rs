use super::registry::InstallationRegistry;
use super::scanner::InstallationScanner;
use jvmscope_api::{
    CandidateOrigin, JvmCandidate, JvmInstallation, SelectionFailure, SelectionPurpose,
    SelectionRequirement, SelectionResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Picks one installation for a requirement.
pub struct InstallationSelector {
    registry: Arc<InstallationRegistry>,
}

impl InstallationSelector {
    pub fn new(registry: Arc<InstallationRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<InstallationRegistry> {
        &self.registry
    }

    /// An explicit override is probed on its own and never falls back to the
    /// scanned set. Otherwise the registry is consulted (populating it if
    /// needed) and the purpose decides between the candidates.
    pub async fn select(&self, requirement: &SelectionRequirement) -> SelectionResult {
        if let Some(path) = &requirement.explicit_override_path {
            return self.select_override(path).await;
        }

        if let Some(constraint) = requirement
            .version_constraint
            .as_ref()
            .filter(|c| !c.is_satisfiable())
        {
            return Err(SelectionFailure::ConstraintUnsatisfiable {
                constraint: constraint.clone(),
            });
        }

        let matching = self
            .registry
            .by_version(requirement.version_constraint.as_ref())
            .await;

        let chosen = match requirement.purpose {
            SelectionPurpose::Build => pick_for_build(&matching),
            SelectionPurpose::Test => pick_for_test(&matching),
        };

        match chosen {
            Some(installation) => {
                debug!("Selected {} for {}", installation, requirement.purpose);
                Ok(installation.clone())
            }
            None => Err(SelectionFailure::NoneFound {
                purpose: requirement.purpose,
                constraint: requirement.version_constraint.clone(),
            }),
        }
    }

    async fn select_override(&self, path: &Path) -> SelectionResult {
        let scanner = self.registry.scanner();
        let home = InstallationScanner::resolve_home(path).unwrap_or_else(|| path.to_path_buf());
        let origin = if scanner.current_jvm() == Some(home.as_path()) {
            CandidateOrigin::CurrentJvm
        } else {
            CandidateOrigin::ExplicitOverride
        };

        self.registry
            .prober()
            .probe(&JvmCandidate::new(home, origin))
            .await
            .map_err(|reason| SelectionFailure::OverrideInvalid {
                path: path.to_path_buf(),
                reason,
            })
    }
}

/// `matching` is ordered newest first, then by home.
fn pick_for_build(matching: &[JvmInstallation]) -> Option<&JvmInstallation> {
    matching
        .iter()
        .find(|i| i.is_current)
        .or_else(|| matching.first())
}

/// Newest version; among equal versions the shortest home path.
fn pick_for_test(matching: &[JvmInstallation]) -> Option<&JvmInstallation> {
    let newest = matching.first()?.version;
    matching
        .iter()
        .take_while(|i| i.version == newest)
        .min_by(|a, b| {
            let (a_home, b_home) = (a.home.as_os_str(), b.home.as_os_str());
            a_home
                .len()
                .cmp(&b_home.len())
                .then_with(|| a_home.cmp(b_home))
        })
}
