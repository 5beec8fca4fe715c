use crate::models::{SelectionPurpose, VersionConstraint};
use std::path::PathBuf;
use std::time::Duration;

/// Why a single candidate could not be turned into an installation.
///
/// Recoverable: the candidate is dropped and the scan continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    #[error("launcher {} is missing or not executable", .launcher.display())]
    NotExecutable { launcher: PathBuf },
    #[error("launcher {} did not exit within {timeout:?}", .launcher.display())]
    Timeout { launcher: PathBuf, timeout: Duration },
    #[error("unrecognised version output from {}", .launcher.display())]
    UnparsableOutput { launcher: PathBuf },
}

impl ProbeFailure {
    pub fn launcher(&self) -> &PathBuf {
        match self {
            Self::NotExecutable { launcher }
            | Self::Timeout { launcher, .. }
            | Self::UnparsableOutput { launcher } => launcher,
        }
    }
}

/// Why a selection produced no installation. Surfaced to the caller as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionFailure {
    #[error(
        "no Java installation found for {purpose}{}",
        .constraint.as_ref().map(|c| format!(" matching {c}")).unwrap_or_default()
    )]
    NoneFound {
        purpose: SelectionPurpose,
        constraint: Option<VersionConstraint>,
    },
    #[error("explicit Java home {} is not usable: {reason}", .path.display())]
    OverrideInvalid {
        path: PathBuf,
        #[source]
        reason: ProbeFailure,
    },
    #[error("version constraint {constraint} can never be satisfied")]
    ConstraintUnsatisfiable { constraint: VersionConstraint },
}
