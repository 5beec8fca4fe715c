use super::installation::JvmInstallation;
use super::version::VersionConstraint;
use crate::error::SelectionFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What the selected JVM will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPurpose {
    /// Compile and run the build's own logic.
    Build,
    /// Run the project's test suite.
    Test,
}

impl fmt::Display for SelectionPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => f.write_str("build"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for SelectionPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "build" | "compile" => Ok(Self::Build),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown purpose: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequirement {
    pub purpose: SelectionPurpose,
    pub version_constraint: Option<VersionConstraint>,
    pub explicit_override_path: Option<PathBuf>,
}

impl SelectionRequirement {
    pub fn new(purpose: SelectionPurpose) -> Self {
        Self {
            purpose,
            version_constraint: None,
            explicit_override_path: None,
        }
    }

    pub fn build() -> Self {
        Self::new(SelectionPurpose::Build)
    }

    pub fn test() -> Self {
        Self::new(SelectionPurpose::Test)
    }

    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.version_constraint = Some(constraint);
        self
    }

    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_override_path = Some(path.into());
        self
    }
}

pub type SelectionResult = Result<JvmInstallation, SelectionFailure>;
