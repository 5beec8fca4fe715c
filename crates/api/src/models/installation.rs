use super::version::JavaVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the launcher inside `<home>/bin`.
#[cfg(windows)]
pub const LAUNCHER_NAME: &str = "java.exe";
#[cfg(not(windows))]
pub const LAUNCHER_NAME: &str = "java";

/// Path of the launcher executable for a JVM home.
pub fn launcher_path(home: &Path) -> PathBuf {
    home.join("bin").join(LAUNCHER_NAME)
}

/// Where a candidate home was found.
///
/// Variants are declared from weakest to strongest; when the same home is
/// reached more than once the strongest origin wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    SearchPathHint,
    EnvironmentVariable,
    ExplicitOverride,
    CurrentJvm,
}

impl CandidateOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchPathHint => "search-path",
            Self::EnvironmentVariable => "environment",
            Self::ExplicitOverride => "override",
            Self::CurrentJvm => "current",
        }
    }
}

/// A directory that looks like a JVM home and has not been probed yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JvmCandidate {
    /// Canonical absolute path.
    pub home: PathBuf,
    pub origin: CandidateOrigin,
}

impl JvmCandidate {
    pub fn new(home: impl Into<PathBuf>, origin: CandidateOrigin) -> Self {
        Self {
            home: home.into(),
            origin,
        }
    }

    pub fn launcher(&self) -> PathBuf {
        launcher_path(&self.home)
    }

    pub fn is_current(&self) -> bool {
        self.origin == CandidateOrigin::CurrentJvm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bitness {
    #[serde(rename = "32")]
    Bits32,
    #[serde(rename = "64")]
    Bits64,
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits32 => f.write_str("32-bit"),
            Self::Bits64 => f.write_str("64-bit"),
        }
    }
}

/// A probed, usable Java installation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JvmInstallation {
    pub home: PathBuf,
    pub vendor: String,
    pub version: JavaVersion,
    pub bitness: Bitness,
    pub is_current: bool,
}

impl JvmInstallation {
    pub fn launcher(&self) -> PathBuf {
        launcher_path(&self.home)
    }
}

impl fmt::Display for JvmInstallation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) at {}",
            self.vendor,
            self.version,
            self.bitness,
            self.home.display()
        )
    }
}
