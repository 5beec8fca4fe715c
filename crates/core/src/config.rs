//! Configuration handed to the resolution service by the host integration.
//!
//! The service never reads ambient state on its own: everything it needs is
//! carried by a [`JvmConfig`] value. [`JvmConfig::from_environment`] is the
//! helper hosts use to build one from the process environment and the usual
//! installation directories.

use crate::discovery::vendor::default_vendor_patterns;
use crate::error::{JvmScopeError, Result};
use jvmscope_api::{SelectionPurpose, VersionConstraint};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Property naming the JVM home used to run tests.
pub const TEST_JAVA_HOME_PROPERTY: &str = "testJavaHome";
/// Property holding a version constraint for the test JVM.
pub const TEST_JAVA_VERSION_PROPERTY: &str = "testJavaVersion";
/// Property naming the JVM home used for the build itself.
pub const BUILD_JAVA_HOME_PROPERTY: &str = "buildJavaHome";
/// Property holding a version constraint for the build JVM.
pub const BUILD_JAVA_VERSION_PROPERTY: &str = "buildJavaVersion";

static HINT_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(JAVA_HOME|JDK\d+(_HOME)?|JAVA_HOME_\d+(_[A-Z0-9]+)?)$")
        .expect("hint variable pattern is valid")
});

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct JvmConfig {
    /// Directories whose subdirectories may be JVM homes.
    pub search_roots: Vec<PathBuf>,
    /// Named paths that may each be a JVM home (usually environment variables).
    pub env_hints: BTreeMap<String, PathBuf>,
    /// Build properties, e.g. `testJavaHome` or `testJavaVersion`.
    pub properties: BTreeMap<String, String>,
    /// Home of the JVM the host runs on, when the host knows it.
    pub current_java_home: Option<PathBuf>,
    /// Look for `java` on `PATH` when `currentJavaHome` is not set.
    pub detect_current_jvm: bool,
    /// Version constraint for the build JVM, e.g. `17` or `11+`.
    pub build_constraint: Option<String>,
    /// Version constraint for the test JVM.
    pub test_constraint: Option<String>,
    pub probe: ProbeConfig,
}

impl Default for JvmConfig {
    fn default() -> Self {
        Self {
            search_roots: Vec::new(),
            env_hints: BTreeMap::new(),
            properties: BTreeMap::new(),
            current_java_home: None,
            detect_current_jvm: true,
            build_constraint: None,
            test_constraint: None,
            probe: ProbeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeConfig {
    /// Upper bound for one launcher invocation.
    pub timeout_ms: u64,
    /// Number of launchers probed concurrently.
    pub max_parallel: usize,
    /// Ordered vendor table; the first pattern matching the output wins.
    pub vendors: Vec<VendorPattern>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_parallel: 4,
            vendors: default_vendor_patterns(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

/// One entry of the vendor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VendorPattern {
    /// Name reported for installations whose output matches.
    pub vendor: String,
    /// Regular expression applied to the `java.vendor` value and the version banner.
    pub pattern: String,
}

impl VendorPattern {
    pub fn new(vendor: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            pattern: pattern.into(),
        }
    }
}

impl JvmConfig {
    /// Default search roots plus hints taken from the process environment.
    pub fn from_environment() -> Self {
        Self {
            search_roots: default_search_roots(),
            env_hints: env_hints_from(std::env::vars()),
            ..Self::default()
        }
    }

    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject probe settings that would stall every scan.
    pub fn validate(&self) -> Result<()> {
        if self.probe.max_parallel == 0 {
            return Err(JvmScopeError::Config(
                "probe.maxParallel must be at least 1".to_string(),
            ));
        }
        if self.probe.timeout_ms == 0 {
            return Err(JvmScopeError::Config(
                "probe.timeoutMs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// A property value, ignoring blank entries.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Explicit JVM home requested for a purpose.
    pub fn override_home(&self, purpose: SelectionPurpose) -> Option<PathBuf> {
        let property = match purpose {
            SelectionPurpose::Build => BUILD_JAVA_HOME_PROPERTY,
            SelectionPurpose::Test => TEST_JAVA_HOME_PROPERTY,
        };
        self.property(property).map(PathBuf::from)
    }

    /// Version constraint for a purpose. The property wins over the config field.
    pub fn constraint(&self, purpose: SelectionPurpose) -> Result<Option<VersionConstraint>> {
        let (property, field_name, field) = match purpose {
            SelectionPurpose::Build => (
                BUILD_JAVA_VERSION_PROPERTY,
                "buildConstraint",
                &self.build_constraint,
            ),
            SelectionPurpose::Test => (
                TEST_JAVA_VERSION_PROPERTY,
                "testConstraint",
                &self.test_constraint,
            ),
        };

        let (origin, raw) = match self.property(property) {
            Some(value) => (property, Some(value)),
            None => (
                field_name,
                field.as_deref().map(str::trim).filter(|v| !v.is_empty()),
            ),
        };

        raw.map(|value| {
            value
                .parse::<VersionConstraint>()
                .map_err(|source| JvmScopeError::Constraint {
                    field: origin.to_string(),
                    source,
                })
        })
        .transpose()
    }
}

/// Keep the environment variables that conventionally point at a JDK:
/// `JAVA_HOME`, `JDK17`, `JDK17_HOME`, `JAVA_HOME_17_X64`.
pub fn env_hints_from(
    vars: impl IntoIterator<Item = (String, String)>,
) -> BTreeMap<String, PathBuf> {
    vars.into_iter()
        .filter(|(name, value)| HINT_VARIABLE.is_match(name) && !value.trim().is_empty())
        .map(|(name, value)| (name, PathBuf::from(value.trim())))
        .collect()
}

/// Well-known installation directories for the current platform.
pub fn default_search_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    #[cfg(target_os = "macos")]
    {
        roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines"));
    }
    #[cfg(target_os = "linux")]
    {
        roots.push(PathBuf::from("/usr/lib/jvm"));
        roots.push(PathBuf::from("/opt/java"));
    }
    #[cfg(target_os = "windows")]
    {
        roots.push(PathBuf::from("C:\\Program Files\\Java"));
        roots.push(PathBuf::from("C:\\Program Files\\Eclipse Adoptium"));
    }

    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".sdkman/candidates/java"));
        roots.push(home.join(".jdks"));
        roots.push(home.join(".gradle/jdks"));
    }

    roots
}
