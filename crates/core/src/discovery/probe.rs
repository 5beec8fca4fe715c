//! Launcher probe.
//!
//! Runs `<home>/bin/java -XshowSettings:properties -version` and reads vendor,
//! version and bitness from what it prints. Modern launchers dump the system
//! properties; older ones only print the three-line version banner, so both
//! sources are consulted.

use super::vendor::VendorTable;
use crate::config::ProbeConfig;
use crate::error::Result;
use async_trait::async_trait;
use jvmscope_api::{Bitness, JavaVersion, JvmCandidate, JvmInstallation, JvmProber, ProbeFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

const PROBE_ARGS: [&str; 2] = ["-XshowSettings:properties", "-version"];

static BANNER_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\S+ version "([^"]+)""#).expect("banner version pattern is valid")
});

/// Fields extracted from launcher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherReport {
    pub vendor: String,
    pub version: JavaVersion,
    pub bitness: Bitness,
}

/// Parse the combined stdout/stderr of a version query.
///
/// The vendor is the table entry matching `java.vendor`, else the declared
/// `java.vendor` verbatim, else the table entry matching the version banner.
pub fn parse_launcher_output(output: &str, vendors: &VendorTable) -> Option<LauncherReport> {
    let properties = system_properties(output);

    let version = properties
        .get("java.version")
        .and_then(|v| JavaVersion::parse(v))
        .or_else(|| {
            BANNER_VERSION
                .captures(output)
                .and_then(|caps| JavaVersion::parse(&caps[1]))
        })?;

    // Specification vendor properties name Oracle for every distribution.
    let declared_vendor = properties.get("java.vendor").copied();
    let vendor = match declared_vendor {
        Some(declared) => vendors.identify(declared).unwrap_or(declared),
        None => vendors.identify(&banner_lines(output).collect::<Vec<_>>().join("\n"))?,
    }
    .to_string();

    let bitness = match properties.get("sun.arch.data.model").copied() {
        Some("64") => Bitness::Bits64,
        Some("32") => Bitness::Bits32,
        _ if output.contains("64-Bit") => Bitness::Bits64,
        _ if properties
            .get("os.arch")
            .is_some_and(|arch| arch.contains("64")) =>
        {
            Bitness::Bits64
        }
        _ => Bitness::Bits32,
    };

    Some(LauncherReport {
        vendor,
        version,
        bitness,
    })
}

/// `key = value` pairs from the indented property dump.
fn system_properties(output: &str) -> HashMap<&str, &str> {
    output
        .lines()
        .filter(|line| line.starts_with(char::is_whitespace))
        .filter_map(|line| line.trim().split_once(" = "))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

fn banner_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| {
        !line.is_empty()
            && !line.starts_with(char::is_whitespace)
            && !line.starts_with("Property settings")
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Probes candidates by invoking their launcher.
pub struct LauncherProbe {
    timeout: Duration,
    vendors: Arc<VendorTable>,
}

impl LauncherProbe {
    pub fn new(timeout: Duration, vendors: Arc<VendorTable>) -> Self {
        Self { timeout, vendors }
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let vendors = VendorTable::compile(&config.vendors)?;
        Ok(Self::new(config.timeout(), Arc::new(vendors)))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl JvmProber for LauncherProbe {
    async fn probe(&self, candidate: &JvmCandidate) -> std::result::Result<JvmInstallation, ProbeFailure> {
        let launcher = candidate.launcher();
        if !is_executable(&launcher) {
            return Err(ProbeFailure::NotExecutable { launcher });
        }

        let child = Command::new(&launcher)
            .args(PROBE_ARGS)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to spawn {:?}: {}", launcher, e);
                return Err(ProbeFailure::NotExecutable { launcher });
            }
        };

        // Dropping the pending future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!("Failed to collect output of {:?}: {}", launcher, e);
                return Err(ProbeFailure::NotExecutable { launcher });
            }
            Err(_) => {
                warn!("Launcher {:?} timed out after {:?}", launcher, self.timeout);
                return Err(ProbeFailure::Timeout {
                    launcher,
                    timeout: self.timeout,
                });
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        let report = parse_launcher_output(&text, &self.vendors).ok_or_else(|| {
            debug!(
                "Unrecognised output from {:?} (exit status {})",
                launcher, output.status
            );
            ProbeFailure::UnparsableOutput {
                launcher: launcher.clone(),
            }
        })?;

        Ok(JvmInstallation {
            home: candidate.home.clone(),
            vendor: report.vendor,
            version: report.version,
            bitness: report.bitness,
            is_current: candidate.is_current(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::vendor::default_vendor_patterns;

    const TEMURIN_17: &str = "Property settings:
    file.encoding = UTF-8
    java.home = /opt/jdks/jdk-17.0.2+8
    java.specification.vendor = Oracle Corporation
    java.vendor = Eclipse Adoptium
    java.version = 17.0.2
    java.vm.specification.vendor = Oracle Corporation
    os.arch = amd64
    sun.arch.data.model = 64

openjdk version \"17.0.2\" 2022-01-18
OpenJDK Runtime Environment Temurin-17.0.2+8 (build 17.0.2+8)
OpenJDK 64-Bit Server VM Temurin-17.0.2+8 (build 17.0.2+8, mixed mode, sharing)
";

    const DEBIAN_11: &str = "Property settings:
    java.specification.vendor = Oracle Corporation
    java.vendor = Debian
    java.version = 11.0.22
    os.arch = aarch64

openjdk version \"11.0.22\" 2024-01-16
OpenJDK Runtime Environment (build 11.0.22+7-post-Debian-1deb11u1)
OpenJDK 64-Bit Server VM (build 11.0.22+7-post-Debian-1deb11u1, mixed mode)
";

    const ORACLE_8_32BIT: &str = "java version \"1.8.0_291\"
Java(TM) SE Runtime Environment (build 1.8.0_291-b10)
Java HotSpot(TM) Client VM (build 25.291-b10, mixed mode)
";

    fn table() -> VendorTable {
        VendorTable::compile(&default_vendor_patterns()).unwrap()
    }

    #[test]
    fn test_parse_property_dump() {
        let report = parse_launcher_output(TEMURIN_17, &table()).unwrap();
        assert_eq!(report.vendor, "Eclipse Adoptium");
        assert_eq!(report.version, JavaVersion::new(17, 0, 2));
        assert_eq!(report.bitness, Bitness::Bits64);
    }

    #[test]
    fn test_declared_vendor_beats_banner() {
        let report = parse_launcher_output(DEBIAN_11, &table()).unwrap();
        assert_eq!(report.vendor, "Debian");
        assert_eq!(report.version, JavaVersion::new(11, 0, 22));
        assert_eq!(report.bitness, Bitness::Bits64);
    }

    #[test]
    fn test_declared_vendor_is_normalised_by_table() {
        let output = TEMURIN_17.replace("Eclipse Adoptium", "Azul Systems, Inc.");
        let report = parse_launcher_output(&output, &table()).unwrap();
        assert_eq!(report.vendor, "Azul Zulu");
    }

    #[test]
    fn test_specification_vendor_is_not_evidence() {
        let output = "Property settings:
    java.specification.vendor = Oracle Corporation
    java.version = 21.0.1

openjdk version \"21.0.1\" 2023-10-17
OpenJDK Runtime Environment (build 21.0.1+12)
";
        let report = parse_launcher_output(output, &table()).unwrap();
        assert_eq!(report.vendor, "OpenJDK");
    }

    #[test]
    fn test_parse_legacy_banner_only() {
        let report = parse_launcher_output(ORACLE_8_32BIT, &table()).unwrap();
        assert_eq!(report.vendor, "Oracle");
        assert_eq!(report.version, JavaVersion::new(8, 0, 291));
        assert_eq!(report.bitness, Bitness::Bits32);
    }

    #[test]
    fn test_declared_vendor_is_fallback() {
        let empty = VendorTable::compile(&[]).unwrap();
        let report = parse_launcher_output(TEMURIN_17, &empty).unwrap();
        assert_eq!(report.vendor, "Eclipse Adoptium");

        assert!(parse_launcher_output(ORACLE_8_32BIT, &empty).is_none());
    }

    #[test]
    fn test_unrecognised_output() {
        assert!(parse_launcher_output("", &table()).is_none());
        assert!(parse_launcher_output("Error: could not find libjava.so\n", &table()).is_none());
    }

    #[tokio::test]
    async fn test_missing_launcher_is_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        let probe = LauncherProbe::from_config(&ProbeConfig::default()).unwrap();
        let candidate = JvmCandidate::new(dir.path(), jvmscope_api::CandidateOrigin::SearchPathHint);

        let err = probe.probe(&candidate).await.unwrap_err();
        assert_eq!(
            err,
            ProbeFailure::NotExecutable {
                launcher: candidate.launcher()
            }
        );
    }
}
