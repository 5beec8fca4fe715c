use async_trait::async_trait;
use jvmscope_api::{
    Bitness, JavaVersion, JvmCandidate, JvmInstallation, JvmProber, ProbeFailure, launcher_path,
};
use jvmscope_core::JvmConfig;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Config that only sees what the test sets up.
#[allow(dead_code)]
pub fn isolated_config(search_roots: Vec<PathBuf>) -> JvmConfig {
    JvmConfig {
        search_roots,
        detect_current_jvm: false,
        ..JvmConfig::default()
    }
}

/// A JVM home whose launcher is an empty file. Enough for the scanner.
#[allow(dead_code)]
pub fn stub_home(root: &Path, name: &str) -> PathBuf {
    let home = root.join(name);
    let launcher = launcher_path(&home);
    std::fs::create_dir_all(launcher.parent().unwrap()).unwrap();
    std::fs::write(&launcher, "").unwrap();
    home
}

/// A JVM home whose launcher is a shell script running `body`.
#[cfg(unix)]
#[allow(dead_code)]
pub fn scripted_home(root: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let home = root.join(name);
    let launcher = launcher_path(&home);
    std::fs::create_dir_all(launcher.parent().unwrap()).unwrap();
    std::fs::write(&launcher, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&launcher, std::fs::Permissions::from_mode(0o755)).unwrap();
    home
}

/// A launcher printing a Temurin-style property dump and banner.
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_jdk(root: &Path, name: &str, version: &str) -> PathBuf {
    let body = format!(
        r#"cat >&2 <<'OUT'
Property settings:
    java.specification.vendor = Oracle Corporation
    java.vendor = Eclipse Adoptium
    java.version = {version}
    os.arch = amd64
    sun.arch.data.model = 64

openjdk version "{version}" 2022-01-18
OpenJDK Runtime Environment Temurin-{version}+8 (build {version}+8)
OpenJDK 64-Bit Server VM Temurin-{version}+8 (build {version}+8, mixed mode)
OUT"#
    );
    scripted_home(root, name, &body)
}

/// Derives the version from the directory name (`jdk-17` -> 17), counts calls
/// and remembers the most probes ever running at the same time.
#[derive(Default)]
#[allow(dead_code)]
pub struct NameProber {
    calls: AtomicUsize,
    running: AtomicUsize,
    peak: AtomicUsize,
}

#[allow(dead_code)]
impl NameProber {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_running(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JvmProber for NameProber {
    async fn probe(&self, candidate: &JvmCandidate) -> Result<JvmInstallation, ProbeFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        // Give concurrent callers a chance to pile up on the registry.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        self.running.fetch_sub(1, Ordering::SeqCst);

        let name = candidate
            .home
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let version = name
            .strip_prefix("jdk-")
            .and_then(JavaVersion::parse)
            .ok_or_else(|| ProbeFailure::UnparsableOutput {
                launcher: candidate.launcher(),
            })?;

        Ok(JvmInstallation {
            home: candidate.home.clone(),
            vendor: "Test".to_string(),
            version,
            bitness: Bitness::Bits64,
            is_current: candidate.is_current(),
        })
    }
}
