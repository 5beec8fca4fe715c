//! Candidate scanner.
//!
//! Collects directories that look like JVM homes from search roots, named
//! hints and the JVM the host itself runs on. Only the filesystem layout is
//! inspected here; nothing is executed.

use jvmscope_api::{CandidateOrigin, JvmCandidate, launcher_path};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct InstallationScanner {
    current_jvm: Option<PathBuf>,
}

impl InstallationScanner {
    pub fn new(current_jvm: Option<PathBuf>) -> Self {
        Self {
            current_jvm: current_jvm.and_then(|home| Self::resolve_home(&home)),
        }
    }

    /// Home of the JVM the host runs on, canonicalized.
    pub fn current_jvm(&self) -> Option<&Path> {
        self.current_jvm.as_deref()
    }

    /// Home of the `java` found on `PATH`, following symlinks such as
    /// `/usr/bin/java -> /usr/lib/jvm/java-17/bin/java`.
    pub fn detect_current_jvm() -> Option<PathBuf> {
        let launcher = which::which("java").ok()?;
        let launcher = std::fs::canonicalize(launcher).ok()?;
        let home = launcher.parent()?.parent()?;
        Self::resolve_home(home)
    }

    /// Canonical JVM home for `path`, if it is one.
    ///
    /// A macOS bundle (`<dir>/Contents/Home`) resolves to its inner home.
    pub fn resolve_home(path: &Path) -> Option<PathBuf> {
        let bundle_home = path.join("Contents/Home");
        let home = if launcher_path(&bundle_home).is_file() {
            bundle_home
        } else if launcher_path(path).is_file() {
            path.to_path_buf()
        } else {
            return None;
        };
        std::fs::canonicalize(home).ok()
    }

    /// Enumerate candidates, unique by canonical home and sorted by it.
    ///
    /// Missing or unreadable roots contribute nothing.
    pub fn scan(
        &self,
        search_roots: &[PathBuf],
        env_hints: &BTreeMap<String, PathBuf>,
    ) -> Vec<JvmCandidate> {
        let mut found: BTreeMap<PathBuf, CandidateOrigin> = BTreeMap::new();
        let mut add = |home: PathBuf, origin: CandidateOrigin| {
            found
                .entry(home)
                .and_modify(|existing| *existing = (*existing).max(origin))
                .or_insert(origin);
        };

        for root in search_roots {
            let entries = match std::fs::read_dir(root) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!("Skipping search root {:?}: {}", root, e);
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }
                match Self::resolve_home(&path) {
                    Some(home) => add(home, CandidateOrigin::SearchPathHint),
                    None => debug!("{:?} is not a JVM home", path),
                }
            }
        }

        for (name, path) in env_hints {
            match Self::resolve_home(path) {
                Some(home) => add(home, CandidateOrigin::EnvironmentVariable),
                None => debug!("Hint {} ({:?}) is not a JVM home", name, path),
            }
        }

        if let Some(current) = &self.current_jvm {
            add(current.clone(), CandidateOrigin::CurrentJvm);
        }

        found
            .into_iter()
            .map(|(home, origin)| JvmCandidate::new(home, origin))
            .collect()
    }
}
