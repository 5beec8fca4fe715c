//! Lazily populated set of validated installations.
//!
//! Population runs the scanner and probes every candidate, at most once per
//! registry. Concurrent first callers wait on the same population and then
//! share its result.

use super::scanner::InstallationScanner;
use jvmscope_api::{JvmCandidate, JvmInstallation, JvmProber, ProbeFailure, VersionConstraint};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Outcome counters of one population.
#[derive(Debug, Default, Clone)]
pub struct ScanSummary {
    /// Candidates produced by the scanner
    pub candidates: usize,
    /// Candidates that probed successfully
    pub installations: usize,
    /// Candidates dropped because probing failed
    pub failed: usize,
    /// Of the failures, how many hit the probe timeout
    pub timed_out: usize,
    pub duration: Duration,
}

struct Snapshot {
    installations: Arc<[JvmInstallation]>,
    summary: ScanSummary,
}

pub struct InstallationRegistry {
    scanner: InstallationScanner,
    prober: Arc<dyn JvmProber>,
    search_roots: Vec<PathBuf>,
    env_hints: BTreeMap<String, PathBuf>,
    max_parallel: usize,
    state: OnceCell<Snapshot>,
}

impl InstallationRegistry {
    pub fn new(
        scanner: InstallationScanner,
        prober: Arc<dyn JvmProber>,
        search_roots: Vec<PathBuf>,
        env_hints: BTreeMap<String, PathBuf>,
    ) -> Self {
        Self {
            scanner,
            prober,
            search_roots,
            env_hints,
            max_parallel: 4,
            state: OnceCell::new(),
        }
    }

    /// Bound the number of concurrent probes.
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    pub fn scanner(&self) -> &InstallationScanner {
        &self.scanner
    }

    pub fn prober(&self) -> Arc<dyn JvmProber> {
        Arc::clone(&self.prober)
    }

    pub fn is_populated(&self) -> bool {
        self.state.initialized()
    }

    /// Drop the cached set; the next query scans again.
    pub fn invalidate(&mut self) {
        self.state.take();
    }

    /// Validated installations sorted by home. The same `Arc` is returned on
    /// every call once populated.
    pub async fn installations(&self) -> Arc<[JvmInstallation]> {
        Arc::clone(&self.snapshot().await.installations)
    }

    /// Counters of the population, if it has happened.
    pub fn summary(&self) -> Option<ScanSummary> {
        self.state.get().map(|s| s.summary.clone())
    }

    /// Installations matching `constraint`, newest version first, then by home.
    pub async fn by_version(&self, constraint: Option<&VersionConstraint>) -> Vec<JvmInstallation> {
        let mut matching: Vec<JvmInstallation> = self
            .installations()
            .await
            .iter()
            .filter(|i| constraint.is_none_or(|c| c.matches(&i.version)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.version.cmp(&a.version).then_with(|| a.home.cmp(&b.home)));
        matching
    }

    async fn snapshot(&self) -> &Snapshot {
        self.state.get_or_init(|| self.populate()).await
    }

    async fn populate(&self) -> Snapshot {
        let start = Instant::now();

        let scanner = self.scanner.clone();
        let roots = self.search_roots.clone();
        let hints = self.env_hints.clone();
        let candidates = tokio::task::spawn_blocking(move || scanner.scan(&roots, &hints))
            .await
            .unwrap_or_else(|e| {
                warn!("Candidate scan failed: {}", e);
                Vec::new()
            });

        let mut summary = ScanSummary {
            candidates: candidates.len(),
            ..ScanSummary::default()
        };

        let (results, panicked) =
            probe_all(Arc::clone(&self.prober), candidates, self.max_parallel).await;
        summary.failed += panicked;

        let mut by_home: BTreeMap<PathBuf, JvmInstallation> = BTreeMap::new();
        for (candidate, result) in results {
            match result {
                Ok(installation) => {
                    debug!("Found {}", installation);
                    by_home
                        .entry(installation.home.clone())
                        .and_modify(|existing| existing.is_current |= installation.is_current)
                        .or_insert(installation);
                }
                Err(failure) => {
                    summary.failed += 1;
                    if matches!(failure, ProbeFailure::Timeout { .. }) {
                        summary.timed_out += 1;
                    }
                    debug!("Dropping candidate {:?}: {}", candidate.home, failure);
                }
            }
        }

        summary.installations = by_home.len();
        summary.duration = start.elapsed();
        info!(
            "Java installation scan complete: {} candidates, {} usable, {} failed in {:?}",
            summary.candidates, summary.installations, summary.failed, summary.duration
        );

        Snapshot {
            installations: by_home.into_values().collect(),
            summary,
        }
    }
}

type ProbeOutcome = (JvmCandidate, Result<JvmInstallation, ProbeFailure>);

/// Probe every candidate with at most `max_parallel` launchers running.
/// Returns once all probes have finished, with the number of probe tasks
/// that panicked instead of reporting.
async fn probe_all(
    prober: Arc<dyn JvmProber>,
    candidates: Vec<JvmCandidate>,
    max_parallel: usize,
) -> (Vec<ProbeOutcome>, usize) {
    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    let mut set = JoinSet::new();

    for candidate in candidates {
        let prober = Arc::clone(&prober);
        let semaphore = Arc::clone(&semaphore);
        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let result = prober.probe(&candidate).await;
            (candidate, result)
        });
    }

    let mut results = Vec::new();
    let mut panicked = 0;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => {
                panicked += 1;
                warn!("Probe task failed: {}", e);
            }
        }
    }
    (results, panicked)
}
