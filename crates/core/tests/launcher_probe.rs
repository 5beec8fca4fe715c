#![cfg(unix)]

mod common;

use common::{fake_jdk, scripted_home, stub_home};
use jvmscope_api::{Bitness, CandidateOrigin, JavaVersion, JvmCandidate, JvmProber, ProbeFailure};
use jvmscope_core::config::ProbeConfig;
use jvmscope_core::discovery::LauncherProbe;
use std::time::{Duration, Instant};

fn probe_with_timeout(timeout_ms: u64) -> LauncherProbe {
    LauncherProbe::from_config(&ProbeConfig {
        timeout_ms,
        ..ProbeConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_probe_reads_launcher_output() {
    let dir = tempfile::tempdir().unwrap();
    let home = fake_jdk(dir.path(), "jdk-17", "17.0.2");

    let candidate = JvmCandidate::new(home.clone(), CandidateOrigin::CurrentJvm);
    let installation = probe_with_timeout(5_000).probe(&candidate).await.unwrap();

    assert_eq!(installation.home, home);
    assert_eq!(installation.vendor, "Eclipse Adoptium");
    assert_eq!(installation.version, JavaVersion::new(17, 0, 2));
    assert_eq!(installation.bitness, Bitness::Bits64);
    assert!(installation.is_current);
}

#[tokio::test]
async fn test_probe_reads_stdout_too() {
    let dir = tempfile::tempdir().unwrap();
    let home = scripted_home(
        dir.path(),
        "jdk-8",
        r#"echo 'java version "1.8.0_291"'
echo 'Java(TM) SE Runtime Environment (build 1.8.0_291-b10)'
echo 'Java HotSpot(TM) 64-Bit Server VM (build 25.291-b10, mixed mode)'"#,
    );

    let candidate = JvmCandidate::new(home, CandidateOrigin::SearchPathHint);
    let installation = probe_with_timeout(5_000).probe(&candidate).await.unwrap();

    assert_eq!(installation.vendor, "Oracle");
    assert_eq!(installation.version, JavaVersion::new(8, 0, 291));
    assert_eq!(installation.bitness, Bitness::Bits64);
    assert!(!installation.is_current);
}

#[tokio::test]
async fn test_garbage_output_is_unparsable() {
    let dir = tempfile::tempdir().unwrap();
    let home = scripted_home(dir.path(), "jdk-odd", "echo 'Segmentation fault' >&2; exit 1");

    let candidate = JvmCandidate::new(home, CandidateOrigin::SearchPathHint);
    let err = probe_with_timeout(5_000).probe(&candidate).await.unwrap_err();

    assert!(matches!(err, ProbeFailure::UnparsableOutput { .. }));
}

#[tokio::test]
async fn test_non_executable_launcher() {
    let dir = tempfile::tempdir().unwrap();
    let home = stub_home(dir.path(), "jdk-17");

    let candidate = JvmCandidate::new(home, CandidateOrigin::SearchPathHint);
    let err = probe_with_timeout(5_000).probe(&candidate).await.unwrap_err();

    assert_eq!(
        err,
        ProbeFailure::NotExecutable {
            launcher: candidate.launcher()
        }
    );
}

#[tokio::test]
async fn test_hanging_launcher_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let home = scripted_home(dir.path(), "jdk-hang", "exec sleep 30");

    let candidate = JvmCandidate::new(home, CandidateOrigin::SearchPathHint);
    let start = Instant::now();
    let err = probe_with_timeout(200).probe(&candidate).await.unwrap_err();

    assert_eq!(
        err,
        ProbeFailure::Timeout {
            launcher: candidate.launcher(),
            timeout: Duration::from_millis(200),
        }
    );
    assert!(start.elapsed() < Duration::from_secs(10));
}
