//! Java installation discovery and selection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐    ┌──────────────────────┐
//! │ InstallationScanner  │    │   LauncherProbe      │
//! │ (roots, hints, self) │───▶│ (java -version, N∥)  │
//! └──────────────────────┘    └──────────┬───────────┘
//!                                        │
//!                                        ▼
//!                          ┌───────────────────────────┐
//!                          │   InstallationRegistry    │
//!                          │ (once, keyed by home)     │
//!                          └─────────────┬─────────────┘
//!                                        │
//!                                        ▼
//!                          ┌───────────────────────────┐
//!                          │   InstallationSelector    │
//!                          │ (override, build, test)   │
//!                          └───────────────────────────┘
//! ```

pub mod probe;
pub mod registry;
pub mod scanner;
pub mod selector;
pub mod service;
pub mod vendor;

pub use probe::LauncherProbe;
pub use registry::{InstallationRegistry, ScanSummary};
pub use scanner::InstallationScanner;
pub use selector::InstallationSelector;
pub use service::AvailableJavaInstallations;
pub use vendor::VendorTable;
