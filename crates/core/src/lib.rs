pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;

pub use config::JvmConfig;
pub use discovery::AvailableJavaInstallations;
pub use error::Result;
