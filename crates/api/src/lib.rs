pub mod error;
pub mod models;
pub mod resolver;

// Re-export commonly used types
pub use error::{ProbeFailure, SelectionFailure};
pub use models::*;
pub use resolver::{JvmProber, JvmResolver};
