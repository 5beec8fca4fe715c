use jvmscope_api::ConstraintParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JvmScopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid version constraint for {field}: {source}")]
    Constraint {
        field: String,
        #[source]
        source: ConstraintParseError,
    },
    #[error("Invalid output pattern for vendor {vendor}: {source}")]
    VendorPattern {
        vendor: String,
        #[source]
        source: regex::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JvmScopeError>;
