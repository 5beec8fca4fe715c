use jvmscope_api::JvmResolver;
use jvmscope_core::{AvailableJavaInstallations, JvmConfig};
use std::path::Path;
use std::sync::Arc;

/// Bootstraps the Java installation service from a configuration value.
///
/// This is the entry point build-tool integrations use: they hand over the
/// configuration they collected and keep the returned handle for the lifetime
/// of the build.
pub fn build_default_resolver(config: &JvmConfig) -> jvmscope_core::Result<Arc<dyn JvmResolver>> {
    Ok(build_service(config)?)
}

/// Same as [`build_default_resolver`] but keeps the concrete type, which also
/// exposes the registry and version queries.
pub fn build_service(config: &JvmConfig) -> jvmscope_core::Result<Arc<AvailableJavaInstallations>> {
    let service = AvailableJavaInstallations::new(config)?;
    tracing::debug!(
        "Java installation service ready ({} search roots, {} hints)",
        config.search_roots.len(),
        config.env_hints.len()
    );
    Ok(Arc::new(service))
}

/// Configuration from a JSON file when given, otherwise from the process
/// environment (or empty when `use_defaults` is false).
pub fn load_config(path: Option<&Path>, use_defaults: bool) -> jvmscope_core::Result<JvmConfig> {
    match path {
        Some(path) => JvmConfig::load(path),
        None if use_defaults => Ok(JvmConfig::from_environment()),
        None => Ok(JvmConfig::default()),
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(jvmscope_core::logging::init_logging(component, to_stderr))
}
