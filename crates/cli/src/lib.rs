mod list;
mod resolve;
mod schema;

use clap::{Args, Parser, Subcommand};
use jvmscope_api::SelectionPurpose;
use jvmscope_core::JvmConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jvmscope",
    version,
    about = "Discover installed Java runtimes and pick one for a build or its tests",
    long_about = "jvmscope scans well-known installation directories and environment hints for \
                  Java homes, validates each one by running its launcher, and selects the \
                  installation a build or a test run should use."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// JSON configuration file. Replaces the environment defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Additional directory whose subdirectories may be Java homes
    #[arg(long = "search-root", global = true, value_name = "DIR")]
    pub search_roots: Vec<PathBuf>,

    /// Build property, e.g. -P testJavaVersion=17
    #[arg(short = 'P', global = true, value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Home of the JVM the build runs on
    #[arg(long, global = true, value_name = "DIR")]
    pub current_java_home: Option<PathBuf>,

    /// Per-launcher probe timeout in milliseconds
    #[arg(long, global = true, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Ignore default search roots, environment hints and the java on PATH
    #[arg(long, global = true)]
    pub no_defaults: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List validated Java installations
    List {
        /// Only installations matching a version constraint, e.g. 17, 11+, 11..21
        #[arg(long, value_name = "CONSTRAINT")]
        constraint: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Select the installation for the build or for its tests
    #[command(
        long_about = "Selects the Java installation for a purpose. The buildJavaHome / testJavaHome \
                      properties force a specific home; buildJavaVersion / testJavaVersion restrict \
                      the version. Exits with a non-zero status when nothing qualifies."
    )]
    Resolve {
        /// build or test
        #[arg(value_name = "PURPOSE")]
        purpose: SelectionPurpose,

        /// Print the full installation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

/// Parse a `key=value` pair.
pub fn parse_property(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty property name in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Configuration file or environment defaults, with command-line flags on top.
pub fn build_config(args: &GlobalArgs) -> jvmscope_core::Result<JvmConfig> {
    let mut config = jvmscope_runtime::load_config(args.config.as_deref(), !args.no_defaults)?;

    if args.no_defaults {
        config.detect_current_jvm = false;
    }
    config.search_roots.extend(args.search_roots.iter().cloned());
    for (key, value) in &args.properties {
        config.set_property(key.clone(), value.clone());
    }
    if let Some(home) = &args.current_java_home {
        config.current_java_home = Some(home.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.probe.timeout_ms = timeout_ms;
    }

    config.validate()?;
    Ok(config)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = jvmscope_runtime::init_logging("cli", false);

    let config = build_config(&cli.global)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::List { constraint, json } => rt.block_on(list::run(&config, constraint, json)),
        Commands::Resolve { purpose, json } => rt.block_on(resolve::run(&config, purpose, json)),
        Commands::Schema => schema::run(),
    }
}
