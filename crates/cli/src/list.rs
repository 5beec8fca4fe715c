use jvmscope_api::{JvmInstallation, VersionConstraint};
use jvmscope_core::JvmConfig;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct InstallationRow {
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Arch")]
    bitness: String,
    #[tabled(rename = "Current")]
    current: &'static str,
    #[tabled(rename = "Home")]
    home: String,
}

impl From<&JvmInstallation> for InstallationRow {
    fn from(installation: &JvmInstallation) -> Self {
        Self {
            version: installation.version.to_string(),
            vendor: installation.vendor.clone(),
            bitness: installation.bitness.to_string(),
            current: if installation.is_current { "*" } else { "" },
            home: installation.home.display().to_string(),
        }
    }
}

pub async fn run(
    config: &JvmConfig,
    constraint: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let constraint = constraint
        .map(|raw| raw.parse::<VersionConstraint>())
        .transpose()?;

    let service = jvmscope_runtime::build_service(config)?;
    let installations = service.by_version(constraint.as_ref()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&installations)?);
        return Ok(());
    }

    if installations.is_empty() {
        println!("No Java installations found.");
    } else {
        let rows: Vec<InstallationRow> = installations.iter().map(InstallationRow::from).collect();
        println!("{}", Table::new(rows));
    }

    if let Some(summary) = service.registry().summary() {
        println!(
            "{} candidates, {} usable, {} failed ({} timed out) in {:?}",
            summary.candidates,
            summary.installations,
            summary.failed,
            summary.timed_out,
            summary.duration
        );
    }

    Ok(())
}
