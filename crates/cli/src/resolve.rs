use jvmscope_api::SelectionPurpose;
use jvmscope_core::JvmConfig;

pub async fn run(
    config: &JvmConfig,
    purpose: SelectionPurpose,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = jvmscope_runtime::build_service(config)?;
    let installation = service.resolve(purpose).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&installation)?);
    } else {
        println!("{}", installation.home.display());
    }
    Ok(())
}
