use jvmscope_core::JvmConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(JvmConfig);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
