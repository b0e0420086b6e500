use lw_core::WorldConfig;

/// Print the default world configuration, ready to be edited and passed
/// back with `--config`.
pub fn run() -> Result<(), String> {
    let json = WorldConfig::default()
        .to_json_pretty()
        .map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
