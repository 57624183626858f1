use super::utils;
use anyhow::{Context, Result};
use prizm_core::debate::compile as compile_script;
use prizm_core::session::RoleStyle;
use std::path::Path;

pub fn compile(dataset: Option<&Path>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = utils::load_config(config_path)?;
    let repository = utils::dataset_repository(dataset, &config);
    let dataset = repository.load().context("Failed to load dataset")?;
    let script = compile_script(&dataset.records);

    if json {
        println!("{}", serde_json::to_string_pretty(&script)?);
        return Ok(());
    }

    println!(
        "📝 {} record(s) compile to {} message(s)\n",
        dataset.len(),
        script.len()
    );
    for (index, payload) in script.iter().enumerate() {
        println!("[{}] {}", index + 1, RoleStyle::of(payload.role).label);
        println!("{}\n", payload.body);
    }

    Ok(())
}
