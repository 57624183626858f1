use anyhow::{Context, Result};
use prizm_core::debate::builtin_dataset;
use prizm_infrastructure::JsonDatasetRepository;
use std::path::Path;

pub fn dataset(output: Option<&Path>) -> Result<()> {
    let dataset = builtin_dataset();

    match output {
        Some(path) => {
            JsonDatasetRepository::with_path(path)
                .save(&dataset)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("✅ Builtin dataset ({} records) written to {}", dataset.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&dataset)?),
    }

    Ok(())
}
