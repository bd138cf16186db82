//! Merged-config output

use anyhow::{Context, Result};
use serde_yaml::Mapping;
use std::fs;
use std::path::{Path, PathBuf};

/// Derive the output path from a template path by inserting `_test` before
/// the extension: `config/api_config.yaml` → `config/api_config_test.yaml`.
pub fn test_output_path(template: &Path) -> PathBuf {
    let stem = template.file_stem().and_then(|s| s.to_str()).unwrap_or("config");
    match template.extension().and_then(|e| e.to_str()) {
        Some(ext) => template.with_file_name(format!("{stem}_test.{ext}")),
        None => template.with_file_name(format!("{stem}_test")),
    }
}

/// Serialize a merged mapping as block-style YAML. Write errors propagate;
/// there is no atomic-write or backup step for this one-shot tool.
pub fn write_yaml_mapping(path: &Path, mapping: &Mapping) -> Result<()> {
    let rendered = serde_yaml::to_string(mapping)
        .with_context(|| format!("Failed serializing config for {}", path.display()))?;
    fs::write(path, rendered)
        .with_context(|| format!("Failed writing config: {}", path.display()))
}
