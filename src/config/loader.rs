//! Base template loading

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Load a YAML template as a mapping. A template that parses to null (empty
/// file, comments only) loads as an empty mapping; any other non-mapping
/// document is an error.
pub fn load_yaml_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading template: {}", path.display()))?;

    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid YAML syntax: {}", path.display()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => anyhow::bail!("Template is not a YAML mapping: {}", path.display()),
    }
}
