use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use specdrift_core::patch;

/// Write a full OpenAPI document as YAML, creating parent directories.
pub fn write_spec_yaml<P: AsRef<Path>>(path: P, doc: &Value) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let yaml = patch::to_yaml(doc)?;
    fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))
}

/// Write any serializable value as pretty JSON.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("out").join("openapi.yaml");
        write_spec_yaml(&spec, &json!({"openapi": "3.0.3", "paths": {}})).unwrap();
        let text = fs::read_to_string(&spec).unwrap();
        assert!(text.starts_with("openapi: 3.0.3"));

        let report = dir.path().join("report.json");
        write_json(&report, &json!({"has_drift": false})).unwrap();
        let back: Value = serde_json::from_slice(&fs::read(&report).unwrap()).unwrap();
        assert_eq!(back["has_drift"], false);
    }
}
