//! Module manifest lookup. Only the identifier is read.
use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    id: Option<String>,
    /// Legacy manifests carry the identifier as `name`.
    #[serde(default)]
    name: Option<String>,
}

/// Read the module identifier from the manifest at `path`.
pub async fn read_module_id(path: &Path) -> AppResult<String> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Config(format!("Cannot read module manifest {}: {}", path.display(), e))
    })?;
    parse_module_id(&raw)
        .map_err(|msg| AppError::Config(format!("{} in {}", msg, path.display())))
}

fn parse_module_id(raw: &str) -> Result<String, String> {
    let manifest: ManifestFile =
        serde_json::from_str(raw).map_err(|e| format!("Invalid manifest JSON ({})", e))?;
    manifest
        .id
        .or(manifest.name)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| "Manifest has no module id".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_id_over_name() {
        let id = parse_module_id(r#"{"id":"arcane-codex","name":"Old"}"#).unwrap();
        assert_eq!(id, "arcane-codex");
    }

    #[test]
    fn falls_back_to_legacy_name() {
        assert_eq!(parse_module_id(r#"{"name":"legacy-mod"}"#).unwrap(), "legacy-mod");
    }

    #[test]
    fn missing_id_is_an_error() {
        assert!(parse_module_id(r#"{"title":"No id"}"#).is_err());
        assert!(parse_module_id(r#"{"id":""}"#).is_err());
        assert!(parse_module_id("not json").is_err());
    }

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = read_module_id(&tmp.path().join("module.json")).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
