use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Extensions recognised as data files inside a packs directory.
const DATA_EXTENSIONS: &[&str] = &["db", "json", "jsonl", "ndjson"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackFormat {
    Array,
    Lines,
}

#[derive(Debug, Clone)]
pub struct Pack {
    pub path: PathBuf,
    pub format: PackFormat,
    pub records: Vec<Value>,
}

impl Pack {
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::fs(path, e))?;
        Self::parse(path, &raw)
    }

    /// Parse `raw` as the contents of `path`. Errors carry the 1-based line.
    pub fn parse(path: &Path, raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('[') {
            let records: Vec<Value> = serde_json::from_str(trimmed).map_err(|source| {
                // serde reports lines relative to the trimmed text
                let skipped = raw[..raw.len() - raw.trim_start().len()].matches('\n').count();
                AppError::Parse { file: path.to_path_buf(), line: source.line() + skipped, source }
            })?;
            return Ok(Pack { path: path.to_path_buf(), format: PackFormat::Array, records });
        }

        let mut records = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| AppError::Parse {
                file: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(Pack { path: path.to_path_buf(), format: PackFormat::Lines, records })
    }

    /// Serialize using the detected format: compact JSON, trailing newline.
    pub fn serialize(&self) -> AppResult<String> {
        match self.format {
            PackFormat::Array => {
                let mut out = serde_json::to_string(&self.records)?;
                out.push('\n');
                Ok(out)
            }
            PackFormat::Lines => {
                let mut out = String::new();
                for record in &self.records {
                    out.push_str(&serde_json::to_string(record)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    pub async fn save(&self) -> AppResult<()> {
        let body = self.serialize()?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| AppError::fs(&self.path, e))
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Data files directly inside `dir`, sorted by file name.
pub async fn list_data_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| AppError::fs(dir, e))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| AppError::fs(dir, e))? {
        let path = entry.path();
        let is_file = entry
            .file_type()
            .await
            .map_err(|e| AppError::fs(&path, e))?
            .is_file();
        let known_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| DATA_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_file && known_ext {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
