//! Sequential drivers for the two scripts.
//!
//! One file at a time, one record at a time, one upstream call at a time.
//! The first error aborts the run; anything already written stays on disk.
use std::path::Path;

use crate::error::{AppError, AppResult};

pub mod icons;
pub mod proof;

pub use icons::{run_icons, IconJob, RunSummary};
pub use proof::{parse_name_list, run_proofs, ProofJob, ProofSummary};

async fn write_icon(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::fs(parent, e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| AppError::fs(path, e))
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
