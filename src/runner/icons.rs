//! Record-update driver: generate missing icons and point each record's
//! `img` at its generated file.
use std::path::PathBuf;

use crate::client::{ImageGenerator, ImageSize};
use crate::error::AppResult;
use crate::pack::record::set_img;
use crate::pack::{list_data_files, Pack, RecordView};
use crate::prompt::{classify, icon_prompt};
use crate::runner::{file_exists, write_icon};
use crate::utils::naming::generated_icon;

#[derive(Debug, Clone)]
pub struct IconJob {
    pub module_root: PathBuf,
    pub module_id: String,
    pub packs_dir: PathBuf,
    /// Maximum number of records to generate (or plan, in dry-run).
    pub limit: Option<usize>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub size: ImageSize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_seen: usize,
    pub files_rewritten: usize,
    pub generated: usize,
    /// Records a dry-run would have generated.
    pub planned: usize,
    pub skipped: usize,
}

impl RunSummary {
    fn processed(&self) -> usize {
        self.generated + self.planned
    }
}

impl IconJob {
    fn limit_reached(&self, summary: &RunSummary) -> bool {
        self.limit.map_or(false, |limit| summary.processed() >= limit)
    }
}

pub async fn run_icons<G>(job: &IconJob, generator: &G) -> AppResult<RunSummary>
where
    G: ImageGenerator + ?Sized,
{
    let files = list_data_files(&job.packs_dir).await?;
    let mut summary = RunSummary::default();

    for path in files {
        if job.limit_reached(&summary) {
            tracing::info!(limit = ?job.limit, "Processing limit reached");
            break;
        }
        let mut pack = Pack::load(&path).await?;
        summary.files_seen += 1;
        let file_name = pack.file_name();
        tracing::info!(file = %file_name, records = pack.records.len(), format = ?pack.format, "Loaded pack");

        let mut dirty = false;
        for record in pack.records.iter_mut() {
            if job.limit_reached(&summary) {
                break;
            }
            let Some(view) = RecordView::new(record) else {
                tracing::debug!(file = %file_name, "Skipping non-record entry");
                continue;
            };
            let name = view.name().to_string();
            let classification = classify(&view);
            let target = generated_icon(&job.module_root, &job.module_id, classification.kind, &name, view.id());

            let linked = view.img() == Some(target.reference.as_str());
            if linked && !job.overwrite && file_exists(&target.disk_path).await {
                tracing::debug!(record = %name, "Icon up to date, skipping");
                summary.skipped += 1;
                continue;
            }

            let prompt = icon_prompt(&classification, &name);
            if job.dry_run {
                tracing::info!(record = %name, path = %target.disk_path.display(), prompt = %prompt, "[dry-run] Would generate icon");
                summary.planned += 1;
                continue;
            }

            tracing::info!(record = %name, backend = generator.name(), category = classification.category_label(), "Generating icon");
            let bytes = generator.generate(&prompt, job.size).await?;
            write_icon(&target.disk_path, &bytes).await?;
            set_img(record, &target.reference);
            dirty = true;
            summary.generated += 1;
            tracing::info!(record = %name, path = %target.disk_path.display(), bytes = bytes.len(), "Wrote icon");
        }

        if dirty {
            pack.save().await?;
            summary.files_rewritten += 1;
            tracing::info!(file = %file_name, "Rewrote pack");
        } else {
            tracing::debug!(file = %file_name, "Pack unchanged");
        }
    }

    tracing::info!(
        files = summary.files_seen,
        rewritten = summary.files_rewritten,
        generated = summary.generated,
        planned = summary.planned,
        skipped = summary.skipped,
        "Icon run complete"
    );
    Ok(summary)
}
