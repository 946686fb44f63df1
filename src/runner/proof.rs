//! Proof-icon driver: render a named handful of records with the hosted
//! backend so the prompt style can be reviewed before a full run.
//!
//! Data files are never rewritten here.
use std::path::PathBuf;
use std::time::Duration;

use crate::client::{ImageGenerator, ImageSize};
use crate::error::AppResult;
use crate::pack::{list_data_files, Pack, RecordView};
use crate::prompt::{classify, proof_prompt};
use crate::runner::{file_exists, write_icon};
use crate::utils::naming::proof_icon_path;

#[derive(Debug, Clone)]
pub struct ProofJob {
    pub module_root: PathBuf,
    pub packs_dir: PathBuf,
    pub names: Vec<String>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub size: ImageSize,
    /// Pause after every upstream call.
    pub delay: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofSummary {
    pub generated: usize,
    pub planned: usize,
    pub skipped: usize,
    pub missing: usize,
}

/// One name per line; blank lines and `#` comments are ignored.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub async fn run_proofs<G>(job: &ProofJob, generator: &G) -> AppResult<ProofSummary>
where
    G: ImageGenerator + ?Sized,
{
    let mut packs = Vec::new();
    for path in list_data_files(&job.packs_dir).await? {
        packs.push(Pack::load(&path).await?);
    }
    tracing::info!(packs = packs.len(), names = job.names.len(), "Loaded packs for proof run");

    let mut summary = ProofSummary::default();
    for wanted in &job.names {
        let Some(record) = find_record(&packs, wanted) else {
            tracing::warn!(name = %wanted, "Record not found in any pack, skipping");
            summary.missing += 1;
            continue;
        };
        let classification = classify(&record);
        let path = proof_icon_path(&job.module_root, classification.kind, record.name(), record.id());

        if !job.overwrite && file_exists(&path).await {
            tracing::info!(record = %record.name(), "Proof icon exists, skipping");
            summary.skipped += 1;
            continue;
        }

        let prompt = proof_prompt(&classification, &record);
        if job.dry_run {
            tracing::info!(record = %record.name(), path = %path.display(), prompt = %prompt, "[dry-run] Would generate proof icon");
            summary.planned += 1;
            continue;
        }

        tracing::info!(record = %record.name(), backend = generator.name(), "Generating proof icon");
        let bytes = generator.generate(&prompt, job.size).await?;
        write_icon(&path, &bytes).await?;
        summary.generated += 1;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote proof icon");

        if !job.delay.is_zero() {
            tokio::time::sleep(job.delay).await;
        }
    }

    tracing::info!(
        generated = summary.generated,
        planned = summary.planned,
        skipped = summary.skipped,
        missing = summary.missing,
        "Proof run complete"
    );
    Ok(summary)
}

/// First record, in file then record order, whose name matches `wanted`
/// ignoring case.
fn find_record<'a>(packs: &'a [Pack], wanted: &str) -> Option<RecordView<'a>> {
    let wanted = wanted.trim().to_lowercase();
    packs
        .iter()
        .flat_map(|pack| pack.records.iter())
        .filter_map(RecordView::new)
        .find(|record| record.name().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn name_list_skips_comments_and_blanks() {
        let names = parse_name_list("# proofs\nAcid Splash\n\n  Boots of Speed  \n#Light\n");
        assert_eq!(names, vec!["Acid Splash", "Boots of Speed"]);
    }

    #[test]
    fn find_record_is_case_insensitive_and_ordered() {
        let first = Pack::parse(
            Path::new("a.db"),
            "\"junk\"\n{\"_id\":\"1\",\"name\":\"Light\",\"type\":\"spell\"}\n",
        )
        .unwrap();
        let second = Pack::parse(Path::new("b.db"), "[{\"_id\":\"2\",\"name\":\"light\"}]").unwrap();
        let packs = vec![first, second];

        let found = find_record(&packs, "  LIGHT ").unwrap();
        assert_eq!(found.id(), Some("1"));
        assert!(find_record(&packs, "Darkness").is_none());
    }
}
