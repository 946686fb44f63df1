use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use pack_icons::client::local::SamplerSettings;
use pack_icons::runner::{run_icons, IconJob};
use pack_icons::{init_tracing, report_failure, manifest, AppResult, Config, LocalDiffusionClient};

#[derive(Parser, Debug)]
#[command(
    name = "generate-icons-db",
    about = "Generate icons for pack records and point their img at them",
    version
)]
struct Cli {
    /// Override ICON_MODULE_ROOT
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Override ICON_PACKS_DIR (relative to the root)
    #[arg(long, value_name = "DIR")]
    packs: Option<PathBuf>,
    /// Override ICON_API_URL
    #[arg(long)]
    api_url: Option<String>,
    /// Stop after generating this many icons
    #[arg(long)]
    limit: Option<usize>,
    /// Square icon size in pixels
    #[arg(long)]
    size: Option<u32>,
    /// Regenerate icons that already exist
    #[arg(long)]
    overwrite: bool,
    /// Log what would happen without calling the endpoint or writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    Config::dotenv_load();
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut conf = Config::new()?;
    if let Some(root) = cli.root {
        conf.module_root = root;
    }
    if let Some(packs) = cli.packs {
        conf.packs = packs;
    }
    if let Some(url) = cli.api_url {
        conf.api_url = url;
    }
    if let Some(limit) = cli.limit {
        conf.limit = Some(limit);
    }
    if let Some(size) = cli.size {
        conf.size = size;
    }
    conf.overwrite |= cli.overwrite;
    conf.dry_run |= cli.dry_run;
    conf.log_settings();

    let module_id = manifest::read_module_id(&conf.manifest_path()).await?;
    tracing::info!(module = %module_id, "Resolved module id");

    let client = LocalDiffusionClient::new(
        conf.api_url.clone(),
        SamplerSettings {
            steps: conf.steps,
            cfg_scale: conf.cfg_scale,
            sampler_name: conf.sampler.clone(),
        },
    );
    let job = IconJob {
        module_root: conf.module_root.clone(),
        module_id,
        packs_dir: conf.packs_dir(),
        limit: conf.limit,
        overwrite: conf.overwrite,
        dry_run: conf.dry_run,
        size: conf.image_size(),
    };
    let summary = run_icons(&job, &client).await?;
    println!(
        "Generated {} icon(s), skipped {}, rewrote {} of {} pack file(s){}",
        summary.generated,
        summary.skipped,
        summary.files_rewritten,
        summary.files_seen,
        if job.dry_run { format!(" [dry-run: {} planned]", summary.planned) } else { String::new() }
    );
    Ok(())
}
