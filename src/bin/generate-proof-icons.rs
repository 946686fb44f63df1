use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use pack_icons::runner::{parse_name_list, run_proofs, ProofJob};
use pack_icons::{init_tracing, report_failure, AppError, AppResult, Config, HostedConfig, HostedImageClient};

#[derive(Parser, Debug)]
#[command(
    name = "generate-proof-icons",
    about = "Render proof icons for named pack records with the hosted image API",
    version
)]
struct Cli {
    /// Record names to render
    names: Vec<String>,
    /// File with one record name per line (`#` starts a comment)
    #[arg(long, value_name = "PATH")]
    list: Option<PathBuf>,
    /// Override ICON_MODULE_ROOT
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Override ICON_PACKS_DIR (relative to the root)
    #[arg(long, value_name = "DIR")]
    packs: Option<PathBuf>,
    /// Pause after each request, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Regenerate proof icons that already exist
    #[arg(long)]
    overwrite: bool,
    /// Log what would happen without calling the API or writing files
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
    let hosted = HostedConfig::new()?;
    let mut conf = Config::new()?;
    if let Some(root) = cli.root {
        conf.module_root = root;
    }
    if let Some(packs) = cli.packs {
        conf.packs = packs;
    }
    if let Some(delay) = cli.delay_ms {
        conf.proof_delay_ms = delay;
    }
    conf.overwrite |= cli.overwrite;
    conf.dry_run |= cli.dry_run;

    let mut names = cli.names;
    if let Some(list) = cli.list {
        let raw = tokio::fs::read_to_string(&list).await.map_err(|e| AppError::fs(&list, e))?;
        names.extend(parse_name_list(&raw));
    }
    if names.is_empty() {
        return Err(AppError::Config("No record names given; pass names or --list <file>".to_string()));
    }
    conf.log_settings();

    let client = HostedImageClient::new(&hosted);
    let job = ProofJob {
        module_root: conf.module_root.clone(),
        packs_dir: conf.packs_dir(),
        names,
        overwrite: conf.overwrite,
        dry_run: conf.dry_run,
        size: hosted.size,
        delay: Duration::from_millis(conf.proof_delay_ms),
    };
    let summary = run_proofs(&job, &client).await?;
    println!(
        "Generated {} proof icon(s), skipped {}, {} name(s) not found{}",
        summary.generated,
        summary.skipped,
        summary.missing,
        if job.dry_run { format!(" [dry-run: {} planned]", summary.planned) } else { String::new() }
    );
    Ok(())
}
