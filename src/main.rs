use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use modsort::core::http::build_http_client;
use modsort::core::registry::{ModrinthClient, MODRINTH_API_BASE};
use modsort::core::sorter::{
    CancelFlag, Category, ModSorter, NullObserver, SortObserver, SortOptions, SortReport,
};
use modsort::SorterResult;

/// Sort a folder of Minecraft mod jars into client-only / server-only /
/// both / unknown buckets using Modrinth metadata.
#[derive(Debug, Parser)]
#[command(name = "modsort", version, about)]
struct Cli {
    /// Folder containing the .jar files to sort.
    mods_dir: PathBuf,

    /// Output root. Defaults to a `sorted_mods` folder next to MODS_DIR.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pause between files, in milliseconds, respecting the registry's
    /// rate limits. 0 disables the pause.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Per-request timeout for registry calls, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Alternative registry API root (mirrors, test servers).
    #[arg(long, default_value = MODRINTH_API_BASE)]
    api_base: String,

    /// Print the final report as JSON on stdout instead of the
    /// human-readable log.
    #[arg(long)]
    json: bool,
}

/// Renders pipeline progress on the terminal.
struct ConsoleObserver;

impl SortObserver for ConsoleObserver {
    fn on_status(&self, line: &str) {
        println!("{line}");
    }

    fn on_progress(&self, _done: usize, _total: usize) {
        // Status lines already carry the [i/total] counter.
    }

    fn on_summary(&self, report: &SortReport) {
        println!("\n{}", "=".repeat(60));
        println!("SUMMARY");
        println!("{}", "=".repeat(60));

        for category in Category::ALL {
            let files = report.files(category);
            println!("\n{}: {} mods", category.label(), files.len());
            for name in files {
                println!("   - {name}");
            }
        }

        println!("\n{}", "=".repeat(60));
        println!("Output folder: {}", report.destination.display());
        if report.cancelled {
            println!("(cancelled — partial result)");
        }
    }
}

#[tokio::main]
async fn main() {
    // Structured logging on stderr; stdout stays clean for the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modsort=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> SorterResult<()> {
    let http = build_http_client(Duration::from_secs(cli.timeout_secs))?;
    let registry = ModrinthClient::new(http).with_base_url(cli.api_base);

    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl-C received, stopping after the current file...");
                cancel.cancel();
            }
        });
    }

    let observer: Box<dyn SortObserver> = if cli.json {
        Box::new(NullObserver)
    } else {
        Box::new(ConsoleObserver)
    };

    let sorter = ModSorter::new(registry)
        .with_options(SortOptions {
            output_dir: cli.output,
            delay: Duration::from_millis(cli.delay_ms),
        })
        .with_observer(observer)
        .with_cancel_flag(cancel);

    let report = sorter.run(&cli.mods_dir).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
