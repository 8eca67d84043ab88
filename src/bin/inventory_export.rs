use clap::Parser;
use freezer_tracker::core::export::export_csv;
use freezer_tracker::utils::error::ErrorSeverity;
use freezer_tracker::utils::logger;
use freezer_tracker::{InventoryError, JsonFileStore, StateStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventory-export")]
#[command(about = "Export the freezer inventory as CSV, one row per container")]
struct Args {
    /// Path of the JSON state document
    #[arg(short, long, env = "FREEZER_STORE", default_value = "contents.json")]
    store: PathBuf,

    /// Output file; defaults to stdout. `{date}` expands to today's date.
    #[arg(short, long)]
    output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn run(args: &Args) -> Result<usize, InventoryError> {
    let store = JsonFileStore::new(&args.store);
    let state = store.load().await?;

    match &args.output {
        Some(template) => {
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            let path = template.replace("{date}", &today);
            let file = std::fs::File::create(&path)?;
            let rows = export_csv(&state, file)?;
            tracing::info!("📁 Output saved to: {}", path);
            Ok(rows)
        }
        None => export_csv(&state, std::io::stdout().lock()),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 日誌寫到 stderr，stdout 保留給 CSV
    logger::init_cli_logger(args.verbose);

    match run(&args).await {
        Ok(rows) => tracing::info!("✅ Exported {} containers", rows),
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
