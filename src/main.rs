use anyhow::Context;
use clap::Parser;
use freezer_tracker::utils::error::{ErrorSeverity, InventoryError};
use freezer_tracker::utils::{logger, validation::Validate};
use freezer_tracker::{router, AppState, Inventory, JsonFileStore, ServeArgs, StateStore};
use std::sync::Arc;

fn exit_with(e: &InventoryError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeArgs::parse();

    // 設定檔載入失敗時日誌尚未初始化，直接輸出到 stderr
    let settings = match args.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    logger::init_logger(settings.log_format, settings.verbose);

    tracing::info!("🚀 Starting freezer-tracker");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }
    let addr = match settings.bind_addr() {
        Ok(addr) => addr,
        Err(e) => exit_with(&e),
    };

    let store = Arc::new(JsonFileStore::new(&settings.store_path));
    match store.load().await {
        Ok(state) => tracing::info!(
            "📁 Loaded {} with {} freezers and {} containers",
            store.location(),
            state.freezers.len(),
            state.container_count()
        ),
        Err(e) if e.is_not_found() => {
            tracing::warn!(
                "📁 {} does not exist yet; requests will fail until it is created",
                store.location()
            );
            tracing::warn!("💡 {}", e.recovery_suggestion());
        }
        Err(e) => tracing::warn!("📁 {}", e),
    }

    let inventory = Inventory::with_move_policy(store, settings.move_policy);
    tracing::info!("🔧 Move policy: {}", inventory.move_policy());

    match &settings.ui_dir {
        Some(dir) => tracing::info!("🖥️ Serving UI from {}", dir.display()),
        None => tracing::info!("🖥️ No UI directory configured, API only"),
    }

    let app = router(AppState::new(inventory), settings.ui_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind http listener on {}", addr))?;

    tracing::info!("Serving on port {}", settings.listen);
    println!("Serving on port {}", settings.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("http server crashed")?;

    tracing::info!("👋 Shut down");
    Ok(())
}
