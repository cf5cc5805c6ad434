// Expense Tracker - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use expense_tracker::api::{build_app, AppState};
use expense_tracker::{Config, ExchangeRateClient, RecordedAlerts, Session, SqliteStore};
use std::sync::Arc;

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    expense_tracker::init_tracing();
    let config = Config::from_env();

    println!("🌐 Expense Tracker - Web Server v{}", expense_tracker::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {:?}", config.db_path))?;
    println!("✓ Database opened: {:?}", config.db_path);

    let session = Session::open(store, RecordedAlerts::default());
    println!("✓ Loaded {} expenses", session.ledger().len());

    let rates = Arc::new(ExchangeRateClient::new(config.rates_url.clone()));
    let app = build_app(AppState::new(session, rates));

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server_addr))?;

    println!("\n🚀 Server running on http://{}", config.server_addr);
    println!("   API: http://{}/api/expenses", config.server_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
