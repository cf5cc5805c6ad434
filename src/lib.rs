// Expense Tracker - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod budget;
pub mod config;
pub mod currency;
pub mod error;
pub mod expense;
pub mod export;
pub mod ledger;
pub mod receipt;
pub mod rewards;
pub mod session;
pub mod store;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use budget::{assess, evaluate, load_budget, parse_budget, set_budget, BudgetStatus};
pub use config::Config;
pub use currency::{convert, ExchangeRateClient, RateProvider, RateTable};
pub use error::{CurrencyError, ReceiptError, TrackerError, TrackerResult, ValidationError};
pub use expense::{Expense, NewExpense, Recurrence, CATEGORIES, DEFAULT_CATEGORY};
pub use export::{export_to_path, to_csv_string, write_csv};
pub use ledger::Ledger;
pub use receipt::{ReceiptTextExtractor, TesseractCli};
pub use rewards::{accrue_reward, RewardGrant, RewardOutcome, RewardState};
pub use session::{AlertSink, ConsoleAlerts, MutationReport, RecordedAlerts, Session};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber used by the binaries (RUST_LOG overrides)
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_tracker=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
