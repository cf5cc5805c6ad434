use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use expense_tracker::expense::parse_amount;
use expense_tracker::{
    export_to_path, parse_budget, Config, ConsoleAlerts, ExchangeRateClient, MutationReport,
    NewExpense, ReceiptTextExtractor, Recurrence, Session, SqliteStore, TesseractCli,
};

#[derive(Parser)]
#[command(name = "expense-tracker")]
#[command(about = "Personal expense tracker with budget alerts and rewards")]
#[command(version)]
struct Cli {
    /// SQLite file holding the ledger (overrides EXPENSE_TRACKER_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        amount: String,
        #[arg(short, long)]
        category: Option<String>,
        /// Defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        monthly: bool,
    },
    /// List all expenses
    List,
    /// Delete an expense by id
    Delete { id: i64 },
    /// Replace an expense (the replacement gets a new id)
    Edit {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long, conflicts_with = "once")]
        monthly: bool,
        #[arg(long)]
        once: bool,
    },
    /// Show or change the budget
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
    /// Totals per category, grand total and budget status
    Summary,
    /// Write all expenses as CSV
    Export {
        #[arg(short, long, default_value = expense_tracker::export::DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Convert an amount between currencies using live rates
    Convert {
        #[arg(short, long)]
        amount: String,
        #[arg(short, long)]
        from: String,
        #[arg(short, long)]
        to: String,
    },
    /// Extract text from a receipt image
    Scan { image: PathBuf },
    /// Interactive terminal UI
    Ui,
}

#[derive(Subcommand)]
enum BudgetAction {
    Set { value: String },
    Clear,
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    // Log lines would garble the alternate screen
    if !matches!(command, Commands::Ui) {
        expense_tracker::init_tracing();
    }

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    run_command(command, &config).await
}

fn open_session(config: &Config) -> Result<Session<SqliteStore, ConsoleAlerts>> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {:?}", config.db_path))?;
    Ok(Session::open(store, ConsoleAlerts))
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Add {
            name,
            amount,
            category,
            date,
            monthly,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string());
            let new = NewExpense::parse(&name, &amount, category.as_deref(), &date, monthly)?;

            let mut session = open_session(config)?;
            let report = session.add_expense(new)?;
            if let Some(expense) = &report.expense {
                println!(
                    "✓ Added expense #{}: {} - ${} - {}",
                    expense.id, expense.name, expense.amount, expense.category
                );
            }
            print_report(&report);
        }
        Commands::List => {
            let session = open_session(config)?;
            let ledger = session.ledger();
            if ledger.is_empty() {
                println!("No expenses recorded yet.");
            }
            for expense in ledger.expenses() {
                let recurring = if expense.is_recurring() { " (monthly)" } else { "" };
                println!(
                    "{:>14}  {} - ${} - {} - {}{}",
                    expense.id,
                    expense.name,
                    expense.amount,
                    expense.category,
                    expense.date,
                    recurring
                );
            }
        }
        Commands::Delete { id } => {
            let mut session = open_session(config)?;
            let report = session.delete_expense(id)?;
            match &report.expense {
                Some(expense) => println!("✓ Deleted expense #{} ({})", expense.id, expense.name),
                None => println!("No expense with id {}", id),
            }
            print_report(&report);
        }
        Commands::Edit {
            id,
            name,
            amount,
            category,
            date,
            monthly,
            once,
        } => {
            let mut session = open_session(config)?;
            let mut fields = match session.ledger().get(id) {
                Some(expense) => expense.fields(),
                None => bail!("No expense with id {}", id),
            };

            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(amount) = amount {
                fields.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                fields.category = category;
            }
            if let Some(date) = date {
                fields.date = date;
            }
            if monthly {
                fields.recurring = Some(Recurrence::Monthly);
            } else if once {
                fields.recurring = None;
            }

            if let Some(report) = session.edit_expense(id, fields)? {
                if let Some(expense) = &report.expense {
                    println!("✓ Expense #{} replaced by #{}", id, expense.id);
                }
                print_report(&report);
            }
        }
        Commands::Budget { action } => {
            let mut session = open_session(config)?;
            match action {
                BudgetAction::Set { value } => {
                    let value = parse_budget(&value)?;
                    let report = session.set_budget(value)?;
                    println!("✓ Budget set to ${}", value);
                    print_report(&report);
                }
                BudgetAction::Clear => {
                    session.clear_budget()?;
                    println!("✓ Budget cleared (no limit)");
                }
                BudgetAction::Show => match session.budget() {
                    Some(budget) => println!("Budget: ${}", budget),
                    None => println!("Budget: no limit"),
                },
            }
        }
        Commands::Summary => {
            let session = open_session(config)?;
            let ledger = session.ledger();

            println!("📊 Totals by category");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for (category, total) in ledger.totals_by_category() {
                println!("  {:<18} ${:.2}", category, total);
            }
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("  {:<18} ${:.2}", "Total", ledger.grand_total());

            match (session.budget(), session.budget_status()) {
                (Some(budget), Some(status)) => {
                    println!("  {:<18} ${:.2} ({})", "Budget", budget, status.as_str())
                }
                _ => println!("  {:<18} no limit", "Budget"),
            }
        }
        Commands::Export { output } => {
            let session = open_session(config)?;
            let count = export_to_path(session.ledger().expenses(), &output)
                .with_context(|| format!("Failed to write {:?}", output))?;
            println!("✓ Exported {} expenses to {:?}", count, output);
        }
        Commands::Convert { amount, from, to } => {
            let amount = parse_amount(&amount)?;
            let client = ExchangeRateClient::new(config.rates_url.clone());
            let converted = expense_tracker::convert(&client, amount, &from, &to).await?;
            println!("Converted Amount: {} {}", converted, to.to_uppercase());
        }
        Commands::Scan { image } => {
            let ocr = TesseractCli::new(config.tesseract.clone(), config.ocr_language.clone());
            let text = ocr.extract_text(&image).await?;
            println!("{}", text);
        }
        Commands::Ui => run_ui_mode(config)?,
    }

    Ok(())
}

fn print_report(report: &MutationReport) {
    if report.reward.is_some() || report.total_rewards > 0 {
        println!("Total Rewards: 💰 ${}", report.total_rewards);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    use expense_tracker::ui;
    use expense_tracker::RecordedAlerts;

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database {:?}", config.db_path))?;
    let mut app = ui::App::new(Session::open(store, RecordedAlerts::default()));
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin expense-server --features server");
    std::process::exit(1);
}
