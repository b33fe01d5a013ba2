use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dotenvy::dotenv;
use serde_json::Value;
use uuid::Uuid;

use budget_back_end::budgets::processor::{get_current_budget, update_budget};
use budget_back_end::budgets::processor_enums::{BudgetInput, UpdateBudgetResult};
use budget_back_end::cli_utils::formatting::{format_amount, format_datetime, format_usage};
use budget_back_end::cli_utils::{Input, format_record, print_error, print_header, print_success};
use budget_back_end::sockets::SocketInvalidator;
use budget_back_end::store::PgStore;
use budget_back_end::utils::app_config::{AppConfig, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "budget-cli",
    about = "Inspect and set monthly budgets",
    long_about = "Runs the budget read and write operations directly against the database"
)]
struct CliArgs {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the budget and this month's expenses for one account
    Show {
        /// Session id of the user (identity provider user id)
        #[arg(long)]
        session: String,

        /// Account to sum expenses for
        #[arg(long)]
        account: Uuid,
    },
    /// Create or replace the user's budget
    Set {
        /// Session id of the user (identity provider user id)
        #[arg(long)]
        session: String,

        /// New amount, prompted for when omitted
        #[arg(long)]
        amount: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()).as_str())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let app_config = AppConfig::from_settings(&args.settings)?;
    let store = PgStore::new(app_config.pool.clone());

    match args.command {
        Command::Show { session, account } => show_budget(&store, session, account).await,
        Command::Set { session, amount } => set_budget(&store, session, amount).await,
    }
}

async fn show_budget(store: &PgStore, session: String, account: Uuid) -> Result<()> {
    print_header("Current Budget");

    let identity = store.identity(Some(session));
    let current = get_current_budget(&identity, store, account).await?;

    let mut record = vec![
        ("Account", account.to_string()),
        ("Expenses this month", format_amount(current.current_expenses)),
    ];

    match &current.budget {
        Some(budget) => {
            record.push(("Budget", format_amount(budget.amount)));
            if let Some(usage) = format_usage(current.current_expenses, budget.amount) {
                record.push(("Used", usage));
            }
            record.push(("Updated", format_datetime(&budget.updated_at)));
        }
        None => record.push(("Budget", "not set".dimmed().to_string())),
    }

    format_record(record);

    Ok(())
}

async fn set_budget(store: &PgStore, session: String, amount: Option<String>) -> Result<()> {
    print_header("Set Budget");

    let amount = match amount {
        Some(amount) => amount,
        None => Input::get_string("Monthly budget amount")?,
    };

    let identity = store.identity(Some(session));
    let data = BudgetInput::from_json(Value::String(amount));

    match update_budget(&identity, store, &SocketInvalidator::default(), data).await {
        UpdateBudgetResult::Success(budget) => {
            print_success(&format!("Budget set to {}", format_amount(budget.amount)));
            format_record(vec![
                ("Budget id", budget.id.to_string()),
                ("User id", budget.user_id.to_string()),
                ("Updated", format_datetime(&budget.updated_at)),
            ]);
            Ok(())
        }
        UpdateBudgetResult::Failure(error) => {
            print_error(&error);
            Err(anyhow!(error))
        }
    }
}
