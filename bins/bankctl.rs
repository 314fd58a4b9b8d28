use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use common::utils::logging::{init_logging, LogFormat};
use models::{Customer, CustomerId};
use service::BankClient;

/// Command-line front end for the banking backend.
#[derive(Debug, Parser)]
#[command(name = "bankctl", version, about)]
struct Cli {
    /// Backend address, overrides config file and BACKEND_HOST.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log output format: compact or json.
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of an account's operations.
    Account {
        account_id: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 5)]
        size: u32,
    },
    /// List all accounts.
    Accounts,
    /// Full operation history of an account.
    History { account_id: String },
    Debit {
        account_id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(default_value = "")]
        description: String,
    },
    Credit {
        account_id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(default_value = "")]
        description: String,
    },
    Transfer {
        source: String,
        destination: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(default_value = "")]
        description: String,
    },
    /// List all customers.
    Customers,
    /// Search customers by keyword.
    Search { keyword: String },
    Customer { id: CustomerId },
    SaveCustomer { name: String, email: String },
    UpdateCustomer { id: CustomerId, name: String, email: String },
    DeleteCustomer { id: CustomerId },
}

fn init_logging_for(cli: &Cli) {
    // .env may carry RUST_LOG and BACKEND_HOST
    dotenv().ok();
    init_logging(LogFormat::from_name(&cli.log_format));
    info!(service = "bankctl", event = "logger_init", "tracing subscriber initialized");
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = configs::AppConfig::load_and_validate()?;
    if let Some(host) = cli.host {
        cfg.backend.apply_host_override(Some(host));
        cfg.backend.normalize();
        cfg.backend.validate()?;
    }
    info!(service = "bankctl", event = "backend", host = %cfg.backend.host, "using backend");

    let client = BankClient::from_config(&cfg.backend)?;
    match cli.command {
        Command::Account { account_id, page, size } => {
            let details = client.accounts.get_account(&account_id, page, size).await?;
            if !details.is_last_page() {
                info!(%account_id, next_page = page.saturating_add(1), total_pages = details.total_pages, "more operations available");
            }
            print_json(&details)
        }
        Command::Accounts => print_json(&client.accounts.list_accounts().await?),
        Command::History { account_id } => print_json(&client.accounts.account_history(&account_id).await?),
        Command::Debit { account_id, amount, description } => {
            print_json(&client.accounts.debit(&account_id, amount, &description).await?)
        }
        Command::Credit { account_id, amount, description } => {
            print_json(&client.accounts.credit(&account_id, amount, &description).await?)
        }
        Command::Transfer { source, destination, amount, description } => {
            client.accounts.transfer(&source, &destination, amount, &description).await?;
            Ok(())
        }
        Command::Customers => print_json(&client.customers.get_customers().await?),
        Command::Search { keyword } => print_json(&client.customers.search_customers(&keyword).await?),
        Command::Customer { id } => print_json(&client.customers.get_customer(id).await?),
        Command::SaveCustomer { name, email } => {
            print_json(&client.customers.save_customer(&Customer::new(name, email)).await?)
        }
        Command::UpdateCustomer { id, name, email } => {
            let customer = Customer::new(name, email).with_id(id);
            print_json(&client.customers.update_customer(id, &customer).await?)
        }
        Command::DeleteCustomer { id } => client.customers.delete_customer(id).await.map_err(Into::into),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging_for(&cli);

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "bankctl", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "bankctl", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "bankctl", event = "start", %run_id, version, command = ?cli.command, "running command");
    match rt.block_on(run(cli)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "bankctl", event = "command_failed", %run_id, error = %e, "command failed");
            eprintln!("error: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
