//! Billed CLI — command-line client for the expense-report backend.
//!
//! Set BILLED_API_URL and either BILLED_USER (session JSON) or
//! BILLED_SESSION_FILE. A `.env` file is read when present.

use anyhow::Context;
use billed_app::{Adapter, BillsController, DraftState, NewBillController};
use billed_cli::{init_tracing, OutputFormat, TerminalAdapter};
use billed_core::{BillForm, ClientConfig, ReceiptFile, Route};
use billed_store::{BillStore, HttpBillStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "billed", about = "Billed expense-report CLI")]
struct Cli {
    /// Output format for bill lists
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bills, latest first
    List,
    /// Upload a receipt and submit a new bill
    New {
        /// Receipt image (jpg, jpeg or png)
        #[arg(long)]
        file: PathBuf,
        /// Expense type (e.g. "Transports")
        #[arg(long = "type")]
        expense_type: String,
        /// Expense name
        #[arg(long)]
        name: String,
        /// Amount including VAT
        #[arg(long)]
        amount: String,
        /// Expense date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// VAT amount
        #[arg(long, default_value = "")]
        vat: String,
        /// VAT percentage (defaults to 20)
        #[arg(long, default_value = "")]
        pct: String,
        /// Free-form commentary
        #[arg(long, default_value = "")]
        commentary: String,
    },
    /// Show the receipt of a bill
    Preview {
        /// Bill ID
        id: String,
        /// Width of the preview modal in pixels
        #[arg(long, default_value = "800")]
        modal_width: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    let session = config
        .load_session()
        .context("Failed to load session. Set BILLED_USER or BILLED_SESSION_FILE")?;
    let store: Arc<dyn BillStore> = Arc::new(
        HttpBillStore::from_config(&config, &session).context("Failed to create bill store")?,
    );

    let mut adapter = TerminalAdapter::stdio(cli.format);
    let bills = BillsController::new(Some(store.clone()), session.clone());

    match cli.command {
        Commands::List => {
            adapter.apply(bills.list().await);
        }
        Commands::New {
            file,
            expense_type,
            name,
            amount,
            date,
            vat,
            pct,
            commentary,
        } => {
            adapter.apply(bills.handle_click_new_bill());

            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("Receipt path has no file name")?
                .to_string();
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read receipt: {}", file.display()))?;

            let controller =
                NewBillController::with_extensions(store, session, config.receipt_extensions);
            adapter.apply(
                controller
                    .handle_change_file(ReceiptFile::with_guessed_type(file_name, bytes))
                    .await,
            );
            if controller.draft().await == DraftState::Empty {
                anyhow::bail!("Receipt was not uploaded");
            }

            let form = BillForm {
                expense_type,
                expense_name: name,
                amount,
                date: date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
                vat,
                pct,
                commentary,
            };
            let intent = controller.handle_submit(&form).await;
            let submitted = intent.is_navigation_to(Route::Bills);
            adapter.apply(intent);
            if !submitted {
                anyhow::bail!("Bill submission failed");
            }
            adapter.apply(bills.list().await);
        }
        Commands::Preview { id, modal_width } => {
            let rows = bills.get_bills().await.context("Failed to load bills")?;
            let row = rows
                .iter()
                .find(|row| row.id.as_deref() == Some(id.as_str()))
                .with_context(|| format!("Bill {} not found", id))?;
            adapter.apply(bills.handle_click_icon_eye(&row.eye_icon(), modal_width));
        }
    }

    if adapter.failed() {
        std::process::exit(1);
    }
    Ok(())
}
