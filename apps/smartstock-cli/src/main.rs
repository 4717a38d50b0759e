//! # SmartStock CLI
//!
//! Operator command line for the SmartStock backend.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ── tracing-subscriber + EnvFilter (RUST_LOG)     │
//! │  2. Parse Arguments ───── --config <path>, subcommand                   │
//! │  3. Load Config ───────── defaults → smartstock.toml → SMARTSTOCK_*     │
//! │  4. Build Client ──────── SmartStockClient (reqwest)                    │
//! │  5. Run Workflow ──────── Checkout / CashClosureWorkflow / Dashboard    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use smartstock_client::{ClientConfig, SmartStockClient};
use smartstock_core::{display_label, ClosureStatus, DailyClosurePreview};
use smartstock_pos::{CashClosureWorkflow, Checkout, Dashboard, OperatorSession, PosError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::args::{Args, ClosureAction, Command, SellArgs};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(std::env::args().skip(1))?;
    debug!(?args, "Arguments parsed");

    if let Command::Help = args.command {
        println!("{}", args::USAGE);
        return Ok(());
    }
    if let Command::ConfigInit = args.command {
        let path = ClientConfig::default().save(args.config_path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = ClientConfig::load(args.config_path.clone()).context("loading configuration")?;
    info!(base_url = config.base_url(), "Configuration loaded");

    if let Command::ConfigShow = args.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let client = Arc::new(SmartStockClient::new(&config)?);

    match args.command {
        Command::Products { term } => products(client, term.as_deref()).await,
        Command::Sell(sell_args) => sell(client, &config, sell_args).await,
        Command::Closure(action) => closure(client, &config, action).await,
        Command::Dashboard => dashboard(client).await,
        Command::Help | Command::ConfigInit | Command::ConfigShow => Ok(()),
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,smartstock=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Turns a workflow error into the operator-facing message.
fn operator_error(err: PosError) -> anyhow::Error {
    anyhow::anyhow!("[{:?}] {}", err.code(), err.user_message())
}

// =============================================================================
// Commands
// =============================================================================

async fn products(client: Arc<SmartStockClient>, term: Option<&str>) -> Result<()> {
    let checkout = Checkout::new(client.clone(), client);
    let count = checkout.load_catalog().await.map_err(operator_error)?;

    let products = checkout.search(term.unwrap_or_default()).await;
    for product in &products {
        println!(
            "{:>5}  {:<15}  {:<30}  {:>10}  stock {}",
            product.id,
            product.barcode,
            product.name,
            product.price.to_string(),
            product.stock
        );
    }
    println!("{} of {} products", products.len(), count);
    Ok(())
}

async fn sell(client: Arc<SmartStockClient>, config: &ClientConfig, args: SellArgs) -> Result<()> {
    let checkout = Checkout::new(client.clone(), client);
    checkout.load_catalog().await.map_err(operator_error)?;

    for code in &args.codes {
        checkout.scan(code).await.map_err(operator_error)?;
    }
    for line in checkout.lines().await {
        println!(
            "{:>3} x {:<30} {:>10}",
            line.quantity,
            line.name,
            line.subtotal().to_string()
        );
    }

    checkout.open_payment().await.map_err(operator_error)?;
    checkout
        .select_method(args.method)
        .await
        .map_err(operator_error)?;
    let quote = match &args.tendered {
        Some(tendered) => checkout.set_tendered(tendered).await.map_err(operator_error)?,
        None => checkout.quote().await,
    };
    println!("Total: {}  ({})", quote.total, quote.method);
    if let Some(label) = quote.shortfall_label() {
        bail!(label);
    }
    if quote.tendered.is_some() {
        println!("Change: {}", quote.change);
    }

    let outcome = checkout.submit().await.map_err(operator_error)?;
    println!("{}", outcome.message);
    if config.pos.open_ticket_urls {
        if let Some(url) = &outcome.ticket_url {
            println!("Ticket: {}", url);
        }
    }
    Ok(())
}

async fn closure(
    client: Arc<SmartStockClient>,
    config: &ClientConfig,
    action: ClosureAction,
) -> Result<()> {
    let workflow = CashClosureWorkflow::new(client, OperatorSession::from_config(config));

    let mut status = workflow.load().await.map_err(operator_error)?;
    if status == ClosureStatus::Preview && action == ClosureAction::Close {
        status = workflow.execute_close().await.map_err(operator_error)?;
    }

    match status {
        ClosureStatus::Preview => println!("Day open"),
        ClosureStatus::Closed => println!("Day closed"),
        _ => {}
    }
    if let Some(message) = workflow.error().await {
        bail!(message);
    }
    if let Some(preview) = workflow.preview().await {
        print_closure(&preview);
    }
    if status == ClosureStatus::Preview && !workflow.can_close().await {
        println!("Closing is not allowed for this day yet");
    }
    Ok(())
}

fn print_closure(preview: &DailyClosurePreview) {
    println!("Date:            {}", preview.closure_date);
    println!("Total sales:     {}", preview.total_sales);
    for (label, amount) in preview.sales_rows() {
        println!("  {:<15} {}", label, amount);
    }
    println!("Cash expenses:   {}", preview.cash_expenses);
    for (label, amount) in preview.expense_rows() {
        println!("  {:<15} {}", label, amount);
    }
    println!("Other expenses:  {}", preview.other_expenses);
    println!("Final balance:   {}", preview.final_balance);
    println!(
        "Pending invoices: {}  Low stock: {}",
        preview.pending_invoices, preview.low_stock_products
    );
}

async fn dashboard(client: Arc<SmartStockClient>) -> Result<()> {
    let view = Dashboard::new(client).load().await;

    match (&view.stats, &view.stats_error) {
        (Some(stats), _) => {
            println!(
                "Today {}: {} sales, {} revenue, balance {}",
                stats.daily.date,
                stats.daily.sales.total_count,
                stats.daily.sales.total_amount,
                stats.daily.cash_balance
            );
            println!(
                "{} vs {}: {:+.1}%",
                stats.monthly.current.period, stats.monthly.previous.period, stats.growth_percent
            );
        }
        (None, Some(message)) => println!("Stats unavailable: {}", message),
        (None, None) => {}
    }

    let Some(charts) = view.charts else {
        return Ok(());
    };
    match charts.weekly.data() {
        Some(weekly) => {
            println!("Week {} .. {}", weekly.week_start, weekly.week_end);
            for day in &weekly.daily_breakdown {
                println!("  {}  {:>3}  {}", day.date, day.count, day.total);
            }
        }
        None => println!("Weekly sales unavailable: {}", charts.weekly.error().unwrap_or_default()),
    }
    match charts.insights.data() {
        Some(insights) => {
            for pref in &insights.payment_preferences {
                println!(
                    "  {:<15} {:>3}  {}",
                    display_label(&pref.payment_method),
                    pref.count,
                    pref.total
                );
            }
        }
        None => println!("Insights unavailable: {}", charts.insights.error().unwrap_or_default()),
    }
    match charts.expenses.data() {
        Some(rows) => {
            for row in rows {
                println!("  {:<15} {}", display_label(&row.category), row.total_amount);
            }
        }
        None => println!("Expenses unavailable: {}", charts.expenses.error().unwrap_or_default()),
    }
    Ok(())
}
