use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use ledger_engine::config::{Command, Config, USAGE};
use ledger_engine::engine::ImportEngine;
use ledger_engine::models::Caller;
use ledger_engine::receipts::ReceiptVault;
use ledger_engine::service::{LedgerError, LedgerService};
use ledger_engine::storage::InMemoryLedgerStore;

//NOTE: The binary is an operator tool, it acts with administrator rights unless as_user narrows it
const OPERATOR_ID: i64 = 0;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            exit(1);
        }
    };

    setup_logging(config.log_level);

    let storage = Arc::new(InMemoryLedgerStore::new());
    let engine = ImportEngine::new(storage.clone());

    let timer = Instant::now();
    let summary = engine.run(&config.input).await?;
    let duration = timer.elapsed();

    info!("Imported [{}] rows, skipped [{}] in: {duration:?}", summary.imported, summary.skipped);

    if storage.is_empty() {
        warn!("Input [{}] holds no transactions, results will be empty", config.input);
    }

    let service = LedgerService::new(storage, ReceiptVault::new("uploads"));

    if let Err(error) = run_command(&service, &config) {
        match error.downcast_ref::<LedgerError>() {
            Some(ledger_error) => eprintln!("{}", ledger_error.public_message()),
            None => eprintln!("{error}")
        }
        exit(1);
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn run_command(service: &LedgerService<InMemoryLedgerStore>, config: &Config) -> Result<()> {
    let caller = match config.as_user {
        Some(user_id) => Caller::user(user_id),
        None => Caller::admin(OPERATOR_ID)
    };

    let mut output = BufWriter::new(stdout().lock());

    match config.command {
        Command::List => {
            let transactions = match config.as_user {
                Some(_) => service.list_own_transactions(&caller, &config.filter)?,
                None => service.admin_list_transactions(&caller, &config.filter)?
            };
            serde_json::to_writer_pretty(&mut output, &transactions)?;
            writeln!(output)?;
        }
        Command::Stats => {
            let stats = service.admin_statistics(&caller, &config.filter)?;
            serde_json::to_writer_pretty(&mut output, &stats)?;
            writeln!(output)?;
        }
        Command::Export => {
            output.write_all(&service.admin_export_csv(&caller, &config.filter)?)?;
        }
    }

    output.flush()?;

    Ok(())
}
