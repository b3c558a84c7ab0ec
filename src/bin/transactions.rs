use std::{io, process::ExitCode, sync::Arc};

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_client::{
    HttpAccountService, HttpTransactionService, RequestClient,
    cli::{self, Args, CliServices, TerminalConfirm},
};

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let result = cli::run(&args, |config| {
        let client = RequestClient::new();

        CliServices {
            accounts: Arc::new(HttpAccountService::new(client.clone(), config.clone())),
            transactions: Arc::new(HttpTransactionService::new(client, config.clone())),
            confirm: Arc::new(TerminalConfirm::stdin()),
        }
    })
    .await;

    match result {
        Ok(page) => {
            println!("{page}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("Could not run {:?}: {error}", args.command);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}
