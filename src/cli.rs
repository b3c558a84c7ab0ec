//! The command line interface for showing and managing an account's transactions.
//!
//! [run] drives a [TransactionsPage] the way a user would: it renders the
//! account, clicks the control for the chosen command, refreshes the page if
//! the command asked for it, and returns the resulting markup.

use std::{
    io::{self, BufRead, BufReader, Write},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use clap::{Parser, Subcommand};

use crate::{
    AccountService, AppShell, ClientConfig, Confirm, Error, PageRoot, PageServices,
    RenderOptions, TransactionService, TransactionsPage,
    page::{ClickEvent, EventTarget},
    transaction::{REMOVE_ACCOUNT_CLASS, REMOVE_TRANSACTION_CLASS, TRANSACTION_ID_DATA},
};

/// Show and manage the transactions of an account in the finance tracker.
///
/// The rendered page is written to stdout as HTML, logs go to stderr.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The base URL of the tracker's API.
    #[arg(long, default_value = "http://localhost:8000")]
    pub api_url: String,

    /// The canonical name of the timezone to show dates in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = crate::config::DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// The symbol shown after each sum.
    #[arg(long, default_value = crate::config::DEFAULT_CURRENCY_SYMBOL)]
    pub currency: String,

    /// The account to show.
    #[arg(long)]
    pub account_id: String,

    /// What to do with the account.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The client configuration selected by the arguments.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the timezone is unknown.
    pub fn config(&self) -> Result<ClientConfig, Error> {
        Ok(ClientConfig::new(&self.api_url)
            .with_timezone(&self.timezone)?
            .with_currency_symbol(&self.currency))
    }
}

/// The actions the CLI can take on an account.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the account's transactions.
    Show,
    /// Delete one of the account's transactions.
    RemoveTransaction {
        /// The ID of the transaction.
        id: String,
    },
    /// Delete the account and all of its transactions.
    RemoveAccount,
}

impl Command {
    /// The click on the page control that carries out the command, if any.
    fn click(&self) -> Option<ClickEvent> {
        match self {
            Command::Show => None,
            Command::RemoveTransaction { id } => Some(ClickEvent::new(vec![
                EventTarget::new("button")
                    .with_class(REMOVE_TRANSACTION_CLASS)
                    .with_data(TRANSACTION_ID_DATA, id),
            ])),
            Command::RemoveAccount => Some(ClickEvent::new(vec![
                EventTarget::new("button").with_class(REMOVE_ACCOUNT_CLASS),
            ])),
        }
    }
}

/// The services the CLI talks to, everything a page needs except the app shell.
pub struct CliServices {
    /// Looks up and deletes accounts.
    pub accounts: Arc<dyn AccountService>,
    /// Lists and deletes transactions.
    pub transactions: Arc<dyn TransactionService>,
    /// Asks the user before anything is deleted.
    pub confirm: Arc<dyn Confirm>,
}

/// Asks for confirmation on the terminal.
///
/// The prompt goes to stderr and the answer is read from a line of input. Only
/// "y" and "yes" confirm, in any case.
pub struct TerminalConfirm {
    input: Mutex<Box<dyn BufRead + Send>>,
}

impl TerminalConfirm {
    /// Read answers from stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }

    /// Read answers from `input`.
    pub fn new(input: impl BufRead + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Box::new(input)),
        }
    }

    fn read_answer(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut input = self.input.lock().unwrap_or_else(|error| {
            tracing::error!("terminal input lock was poisoned, recovering");
            PoisonError::into_inner(error)
        });
        let mut answer = String::new();

        match input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(error) => {
                tracing::error!("Could not read confirmation: {error}");
                false
            }
        }
    }
}

impl Confirm for TerminalConfirm {
    /// Blocks until a line is read. Must not be called on a current-thread
    /// tokio runtime.
    fn confirm(&self, message: &str) -> bool {
        // The worker is handed back to the runtime while the read blocks.
        tokio::task::block_in_place(|| self.read_answer(message))
    }
}

/// Remembers whether the page asked for the application to be refreshed, so
/// the refresh can happen once the command has finished.
#[derive(Debug, Default)]
struct DeferredShell {
    update_requested: AtomicBool,
}

impl DeferredShell {
    fn take_update_request(&self) -> bool {
        self.update_requested.swap(false, Ordering::SeqCst)
    }
}

impl AppShell for DeferredShell {
    fn update(&self) {
        self.update_requested.store(true, Ordering::SeqCst);
    }

    fn update_widgets(&self) {
        tracing::info!("Account list changed");
    }
}

/// Carry out the command in `args` and return the rendered page.
///
/// `connect` builds the services from the validated configuration.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone in `args` is unknown, in
/// which case `connect` is not called.
pub async fn run(
    args: &Args,
    connect: impl FnOnce(&ClientConfig) -> CliServices,
) -> Result<String, Error> {
    let config = args.config()?;
    let services = connect(&config);
    let shell = Arc::new(DeferredShell::default());

    let root = Arc::new(PageRoot::new());
    let page = TransactionsPage::new(
        Some(root.clone()),
        PageServices {
            accounts: services.accounts,
            transactions: services.transactions,
            app: shell.clone(),
            confirm: services.confirm,
        },
        config,
    )?;

    page.render(Some(RenderOptions::new(&args.account_id)));
    page.settled().await;

    if let Some(click) = args.command.click() {
        tracing::debug!("Running {:?} on account {}", args.command, args.account_id);
        root.click(click);
        page.settled().await;
    }

    if shell.take_update_request() {
        page.update();
        page.settled().await;
    }

    Ok(root.render().into_string())
}
