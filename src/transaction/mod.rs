//! Transactions for a single account.
//!
//! This module contains everything related to transactions:
//! - The [TransactionItem] model and the [RenderOptions] that select which transactions to show
//! - The service for listing and deleting transactions through the API
//! - The page controller that renders an account's transactions and handles deletion

mod models;
mod page;
mod service;
mod view;

pub use models::{RenderOptions, TransactionId, TransactionItem, TransactionKind};
pub use page::{PageServices, TransactionsPage};
pub use service::{HttpTransactionService, TransactionService};
pub(crate) use view::{REMOVE_ACCOUNT_CLASS, REMOVE_TRANSACTION_CLASS, TRANSACTION_ID_DATA};
