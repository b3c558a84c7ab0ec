use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::{AccountId, request::deserialize_id};

/// The server-issued identifier of a transaction.
pub type TransactionId = String;

time::serde::format_description!(
    timestamp_format,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Whether money came into or went out of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The name used for the kind in the API and in CSS classes.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A transaction as the server lists it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionItem {
    /// The ID of the transaction.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TransactionId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// A text description of what the transaction was for.
    pub name: String,
    /// The amount of money, always given as a positive number.
    pub sum: f64,
    /// When the transaction was recorded, in UTC.
    #[serde(with = "timestamp_format")]
    pub created_at: PrimitiveDateTime,
}

impl TransactionItem {
    /// The amount with the sign implied by its kind: positive for income,
    /// negative for expenses.
    pub fn signed_sum(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.sum.abs(),
            TransactionKind::Expense => -self.sum.abs(),
        }
    }
}

/// Selects the account whose transactions a page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// The account to show.
    pub account_id: AccountId,
}

impl RenderOptions {
    /// Options for showing the account `account_id`.
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_owned(),
        }
    }

    /// Options without an account select nothing to render.
    pub fn is_empty(&self) -> bool {
        self.account_id.trim().is_empty()
    }
}
