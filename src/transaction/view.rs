//! HTML rendering for the transactions page.

use maud::{Markup, html};
use time::{
    PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::{ClientConfig, html::format_currency};

use super::models::TransactionItem;

/// The title shown when no account is selected.
pub(crate) const TITLE_PLACEHOLDER: &str = "Account name";

/// The class of the control that deletes the current account.
pub(crate) const REMOVE_ACCOUNT_CLASS: &str = "remove-account";
/// The class of the control that deletes a transaction.
pub(crate) const REMOVE_TRANSACTION_CLASS: &str = "transaction__remove";
/// The data attribute on [REMOVE_TRANSACTION_CLASS] controls that holds the transaction ID.
pub(crate) const TRANSACTION_ID_DATA: &str = "id";

/// The max number of graphemes to display in a transaction name before
/// truncating and displaying ellipses.
const MAX_NAME_GRAPHEMES: usize = 32;

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:long] [year] at [hour]:[minute]");

/// Format `created_at`, a UTC timestamp, in the timezone with `offset`,
/// e.g. "10 March 2019 at 03:20".
pub(crate) fn format_date(created_at: PrimitiveDateTime, offset: UtcOffset) -> String {
    let local = created_at.assume_utc().to_offset(offset);

    local
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| created_at.to_string())
}

/// Render the entries for `transactions` in the order given.
pub(crate) fn transactions_view(transactions: &[TransactionItem], config: &ClientConfig) -> Markup {
    html! {
        @for transaction in transactions {
            (transaction_view(transaction, config))
        }
    }
}

/// Render one transaction as a self-contained entry with a delete control.
pub(crate) fn transaction_view(transaction: &TransactionItem, config: &ClientConfig) -> Markup {
    let offset = config
        .local_offset(transaction.created_at.assume_utc())
        .unwrap_or(UtcOffset::UTC);
    let date = format_date(transaction.created_at, offset);
    let (name, full_name) = format_name(&transaction.name);
    let sum = format_currency(transaction.signed_sum(), &config.currency_symbol);
    let kind = transaction.kind.as_str();

    html! {
        div class={ "transaction transaction_" (kind) " row" }
        {
            div class="col-md-7 transaction__details"
            {
                div class="transaction__icon"
                {
                    span class="fa fa-money fa-2x" {}
                }

                div class="transaction__info"
                {
                    h4 class="transaction__title" title=[full_name] { (name) }
                    div class="transaction__date" { (date) }
                }
            }

            div class="col-md-3"
            {
                div class="transaction__summ" { (sum) }
            }

            div class="col-md-2 transaction__controls"
            {
                button
                    type="button"
                    class={ "btn btn-danger " (REMOVE_TRANSACTION_CLASS) }
                    data-id=(transaction.id)
                {
                    i class="fa fa-trash" {}
                }
            }
        }
    }
}

/// Truncate long names, returning the full name as well when it was cut.
fn format_name(name: &str) -> (String, Option<&str>) {
    let name_length = name.graphemes(true).count();

    if name_length <= MAX_NAME_GRAPHEMES {
        (name.to_owned(), None)
    } else {
        let truncated: String = name.graphemes(true).take(MAX_NAME_GRAPHEMES - 3).collect();
        let truncated = truncated + "...";
        (truncated, Some(name))
    }
}
