//! Tally is a client for a personal finance tracker.
//!
//! This library provides the request client used to talk to the tracker's
//! REST API and the page controller that fetches, renders and mutates the list
//! of transactions for an account.

#![warn(missing_docs)]

mod account;
mod app;
pub mod cli;
mod config;
mod endpoints;
mod html;
mod logging;
mod page;
mod request;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use account::{AccountId, AccountInfo, AccountService, HttpAccountService};
pub use app::{AppShell, Confirm};
pub use config::ClientConfig;
pub use logging::LOG_BODY_LENGTH_LIMIT;
pub use page::{ClickEvent, EventTarget, PageRoot};
pub use request::{Callback, Method, RequestClient, RequestDescriptor, ResponseEnvelope};
pub use transaction::{
    HttpTransactionService, PageServices, RenderOptions, TransactionId, TransactionItem, TransactionKind,
    TransactionService, TransactionsPage,
};

/// The errors that may occur in the client.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required argument was missing or unusable, e.g. constructing a page
    /// controller without a root element.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be built or dispatched, or the connection failed.
    #[error("could not send request: {0}")]
    Transport(String),

    /// The server finished the request with a status other than 200 OK.
    #[error("the server responded with status {0}")]
    Status(u16),

    /// The response body was not valid JSON or did not have the expected shape.
    #[error("could not parse the response body: {0}")]
    InvalidResponse(String),

    /// The server answered with an unsuccessful envelope.
    ///
    /// The string is the error message given by the server, if any.
    #[error("the server rejected the request: {0}")]
    Api(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::InvalidResponse(value.to_string())
        } else {
            Error::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::InvalidResponse(value.to_string())
    }
}
