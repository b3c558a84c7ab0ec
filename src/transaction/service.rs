//! The service for listing and deleting transactions.

use crate::{
    ClientConfig,
    endpoints,
    request::{Callback, Method, RequestClient, RequestDescriptor, parse_data, parse_success},
};

use super::models::{RenderOptions, TransactionItem};

/// Lists and deletes transactions.
///
/// Results are delivered through callbacks, which are invoked exactly once.
pub trait TransactionService: Send + Sync {
    /// List the transactions selected by `options`, in the order the server returns them.
    fn list(&self, options: &RenderOptions, callback: Callback<Vec<TransactionItem>>);

    /// Delete the transaction `id`.
    fn remove(&self, id: &str, callback: Callback<()>);
}

/// A [TransactionService] that talks to the tracker's REST API.
#[derive(Debug, Clone)]
pub struct HttpTransactionService {
    client: RequestClient,
    config: ClientConfig,
}

impl HttpTransactionService {
    /// Create a service that sends requests through `client` to the API in `config`.
    pub fn new(client: RequestClient, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

impl TransactionService for HttpTransactionService {
    fn list(&self, options: &RenderOptions, callback: Callback<Vec<TransactionItem>>) {
        let descriptor = RequestDescriptor::new(
            Method::Get,
            self.config.url(endpoints::TRANSACTION),
            move |body| callback(parse_data(body)),
        )
        .with_data("account_id", &options.account_id);

        self.client.create_request(descriptor);
    }

    fn remove(&self, id: &str, callback: Callback<()>) {
        let descriptor = RequestDescriptor::new(
            Method::Delete,
            self.config.url(endpoints::TRANSACTION),
            move |body| callback(parse_success(body)),
        )
        .with_data("id", id);

        self.client.create_request(descriptor);
    }
}
