//! Accounts: the service for looking up and deleting them.

use serde::Deserialize;

use crate::{
    ClientConfig,
    endpoints::{self, resource_url},
    request::{
        Callback, Method, RequestClient, RequestDescriptor, deserialize_id, parse_data,
        parse_success,
    },
};

/// The server-issued identifier of an account.
pub type AccountId = String;

/// An account as the server describes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountInfo {
    /// The ID of the account.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: AccountId,
    /// The name of the account, shown as the page title.
    pub name: String,
    /// The current balance, if the server includes it.
    #[serde(default)]
    pub sum: Option<f64>,
}

/// Looks up and deletes accounts.
///
/// Results are delivered through callbacks, which are invoked exactly once.
pub trait AccountService: Send + Sync {
    /// Get the account `id`.
    fn get(&self, id: &str, callback: Callback<AccountInfo>);

    /// Delete the account `id` and its transactions.
    fn remove(&self, id: &str, callback: Callback<()>);
}

/// An [AccountService] that talks to the tracker's REST API.
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    client: RequestClient,
    config: ClientConfig,
}

impl HttpAccountService {
    /// Create a service that sends requests through `client` to the API in `config`.
    pub fn new(client: RequestClient, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

impl AccountService for HttpAccountService {
    fn get(&self, id: &str, callback: Callback<AccountInfo>) {
        let url = match resource_url(&self.config.url(endpoints::ACCOUNT), id) {
            Ok(url) => url,
            Err(error) => {
                tracing::error!("Could not build the URL for account {id}: {error}");
                callback(Err(error));
                return;
            }
        };

        self.client
            .create_request(RequestDescriptor::new(Method::Get, url, move |body| {
                callback(parse_data(body))
            }));
    }

    fn remove(&self, id: &str, callback: Callback<()>) {
        let descriptor = RequestDescriptor::new(
            Method::Delete,
            self.config.url(endpoints::ACCOUNT),
            move |body| callback(parse_success(body)),
        )
        .with_data("id", id);

        self.client.create_request(descriptor);
    }
}
