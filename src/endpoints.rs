//! The API routes of the tracker's server, relative to [ClientConfig::api_url](crate::ClientConfig).
//!
//! Routes that address a single resource take its ID as the next path segment,
//! see [resource_url].

use reqwest::Url;

use crate::Error;

/// The route to access accounts.
pub const ACCOUNT: &str = "/account";
/// The route to access transactions.
pub const TRANSACTION: &str = "/transaction";

/// Build the URL of the resource `id` under the collection URL `collection_url`.
///
/// `id` is percent-encoded as a single path segment.
///
/// # Errors
/// Returns [Error::Transport] if `collection_url` is not an absolute HTTP(S) URL.
pub fn resource_url(collection_url: &str, id: &str) -> Result<String, Error> {
    let mut url = Url::parse(collection_url)
        .map_err(|error| Error::Transport(format!("invalid URL \"{collection_url}\": {error}")))?;

    url.path_segments_mut()
        .map_err(|_| Error::Transport(format!("\"{collection_url}\" cannot have a path")))?
        .pop_if_empty()
        .push(id);

    Ok(url.into())
}
