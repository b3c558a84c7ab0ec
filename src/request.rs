//! The request client.
//!
//! A [RequestDescriptor] declares one outbound call: where it goes, which
//! method it uses, the data it carries and the callback that receives the
//! outcome. [RequestClient::create_request] turns the descriptor into an HTTP
//! request, sends it in the background and hands the parsed JSON body, or the
//! reason there is none, to the callback exactly once.

use std::fmt;

use reqwest::{StatusCode, Url, multipart::Form};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Error,
    logging::{log_request, log_response},
};

/// Receives the outcome of an asynchronous call.
///
/// Being `FnOnce`, a callback can be invoked at most once, and every code path
/// that consumes a descriptor invokes it.
pub type Callback<T> = Box<dyn FnOnce(Result<T, Error>) + Send + 'static>;

/// The HTTP verbs the API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Data is sent in the query string.
    Get,
    /// Data is sent as a multipart form.
    Post,
    /// Data is sent as a multipart form.
    Put,
    /// Data is sent as a multipart form.
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative description of one outbound call.
///
/// Descriptors are consumed by [RequestClient::create_request], so a new one
/// is built for every call.
pub struct RequestDescriptor {
    url: String,
    method: Method,
    data: Vec<(String, String)>,
    callback: Callback<Value>,
}

impl RequestDescriptor {
    /// Describe a call to `url` with no data.
    pub fn new(
        method: Method,
        url: impl Into<String>,
        callback: impl FnOnce(Result<Value, Error>) + Send + 'static,
    ) -> Self {
        Self {
            url: url.into(),
            method,
            data: Vec::new(),
            callback: Box::new(callback),
        }
    }

    /// Add a field to the data sent with the request.
    ///
    /// Fields are sent in the order they were added. Setting a key that is
    /// already present replaces its value and keeps its position.
    pub fn with_data(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();

        match self.data.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.data.push((key.to_owned(), value)),
        }

        self
    }

    /// The URL the request is sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP method of the request.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The key-value pairs sent with the request, in order.
    pub fn data(&self) -> &[(String, String)] {
        &self.data
    }
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// The wrapper the server puts around every response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Whether the server carried out the request.
    #[serde(default)]
    pub success: bool,
    /// The payload of a successful response.
    pub data: Option<T>,
    /// Why the server did not carry out the request.
    pub error: Option<String>,
}

impl<T: DeserializeOwned> ResponseEnvelope<T> {
    /// Parse an envelope out of a response body.
    ///
    /// # Errors
    /// Returns [Error::InvalidResponse] if `body` does not have the shape of an envelope.
    pub fn from_value(body: Value) -> Result<Self, Error> {
        serde_json::from_value(body).map_err(Error::from)
    }
}

impl<T> ResponseEnvelope<T> {
    /// The payload of a successful response, which may be empty.
    ///
    /// # Errors
    /// Returns [Error::Api] if the server did not carry out the request.
    pub fn into_result(self) -> Result<Option<T>, Error> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Api(
                self.error
                    .unwrap_or_else(|| "no reason given".to_owned()),
            ))
        }
    }

    /// The payload of a successful response.
    ///
    /// # Errors
    /// Returns [Error::Api] if the server did not carry out the request, or
    /// [Error::InvalidResponse] if it did but sent no data.
    pub fn into_data(self) -> Result<T, Error> {
        self.into_result()?
            .ok_or_else(|| Error::InvalidResponse("the response has no data".to_owned()))
    }
}

/// Unwrap the payload of a response body delivered to a request callback.
pub(crate) fn parse_data<T: DeserializeOwned>(body: Result<Value, Error>) -> Result<T, Error> {
    body.and_then(ResponseEnvelope::<T>::from_value)?.into_data()
}

/// Check that a response body delivered to a request callback reports success.
///
/// Any payload is ignored.
pub(crate) fn parse_success(body: Result<Value, Error>) -> Result<(), Error> {
    body.and_then(ResponseEnvelope::<Value>::from_value)?
        .into_result()
        .map(|_| ())
}

/// Deserialize an ID that the server may send either as a string or as a number.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

/// Sends the requests described by [RequestDescriptor]s.
///
/// The client holds no per-request state, each call is independent. Cloning
/// the client shares its connection pool.
#[derive(Debug, Clone, Default)]
pub struct RequestClient {
    http_client: reqwest::Client,
}

impl RequestClient {
    /// Create a client with its own connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that sends requests through `http_client`.
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Send the request described by `descriptor` in the background.
    ///
    /// The descriptor's callback receives the parsed JSON body when the server
    /// responds with 200 OK. It receives an error instead if the request cannot
    /// be built or dispatched (immediately, before this function returns), if
    /// the connection fails, if the server responds with any other status, or
    /// if the body is not JSON. The callback is invoked exactly once.
    ///
    /// Must be called from within a tokio runtime, otherwise the callback
    /// receives [Error::Transport].
    pub fn create_request(&self, descriptor: RequestDescriptor) {
        let RequestDescriptor {
            url,
            method,
            data,
            callback,
        } = descriptor;

        log_request(method, &url, &data);

        let dispatch = tokio::runtime::Handle::try_current()
            .map_err(|error| Error::Transport(format!("no runtime to send the request on: {error}")))
            .and_then(|runtime| {
                build_request(&self.http_client, method, &url, &data)
                    .map(|request| (runtime, request))
            });

        let (runtime, request) = match dispatch {
            Ok(dispatch) => dispatch,
            Err(error) => {
                tracing::error!("Could not dispatch {method} {url}: {error}");
                callback(Err(error));
                return;
            }
        };

        let http_client = self.http_client.clone();
        runtime.spawn(async move {
            let result = execute(&http_client, method, &url, request).await;
            callback(result);
        });
    }
}

/// Build the HTTP request for a call without sending it.
///
/// GET requests carry `data` in the query string and have no body. All other
/// methods carry `data` as a multipart form and leave the query string alone.
pub(crate) fn build_request(
    http_client: &reqwest::Client,
    method: Method,
    url: &str,
    data: &[(String, String)],
) -> Result<reqwest::Request, Error> {
    let mut url = Url::parse(url)
        .map_err(|error| Error::Transport(format!("invalid URL \"{url}\": {error}")))?;

    let builder = match method {
        Method::Get => {
            if !data.is_empty() {
                url.query_pairs_mut().extend_pairs(data);
            }

            http_client.request(method.into(), url)
        }
        Method::Post | Method::Put | Method::Delete => {
            let form = data.iter().fold(Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            });

            http_client.request(method.into(), url).multipart(form)
        }
    };

    builder.build().map_err(Error::from)
}

async fn execute(
    http_client: &reqwest::Client,
    method: Method,
    url: &str,
    request: reqwest::Request,
) -> Result<Value, Error> {
    let response = http_client
        .execute(request)
        .await
        .inspect_err(|error| tracing::error!("Request {method} {url} failed: {error}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .inspect_err(|error| tracing::error!("Could not read response to {method} {url}: {error}"))?;
    log_response(method, url, status.as_u16(), &body);

    if status != StatusCode::OK {
        tracing::warn!("{method} {url} finished with status {status}");
        return Err(Error::Status(status.as_u16()));
    }

    serde_json::from_str(&body)
        .map_err(Error::from)
        .inspect_err(|error| tracing::warn!("Invalid response to {method} {url}: {error}"))
}
