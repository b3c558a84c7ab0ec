//! Settings shared by the request client, the domain services and the pages.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// The timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";
/// The currency symbol appended to transaction sums when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₽";

/// Configuration for talking to the tracker's API and displaying its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// The base URL of the API, e.g. "http://localhost:8000".
    pub api_url: String,

    /// The timezone dates are displayed in as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The symbol shown after each transaction sum.
    pub currency_symbol: String,
}

impl ClientConfig {
    /// Create a config for the API at `api_url` with the default timezone and currency.
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }

    /// Set the display timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a canonical timezone name.
    pub fn with_timezone(mut self, local_timezone: &str) -> Result<Self, Error> {
        get_timezone(local_timezone)?;
        self.local_timezone = local_timezone.to_owned();
        Ok(self)
    }

    /// Set the currency symbol.
    pub fn with_currency_symbol(mut self, currency_symbol: &str) -> Self {
        self.currency_symbol = currency_symbol.to_owned();
        self
    }

    /// The absolute URL for the API route `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    /// The UTC offset of the display timezone at the moment `at`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if the configured timezone is unknown.
    pub fn local_offset(&self, at: OffsetDateTime) -> Result<UtcOffset, Error> {
        let timezone = get_timezone(&self.local_timezone)?;

        Ok(timezone.get_offset_utc(&at).to_utc())
    }
}

fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {canonical_timezone}");
        Error::InvalidTimezone(canonical_timezone.to_owned())
    })
}
