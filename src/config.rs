//! Client configuration and validation.

use std::time::Duration;

use crate::Error;

/// Connection settings for one IMIS tenant.
///
/// Consumed once by [`Client::connect`](crate::Client::connect); the
/// password is not retained past the authentication call.
///
/// # Example
///
/// ```no_run
/// use imis_api::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("https://demo123.imiscloud.com", "apiuser", "hunter2")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Tenant base URL, e.g. `https://demo123.imiscloud.com`.
    pub base_url: String,
    /// API username.
    pub username: String,
    /// API password.
    pub password: String,
    /// Request timeout applied to every HTTP call. Defaults to 30 seconds.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that every required field is present. Runs before any
    /// network call is made.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.base_url.is_empty() {
            return Err(Error::MissingConfig("base URL"));
        }
        if self.username.is_empty() {
            return Err(Error::MissingConfig("username"));
        }
        if self.password.is_empty() {
            return Err(Error::MissingConfig("password"));
        }
        Ok(())
    }
}
