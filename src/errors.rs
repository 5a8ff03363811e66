//! Error types for the API client.

/// Errors that can occur when configuring the client or making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required configuration field is empty or absent.
    #[error("{0} is required in the configuration")]
    MissingConfig(&'static str),
    /// Token acquisition failed. The client cannot function without a token,
    /// so this aborts construction.
    #[error("Failed to authenticate with the API")]
    AuthenticationFailed,
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the expected IQA result envelope.
    #[error("Failed to decode response body")]
    DecodeFailed,
}
