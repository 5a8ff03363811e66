//! HTTP client for the IMIS REST API.

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use url::Url;

use crate::{
    types::{Page, Record},
    ClientConfig, Error, IqaQuery,
};

/// Authenticated client for one IMIS tenant.
///
/// Construction performs the password-grant handshake against `/token`
/// and fails if no token is issued. The token is held for the client's
/// whole lifetime; there is no refresh. Requests are issued one at a
/// time; pagination is strictly sequential.
pub struct Client {
    /// Tenant base URL, e.g. `https://demo123.imiscloud.com`.
    base_api_url: String,
    /// Header value of the form `Bearer <access_token>`.
    token: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Client {
    /// Validates the configuration, authenticates, and returns a ready
    /// client. Fails with [`Error::MissingConfig`] before any network
    /// call is made, or [`Error::AuthenticationFailed`] when the token
    /// handshake does not produce a token.
    pub async fn connect(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let token = authenticate(&http, &config).await?;
        Ok(Self {
            base_api_url: config.base_url,
            token,
            http,
        })
    }

    /// Returns the `Authorization` header value sent on IQA requests.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Fetches every page of the IQA at `iqa_path` and returns the
    /// flattened records.
    ///
    /// `iqa_path` is the vendor's path-like query identifier, e.g.
    /// `$/Samples/Events/Event Attendees`. Pages are requested in order
    /// until the server reports no further data or the query's limit is
    /// reached; the offset advances by the number of records actually
    /// received, so short pages are handled.
    ///
    /// A transport failure, non-success status, or malformed page ends
    /// the loop early: the error is logged and whatever was accumulated
    /// from prior pages is returned. Callers that need to distinguish
    /// "no more data" from "request failed" must watch the error log.
    pub async fn fetch_iqa(&self, iqa_path: &str, query: &IqaQuery) -> Vec<Record> {
        let mut items: Vec<Record> = Vec::new();
        let mut has_next = true;
        let mut offset: u64 = 0;

        let endpoint = match Url::parse(&format!("{}/api/IQA", self.base_api_url)) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid URL constructed: {}", e);
                return items;
            }
        };

        while has_next && query.limit.map_or(true, |limit| offset < limit) {
            let url = query.add_to_url(&endpoint, iqa_path, offset);
            let body = match self.execute(url).await {
                Ok(body) => body,
                Err(_) => break,
            };
            let page = match Page::from_body(&body) {
                Ok(page) => page,
                Err(_) => break,
            };
            // A page with no rows cannot advance the offset; stop rather
            // than request the same page again.
            if page.records.is_empty() {
                break;
            }
            has_next = page.has_next;
            offset += page.records.len() as u64;
            items.extend(page.records);
            tracing::info!("Retrieving: {} of {}", offset, page.total_count);
        }

        items
    }

    /// Performs one GET with the stored bearer token, returning the raw
    /// body. Failures are logged here and surfaced as errors for the
    /// pagination loop to interpret.
    async fn execute(&self, url: Url) -> Result<String, Error> {
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

/// Requests a token via the password grant and prefixes it for use as an
/// `Authorization` header.
async fn authenticate(http: &reqwest::Client, config: &ClientConfig) -> Result<String, Error> {
    // Re-checked here even though validate() already ran; authentication
    // must never go out with blank credentials.
    if config.username.is_empty() {
        return Err(Error::MissingConfig("username"));
    }
    if config.password.is_empty() {
        return Err(Error::MissingConfig("password"));
    }

    let token_url = format!("{}/token", config.base_url);
    let form = [
        ("grant_type", "password"),
        ("username", config.username.as_str()),
        ("password", config.password.as_str()),
    ];
    let resp = http.post(&token_url).form(&form).send().await.map_err(|e| {
        tracing::error!("Request failed: {}", e);
        Error::AuthenticationFailed
    })?;

    let status = resp.status();
    if !status.is_success() {
        tracing::error!("Token request failed with status {}", status);
        return Err(Error::AuthenticationFailed);
    }

    let token = resp.json::<TokenResponse>().await.map_err(|e| {
        tracing::error!("Failed to parse token response: {}", e);
        Error::AuthenticationFailed
    })?;

    Ok(format!("Bearer {}", token.access_token))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multi-byte text cannot panic the slice.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
