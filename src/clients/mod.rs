//! Outbound clients for the analytics and recording backends.
//!
//! DESIGN
//! ======
//! Each backend sits behind an async trait so services can be driven by a
//! fake in tests. The HTTP implementations share one `reqwest::Client`
//! builder with the configured request and connect timeouts.

pub mod analytics;
pub mod recording;

use crate::settings::HttpTimeouts;

/// Build the shared HTTP client.
///
/// # Errors
///
/// Returns the builder error message if the TLS backend fails to initialize.
pub fn build_http_client(timeouts: HttpTimeouts) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeouts.request)
        .connect_timeout(timeouts.connect)
        .build()
        .map_err(|e| e.to_string())
}

/// Read the response body as text, mapping non-2xx statuses to `(status, body)`.
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, BodyError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| BodyError::Read(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(BodyError::Status { status, body: text });
    }
    Ok(text)
}

pub(crate) enum BodyError {
    Read(String),
    Status { status: u16, body: String },
}
