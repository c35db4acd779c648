//! Shared request/response handling for provider clients.

use pay_core::{PaymentError, PaymentResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::error;

/// Longest body excerpt carried in an error message
const MAX_ERROR_BODY: usize = 512;

/// Build an HTTP client with a bounded timeout
pub(crate) fn build_client(timeout: Duration) -> PaymentResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PaymentError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Send a request, fail on non-success status, decode the JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> PaymentResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| PaymentError::network(provider, e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PaymentError::network(provider, e.to_string()))?;

    if !status.is_success() {
        error!("{} API error: status={}, body={}", provider, status, excerpt(&body));
        return Err(PaymentError::upstream(provider, status.as_u16(), excerpt(&body)));
    }

    serde_json::from_str(&body).map_err(|e| {
        PaymentError::malformed(provider, format!("Failed to parse response: {}", e))
    })
}

fn excerpt(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(400);
        let short = excerpt(&body);
        assert!(short.ends_with("..."));
        assert!(short.len() <= MAX_ERROR_BODY + 3);
        assert_eq!(excerpt("short"), "short");
    }
}
