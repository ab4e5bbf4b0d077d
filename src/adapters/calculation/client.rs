//! Calculation service HTTP client
//!
//! Performs the single network POST to the calculation service. The call is
//! bounded by the configured timeout and failures are classified into the
//! typed error taxonomy; no retries happen at this layer. Retry policy, if
//! any, belongs to the caller.

use super::request::CalculationRequest;
use crate::config::CalculationConfig;
use crate::domain::{CalculationError, CohortError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client for the calculation service
///
/// # Example
///
/// ```no_run
/// use cohort::adapters::calculation::CalculationClient;
/// use cohort::config::CalculationConfig;
///
/// # async fn example() -> cohort::domain::Result<()> {
/// let config = CalculationConfig::default();
/// let client = CalculationClient::new(&config)?;
/// # Ok(())
/// # }
/// ```
pub struct CalculationClient {
    client: Client,
    url: String,
    timeout_seconds: u64,
}

impl CalculationClient {
    /// Creates a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CalculationConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CohortError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// The configured calculation service endpoint
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the calculation request and returns the raw response body
    ///
    /// A single attempt, timeout-bounded. The body is returned unparsed;
    /// the reconciler owns interpreting it.
    ///
    /// # Errors
    ///
    /// - Connection actively refused: [`CalculationError::RestCall`] with the
    ///   fixed "Server refused connection on that port" message.
    /// - Timeout, other transport failures, or a non-success HTTP status:
    ///   [`CalculationError::RestCall`] carrying the underlying message.
    pub async fn calculate(&self, request: &CalculationRequest) -> Result<String> {
        let body = request.to_body()?;

        tracing::debug!(
            url = %self.url,
            timeout_seconds = self.timeout_seconds,
            body_bytes = body.len(),
            "Posting calculation request"
        );

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %self.url,
                status = %status,
                "Calculation service returned a failure status"
            );
            let message = if detail.trim().is_empty() {
                status.to_string()
            } else {
                format!("{status}: {detail}")
            };
            return Err(CalculationError::RestCall(message).into());
        }

        let raw = response
            .text()
            .await
            .map_err(|e| CohortError::from(CalculationError::RestCall(e.to_string())))?;

        tracing::debug!(
            url = %self.url,
            response_bytes = raw.len(),
            "Calculation service responded"
        );

        Ok(raw)
    }

    fn classify_send_error(&self, error: reqwest::Error) -> CohortError {
        // is_connect covers a socket actively refused (nothing listening);
        // the fixed wording is surfaced to users verbatim.
        if error.is_connect() {
            tracing::error!(url = %self.url, "Connection to the calculation service refused");
            return CalculationError::connection_refused().into();
        }
        if error.is_timeout() {
            tracing::error!(
                url = %self.url,
                timeout_seconds = self.timeout_seconds,
                "Calculation request timed out"
            );
            return CalculationError::RestCall(format!(
                "Request timed out after {} seconds",
                self.timeout_seconds
            ))
            .into();
        }
        tracing::error!(url = %self.url, error = %error, "Calculation request failed");
        CalculationError::RestCall(error.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = CalculationConfig::default();
        let client = CalculationClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:8081/calculate");
    }

    #[test]
    fn test_client_uses_configured_url() {
        let config = CalculationConfig {
            url: "http://calc.example.com/calculate".to_string(),
            timeout_seconds: 30,
        };
        let client = CalculationClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://calc.example.com/calculate");
    }
}
