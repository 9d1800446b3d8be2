//! HTTP client for converters hosted by the converter service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::config::{ConverterEndpoint, ConvertersConfig};
use super::error::ConverterError;
use super::traits::FormatConverter;

/// Error body returned by the converter service on a rejected document.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// A converter reached over HTTP.
///
/// The raw document is POSTed to `base_url + path`. A 2xx response body is the
/// converted payload; anything else is a rejection whose message comes from
/// the `error` field of a JSON body, the plain body text, or the status line.
pub struct HttpConverter {
    client: Client,
    name: String,
    url: String,
    timeout_secs: u64,
}

impl HttpConverter {
    /// Creates a converter for one endpoint, sharing the given client.
    pub fn new(
        client: Client,
        base_url: &str,
        endpoint: &ConverterEndpoint,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client,
            name: endpoint.name.clone(),
            url: format!("{}{}", base_url.trim_end_matches('/'), endpoint.path),
            timeout_secs,
        }
    }

    /// The full URL this converter posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ConverterError {
        if e.is_timeout() {
            ConverterError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            ConverterError::ConnectionFailed(e.to_string())
        } else {
            ConverterError::Request(e.to_string())
        }
    }
}

/// Builds one `HttpConverter` per configured endpoint over a shared client.
pub fn build_http_converters(
    config: &ConvertersConfig,
) -> Result<Vec<Arc<dyn FormatConverter>>, ConverterError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ConverterError::Request(format!("failed to create HTTP client: {}", e)))?;

    Ok(config
        .endpoints
        .iter()
        .map(|endpoint| {
            Arc::new(HttpConverter::new(
                client.clone(),
                &config.base_url,
                endpoint,
                config.request_timeout_secs,
            )) as Arc<dyn FormatConverter>
        })
        .collect())
}

#[async_trait]
impl FormatConverter for HttpConverter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConverterError> {
        debug!(
            converter = %self.name,
            url = %self.url,
            bytes = document.len(),
            "Posting document to converter"
        );

        let response = self
            .client
            .post(&self.url)
            .body(document.to_vec())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(|e| {
                if e.is_timeout() {
                    self.map_transport_error(e)
                } else {
                    ConverterError::InvalidResponse(e.to_string())
                }
            })?;
            return Ok(body.to_vec());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    converter = %self.name,
                    status = %status,
                    error = %e,
                    "Failed to read rejection body"
                );
                String::new()
            }
        };
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => format!("HTTP {}", status),
        };

        debug!(converter = %self.name, status = %status, "Converter rejected document");
        Err(ConverterError::Rejected(message))
    }
}
