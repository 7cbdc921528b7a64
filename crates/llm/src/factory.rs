//! LLM client factory.
//!
//! Builds the generative-service client from configuration values and hands
//! it out as a trait object, so the responder never names a concrete
//! provider.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use grounded_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client for the Ollama endpoint at `endpoint`.
///
/// # Arguments
/// * `endpoint` - Base URL of the service (e.g., "http://localhost:11434")
/// * `timeout` - Upper bound for a single request
///
/// # Errors
/// Returns an error if the endpoint is not an http(s) URL or the HTTP
/// client cannot be initialized.
pub fn create_client(endpoint: &str, timeout: Duration) -> AppResult<Arc<dyn LlmClient>> {
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "Unsupported endpoint (expected http:// or https://): {}",
            endpoint
        )));
    }

    if timeout.is_zero() {
        return Err(AppError::Config(
            "Request timeout must be greater than zero".to_string(),
        ));
    }

    let client = OllamaClient::with_timeout(endpoint, timeout)?;
    tracing::debug!(
        "Created {} client for {} (timeout {:?})",
        client.provider_name(),
        client.base_url(),
        timeout
    );

    Ok(Arc::new(client))
}
