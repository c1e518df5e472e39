use crate::errors::AppError;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for the CRM public enquiry webhook.
///
/// The relay exists so the browser never talks to the CRM directly (CORS)
/// and the API key stays server-side.
#[derive(Clone)]
pub struct CrmWebhookClient {
    client: reqwest::Client,
    webhook_url: String,
    api_key: String,
}

impl CrmWebhookClient {
    pub fn new(webhook_url: String, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create CRM client: {}", e)))?;

        Ok(Self {
            client,
            webhook_url,
            api_key,
        })
    }

    /// Forwards a raw enquiry payload verbatim to the CRM webhook.
    ///
    /// Returns the upstream status code and JSON body so the caller can pass
    /// non-2xx responses through unchanged. An unparseable upstream body
    /// degrades to an empty object rather than an error.
    pub async fn forward(&self, payload: &Value) -> Result<(u16, Value), AppError> {
        tracing::debug!("Forwarding enquiry to CRM webhook");

        let response = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::DispatchFailed(format!("CRM relay request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        Ok((status, body))
    }
}
