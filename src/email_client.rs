use crate::errors::AppError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const RESEND_API_BASE: &str = "https://api.resend.com";

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: String,
}

/// Client for the Resend transactional email API.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ResendClient {
    /// Creates a new `ResendClient` against the production API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The Resend API key for authentication.
    pub fn new(api_key: String) -> Result<Self, AppError> {
        Self::with_base_url(api_key, RESEND_API_BASE.to_string())
    }

    /// Creates a client against an explicit base URL. Tests point this at a
    /// mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create email client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Sends one HTML email, returning the provider's message id.
    ///
    /// # Arguments
    ///
    /// * `from` - The sender address.
    /// * `to` - The recipient address.
    /// * `subject` - The message subject.
    /// * `html` - The HTML body.
    pub async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/emails", self.base_url);
        tracing::debug!("Sending email via Resend: to={}, subject={}", to, subject);

        let body = json!({
            "from": from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DispatchFailed(format!("Email send request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::DispatchFailed(format!(
                "Email provider returned {}: {}",
                status, error_text
            )));
        }

        let sent: SendEmailResponse = response.json().await.map_err(|e| {
            AppError::DispatchFailed(format!("Failed to parse email provider response: {}", e))
        })?;

        Ok(sent.id)
    }
}
