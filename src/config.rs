use serde::Deserialize;

/// Business inbox used when `BUSINESS_EMAIL` is not configured.
pub const DEFAULT_BUSINESS_EMAIL: &str = "reducemybills@revo-utilities.com";

/// Production CRM enquiry webhook, overridable via `CRM_WEBHOOK_URL`.
pub const DEFAULT_CRM_WEBHOOK_URL: &str =
    "https://utilities.maine-stream.com/api/public/webhook/enquiry";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub resend_api_key: String,
    pub business_email: String,
    pub crm_webhook_url: String,
    pub crm_webhook_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            resend_api_key: std::env::var("RESEND_API_KEY")
                .map_err(|_| anyhow::anyhow!("RESEND_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("RESEND_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            business_email: std::env::var("BUSINESS_EMAIL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BUSINESS_EMAIL.to_string()),
            crm_webhook_url: std::env::var("CRM_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("CRM_WEBHOOK_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_CRM_WEBHOOK_URL.to_string()),
            crm_webhook_key: std::env::var("CRM_WEBHOOK_KEY").unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Business inbox: {}", config.business_email);
        tracing::debug!("CRM webhook URL: {}", config.crm_webhook_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
