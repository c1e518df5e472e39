use revo_enquiry_api::config::Config;
use revo_enquiry_api::crm_client::CrmWebhookClient;
use revo_enquiry_api::email_client::ResendClient;
use revo_enquiry_api::handlers::{app, AppState};
use revo_enquiry_api::rate_limit::{RateLimiter, RATE_LIMIT_WINDOW};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the enquiry relay.
///
/// Initializes logging, loads configuration, constructs the outbound
/// clients and the shared rate limiter, then serves the router. A
/// background task sweeps expired rate-limit windows so the counter map
/// does not grow without bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revo_enquiry_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let email_client = ResendClient::new(config.resend_api_key.clone())
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!("Email client initialized");

    let crm_client = CrmWebhookClient::new(
        config.crm_webhook_url.clone(),
        config.crm_webhook_key.clone(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!("CRM relay client initialized: {}", config.crm_webhook_url);

    let port = config.port;

    // Build application state
    let state = Arc::new(AppState {
        config,
        email_client,
        crm_client,
        rate_limiter: RateLimiter::new(),
    });

    // Evict stale rate-limit entries once per window
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_WINDOW);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = sweep_state.rate_limiter.sweep_expired();
            if removed > 0 {
                tracing::debug!("Swept {} expired rate-limit entries", removed);
            }
        }
    });

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Enquiry relay listening on {}", addr);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
