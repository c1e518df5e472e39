use crate::bot::is_likely_bot;
use crate::client_ip::resolve_client_ip;
use crate::config::Config;
use crate::cors::cors;
use crate::crm_client::CrmWebhookClient;
use crate::dispatch::send_enquiry_emails;
use crate::email_client::ResendClient;
use crate::errors::AppError;
use crate::models::{EnquiryResponse, EnquirySubmission};
use crate::rate_limit::RateLimiter;
use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state, constructed once at startup and injected into
/// every handler. The rate limiter lives here rather than as module-level
/// state so both endpoints share one counter table.
pub struct AppState {
    pub config: Config,
    pub email_client: ResendClient,
    pub crm_client: CrmWebhookClient,
    pub rate_limiter: RateLimiter,
}

/// Builds the application router.
///
/// The CORS middleware is the outermost layer so its headers land on every
/// response, including preflight short-circuits and error responses. The
/// health check shares the router but performs no pipeline work.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contact", post(submit_enquiry))
        .route("/api/crm", post(crm_relay))
        .with_state(state)
        // 1MB is generous for a contact form; anything larger is abuse
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors))
}

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Server is running"
    }))
}

/// Contact form relay: `POST /api/contact`.
///
/// Pipeline: rate limit by client address, silently drop likely bots,
/// enforce required fields, then send the business notification and customer
/// confirmation emails. Bot drops return the same success body as genuine
/// submissions so scripts learn nothing.
pub async fn submit_enquiry(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(submission): Json<EnquirySubmission>,
) -> Result<Json<EnquiryResponse>, AppError> {
    let client_ip = resolve_client_ip(&headers, connect_info.map(|info| info.0));

    if state.rate_limiter.check(&client_ip) {
        tracing::warn!("Rate limited enquiry from {}", client_ip);
        return Err(AppError::RateLimited);
    }

    if is_likely_bot(&submission, Utc::now().timestamp_millis() as f64) {
        tracing::info!("Silently dropping likely bot submission from {}", client_ip);
        return Ok(Json(EnquiryResponse::submitted()));
    }

    if submission.validate().is_err() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    let result =
        send_enquiry_emails(&state.email_client, &state.config.business_email, &submission)
            .await?;
    tracing::info!(
        "Enquiry dispatched: business={}, customer={}",
        result.business_message_id,
        result.customer_message_id
    );

    Ok(Json(EnquiryResponse::submitted()))
}

/// CRM relay: `POST /api/crm`.
///
/// A thin pass-through once anti-spam checks pass: the raw payload goes to
/// the CRM webhook verbatim and the upstream status and JSON body come back
/// unchanged. No field validation happens here; the CRM owns its own schema.
pub async fn crm_relay(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let client_ip = resolve_client_ip(&headers, connect_info.map(|info| info.0));

    if state.rate_limiter.check(&client_ip) {
        tracing::warn!("Rate limited CRM enquiry from {}", client_ip);
        return Err(AppError::RateLimited);
    }

    // The bot fields ride inside the raw payload; a non-object payload
    // simply carries no bot signal.
    let probe: EnquirySubmission = serde_json::from_value(payload.clone()).unwrap_or_default();
    if is_likely_bot(&probe, Utc::now().timestamp_millis() as f64) {
        tracing::info!("Silently dropping likely bot CRM enquiry from {}", client_ip);
        return Ok(Json(EnquiryResponse::submitted()).into_response());
    }

    let (status, body) = state.crm_client.forward(&payload).await?;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if !status.is_success() {
        tracing::warn!("CRM webhook rejected enquiry with status {}", status);
    }

    Ok((status, Json(body)).into_response())
}
