//! Revo Utilities Enquiry Relay API
//!
//! A small HTTP service that relays website enquiry form submissions:
//! bot filtering, per-address rate limiting, and dual-channel delivery to
//! an email provider or a CRM webhook.
//!
//! # Modules
//!
//! - `bot`: Honeypot and fill-time bot heuristics.
//! - `client_ip`: Best-effort client address resolution.
//! - `config`: Configuration management.
//! - `cors`: Permissive CORS middleware and preflight handling.
//! - `crm_client`: CRM webhook relay client.
//! - `dispatch`: Email composition and dual-send orchestration.
//! - `email_client`: Resend API client.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Submission and response models.
//! - `rate_limit`: Fixed-window rate limiter.

pub mod bot;
pub mod client_ip;
pub mod config;
pub mod cors;
pub mod crm_client;
pub mod dispatch;
pub mod email_client;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod rate_limit;
