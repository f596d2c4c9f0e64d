use std::sync::Arc;

use actix_web::{
    HttpRequest, Responder, post,
    web::{self},
};
use chrono::Utc;
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};
use db::store::MembershipStore;

use crate::{
    dtos::webhook::{WebhookAck, WebhookEvent},
    services,
    services::webhook::Outcome,
};

/// Receives payment gateway webhook deliveries.
///
/// This endpoint is never called by the web client; the gateway's servers
/// call it after checkout completes. The raw body bytes are what the
/// signature covers, so the handler verifies before any parsing. Configure
/// the delivery URL and signing secret in the gateway dashboard and set
/// the secret as `RAZORPAY_WEBHOOK_SECRET`.
///
/// # Returns
///
/// `{"status": "ok"}` for every verified delivery, whether or not it
/// changed anything; 400 for a missing or mismatched signature; 500 when
/// the store rejects the write, which leaves redelivery to the gateway.
#[post("")]
pub async fn post_webhook(
    body: web::Bytes,
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
    store: web::Data<dyn MembershipStore>,
) -> Res<impl Responder> {
    let signature = match req.headers().get("x-razorpay-signature") {
        Some(signature) => signature.to_str().unwrap_or(""),
        None => return Err(AppError::MissingSignature),
    };

    if !services::verify::verify_webhook_signature(
        &config.razorpay.webhook_secret,
        &body,
        signature,
    ) {
        return Err(AppError::SignatureMismatch);
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed event payload: {}", e)))?;

    match services::webhook::apply_event(store.get_ref(), &event, Utc::now()).await? {
        Outcome::Applied { user_id, plan_id } => {
            log::info!("Activated membership for user {} (plan {})", user_id, plan_id);
        }
        Outcome::Skipped { reason } => {
            log::info!("Acknowledged {} event, no mutation: {}", event.event, reason);
        }
    }

    Success::ok(WebhookAck::ok())
}
