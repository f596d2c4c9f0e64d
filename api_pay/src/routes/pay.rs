use std::sync::Arc;

use actix_web::{
    HttpResponse, Responder, get, post,
    web::{self},
};
use common::{env_config::Config, error::Res, http::Success, razorpay::OrderGateway};
use db::store::MembershipStore;

use crate::{
    dtos::pay::{
        CreateOrderRequest, CreateOrderResponse, PlansResponse, VerifyPaymentRequest,
        VerifyPaymentResponse,
    },
    services,
};

/// Returns the fixed plan catalog.
#[get("/plans")]
pub async fn get_plans() -> Res<impl Responder> {
    Success::ok(PlansResponse { plans: catalog::plans::PLANS })
}

/// Mints a payment gateway order for the requested plan.
///
/// # Arguments
///
/// * `config` - The application configuration with the gateway credentials.
/// * `gateway` - The order-creation client for the payment gateway.
/// * `store` - The membership store, consulted by the duplicate-purchase guard.
/// * `req` - The request naming the plan and the purchasing user.
///
/// # Returns
///
/// A `Result` with the order id, amount and currency plus the public key id
/// the checkout overlay needs, or an `AppError` for unknown plans, already
/// active members and gateway failures.
#[post("/create-order")]
pub async fn post_create_order(
    config: web::Data<Arc<Config>>,
    gateway: web::Data<dyn OrderGateway>,
    store: web::Data<dyn MembershipStore>,
    req: web::Json<CreateOrderRequest>,
) -> Res<impl Responder> {
    let order = services::order::create_order(
        gateway.get_ref(),
        store.get_ref(),
        &req.plan_id,
        &req.user_id,
        config.duplicate_purchase_guard,
    )
    .await?;

    Success::ok(CreateOrderResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: config.razorpay.key_id.clone(),
    })
}

/// Re-checks a checkout callback signature for the client.
///
/// Advisory only: the verdict feeds UI state and nothing else. Membership
/// activation happens exclusively on the webhook path, so a forged call
/// here can at worst show the caller a wrong success banner.
#[post("/verify-payment")]
pub async fn post_verify_payment(
    config: web::Data<Arc<Config>>,
    req: web::Json<VerifyPaymentRequest>,
) -> Res<impl Responder> {
    let verified = services::verify::verify_checkout_signature(
        &config.razorpay.key_secret,
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    );

    if verified {
        Ok(HttpResponse::Ok().json(VerifyPaymentResponse { verified: true, error: None }))
    } else {
        log::warn!(
            "Checkout signature failed verification for order {}",
            req.razorpay_order_id
        );
        Ok(HttpResponse::BadRequest().json(VerifyPaymentResponse {
            verified: false,
            error: Some("Signature verification failed".to_string()),
        }))
    }
}
