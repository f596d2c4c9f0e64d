use catalog::plans::Plan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub plan_id: String,
    pub user_id: String,
}

/// Everything the checkout overlay needs: the gateway order, the paise
/// amount echoed back from it, and the public key id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: &'static [Plan],
}

/// Field names follow the gateway's checkout callback payload.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
