use serde::{Deserialize, Serialize};

/// Contact fields pre-filled into the checkout overlay. Card data never
/// passes through this crate; the overlay collects it itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the gateway overlay needs to open. `amount` is in paise and
/// comes from the created order, never from local plan arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    /// Title line of the overlay.
    pub name: String,
    /// Subtitle, typically the plan name and duration.
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
}

/// Triple the gateway hands to the `handler` callback after a payment
/// attempt. Field names follow the gateway payload; the advisory verify
/// endpoint accepts this shape verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}
