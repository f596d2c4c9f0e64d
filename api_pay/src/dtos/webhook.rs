use serde::{Deserialize, Serialize};

/// Raw gateway event envelope: `{event, payload: {payment: {entity}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub payment: Option<PaymentWrapper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentWrapper {
    pub entity: PaymentEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEntity {
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    /// Paise, as reported by the gateway.
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub notes: WebhookNotes,
}

/// Notes echoed back from order creation. Either id can be absent when
/// the payment was not minted through `/create-order`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookNotes {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "planId")]
    pub plan_id: Option<String>,
    #[serde(rename = "planName")]
    pub plan_name: Option<String>,
}

impl WebhookEvent {
    pub fn payment_entity(&self) -> Option<&PaymentEntity> {
        self.payload.payment.as_ref().map(|wrapper| &wrapper.entity)
    }
}

/// Body returned for every successfully verified delivery, whether or
/// not it changed anything.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

impl WebhookAck {
    pub fn ok() -> Self {
        WebhookAck { status: "ok" }
    }
}
