use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Res};

pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Business context attached to an order. The gateway echoes these notes
/// back inside every webhook event for the payment, which is the only
/// channel carrying `{userId, planId, planName}` into the async callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotes {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "planId")]
    pub plan_id: String,
    #[serde(rename = "planName")]
    pub plan_name: String,
}

/// Parameters for minting an order. Amounts are in paise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGatewayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

/// Order as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Seam for order minting so services can run against a test double.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, req: &CreateGatewayOrder) -> Res<GatewayOrder>;
}

/// REST client for the gateway's Orders API, authenticated with the
/// key id / key secret pair.
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

pub fn create_client(key_id: &str, key_secret: &str) -> RazorpayClient {
    RazorpayClient::new(key_id, key_secret, DEFAULT_BASE_URL)
}

impl RazorpayClient {
    pub fn new(key_id: &str, key_secret: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl OrderGateway for RazorpayClient {
    async fn create_order(&self, req: &CreateGatewayOrder) -> Res<GatewayOrder> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::OrderCreationFailed(format!("gateway unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::OrderCreationFailed(format!(
                "gateway returned {}: {}",
                status, body
            )));
        }

        response.json::<GatewayOrder>().await.map_err(|e| {
            AppError::OrderCreationFailed(format!("unexpected gateway response: {}", e))
        })
    }
}
