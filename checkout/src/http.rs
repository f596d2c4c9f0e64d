use async_trait::async_trait;
use serde::Deserialize;

use crate::initiator::{CheckoutError, MembershipApi, OrderSummary};
use crate::options::PaymentAttempt;

/// `MembershipApi` over HTTP against the membership server.
pub struct HttpMembershipApi {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct VerifyVerdict {
    verified: bool,
}

impl HttpMembershipApi {
    pub fn new(base_url: &str) -> Self {
        HttpMembershipApi {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MembershipApi for HttpMembershipApi {
    async fn create_order(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<OrderSummary, CheckoutError> {
        let response = self
            .http
            .post(format!("{}/create-order", self.base_url))
            .json(&serde_json::json!({ "planId": plan_id, "userId": user_id }))
            .send()
            .await
            .map_err(|e| CheckoutError::OrderRequest(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::OrderRequest(format!(
                "server returned {}: {}",
                status, body
            )));
        }

        response
            .json::<OrderSummary>()
            .await
            .map_err(|e| CheckoutError::OrderRequest(format!("unexpected response: {}", e)))
    }

    async fn verify_payment(&self, attempt: &PaymentAttempt) -> Result<bool, CheckoutError> {
        // a 400 still carries a {verified: false} body, so no status check
        let verdict = self
            .http
            .post(format!("{}/verify-payment", self.base_url))
            .json(attempt)
            .send()
            .await
            .map_err(|e| CheckoutError::VerifyRequest(e.to_string()))?
            .json::<VerifyVerdict>()
            .await
            .map_err(|e| CheckoutError::VerifyRequest(format!("unexpected response: {}", e)))?;

        Ok(verdict.verified)
    }
}
