use std::sync::Arc;

use async_trait::async_trait;
use catalog::plans;
use catalog::validate::Registrant;
use limiter::AttemptLimiter;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::options::{CheckoutOptions, PaymentAttempt, Prefill};

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Rolling-window limiter refused the attempt; the message already
    /// names the wait and is shown to the user as-is.
    #[error("{0}")]
    RateLimited(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Payment system failed to load: {0}")]
    SdkLoad(String),

    #[error("Order request failed: {0}")]
    OrderRequest(String),

    #[error("Checkout could not open: {0}")]
    Ui(String),

    #[error("Verification request failed: {0}")]
    VerifyRequest(String),
}

/// Order fields the server returns from `/create-order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}

/// How the overlay came back: the gateway's `handler` callback fired with
/// a payment attempt, or the user closed it.
#[derive(Debug, Clone)]
pub enum UiExit {
    Completed(PaymentAttempt),
    Dismissed,
}

/// Loads the gateway's client script. The production implementation
/// injects a script tag; the initiator guarantees one load per process.
#[async_trait]
pub trait SdkLoader: Send + Sync {
    async fn load(&self) -> Result<(), CheckoutError>;
}

/// Opens the gateway checkout overlay and waits for one of its two exit
/// callbacks.
#[async_trait]
pub trait CheckoutUi: Send + Sync {
    async fn open(&self, options: &CheckoutOptions) -> Result<UiExit, CheckoutError>;
}

/// The membership server, as seen from the client.
#[async_trait]
pub trait MembershipApi: Send + Sync {
    async fn create_order(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<OrderSummary, CheckoutError>;

    /// Advisory signature re-check; the verdict only drives UI state.
    async fn verify_payment(&self, attempt: &PaymentAttempt) -> Result<bool, CheckoutError>;
}

/// Terminal state of one checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutResult {
    /// The gateway reported a payment. `verified` is the advisory verdict;
    /// a `false` here still becomes a membership if the webhook later
    /// verifies the capture, so render it as "pending", not "failed".
    Paid { payment_id: String, verified: bool },
    Cancelled,
}

/// Drives one checkout attempt end to end: limiter, script load, order
/// request, overlay, advisory verification.
pub struct CheckoutInitiator {
    api: Arc<dyn MembershipApi>,
    sdk: Arc<dyn SdkLoader>,
    ui: Arc<dyn CheckoutUi>,
    limiter: AttemptLimiter,
    sdk_loaded: OnceCell<()>,
    /// Title the overlay shows above the plan description.
    org_name: String,
}

impl CheckoutInitiator {
    pub fn new(
        api: Arc<dyn MembershipApi>,
        sdk: Arc<dyn SdkLoader>,
        ui: Arc<dyn CheckoutUi>,
        org_name: &str,
    ) -> Self {
        CheckoutInitiator {
            api,
            sdk,
            ui,
            limiter: AttemptLimiter::checkout_default(),
            sdk_loaded: OnceCell::new(),
            org_name: org_name.to_string(),
        }
    }

    /// Runs a checkout for `plan_id`. The registrant fields arrive already
    /// validated by the form; they only feed the overlay prefill here.
    pub async fn start(
        &self,
        plan_id: &str,
        user_id: &str,
        registrant: &Registrant,
    ) -> Result<CheckoutResult, CheckoutError> {
        if let Err(cooldown) = self.limiter.try_acquire(user_id) {
            return Err(CheckoutError::RateLimited(cooldown.message()));
        }

        let plan = plans::get(plan_id)
            .ok_or_else(|| CheckoutError::UnknownPlan(plan_id.to_string()))?;

        self.ensure_sdk().await?;

        let order = self.api.create_order(plan_id, user_id).await?;
        let options = CheckoutOptions {
            key: order.key_id,
            amount: order.amount,
            currency: order.currency,
            name: self.org_name.clone(),
            description: format!("{} ({})", plan.name, plan.duration),
            order_id: order.order_id,
            prefill: Prefill {
                name: registrant.name.clone(),
                email: registrant.email.clone(),
                contact: registrant.phone.clone(),
            },
        };

        match self.ui.open(&options).await? {
            UiExit::Completed(attempt) => {
                let verified = match self.api.verify_payment(&attempt).await {
                    Ok(verdict) => verdict,
                    Err(e) => {
                        log::warn!("Advisory verification unreachable: {}", e);
                        false
                    }
                };
                Ok(CheckoutResult::Paid {
                    payment_id: attempt.razorpay_payment_id,
                    verified,
                })
            }
            UiExit::Dismissed => Ok(CheckoutResult::Cancelled),
        }
    }

    /// The script tag is injected at most once per process; a failed load
    /// leaves the cell empty so the next attempt retries.
    async fn ensure_sdk(&self) -> Result<(), CheckoutError> {
        self.sdk_loaded
            .get_or_try_init(|| async { self.sdk.load().await })
            .await?;
        Ok(())
    }
}
