use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One immutable ledger row per captured payment. Append-only, kept for
/// audit and export; nothing reads it back at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub user_id: String,
    pub order_id: String,
    /// Whole rupees, derived from the captured amount in paise.
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub plan_id: String,
    pub created_at: DateTime<Utc>,
}
