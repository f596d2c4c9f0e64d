use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Inactive,
    Active,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MembershipStatus::Inactive => "inactive",
            MembershipStatus::Active => "active",
        }
    }
}

impl From<String> for MembershipStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => MembershipStatus::Active,
            _ => MembershipStatus::Inactive,
        }
    }
}

/// Membership subfield of a user record. Created inactive when the user
/// record is created; only the webhook path ever flips it to active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub status: MembershipStatus,
    /// Plan id that paid for the membership, or "core" for staff.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Payment that last transitioned this record. Makes re-applied
    /// webhook deliveries a no-op.
    pub last_payment_id: Option<String>,
}

impl Membership {
    pub fn inactive() -> Self {
        Membership {
            status: MembershipStatus::Inactive,
            kind: None,
            start_date: None,
            expires_at: None,
            last_payment_id: None,
        }
    }

    /// Active and unexpired relative to `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == MembershipStatus::Active && self.expires_at.is_some_and(|at| at > now)
    }
}

/// State written by a verified `payment.captured` event.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipActivation {
    pub plan_id: String,
    pub payment_id: String,
    pub start_date: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
