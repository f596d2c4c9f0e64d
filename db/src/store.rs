use async_trait::async_trait;
use common::error::Res;

use crate::models::{
    member::{Membership, MembershipActivation},
    payment::PaymentRecord,
};

/// Document-store surface the activation workflow writes through: a
/// member document keyed by user id plus an append-only payments
/// collection. The webhook handler is the only caller of the two write
/// methods; the advisory verification path never touches this trait.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Membership subdocument for a user, if one exists.
    async fn get_membership(&self, user_id: &str) -> Res<Option<Membership>>;

    /// Merge-style upsert flipping the membership to active. Returns
    /// `false` without writing when `activation.payment_id` is already the
    /// recorded one, so re-delivered webhooks apply nothing.
    async fn activate_membership(
        &self,
        user_id: &str,
        activation: &MembershipActivation,
    ) -> Res<bool>;

    /// Inserts a ledger row keyed by payment id. Returns `false` when the
    /// row already exists; rows are never updated after creation.
    async fn insert_payment(&self, payment: &PaymentRecord) -> Res<bool>;
}
