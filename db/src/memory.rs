use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::error::{AppError, Res};
use dashmap::DashMap;

use crate::models::{
    member::{Membership, MembershipActivation, MembershipStatus},
    payment::PaymentRecord,
};
use crate::store::MembershipStore;

/// In-memory store with the same conditional-write semantics as
/// `PgStore`. Backs the test suites and local runs without a database.
#[derive(Default)]
pub struct MemStore {
    members: DashMap<String, Membership>,
    payments: DashMap<String, PaymentRecord>,
    fail_writes: AtomicBool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, for exercising the handler's
    /// persistence-failure path.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Pre-populates a member record, bypassing the activation rules.
    pub fn seed_membership(&self, user_id: &str, membership: Membership) {
        self.members.insert(user_id.to_string(), membership);
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    pub fn payments_for(&self, user_id: &str) -> Vec<PaymentRecord> {
        self.payments
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn check_writable(&self) -> Res<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Persistence("store rejected the write".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipStore for MemStore {
    async fn get_membership(&self, user_id: &str) -> Res<Option<Membership>> {
        Ok(self.members.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn activate_membership(
        &self,
        user_id: &str,
        activation: &MembershipActivation,
    ) -> Res<bool> {
        self.check_writable()?;

        let mut entry = self
            .members
            .entry(user_id.to_string())
            .or_insert_with(Membership::inactive);

        if entry.last_payment_id.as_deref() == Some(activation.payment_id.as_str()) {
            return Ok(false);
        }

        *entry = Membership {
            status: MembershipStatus::Active,
            kind: Some(activation.plan_id.clone()),
            start_date: Some(activation.start_date),
            expires_at: Some(activation.expires_at),
            last_payment_id: Some(activation.payment_id.clone()),
        };
        Ok(true)
    }

    async fn insert_payment(&self, payment: &PaymentRecord) -> Res<bool> {
        self.check_writable()?;

        match self.payments.entry(payment.payment_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(false),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(payment.clone());
                Ok(true)
            }
        }
    }
}
