use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::Res;
use sqlx::{FromRow, PgPool};

use crate::models::{
    member::{Membership, MembershipActivation, MembershipStatus},
    payment::PaymentRecord,
};
use crate::store::MembershipStore;

/// Postgres-backed store. Queries are runtime-checked so the crate builds
/// without a live database.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MemberRow {
    status: String,
    membership_type: Option<String>,
    start_date: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    last_payment_id: Option<String>,
}

impl From<MemberRow> for Membership {
    fn from(row: MemberRow) -> Self {
        Membership {
            status: MembershipStatus::from(row.status),
            kind: row.membership_type,
            start_date: row.start_date,
            expires_at: row.expires_at,
            last_payment_id: row.last_payment_id,
        }
    }
}

#[async_trait]
impl MembershipStore for PgStore {
    async fn get_membership(&self, user_id: &str) -> Res<Option<Membership>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT status, membership_type, start_date, expires_at, last_payment_id
            FROM members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Membership::from))
    }

    async fn activate_membership(
        &self,
        user_id: &str,
        activation: &MembershipActivation,
    ) -> Res<bool> {
        // The WHERE clause keeps a re-delivered payment from rewriting the
        // row with a drifted expiry.
        let result = sqlx::query(
            r#"
            INSERT INTO members (user_id, status, membership_type, start_date, expires_at, last_payment_id)
            VALUES ($1, 'active', $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET status = 'active',
                membership_type = EXCLUDED.membership_type,
                start_date = EXCLUDED.start_date,
                expires_at = EXCLUDED.expires_at,
                last_payment_id = EXCLUDED.last_payment_id
            WHERE members.last_payment_id IS DISTINCT FROM EXCLUDED.last_payment_id
            "#,
        )
        .bind(user_id)
        .bind(&activation.plan_id)
        .bind(activation.start_date)
        .bind(activation.expires_at)
        .bind(&activation.payment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_payment(&self, payment: &PaymentRecord) -> Res<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (payment_id, user_id, order_id, amount, currency, status, plan_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (payment_id) DO NOTHING
            "#,
        )
        .bind(&payment.payment_id)
        .bind(&payment.user_id)
        .bind(&payment.order_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.status)
        .bind(&payment.plan_id)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
