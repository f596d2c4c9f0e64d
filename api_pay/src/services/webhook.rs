use catalog::plans;
use chrono::{DateTime, Duration, Months, Utc};
use common::error::{AppError, Res};
use db::models::{member::MembershipActivation, payment::PaymentRecord};
use db::store::MembershipStore;

use crate::dtos::webhook::WebhookEvent;

/// The only event type that mutates membership state. Everything else
/// the gateway sends is acknowledged and dropped.
pub(crate) const PAYMENT_CAPTURED: &str = "payment.captured";

/// What a verified delivery did to persistent state.
#[derive(Debug, PartialEq)]
pub(crate) enum Outcome {
    Applied { user_id: String, plan_id: String },
    Skipped { reason: &'static str },
}

/// Membership window bought by a captured payment: starts now, expires
/// one day short of `now + years`. The window is anchored a day back
/// before adding whole years, which grants a grace day at renewal.
pub(crate) fn membership_window(
    years: u32,
    now: DateTime<Utc>,
) -> Res<(DateTime<Utc>, DateTime<Utc>)> {
    let expires_at = (now - Duration::days(1))
        .checked_add_months(Months::new(12 * years))
        .ok_or_else(|| AppError::Internal("membership expiry left the calendar".to_string()))?;
    Ok((now, expires_at))
}

/// Applies a signature-verified event. Only `payment.captured` carrying
/// both `userId` and `planId` in its notes mutates anything; every other
/// shape is inapplicable, not an error. Both writes are keyed by the
/// gateway payment id, so a re-delivered event finds its payment already
/// recorded and applies nothing.
pub(crate) async fn apply_event(
    store: &dyn MembershipStore,
    event: &WebhookEvent,
    now: DateTime<Utc>,
) -> Res<Outcome> {
    if event.event != PAYMENT_CAPTURED {
        return Ok(Outcome::Skipped { reason: "event type does not activate membership" });
    }

    let entity = match event.payment_entity() {
        Some(entity) => entity,
        None => return Ok(Outcome::Skipped { reason: "no payment entity in payload" }),
    };

    let (user_id, plan_id) = match (&entity.notes.user_id, &entity.notes.plan_id) {
        (Some(user_id), Some(plan_id)) => (user_id.clone(), plan_id.clone()),
        _ => return Ok(Outcome::Skipped { reason: "notes carry no user and plan ids" }),
    };

    let plan = match plans::get(&plan_id) {
        Some(plan) => plan,
        None => {
            log::warn!("Captured payment {} names unknown plan {}", entity.id, plan_id);
            return Ok(Outcome::Skipped { reason: "unknown plan id in notes" });
        }
    };

    let (start_date, expires_at) = membership_window(plan.years, now)?;

    let activation = MembershipActivation {
        plan_id: plan_id.clone(),
        payment_id: entity.id.clone(),
        start_date,
        expires_at,
    };
    let record = PaymentRecord {
        payment_id: entity.id.clone(),
        user_id: user_id.clone(),
        order_id: entity.order_id.clone(),
        amount: entity.amount / 100,
        currency: entity.currency.clone(),
        status: entity.status.clone(),
        plan_id,
        created_at: now,
    };

    let activated = store.activate_membership(&user_id, &activation).await?;
    let recorded = store.insert_payment(&record).await?;

    if activated || recorded {
        Ok(Outcome::Applied { user_id, plan_id: record.plan_id })
    } else {
        Ok(Outcome::Skipped { reason: "payment already applied" })
    }
}

#[cfg(test)]
mod tests {
    use db::MemStore;
    use db::models::member::MembershipStatus;
    use serde_json::json;

    use super::*;

    fn captured_event(user_id: &str, plan_id: &str, payment_id: &str) -> WebhookEvent {
        serde_json::from_value(json!({
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {
                        "id": payment_id,
                        "order_id": "order_1",
                        "amount": 35800,
                        "currency": "INR",
                        "status": "captured",
                        "notes": { "userId": user_id, "planId": plan_id, "planName": "Annual Membership" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn window_starts_now_and_runs_a_day_short_of_full_years() {
        let now = Utc::now();
        let (start, expires) = membership_window(1, now).unwrap();
        assert_eq!(start, now);
        assert_eq!(
            expires,
            (now - Duration::days(1)).checked_add_months(Months::new(12)).unwrap()
        );
        assert!(expires > now + Duration::days(360));
        assert!(expires < now + Duration::days(366));

        let (_, expires) = membership_window(3, now).unwrap();
        assert!(expires > now + Duration::days(1090));
    }

    #[tokio::test]
    async fn captured_event_activates_membership_and_records_the_payment() {
        let store = MemStore::new();
        let now = Utc::now();
        let event = captured_event("u1", "one-year", "pay_1");

        let outcome = apply_event(&store, &event, now).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Applied { user_id: "u1".to_string(), plan_id: "one-year".to_string() }
        );

        let membership = store.get_membership("u1").await.unwrap().unwrap();
        assert_eq!(membership.status, MembershipStatus::Active);
        assert_eq!(membership.kind.as_deref(), Some("one-year"));
        assert_eq!(membership.start_date, Some(now));
        assert_eq!(
            membership.expires_at,
            Some((now - Duration::days(1)).checked_add_months(Months::new(12)).unwrap())
        );

        let payments = store.payments_for("u1");
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].payment_id, "pay_1");
        assert_eq!(payments[0].order_id, "order_1");
        assert_eq!(payments[0].amount, 358);
        assert_eq!(payments[0].currency, "INR");
        assert_eq!(payments[0].status, "captured");
    }

    #[tokio::test]
    async fn redelivered_event_neither_moves_expiry_nor_duplicates_the_ledger() {
        let store = MemStore::new();
        let first_now = Utc::now();
        let event = captured_event("u1", "one-year", "pay_1");

        apply_event(&store, &event, first_now).await.unwrap();

        // the retry arrives later, so a blind re-apply would drift expiry
        let outcome = apply_event(&store, &event, first_now + Duration::seconds(90))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Skipped { reason: "payment already applied" });

        let membership = store.get_membership("u1").await.unwrap().unwrap();
        assert_eq!(
            membership.expires_at,
            Some((first_now - Duration::days(1)).checked_add_months(Months::new(12)).unwrap())
        );
        assert_eq!(store.payment_count(), 1);
    }

    #[tokio::test]
    async fn a_distinct_later_payment_renews_and_appends() {
        let store = MemStore::new();
        let now = Utc::now();

        apply_event(&store, &captured_event("u1", "one-year", "pay_1"), now).await.unwrap();
        let renewal_now = now + Duration::days(300);
        let outcome = apply_event(&store, &captured_event("u1", "two-year", "pay_2"), renewal_now)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Applied { .. }));

        let membership = store.get_membership("u1").await.unwrap().unwrap();
        assert_eq!(membership.kind.as_deref(), Some("two-year"));
        assert_eq!(membership.last_payment_id.as_deref(), Some("pay_2"));
        assert_eq!(store.payment_count(), 2);
    }

    #[tokio::test]
    async fn non_captured_events_are_acknowledged_without_mutation() {
        let store = MemStore::new();
        let mut event = captured_event("u1", "one-year", "pay_1");
        event.event = "payment.failed".to_string();

        let outcome = apply_event(&store, &event, Utc::now()).await.unwrap();
        assert!(matches!(outcome, Outcome::Skipped { .. }));
        assert!(store.get_membership("u1").await.unwrap().is_none());
        assert_eq!(store.payment_count(), 0);
    }

    #[tokio::test]
    async fn events_without_both_note_ids_are_inapplicable() {
        let store = MemStore::new();
        let event: WebhookEvent = serde_json::from_value(json!({
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_1",
                        "amount": 35800,
                        "currency": "INR",
                        "status": "captured",
                        "notes": { "planId": "one-year" }
                    }
                }
            }
        }))
        .unwrap();

        let outcome = apply_event(&store, &event, Utc::now()).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped { reason: "notes carry no user and plan ids" });
        assert_eq!(store.payment_count(), 0);
    }

    #[tokio::test]
    async fn envelope_without_payment_entity_is_inapplicable() {
        let store = MemStore::new();
        let event: WebhookEvent =
            serde_json::from_value(json!({ "event": "payment.captured", "payload": {} })).unwrap();

        let outcome = apply_event(&store, &event, Utc::now()).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped { reason: "no payment entity in payload" });
    }

    #[tokio::test]
    async fn unknown_plan_id_is_inapplicable() {
        let store = MemStore::new();
        let event = captured_event("u1", "retired-plan", "pay_1");

        let outcome = apply_event(&store, &event, Utc::now()).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped { reason: "unknown plan id in notes" });
        assert!(store.get_membership("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn persistence_failures_propagate_for_gateway_retry() {
        let store = MemStore::new();
        store.set_fail_writes(true);

        let err = apply_event(&store, &captured_event("u1", "one-year", "pay_1"), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }
}
