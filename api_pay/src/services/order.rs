use catalog::plans::{self, CURRENCY, Plan};
use chrono::Utc;
use common::error::{AppError, Res};
use common::razorpay::{CreateGatewayOrder, GatewayOrder, OrderGateway, OrderNotes};
use db::store::MembershipStore;
use uuid::Uuid;

/// Builds the gateway request for a plan purchase. The amount always
/// comes from the catalog; client-supplied amounts are never read.
pub(crate) fn build_order_request(plan: &Plan, user_id: &str) -> CreateGatewayOrder {
    CreateGatewayOrder {
        amount: plan.amount_paise(),
        currency: CURRENCY.to_string(),
        receipt: format!("rcpt_{}", Uuid::new_v4().simple()),
        notes: OrderNotes {
            user_id: user_id.to_string(),
            plan_id: plan.id.to_string(),
            plan_name: plan.name.to_string(),
        },
    }
}

/// Mints a gateway order for `plan_id`. With the duplicate guard on, a
/// user whose membership is still active and unexpired is refused a new
/// order instead of being charged twice.
pub(crate) async fn create_order(
    gateway: &dyn OrderGateway,
    store: &dyn MembershipStore,
    plan_id: &str,
    user_id: &str,
    duplicate_guard: bool,
) -> Res<GatewayOrder> {
    let plan = plans::get(plan_id).ok_or_else(|| AppError::InvalidPlan(plan_id.to_string()))?;

    if duplicate_guard {
        if let Some(membership) = store.get_membership(user_id).await? {
            if membership.is_current(Utc::now()) {
                return Err(AppError::MembershipActive(user_id.to_string()));
            }
        }
    }

    let order = gateway.create_order(&build_order_request(plan, user_id)).await?;
    log::info!(
        "Created order {} for user {} (plan {}, {} {})",
        order.id,
        user_id,
        plan.id,
        order.amount,
        order.currency
    );
    Ok(order)
}
