use serde::Serialize;

/// Currency all plans are priced in. Gateway orders are minted in the
/// minor unit (paise).
pub const CURRENCY: &str = "INR";

/// Membership type recorded for staff accounts. Not purchasable, so it
/// never appears in the plan table.
pub const CORE_MEMBERSHIP: &str = "core";

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    /// Price in whole rupees.
    pub price: i64,
    /// Whole years of membership the plan buys.
    pub years: u32,
    /// Human label shown by the client.
    pub duration: &'static str,
}

impl Plan {
    /// Order amount in paise. This is the only place an order amount is
    /// ever derived from; requests never carry one.
    pub fn amount_paise(&self) -> i64 {
        self.price * 100
    }
}

/// Fixed plan table, shared by the API and the checkout client.
pub static PLANS: &[Plan] = &[
    Plan {
        id: "one-year",
        name: "Annual Membership",
        price: 358,
        years: 1,
        duration: "1 Year",
    },
    Plan {
        id: "two-year",
        name: "Biennial Membership",
        price: 649,
        years: 2,
        duration: "2 Years",
    },
    Plan {
        id: "three-year",
        name: "Triennial Membership",
        price: 899,
        years: 3,
        duration: "3 Years",
    },
];

pub fn get(plan_id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == plan_id)
}
