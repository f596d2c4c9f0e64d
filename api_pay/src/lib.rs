use actix_web::web::{self};

pub mod routes {
    pub mod pay;
    pub mod webhook;
}

mod services {
    pub(crate) mod order;
    pub(crate) mod verify;
    pub(crate) mod webhook;
}

mod dtos {
    pub(crate) mod pay;
    pub(crate) mod webhook;
}

/// Client-facing payment surface at the root path. An empty scope prefix
/// matches every path, so this must be the last service registered.
pub fn mount_pay() -> actix_web::Scope {
    web::scope("")
        .service(routes::pay::get_plans)
        .service(routes::pay::post_create_order)
        .service(routes::pay::post_verify_payment)
}

/// Gateway-facing webhook surface. Kept as its own scope so the server
/// can register it ahead of the catch-all client scope.
pub fn mount_webhook() -> actix_web::Scope {
    web::scope("/webhook").service(routes::webhook::post_webhook)
}
