use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use common::env_config::{Config, RazorpayConfig};
use common::error::{AppError, Res};
use common::razorpay::{CreateGatewayOrder, GatewayOrder, OrderGateway};
use db::MemStore;
use db::store::MembershipStore;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        environment: "development".to_string(),
        database_url: String::new(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        num_workers: 1,
        cors_allowed_origin: "http://localhost:3000".to_string(),
        console_logging_enabled: false,
        razorpay: RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: KEY_SECRET.to_string(),
            webhook_secret: WEBHOOK_SECRET.to_string(),
        },
        duplicate_purchase_guard: true,
    })
}

pub fn store_data(store: Arc<MemStore>) -> web::Data<dyn MembershipStore> {
    web::Data::from(store as Arc<dyn MembershipStore>)
}

pub fn gateway_data(gateway: Arc<FakeGateway>) -> web::Data<dyn OrderGateway> {
    web::Data::from(gateway as Arc<dyn OrderGateway>)
}

pub fn sign(secret: &str, message: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Order gateway double. Echoes the requested amount back so responses
/// prove the server derived it from the catalog.
#[derive(Default)]
pub struct FakeGateway {
    pub requests: Mutex<Vec<CreateGatewayOrder>>,
    pub fail: bool,
}

#[async_trait]
impl OrderGateway for FakeGateway {
    async fn create_order(&self, req: &CreateGatewayOrder) -> Res<GatewayOrder> {
        if self.fail {
            return Err(AppError::OrderCreationFailed("gateway returned 503".to_string()));
        }
        self.requests.lock().unwrap().push(req.clone());
        Ok(GatewayOrder {
            id: "order_fake_1".to_string(),
            amount: req.amount,
            currency: req.currency.clone(),
            receipt: Some(req.receipt.clone()),
            status: Some("created".to_string()),
        })
    }
}
