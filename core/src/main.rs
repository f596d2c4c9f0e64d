mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use common::razorpay::OrderGateway;
use db::MembershipStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let store = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");
    let store: Arc<dyn MembershipStore> = store;

    // init payment gateway client
    let gateway: Arc<dyn OrderGateway> = Arc::new(common::razorpay::create_client(
        &config.razorpay.key_id,
        &config.razorpay.key_secret,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::from(gateway.clone()))
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            // the webhook scope must come before the catch-all client scope
            .service(api_pay::mount_webhook())
            .service(api_pay::mount_pay())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
