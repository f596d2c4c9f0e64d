use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: database connection
/// details, server host and port, number of worker threads, CORS
/// settings, logging preferences, the payment gateway credentials and
/// the duplicate-purchase guard switch.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Credentials for the Razorpay gateway.
    pub razorpay: RazorpayConfig,
    /// When enabled, a user whose membership is still active cannot mint
    /// a new order.
    pub duplicate_purchase_guard: bool,
}

#[derive(Clone, Debug)]
/// Credentials shared with the Razorpay gateway.
///
/// The key id is public (the checkout overlay embeds it); the key secret
/// signs checkout verification digests and the webhook secret signs the
/// webhook callbacks. The two secrets are independent.
pub struct RazorpayConfig {
    /// Public key id, returned to clients with each created order.
    pub key_id: String,
    /// Secret for the Orders API and checkout signature verification.
    pub key_secret: String,
    /// Secret the gateway uses to sign webhook deliveries.
    pub webhook_secret: String,
}

impl RazorpayConfig {
    /// Creates a new `RazorpayConfig` instance from environment variables.
    ///
    /// Reads the gateway configuration from environment variables:
    /// - `RAZORPAY_KEY_ID`: Public key id.
    /// - `RAZORPAY_KEY_SECRET`: Orders API / checkout signature secret.
    /// - `RAZORPAY_WEBHOOK_SECRET`: Webhook signing secret.
    ///
    /// All three default to empty strings so the server can boot in
    /// environments where payments are not exercised.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        RazorpayConfig {
            key_id: env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            key_secret: env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
            webhook_secret: env::var("RAZORPAY_WEBHOOK_SECRET").unwrap_or_default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads all configuration values from environment variables with
    /// sensible defaults for most optional settings.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `DUPLICATE_PURCHASE_GUARD`: Reject orders for already-active members (default: true)
    /// - Razorpay credentials (see `RazorpayConfig::from_env()`)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are
    /// missing or if numeric values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            razorpay: RazorpayConfig::from_env(),
            duplicate_purchase_guard: env::var("DUPLICATE_PURCHASE_GUARD")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
        })
    }
}
