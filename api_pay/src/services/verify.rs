use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn hmac_hex(secret: &str, message: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(message);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Checkout callback scheme: the gateway signs
/// `"{order_id}|{payment_id}"` with the key secret. Backs the advisory
/// `/verify-payment` endpoint; never a trigger for persistence.
pub fn verify_checkout_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    supplied: &str,
) -> bool {
    let message = format!("{}|{}", order_id, payment_id);
    match hmac_hex(key_secret, message.as_bytes()) {
        Some(expected) => expected.as_bytes().ct_eq(supplied.as_bytes()).into(),
        None => false,
    }
}

/// Webhook scheme: the gateway signs the raw request body with the
/// webhook secret. A distinct scheme from the checkout one; the two are
/// deliberately not merged.
pub fn verify_webhook_signature(webhook_secret: &str, body: &[u8], supplied: &str) -> bool {
    match hmac_hex(webhook_secret, body) {
        Some(expected) => expected.as_bytes().ct_eq(supplied.as_bytes()).into(),
        None => false,
    }
}
