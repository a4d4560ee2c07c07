//! Webhook signature verification
//!
//! Messenger signs every webhook POST with the app secret. `X-Hub-Signature`
//! carries `sha1=<hex>` and `X-Hub-Signature-256` carries `sha256=<hex>`.
//! Digests are compared in constant time.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Check an `X-Hub-Signature` digest (HMAC-SHA1, hex, prefix already removed).
pub fn verify_signature(app_secret: &str, body: &[u8], expected_signature: &str) -> bool {
    let Some(expected) = decode_digest(expected_signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha1::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Check an `X-Hub-Signature-256` digest (HMAC-SHA256, hex, prefix removed).
pub fn verify_signature_sha256(app_secret: &str, body: &[u8], expected_signature: &str) -> bool {
    let Some(expected) = decode_digest(expected_signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Check a raw header value, choosing the algorithm from its prefix.
/// A bare digest is treated as SHA1.
pub fn verify_signature_header(app_secret: &str, body: &[u8], header: &str) -> bool {
    let header = header.trim();
    if let Some(digest) = header.strip_prefix("sha256=") {
        verify_signature_sha256(app_secret, body, digest)
    } else if let Some(digest) = header.strip_prefix("sha1=") {
        verify_signature(app_secret, body, digest)
    } else {
        verify_signature(app_secret, body, header)
    }
}

fn decode_digest(signature: &str) -> Option<Vec<u8>> {
    let signature = signature.trim();
    if signature.is_empty() {
        debug!("Empty webhook signature");
        return None;
    }
    match hex::decode(signature) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("Malformed webhook signature: {}", e);
            None
        }
    }
}
