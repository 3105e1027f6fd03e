pub mod codec;
pub mod revocation;

pub use codec::{Claims, TokenCodec, TokenError};
pub use revocation::RevocationError;

/// Short, non-secret form of a token for log lines
pub fn redact(token: &str) -> String {
    let signature = token.rsplit('.').next().unwrap_or_default();
    let tail: String = signature.chars().take(8).collect();
    format!("…{tail}")
}
