use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::Rng;

/// Hash a password into an Argon2 PHC string with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt_bytes: [u8; 16] = rand::thread_rng().gen();
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(phc)
}

/// Prefixes of the bcrypt hashes found in seeded customer files
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Check a password against a stored hash.
///
/// Argon2 PHC strings and bcrypt hashes are both accepted. An unparsable
/// hash never matches.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
        return match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, "Stored bcrypt hash is malformed");
                false
            }
        };
    }

    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is not a valid PHC string");
            false
        }
    }
}
