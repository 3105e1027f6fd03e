//! Print the Argon2 PHC hash of a password, for seeding `Customer.json`.
//!
//! Usage: `hash-password <password>`

use merchant_pay::auth::hash_password;

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: hash-password <password>"))?;

    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    println!("{hash}");
    Ok(())
}
