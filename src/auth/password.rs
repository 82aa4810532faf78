use anyhow::Context;

pub const BCRYPT_COST: u32 = 10;

/// Hash a password on the blocking pool.
pub async fn hash_password(password: &str) -> anyhow::Result<String> {
    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("password hashing task failed")??;
    Ok(hash)
}

/// Check a password against a stored bcrypt hash on the blocking pool.
/// A malformed stored hash is an error, not a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")??;
    Ok(ok)
}
