use anyhow::anyhow;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use rand::{distributions::Alphanumeric, Rng};

/// Hashes `password` into a PHC string stored as bytes.
pub fn hash(password: &str) -> anyhow::Result<Vec<u8>> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;

    Ok(hash.to_string().into_bytes())
}

/// A malformed stored hash never verifies.
pub fn verify(password: &str, password_hash: &[u8]) -> bool {
    let Ok(password_hash) = std::str::from_utf8(password_hash) else {
        return false;
    };
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub fn generate(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
