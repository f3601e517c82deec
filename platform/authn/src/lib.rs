//! Credential helpers.
//!
//! Passwords are stored as argon2 PHC strings. The demo account is a fixed
//! email/password pair that logs in without touching the store.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthnError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("stored password hash is malformed")]
    MalformedHash,
}

pub fn hash_password(plain: &str) -> Result<String, AuthnError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthnError::Hash(err.to_string()))
}

/// `Ok(false)` on mismatch; a hash that does not parse is an error.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthnError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthnError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Profile returned for a successful demo login.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DemoProfile {
    pub id: i64,
    pub employee_id: String,
    pub ad: String,
    pub soyad: String,
    pub rol: String,
    pub pozisyon: String,
    pub maas_tabani: f64,
}

impl Default for DemoProfile {
    fn default() -> Self {
        Self {
            id: 1,
            employee_id: "1".into(),
            ad: "Demo".into(),
            soyad: "User".into(),
            rol: "admin".into(),
            pozisyon: "Administrator".into(),
            maas_tabani: 50000.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DemoAccount {
    pub email: String,
    password: String,
    pub profile: DemoProfile,
}

impl DemoAccount {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            profile: DemoProfile::default(),
        }
    }

    /// Email comparison ignores case and surrounding whitespace.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        email.trim().eq_ignore_ascii_case(self.email.trim()) && password == self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_reject() {
        let hash = hash_password("3010").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("3010", &hash).unwrap());
        assert!(!verify_password("0000", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash_password("1234").unwrap(), hash_password("1234").unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "plain-text"),
            Err(AuthnError::MalformedHash)
        ));
    }

    #[test]
    fn demo_account_matches_case_insensitive_email() {
        let demo = DemoAccount::new("demo@test.com", "demo123");
        assert!(demo.matches(" Demo@Test.com", "demo123"));
        assert!(!demo.matches("demo@test.com", "DEMO123"));
        assert!(!demo.matches("other@test.com", "demo123"));
        assert_eq!(demo.profile.rol, "admin");
    }
}
