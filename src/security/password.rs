use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
};
use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::OsRng;

use crate::config::Argon2Config;

/// Argon2id password hasher.
///
/// Hashes are stored in PHC string format
/// (`$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`), so the salt and the
/// parameters travel with every hash and no separate column is needed.
///
/// # Example
/// ```no_run
/// use bookstore::config::Argon2Config;
/// use bookstore::security::PasswordHasher;
///
/// let hasher = PasswordHasher::from_config(&Argon2Config::default()).unwrap();
/// let hash = hasher.hash("correct horse battery staple").unwrap();
///
/// assert!(hasher.verify("correct horse battery staple", &hash).unwrap());
/// ```
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    config: Argon2Config,
    /// Verified against when the username is unknown, so a failed login
    /// costs the same whether or not the account exists.
    dummy_hash: String,
}

impl PasswordHasher {
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &Argon2Config) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy = Alphanumeric.sample_string(&mut OsRng, 32);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2.hash_password(dummy.as_bytes(), &salt)?.to_string();

        Ok(Self {
            argon2,
            config: config.clone(),
            dummy_hash,
        })
    }

    /// Hash a password with a fresh random salt.
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a PHC hash.
    ///
    /// A mismatch is `Ok(false)`; only malformed hashes are errors.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Burn the same amount of work as a real verification and always fail.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);

        false
    }

    /// Whether a stored hash was produced with other parameters than the
    /// configured ones and should be replaced on the next successful login.
    pub fn needs_rehash(&self, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        if parsed_hash.algorithm.as_str() != "argon2id" {
            return Ok(true);
        }

        let m_cost = parsed_hash.params.get_decimal("m").unwrap_or(0);
        let t_cost = parsed_hash.params.get_decimal("t").unwrap_or(0);
        let p_cost = parsed_hash.params.get_decimal("p").unwrap_or(0);
        let output_len = parsed_hash.hash.map(|output| output.len()).unwrap_or(0);

        Ok(m_cost != self.config.memory_cost
            || t_cost != self.config.time_cost
            || p_cost != self.config.parallelism
            || output_len != self.config.hash_length as usize)
    }
}
