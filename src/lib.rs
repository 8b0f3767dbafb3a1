//! Keyed, memory-hard password hashing for account stores.
//!
//! Three operations: [`generate_key`] produces a 32-byte master key,
//! [`hash_password`] turns a password into a fixed-size opaque record under
//! that key, and [`verify_password`] checks a candidate password against a
//! stored record. Hashing uses a fixed creation policy; verification accepts
//! anything up to a wider envelope, so the creation policy can be
//! strengthened over time without breaking existing records.

mod error;
mod policy;
mod pwhash;

pub use crate::error::HashError;
pub use crate::policy::{CREATION_POLICY, CostParams, VERIFY_ENVELOPE};
pub use crate::pwhash::{MASTER_KEY_LEN, STORED_LEN};

fn check_key(master_key: &[u8]) -> Result<&[u8; MASTER_KEY_LEN], HashError> {
    master_key
        .try_into()
        .map_err(|_| HashError::InvalidKeyLength(master_key.len()))
}

fn check_record(stored_record: &[u8]) -> Result<&[u8; STORED_LEN], HashError> {
    stored_record
        .try_into()
        .map_err(|_| HashError::InvalidRecordLength(stored_record.len()))
}

/// Generate a fresh master key.
///
/// Fails with [`HashError::InternalHashFailure`] if the OS entropy source
/// is unavailable; there is no degraded fallback.
pub fn generate_key() -> Result<[u8; MASTER_KEY_LEN], HashError> {
    pwhash::keygen()
}

/// Hash `password` under `master_key` with the default creation policy.
pub fn hash_password(master_key: &[u8], password: &[u8]) -> Result<[u8; STORED_LEN], HashError> {
    PasswordHasher::new().hash(master_key, password)
}

/// Verify `password` against `stored_record` under the default envelope.
pub fn verify_password(
    master_key: &[u8],
    stored_record: &[u8],
    password: &[u8],
) -> Result<bool, HashError> {
    PasswordVerifier::new().verify(master_key, stored_record, password)
}

/// Produces stored records under an immutable creation policy.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    policy: CostParams,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            policy: CREATION_POLICY,
        }
    }

    /// Build a hasher with a custom policy.
    ///
    /// The policy must sit within [`VERIFY_ENVELOPE`]; a hasher must never
    /// produce records the default verifier would refuse.
    pub fn with_policy(policy: CostParams) -> Result<Self, HashError> {
        policy.validate()?;
        if !policy.fits_within(&VERIFY_ENVELOPE) {
            return Err(HashError::InvalidCostParams(
                "creation policy exceeds the verification envelope",
            ));
        }
        Ok(Self { policy })
    }

    /// Hash `password` into an opaque fixed-size record.
    ///
    /// `master_key` must be exactly [`MASTER_KEY_LEN`] bytes; the password
    /// may be any byte sequence, including empty. Each call embeds a fresh
    /// salt.
    pub fn hash(&self, master_key: &[u8], password: &[u8]) -> Result<[u8; STORED_LEN], HashError> {
        let key = check_key(master_key)?;
        pwhash::create(password, key, self.policy)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks candidate passwords against stored records, accepting embedded
/// cost parameters up to an immutable envelope.
#[derive(Debug, Clone, Copy)]
pub struct PasswordVerifier {
    envelope: CostParams,
}

impl PasswordVerifier {
    pub fn new() -> Self {
        Self {
            envelope: VERIFY_ENVELOPE,
        }
    }

    pub fn with_envelope(envelope: CostParams) -> Result<Self, HashError> {
        envelope.validate()?;
        Ok(Self { envelope })
    }

    /// Check `password` against `stored_record`.
    ///
    /// Key and record lengths are validated before any cryptographic work.
    /// Past those checks the result is a plain boolean: wrong password,
    /// wrong key, tampered record contents, and parameters over the
    /// envelope all come back as `Ok(false)` through the same path.
    pub fn verify(
        &self,
        master_key: &[u8],
        stored_record: &[u8],
        password: &[u8],
    ) -> Result<bool, HashError> {
        let key = check_key(master_key)?;
        let record = check_record(stored_record)?;
        Ok(pwhash::verify(record, password, key, self.envelope))
    }
}

impl Default for PasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_rejects_short_key_before_hashing() {
        let err = hash_password(&[0u8; 16], b"pw").unwrap_err();
        assert!(matches!(err, HashError::InvalidKeyLength(16)));
    }

    #[test]
    fn verify_rejects_wrong_lengths_before_hashing() {
        let key = [0u8; MASTER_KEY_LEN];

        let err = verify_password(&[0u8; 31], &[0u8; STORED_LEN], b"pw").unwrap_err();
        assert!(matches!(err, HashError::InvalidKeyLength(31)));

        let err = verify_password(&key, &[0u8; STORED_LEN - 1], b"pw").unwrap_err();
        assert!(matches!(err, HashError::InvalidRecordLength(n) if n == STORED_LEN - 1));
    }

    #[test]
    fn with_policy_rejects_over_envelope() {
        let over = CostParams::new(
            VERIFY_ENVELOPE.mem_cost_kib() * 2,
            VERIFY_ENVELOPE.time_cost(),
            VERIFY_ENVELOPE.parallelism(),
        )
        .unwrap();

        assert!(matches!(
            PasswordHasher::with_policy(over),
            Err(HashError::InvalidCostParams(_))
        ));
    }

    #[test]
    fn with_policy_accepts_weaker_than_default() {
        let cheap = CostParams::new(16, 1, 1).unwrap();
        PasswordHasher::with_policy(cheap).unwrap();
    }
}
