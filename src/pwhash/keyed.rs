use argon2::{Algorithm, Argon2, Params, Version};
use getrandom::fill;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::record::StoredRecord;
use super::{MASTER_KEY_LEN, SALT_LEN, STORED_LEN, TAG_LEN};
use crate::error::HashError;
use crate::policy::CostParams;

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|_| HashError::InternalHashFailure)
}

/// Generate a fresh master key from the OS entropy source.
pub fn keygen() -> Result<[u8; MASTER_KEY_LEN], HashError> {
    let mut key = [0u8; MASTER_KEY_LEN];
    secure_random(&mut key)?;
    Ok(key)
}

/// Argon2id tag over (password, salt) with the master key as secret.
fn compute_tag(
    password: &[u8],
    master_key: &[u8; MASTER_KEY_LEN],
    salt: &[u8; SALT_LEN],
    params: &CostParams,
) -> Result<Zeroizing<[u8; TAG_LEN]>, HashError> {
    let argon_params = Params::new(
        params.mem_cost_kib(),
        params.time_cost(),
        params.parallelism(),
        Some(TAG_LEN),
    )
    .map_err(|_| HashError::InternalHashFailure)?;

    let argon2 = Argon2::new_with_secret(master_key, Algorithm::Argon2id, Version::V0x13, argon_params)
        .map_err(|_| HashError::InternalHashFailure)?;

    let mut tag = Zeroizing::new([0u8; TAG_LEN]);
    argon2
        .hash_password_into(password, salt, &mut *tag)
        .map_err(|_| HashError::InternalHashFailure)?;

    Ok(tag)
}

/// Create a stored record for `password` under `params`.
///
/// Embeds a fresh random salt, so two calls with identical inputs produce
/// different records.
pub fn create(
    password: &[u8],
    master_key: &[u8; MASTER_KEY_LEN],
    params: CostParams,
) -> Result<[u8; STORED_LEN], HashError> {
    let mut salt = [0u8; SALT_LEN];
    secure_random(&mut salt)?;

    let tag = compute_tag(password, master_key, &salt, &params)?;

    Ok(StoredRecord::new(params, salt, *tag).to_bytes())
}

/// Check `password` against a stored record, accepting embedded cost
/// parameters up to `envelope`.
///
/// Every failure past this point — unparseable record, parameters over the
/// envelope, primitive fault, tag mismatch — is reported as `false`. Wrong
/// password and malformed record contents must be indistinguishable to the
/// caller.
pub fn verify(
    stored: &[u8; STORED_LEN],
    password: &[u8],
    master_key: &[u8; MASTER_KEY_LEN],
    envelope: CostParams,
) -> bool {
    let Some(record) = StoredRecord::from_bytes(stored) else {
        return false;
    };

    if !record.params().fits_within(&envelope) {
        return false;
    }

    let Ok(computed) = compute_tag(password, master_key, record.salt(), record.params()) else {
        return false;
    };

    computed[..].ct_eq(&record.tag()[..]).into()
}
