use std::fmt;

use crate::pwhash::{MASTER_KEY_LEN, STORED_LEN};

/// Errors surfaced by the hashing service layer.
///
/// A wrong password is never an error; it is the normal `false` result of
/// verification.
#[derive(Debug)]
pub enum HashError {
    /// Master key is not exactly `MASTER_KEY_LEN` bytes. Carries the length
    /// that was supplied.
    InvalidKeyLength(usize),
    /// Stored record is not exactly `STORED_LEN` bytes. Carries the length
    /// that was supplied.
    InvalidRecordLength(usize),
    /// A custom cost policy failed validation at construction time.
    InvalidCostParams(&'static str),
    /// The OS entropy source or the hashing primitive failed. Not
    /// recoverable; never degrades to a weaker or default output.
    InternalHashFailure,
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashError::InvalidKeyLength(n) => {
                write!(f, "invalid master key length {n} (expected {MASTER_KEY_LEN})")
            }
            HashError::InvalidRecordLength(n) => {
                write!(f, "invalid stored record length {n} (expected {STORED_LEN})")
            }
            HashError::InvalidCostParams(msg) => write!(f, "invalid cost parameters: {msg}"),
            HashError::InternalHashFailure => write!(f, "password hashing primitive failed"),
        }
    }
}

impl std::error::Error for HashError {}
