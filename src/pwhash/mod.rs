//! Keyed, memory-hard password hashing primitive.
//!
//! Provides key generation, record creation, and record verification over
//! fixed-size byte buffers. The stored-record layout is owned by this
//! module; callers treat records as opaque `STORED_LEN`-byte blobs.

pub mod keyed;
pub mod record;

pub use keyed::{create, keygen, verify};
pub use record::StoredRecord;

/// Length of the master key (32 bytes / 256 bits).
pub const MASTER_KEY_LEN: usize = 32;
/// Length of the per-record salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the verification tag (32 bytes).
pub const TAG_LEN: usize = 32;
/// Length of the magic bytes (4 bytes "PSGT").
pub const MAGIC_LEN: usize = 4;
/// Length of the version field (1 byte).
pub const VER_LEN: usize = 1;
/// Length of the memory cost field (4 bytes).
pub const MEM_LEN: usize = 4;
/// Length of the time cost field (4 bytes).
pub const TIME_LEN: usize = 4;
/// Length of the parallelism field (4 bytes).
pub const PAR_LEN: usize = 4;

/// Total length of a stored record (65 bytes).
pub const STORED_LEN: usize =
    MAGIC_LEN + VER_LEN + MEM_LEN + TIME_LEN + PAR_LEN + SALT_LEN + TAG_LEN;
