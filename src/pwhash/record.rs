use super::{MAGIC_LEN, MEM_LEN, PAR_LEN, SALT_LEN, STORED_LEN, TAG_LEN, TIME_LEN, VER_LEN};
use crate::policy::CostParams;

pub const VERSION_V1: u8 = 1;
pub const MAGIC: &[u8; MAGIC_LEN] = b"PSGT";

/// Parsed form of a stored record: the cost parameters the record was
/// created under, the salt, and the verification tag.
#[derive(Debug)]
pub struct StoredRecord {
    version: u8,
    params: CostParams,
    salt: [u8; SALT_LEN],
    tag: [u8; TAG_LEN],
}

impl StoredRecord {
    pub fn new(params: CostParams, salt: [u8; SALT_LEN], tag: [u8; TAG_LEN]) -> Self {
        Self {
            version: VERSION_V1,
            params,
            salt,
            tag,
        }
    }

    pub fn params(&self) -> &CostParams {
        &self.params
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn tag(&self) -> &[u8; TAG_LEN] {
        &self.tag
    }

    pub fn to_bytes(&self) -> [u8; STORED_LEN] {
        let mut buf = [0u8; STORED_LEN];

        buf[..MAGIC_LEN].copy_from_slice(MAGIC);
        buf[MAGIC_LEN] = self.version;

        let mut offset = MAGIC_LEN + VER_LEN;
        buf[offset..offset + MEM_LEN].copy_from_slice(&self.params.mem_cost_kib().to_le_bytes());
        offset += MEM_LEN;

        buf[offset..offset + TIME_LEN].copy_from_slice(&self.params.time_cost().to_le_bytes());
        offset += TIME_LEN;

        buf[offset..offset + PAR_LEN].copy_from_slice(&self.params.parallelism().to_le_bytes());
        offset += PAR_LEN;

        buf[offset..offset + SALT_LEN].copy_from_slice(&self.salt);
        offset += SALT_LEN;

        buf[offset..offset + TAG_LEN].copy_from_slice(&self.tag);

        buf
    }

    /// Parses a record buffer. Returns `None` for anything malformed —
    /// wrong magic, unknown version, out-of-range cost parameters. Callers
    /// on the verification path fold `None` into a failed match.
    pub fn from_bytes(data: &[u8; STORED_LEN]) -> Option<Self> {
        if &data[..MAGIC_LEN] != MAGIC {
            return None;
        }

        let version = data[MAGIC_LEN];
        if version != VERSION_V1 {
            return None;
        }

        let mut offset = MAGIC_LEN + VER_LEN;
        let mem_cost_kib = u32::from_le_bytes(data[offset..offset + MEM_LEN].try_into().ok()?);
        offset += MEM_LEN;

        let time_cost = u32::from_le_bytes(data[offset..offset + TIME_LEN].try_into().ok()?);
        offset += TIME_LEN;

        let parallelism = u32::from_le_bytes(data[offset..offset + PAR_LEN].try_into().ok()?);
        offset += PAR_LEN;

        let salt: [u8; SALT_LEN] = data[offset..offset + SALT_LEN].try_into().ok()?;
        offset += SALT_LEN;

        let tag: [u8; TAG_LEN] = data[offset..offset + TAG_LEN].try_into().ok()?;

        Some(StoredRecord {
            version,
            params: CostParams::new(mem_cost_kib, time_cost, parallelism).ok()?,
            salt,
            tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_roundtrip() {
        let params = CostParams::new(65536, 3, 2).unwrap();
        let record = StoredRecord::new(params, [1u8; SALT_LEN], [2u8; TAG_LEN]);

        let bytes = record.to_bytes();
        let parsed = StoredRecord::from_bytes(&bytes).unwrap();

        assert_eq!(parsed.version, VERSION_V1);
        assert_eq!(parsed.params(), &params);
        assert_eq!(parsed.salt(), &[1u8; SALT_LEN]);
        assert_eq!(parsed.tag(), &[2u8; TAG_LEN]);
    }

    #[test]
    fn rejects_bad_magic() {
        let record = StoredRecord::new(CostParams::default(), [0u8; SALT_LEN], [0u8; TAG_LEN]);

        let mut bytes = record.to_bytes();
        bytes[0] ^= 0xff;

        assert!(StoredRecord::from_bytes(&bytes).is_none());
    }

    #[test]
    fn rejects_unknown_version() {
        let record = StoredRecord::new(CostParams::default(), [0u8; SALT_LEN], [0u8; TAG_LEN]);

        let mut bytes = record.to_bytes();
        bytes[MAGIC_LEN] = 2;

        assert!(StoredRecord::from_bytes(&bytes).is_none());
    }

    #[test]
    fn rejects_invalid_embedded_params() {
        let record = StoredRecord::new(CostParams::default(), [0u8; SALT_LEN], [0u8; TAG_LEN]);

        let mut bytes = record.to_bytes();
        // Zero out the time cost field.
        let offset = MAGIC_LEN + VER_LEN + MEM_LEN;
        bytes[offset..offset + TIME_LEN].copy_from_slice(&0u32.to_le_bytes());

        assert!(StoredRecord::from_bytes(&bytes).is_none());
    }
}
