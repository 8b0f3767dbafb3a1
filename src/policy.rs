//! Cost-parameter policies for record creation and verification.
//!
//! Two fixed instances exist: [`CREATION_POLICY`], used when hashing, and
//! [`VERIFY_ENVELOPE`], the ceiling verification accepts. The envelope
//! dominates the creation policy componentwise, so every record created
//! under the current (or any earlier, weaker) policy stays verifiable.

use crate::error::HashError;

/// Argon2id cost triple applied when creating new records.
///
/// Parallelism is pinned to 1 so records hash identically regardless of
/// the host's thread availability.
pub const CREATION_POLICY: CostParams = CostParams {
    mem_cost_kib: 64 * 1024, // 64 MiB
    time_cost: 3,
    parallelism: 1,
};

/// Ceiling applied when verifying stored records.
///
/// Records whose embedded parameters exceed any component are refused,
/// which stops resource-exhaustion via maliciously inflated parameters.
pub const VERIFY_ENVELOPE: CostParams = CostParams {
    mem_cost_kib: 256 * 1024, // 256 MiB
    time_cost: 10,
    parallelism: 4,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    mem_cost_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl Default for CostParams {
    fn default() -> Self {
        CREATION_POLICY
    }
}

impl CostParams {
    pub fn new(mem_cost_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Self {
            mem_cost_kib,
            time_cost,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.time_cost < 1 {
            return Err(HashError::InvalidCostParams("time cost must be >= 1"));
        }
        if self.parallelism < 1 {
            return Err(HashError::InvalidCostParams("parallelism must be >= 1"));
        }
        if self.mem_cost_kib < 8 {
            return Err(HashError::InvalidCostParams("memory cost too low"));
        }
        if (self.mem_cost_kib as u64) < 8 * self.parallelism as u64 {
            return Err(HashError::InvalidCostParams(
                "memory cost must be at least 8 * parallelism",
            ));
        }
        Ok(())
    }

    /// True if every component sits at or below the envelope's.
    pub fn fits_within(&self, envelope: &CostParams) -> bool {
        self.mem_cost_kib <= envelope.mem_cost_kib
            && self.time_cost <= envelope.time_cost
            && self.parallelism <= envelope.parallelism
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_policy_fits_verify_envelope() {
        // Load-bearing ordering invariant: retuning either constant must
        // keep creation <= envelope or old records stop verifying.
        assert!(CREATION_POLICY.fits_within(&VERIFY_ENVELOPE));
    }

    #[test]
    fn fixed_policies_are_valid() {
        CREATION_POLICY.validate().unwrap();
        VERIFY_ENVELOPE.validate().unwrap();
    }

    #[test]
    fn rejects_zero_time_cost() {
        assert!(CostParams::new(65536, 0, 1).is_err());
    }

    #[test]
    fn rejects_zero_parallelism() {
        assert!(CostParams::new(65536, 3, 0).is_err());
    }

    #[test]
    fn rejects_memory_below_parallelism_floor() {
        // 8 KiB per lane is the Argon2 minimum.
        assert!(CostParams::new(16, 1, 4).is_err());
        assert!(CostParams::new(32, 1, 4).is_ok());
    }

    #[test]
    fn fits_within_is_componentwise() {
        let envelope = CostParams::new(1024, 4, 2).unwrap();

        assert!(CostParams::new(1024, 4, 2).unwrap().fits_within(&envelope));
        assert!(CostParams::new(512, 1, 1).unwrap().fits_within(&envelope));

        // One component over the ceiling is enough to fail.
        assert!(!CostParams::new(2048, 1, 1).unwrap().fits_within(&envelope));
        assert!(!CostParams::new(512, 5, 1).unwrap().fits_within(&envelope));
        assert!(!CostParams::new(512, 1, 3).unwrap().fits_within(&envelope));
    }
}
