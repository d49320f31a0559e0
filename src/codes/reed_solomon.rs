//! Reed-Solomon codes.
//!
//! Narrow- and wide-sense Reed-Solomon codes are BCH codes over `GF(q)` of
//! length `q - 1`. Each coset has a single element, so a run of `d - 1`
//! exponents yields an `[q - 1, q - d, d]` MDS code.

use crate::codes::cyclic::CyclicCode;
use crate::config::Config;
use crate::error::{Error, Result};

impl CyclicCode {
    /// Creates the Reed-Solomon code over `GF(q)` with minimum distance `d`
    /// and roots `α^b, ..., α^(b+d-2)`.
    ///
    /// # Arguments
    ///
    /// * `q` - Field size, a prime power above 2
    /// * `d` - Minimum distance, `2 <= d <= q - 1`
    /// * `offset` - First exponent `b`
    pub fn reed_solomon(q: usize, d: usize, offset: usize) -> Result<Self> {
        Self::reed_solomon_with_config(q, d, offset, &Config::default())
    }

    /// As [`reed_solomon`](Self::reed_solomon) with explicit settings.
    pub fn reed_solomon_with_config(
        q: usize,
        d: usize,
        offset: usize,
        config: &Config,
    ) -> Result<Self> {
        if q <= 2 {
            return Err(Error::InvalidLength(format!(
                "Reed-Solomon codes need q > 2, got {}",
                q
            )));
        }
        let code = Self::from_run(q, q - 1, d, offset, config)?;
        tracing::trace!("Reed-Solomon [{}, {}, {}] over GF({})", q - 1, code.base().dimension(), d, q);
        Ok(code)
    }
}
