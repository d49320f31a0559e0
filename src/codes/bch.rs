//! BCH codes.
//!
//! A BCH code of length `n` over `GF(q)` with designed distance `δ` and
//! offset `b` is the cyclic code whose defining set is the closure under
//! multiplication by `q` of the run `b, b+1, ..., b+δ-2`. Its minimum
//! distance is at least `δ`.

use crate::codes::cyclic::CyclicCode;
use crate::config::Config;
use crate::error::{Error, Result};

impl CyclicCode {
    /// Creates a BCH code.
    ///
    /// # Arguments
    ///
    /// * `q` - Field size, a prime power
    /// * `n` - Code length, coprime to `q`
    /// * `delta` - Designed distance, at least 2
    /// * `offset` - First exponent `b` of the run
    ///
    /// # Returns
    ///
    /// The code, classified as BCH or, for `n = q - 1`, Reed-Solomon.
    pub fn bch(q: usize, n: usize, delta: usize, offset: usize) -> Result<Self> {
        Self::bch_with_config(q, n, delta, offset, &Config::default())
    }

    /// As [`bch`](Self::bch) with explicit settings.
    pub fn bch_with_config(
        q: usize,
        n: usize,
        delta: usize,
        offset: usize,
        config: &Config,
    ) -> Result<Self> {
        Self::from_run(q, n, delta, offset, config)
    }

    /// Creates a narrow-sense BCH code (`b = 1`).
    pub fn narrow_sense_bch(q: usize, n: usize, delta: usize) -> Result<Self> {
        Self::bch(q, n, delta, 1)
    }

    /// Creates a primitive narrow-sense BCH code of length `q^m - 1`.
    pub fn primitive_bch(q: usize, m: u32, delta: usize) -> Result<Self> {
        let n = q
            .checked_pow(m)
            .and_then(|order| order.checked_sub(1))
            .ok_or_else(|| Error::InvalidLength(format!("{}^{} overflows", q, m)))?;
        Self::narrow_sense_bch(q, n, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Distance;
    use crate::codes::CyclicKind;

    #[test]
    fn test_bch_15_offset_3() {
        let code = CyclicCode::bch(2, 15, 4, 3).unwrap();
        assert_eq!(
            code.cyclotomic_cosets(),
            &[vec![3, 6, 12, 9], vec![4, 8, 1, 2], vec![5, 10]]
        );
        assert_eq!(code.coset_representatives(), &[3, 4, 5]);
        assert_eq!(code.generator_polynomial().degree(), Some(10));
        assert_eq!(code.base().dimension(), 5);
        assert!(code.base().lower_bound() >= 7);
        assert_eq!(code.design_distance(), 7);
        assert_eq!(code.offset(), 1);
        assert_eq!(code.kind(), CyclicKind::Bch);
    }

    #[test]
    fn test_double_error_correcting_bch() {
        let code = CyclicCode::narrow_sense_bch(2, 15, 5).unwrap();
        assert_eq!(code.base().dimension(), 7);
        assert_eq!(code.defining_set(), &[1, 2, 3, 4, 6, 8, 9, 12]);
        assert_eq!(code.base().distance(), Distance::Known(5));
    }

    #[test]
    fn test_primitive_bch_31() {
        let code = CyclicCode::primitive_bch(2, 5, 7).unwrap();
        assert_eq!(code.base().length(), 31);
        assert_eq!(code.base().dimension(), 16);
        assert!(code.base().lower_bound() >= 7);
    }

    #[test]
    fn test_non_primitive_bch() {
        // Length 17 over GF(2): ord_17(2) = 8, cosets of size 8
        let code = CyclicCode::bch(2, 17, 3, 1).unwrap();
        assert_eq!(code.splitting_field().order(), 256);
        assert_eq!(code.base().dimension(), 9);
        assert!(code.base().lower_bound() >= 3);
    }

    #[test]
    fn test_ternary_bch() {
        let code = CyclicCode::bch(3, 8, 3, 1).unwrap();
        assert_eq!(code.splitting_field().order(), 9);
        // C1 = {1, 3}, C2 = {2, 6}
        assert_eq!(code.defining_set(), &[1, 2, 3, 6]);
        assert_eq!(code.base().dimension(), 4);
    }

    #[test]
    fn test_invalid_distance() {
        assert!(matches!(CyclicCode::bch(2, 15, 1, 1), Err(Error::InvalidDistance(_))));
        assert!(matches!(CyclicCode::bch(2, 15, 16, 1), Err(Error::InvalidDistance(_))));
        assert!(matches!(CyclicCode::bch(2, 1, 3, 1), Err(Error::InvalidLength(_))));
    }
}
