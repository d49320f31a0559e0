//! Weight enumerators.
//!
//! The weight distribution `A_0, ..., A_n` of a linear code counts its
//! codewords of each Hamming weight. It is computed here by exhaustive
//! enumeration, which is bounded by [`Config::max_enumeration_size`], and
//! transformed into the distribution of the dual code with the MacWilliams
//! identity.
//!
//! [`Config::max_enumeration_size`]: crate::config::Config::max_enumeration_size

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::FieldMatrix;

/// Weight distribution of a linear code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEnumerator {
    field_order: usize,
    distribution: Vec<u128>,
}

impl WeightEnumerator {
    /// Wraps a distribution `A_0..=A_n` for a code over a field of the given order.
    pub fn new(field_order: usize, distribution: Vec<u128>) -> Result<Self> {
        if distribution.is_empty() || distribution[0] != 1 {
            return Err(Error::InvalidParameter(
                "a weight distribution starts with A_0 = 1".to_string(),
            ));
        }
        Ok(Self {
            field_order,
            distribution,
        })
    }

    /// Code length `n`.
    pub fn length(&self) -> usize {
        self.distribution.len() - 1
    }

    /// `A_0, ..., A_n`.
    pub fn distribution(&self) -> &[u128] {
        &self.distribution
    }

    /// Number of codewords of weight `w`.
    pub fn count(&self, w: usize) -> u128 {
        self.distribution.get(w).copied().unwrap_or(0)
    }

    /// Total number of codewords.
    pub fn total(&self) -> u128 {
        self.distribution.iter().sum()
    }

    /// Smallest non-zero weight, or `None` for the zero code.
    pub fn minimum_distance(&self) -> Option<usize> {
        self.distribution
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, a)| **a > 0)
            .map(|(w, _)| w)
    }

    /// Weight distribution of the dual code, by the MacWilliams identity
    /// `B_j = |C|^-1 * sum_i A_i K_j(i)` with Krawtchouk polynomials `K_j`.
    ///
    /// # Errors
    ///
    /// Fails if intermediate values overflow `i128`, or with
    /// [`Error::InternalConsistency`] if the transform is not integral.
    pub fn macwilliams_transform(&self) -> Result<Self> {
        let n = self.length();
        let q = self.field_order as i128;
        let size = i128::try_from(self.total()).map_err(|_| overflow())?;

        let mut dual = Vec::with_capacity(n + 1);
        for j in 0..=n {
            let mut sum: i128 = 0;
            for (i, &a) in self.distribution.iter().enumerate() {
                if a == 0 {
                    continue;
                }
                let a = i128::try_from(a).map_err(|_| overflow())?;
                let term = a
                    .checked_mul(krawtchouk(n, q, j, i)?)
                    .ok_or_else(overflow)?;
                sum = sum.checked_add(term).ok_or_else(overflow)?;
            }
            if sum < 0 || sum % size != 0 {
                return Err(Error::internal(format!(
                    "MacWilliams transform gave non-integral B_{} = {}/{}",
                    j, sum, size
                )));
            }
            dual.push((sum / size) as u128);
        }

        Self::new(self.field_order, dual)
    }
}

fn overflow() -> Error {
    Error::Overflow("weight enumerator exceeds exact integer range".to_string())
}

/// `C(n, k)`, or `None` when it does not fit an `i128`.
///
/// After step `i` the running value is `C(n, i + 1)`. Each step cancels the
/// common factor of the running value and `i + 1` first, so the only product
/// formed is one that the exact result divides.
fn binomial(n: usize, k: usize) -> Option<i128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: i128 = 1;
    for i in 0..k {
        let divisor = (i + 1) as i128;
        let g = result.gcd(&divisor);
        let factor = (n - i) as i128 / (divisor / g);
        result = (result / g).checked_mul(factor)?;
    }
    Some(result)
}

/// Krawtchouk polynomial `K_j(i) = sum_s (-1)^s (q-1)^(j-s) C(i,s) C(n-i,j-s)`.
fn krawtchouk(n: usize, q: i128, j: usize, i: usize) -> Result<i128> {
    let mut total: i128 = 0;
    for s in 0..=j.min(i) {
        let power = (q - 1)
            .checked_pow((j - s) as u32)
            .ok_or_else(overflow)?;
        let term = binomial(i, s)
            .zip(binomial(n - i, j - s))
            .and_then(|(a, b)| a.checked_mul(b))
            .and_then(|v| v.checked_mul(power))
            .ok_or_else(overflow)?;
        total = if s % 2 == 0 {
            total.checked_add(term)
        } else {
            total.checked_sub(term)
        }
        .ok_or_else(overflow)?;
    }
    Ok(total)
}

/// Enumerates every codeword spanned by the rows of `generator`.
///
/// Rows are assumed linearly independent; dependent rows make codewords
/// appear more than once.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the code has more than `limit`
/// codewords.
pub fn weight_distribution(generator: &FieldMatrix, limit: u64) -> Result<WeightEnumerator> {
    let q = generator.field().order();
    let k = generator.nrows();
    let n = generator.ncols();
    let size = u32::try_from(k)
        .ok()
        .and_then(|k| (q as u64).checked_pow(k))
        .filter(|&size| size <= limit)
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "{}^{} codewords exceed the enumeration limit {}",
                q, k, limit
            ))
        })?;

    tracing::debug!("enumerating {} codewords of a [{}, {}] code", size, n, k);

    let field = generator.field();
    let rows = generator.rows();
    let mut distribution = vec![0u128; n + 1];
    let mut message = vec![0u32; k];
    let mut codeword = vec![0u32; n];

    // Odometer over messages; each step adds or adjusts a few row multiples
    loop {
        let weight = codeword.iter().filter(|&&c| c != 0).count();
        distribution[weight] += 1;

        let mut position = 0;
        loop {
            if position == k {
                return WeightEnumerator::new(q, distribution);
            }
            let old = message[position];
            let new = if (old as usize) + 1 == q { 0 } else { old + 1 };
            message[position] = new;
            let delta = field.subtract(new, old);
            for (c, &g) in codeword.iter_mut().zip(&rows[position]) {
                *c = field.add(*c, field.multiply(delta, g));
            }
            if new != 0 {
                break;
            }
            position += 1;
        }
    }
}

/// Exact minimum distance by exhaustive enumeration.
pub fn minimum_distance(generator: &FieldMatrix, limit: u64) -> Result<Option<usize>> {
    Ok(weight_distribution(generator, limit)?.minimum_distance())
}
