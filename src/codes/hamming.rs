//! Hamming and simplex codes over any finite field.
//!
//! The parity-check matrix of the `q`-ary Hamming code of redundancy `r`
//! lists one representative of every one-dimensional subspace of `GF(q)^r`
//! as a column, giving an `[(q^r - 1)/(q - 1), n - r, 3]` code. The simplex
//! code is its dual; every non-zero simplex codeword has weight `q^(r-1)`.

use crate::codes::{CodeType, LinearCode};
use crate::error::{Error, Result};
use crate::galois::GaloisField;
use crate::matrix::FieldMatrix;

/// Creates the `q`-ary Hamming code with `r` parity symbols.
///
/// # Arguments
///
/// * `q` - Field size, a prime power
/// * `r` - Number of parity symbols, at least 2
///
/// # Returns
///
/// The `[(q^r - 1)/(q - 1), n - r, 3]` Hamming code.
pub fn hamming_code(q: usize, r: usize) -> Result<LinearCode> {
    let parity_check = projective_columns(q, r)?;
    let mut code = LinearCode::from_parity_check_matrix(&parity_check)?.with_family(CodeType::Hamming);
    code.set_distance(3)?;
    tracing::debug!(
        "Hamming code [{}, {}, 3] over GF({})",
        code.length(),
        code.dimension(),
        q
    );
    Ok(code)
}

/// Creates the `q`-ary simplex code of dimension `r`.
pub fn simplex_code(q: usize, r: usize) -> Result<LinearCode> {
    let generator = projective_columns(q, r)?;
    let mut code = LinearCode::from_generator_matrix(&generator)?.with_family(CodeType::Simplex);
    let weight = q.pow(r as u32 - 1);
    code.set_distance(weight)?;
    Ok(code)
}

/// `r x n` matrix whose columns are the non-zero vectors of `GF(q)^r` with
/// last non-zero entry 1, in increasing radix-`q` order.
fn projective_columns(q: usize, r: usize) -> Result<FieldMatrix> {
    let field = GaloisField::new(q)?;
    if r < 2 {
        return Err(Error::InvalidParameter(format!(
            "redundancy {} is below 2",
            r
        )));
    }
    let size = u32::try_from(r)
        .ok()
        .and_then(|r| q.checked_pow(r))
        .ok_or_else(|| Error::InvalidLength(format!("{}^{} overflows", q, r)))?;

    let mut rows = vec![Vec::with_capacity((size - 1) / (q - 1)); r];
    for value in 1..size {
        let digits: Vec<u32> = (0..r)
            .scan(value, |rest, _| {
                let digit = (*rest % q) as u32;
                *rest /= q;
                Some(digit)
            })
            .collect();
        if digits.iter().rev().find(|&&d| d != 0) != Some(&1) {
            continue;
        }
        for (row, digit) in rows.iter_mut().zip(&digits) {
            row.push(*digit);
        }
    }
    FieldMatrix::from_rows(field, &rows)
}
