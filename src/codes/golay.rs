//! Golay and repetition codes.
//!
//! The binary Golay code is the quadratic-residue cyclic code of length 23
//! over `GF(2)` with parameters `[23, 12, 7]`; the ternary one has length 11
//! over `GF(3)` and parameters `[11, 6, 5]`. Both are perfect. Their
//! extensions by an overall parity symbol are `[24, 12, 8]` and `[12, 6, 6]`.

use std::sync::Arc;

use crate::codes::{CodeType, CyclicCode, LinearCode};
use crate::error::{Error, Result};
use crate::galois::GaloisField;
use crate::matrix::FieldMatrix;

/// `(length, minimum distance, extended minimum distance)` per field size.
fn golay_parameters(q: usize) -> Result<(usize, usize, usize)> {
    match q {
        2 => Ok((23, 7, 8)),
        3 => Ok((11, 5, 6)),
        _ => Err(Error::InvalidParameter(format!(
            "Golay codes exist over GF(2) and GF(3) only, not GF({})",
            q
        ))),
    }
}

/// Creates the binary (`q = 2`) or ternary (`q = 3`) Golay code.
pub fn golay_code(q: usize) -> Result<LinearCode> {
    let (length, distance, _) = golay_parameters(q)?;
    let cyclic = CyclicCode::new(q, length, &[1])?;
    let mut code = cyclic.into_linear().with_family(CodeType::Golay);
    code.set_distance(distance)?;
    Ok(code)
}

/// Creates the extended binary or ternary Golay code.
pub fn extended_golay_code(q: usize) -> Result<LinearCode> {
    let (_, _, distance) = golay_parameters(q)?;
    let mut code = golay_code(q)?.extend()?.with_family(CodeType::Golay);
    code.set_distance(distance)?;
    Ok(code)
}

/// Creates the `[n, 1, n]` repetition code over `GF(q)`.
pub fn repetition_code(q: usize, n: usize) -> Result<LinearCode> {
    if n == 0 {
        return Err(Error::InvalidLength("repetition code of length 0".to_string()));
    }
    let field: Arc<GaloisField> = GaloisField::new(q)?;
    let generator = FieldMatrix::from_rows(field, &[vec![1; n]])?;
    let mut code = LinearCode::from_generator_matrix(&generator)?.with_family(CodeType::Repetition);
    code.set_distance(n)?;
    Ok(code)
}
