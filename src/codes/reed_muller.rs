//! Binary Reed-Muller codes.
//!
//! `RM(r, m)` is spanned by the evaluations of all monomials of degree at
//! most `r` in `m` binary variables over the points of `GF(2)^m`. It has
//! length `2^m`, dimension `sum_{i <= r} C(m, i)` and minimum distance
//! `2^(m - r)`.

use itertools::Itertools;

use crate::codes::{CodeType, LinearCode};
use crate::error::{Error, Result};
use crate::galois::GaloisField;
use crate::matrix::FieldMatrix;

/// Largest number of variables accepted, keeping the length within `2^24`.
const MAX_VARIABLES: usize = 24;

/// Creates the binary Reed-Muller code `RM(r, m)`.
///
/// # Arguments
///
/// * `order` - Maximum monomial degree `r`, at most `m`
/// * `variables` - Number of variables `m`, at least 1
pub fn reed_muller_code(order: usize, variables: usize) -> Result<LinearCode> {
    if variables == 0 || variables > MAX_VARIABLES {
        return Err(Error::InvalidParameter(format!(
            "number of variables must be in 1..={}, got {}",
            MAX_VARIABLES, variables
        )));
    }
    if order > variables {
        return Err(Error::InvalidParameter(format!(
            "order {} exceeds the number of variables {}",
            order, variables
        )));
    }

    let length = 1usize << variables;
    let rows: Vec<Vec<u32>> = (0..=order)
        .flat_map(|degree| (0..variables).combinations(degree))
        .map(|monomial| {
            (0..length)
                .map(|point| monomial.iter().all(|&v| (point >> v) & 1 == 1) as u32)
                .collect()
        })
        .collect();

    let generator = FieldMatrix::from_rows(GaloisField::new(2)?, &rows)?;
    let mut code = LinearCode::from_generator_matrix(&generator)?.with_family(CodeType::ReedMuller);
    code.set_distance(1 << (variables - order))?;
    tracing::debug!(
        "RM({}, {}) = [{}, {}, {}]",
        order,
        variables,
        length,
        code.dimension(),
        1usize << (variables - order)
    );
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Distance;
    use crate::codes::Code;
    use crate::config::Config;

    #[test]
    fn test_first_order() {
        let code = reed_muller_code(1, 3).unwrap();
        assert_eq!(code.length(), 8);
        assert_eq!(code.dimension(), 4);
        assert_eq!(code.distance(), Distance::Known(4));
        assert_eq!(code.code_type(), CodeType::ReedMuller);
        assert!(code.is_self_dual().unwrap());
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(reed_muller_code(0, 4).unwrap().dimension(), 1);
        assert_eq!(reed_muller_code(2, 4).unwrap().dimension(), 11);
        assert_eq!(reed_muller_code(2, 5).unwrap().dimension(), 16);
        let full = reed_muller_code(3, 3).unwrap();
        assert_eq!(full.dimension(), 8);
        assert_eq!(full.distance(), Distance::Known(1));
    }

    #[test]
    fn test_rm_duality() {
        // RM(r, m)^⊥ = RM(m - r - 1, m)
        let code = reed_muller_code(1, 4).unwrap();
        let dual = reed_muller_code(2, 4).unwrap();
        assert!(code.dual().unwrap().same_code(&dual));
    }

    #[test]
    fn test_first_order_weights() {
        let mut code = reed_muller_code(1, 3).unwrap();
        let enumerator = code.compute_weight_enumerator(&Config::default()).unwrap();
        assert_eq!(enumerator.distribution(), &[1, 0, 0, 0, 14, 0, 0, 0, 1]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(reed_muller_code(1, 0).is_err());
        assert!(reed_muller_code(4, 3).is_err());
    }
}
