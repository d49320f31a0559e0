//! Block constructions combining several codes.
//!
//! Each construction checks its field, length, containment and dimension
//! preconditions before building anything, and fails with
//! [`Error::ConstructionPrecondition`] when one is violated.

use std::sync::Arc;

use crate::algebra::{check_same_field, check_same_space, narrow};
use crate::codes::LinearCode;
use crate::error::{Error, Result};
use crate::matrix::FieldMatrix;

/// Construction X.
///
/// Given `c1 ⊊ c2` of length `n` and an auxiliary code `c3` with
/// `dim(c3) = dim(c2) - dim(c1)`, the codewords of `c1` are padded with zeros
/// and the remaining generators of `c2` are padded with the generators of
/// `c3`. The result is `[n + n3, dim(c2), >= min(d1, d2 + d3)]`.
pub fn construction_x(c1: &LinearCode, c2: &LinearCode, c3: &LinearCode) -> Result<LinearCode> {
    check_field(c1, c2)?;
    check_field(c1, c3)?;
    check_proper_subcode(c1, c2)?;
    check_auxiliary_dimension(c3, c2.dimension() - c1.dimension())?;

    let field = Arc::clone(c1.field());
    let n3 = c3.length();
    let extra = complement_rows(c1, c2)?;

    let top = extra.hcat(c3.generator_matrix())?;
    let bottom = c1
        .generator_matrix()
        .hcat(&FieldMatrix::zeros(field, c1.dimension(), n3))?;
    let mut code = LinearCode::from_generator_matrix(&top.vcat(&bottom)?)?;
    narrow(
        &mut code,
        c1.lower_bound().min(c2.lower_bound() + c3.lower_bound()),
        c1.upper_bound(),
    )?;
    tracing::debug!(
        "construction X: [{}, {}] from {} ⊂ {} and auxiliary [{}, {}]",
        code.length(),
        code.dimension(),
        c1.dimension(),
        c2.dimension(),
        n3,
        c3.dimension()
    );
    Ok(code)
}

/// Construction X3.
///
/// Given a chain `c1 ⊊ c2 ⊊ c3` of length `n` and auxiliary codes `a1`, `a2`
/// with `dim(a1) = dim(c2) - dim(c1)` and `dim(a2) = dim(c3) - dim(c2)`, the
/// generators of `c3` beyond `c2` are padded with `(0 | a2)`, those of `c2`
/// beyond `c1` with `(a1 | 0)`, and those of `c1` with zeros. The result is
/// `[n + n_a1 + n_a2, dim(c3), >= min(d1, d2 + e1, d3 + e2)]`.
pub fn construction_x3(
    c1: &LinearCode,
    c2: &LinearCode,
    c3: &LinearCode,
    a1: &LinearCode,
    a2: &LinearCode,
) -> Result<LinearCode> {
    for other in [c2, c3, a1, a2] {
        check_field(c1, other)?;
    }
    check_proper_subcode(c1, c2)?;
    check_proper_subcode(c2, c3)?;
    check_auxiliary_dimension(a1, c2.dimension() - c1.dimension())?;
    check_auxiliary_dimension(a2, c3.dimension() - c2.dimension())?;

    let field = Arc::clone(c1.field());
    let (m1, m2) = (a1.length(), a2.length());
    let zeros = |rows: usize, cols: usize| FieldMatrix::zeros(Arc::clone(&field), rows, cols);

    let top = complement_rows(c2, c3)?;
    let middle = complement_rows(c1, c2)?;
    let top = top
        .hcat(&zeros(top.nrows(), m1))?
        .hcat(a2.generator_matrix())?;
    let middle = middle
        .hcat(a1.generator_matrix())?
        .hcat(&zeros(middle.nrows(), m2))?;
    let bottom = c1
        .generator_matrix()
        .hcat(&zeros(c1.dimension(), m1 + m2))?;

    let mut code = LinearCode::from_generator_matrix(&top.vcat(&middle)?.vcat(&bottom)?)?;
    let lower = c1
        .lower_bound()
        .min(c2.lower_bound() + a1.lower_bound())
        .min(c3.lower_bound() + a2.lower_bound());
    narrow(&mut code, lower, c1.upper_bound())?;
    tracing::debug!(
        "construction X3: [{}, {}] with lower bound {}",
        code.length(),
        code.dimension(),
        code.lower_bound()
    );
    Ok(code)
}

/// The Plotkin sum `{(u | u + v) : u in U, v in V}`.
///
/// Its minimum distance is exactly `min(2 d(U), d(V))`.
pub fn plotkin(u: &LinearCode, v: &LinearCode) -> Result<LinearCode> {
    check_space(u, v)?;
    let field = Arc::clone(u.field());
    let n = u.length();

    let gu = u.generator_matrix();
    let gv = v.generator_matrix();
    let top = gu.hcat(gu)?;
    let bottom = FieldMatrix::zeros(field, v.dimension(), n).hcat(gv)?;
    let mut code = LinearCode::from_generator_matrix(&top.vcat(&bottom)?)?;
    narrow(
        &mut code,
        (2 * u.lower_bound()).min(v.lower_bound()),
        (2 * u.upper_bound()).min(v.upper_bound()),
    )?;
    Ok(code)
}

/// The construction `{(u + w | v + w | u + v + w) : u in U, v in V, w in W}`.
///
/// The dimension is `dim(U) + dim(V) + dim(W)`. Since
/// `(u + w) + (v + w) - (u + v + w) = w` coordinatewise, the distance is at
/// least `min(2 d(U), 2 d(V), d(W))`.
pub fn construction_uvw(u: &LinearCode, v: &LinearCode, w: &LinearCode) -> Result<LinearCode> {
    check_space(u, v)?;
    check_space(u, w)?;
    let field = Arc::clone(u.field());
    let n = u.length();
    let zeros = |rows: usize| FieldMatrix::zeros(Arc::clone(&field), rows, n);

    let gu = u.generator_matrix();
    let gv = v.generator_matrix();
    let gw = w.generator_matrix();
    let u_rows = gu.hcat(&zeros(u.dimension()))?.hcat(gu)?;
    let v_rows = zeros(v.dimension()).hcat(gv)?.hcat(gv)?;
    let w_rows = gw.hcat(gw)?.hcat(gw)?;

    let mut code = LinearCode::from_generator_matrix(&u_rows.vcat(&v_rows)?.vcat(&w_rows)?)?;
    if code.dimension() != u.dimension() + v.dimension() + w.dimension() {
        return Err(Error::internal(format!(
            "(u + w | v + w | u + v + w) has dimension {}, expected {}",
            code.dimension(),
            u.dimension() + v.dimension() + w.dimension()
        )));
    }
    let lower = (2 * u.lower_bound().min(v.lower_bound())).min(w.lower_bound());
    let upper = (2 * u.upper_bound())
        .min(2 * v.upper_bound())
        .min(3 * w.upper_bound());
    narrow(&mut code, lower, upper)?;
    Ok(code)
}

/// Generators of `larger` completing a basis of `smaller`, as a matrix with
/// `dim(larger) - dim(smaller)` rows.
fn complement_rows(smaller: &LinearCode, larger: &LinearCode) -> Result<FieldMatrix> {
    let mut basis = smaller.generator_matrix().clone();
    let mut extra: Vec<Vec<u32>> = Vec::new();
    for row in larger.generator_matrix().rows() {
        let candidate = basis.vcat(&FieldMatrix::from_rows(
            Arc::clone(larger.field()),
            &[row.clone()],
        )?)?;
        if candidate.rank()? > basis.nrows() {
            basis = candidate;
            extra.push(row);
        }
    }
    let expected = larger.dimension() - smaller.dimension();
    if extra.len() != expected {
        return Err(Error::internal(format!(
            "found {} complementary generators, expected {}",
            extra.len(),
            expected
        )));
    }
    FieldMatrix::from_rows(Arc::clone(larger.field()), &extra)
}

fn check_field(a: &LinearCode, b: &LinearCode) -> Result<()> {
    check_same_field(a, b).map_err(|_| {
        Error::precondition(format!(
            "codes over GF({}) and GF({}) cannot be combined",
            a.field().order(),
            b.field().order()
        ))
    })
}

fn check_space(a: &LinearCode, b: &LinearCode) -> Result<()> {
    check_field(a, b)?;
    check_same_space(a, b)
}

fn check_proper_subcode(smaller: &LinearCode, larger: &LinearCode) -> Result<()> {
    check_same_space(smaller, larger)?;
    if !smaller.is_subcode_of(larger) {
        return Err(Error::precondition(format!(
            "[{}, {}] code is not a subcode of [{}, {}] code",
            smaller.length(),
            smaller.dimension(),
            larger.length(),
            larger.dimension()
        )));
    }
    if smaller.dimension() == larger.dimension() {
        return Err(Error::precondition(format!(
            "subcode of dimension {} is not proper",
            smaller.dimension()
        )));
    }
    Ok(())
}

fn check_auxiliary_dimension(auxiliary: &LinearCode, expected: usize) -> Result<()> {
    if auxiliary.dimension() != expected {
        return Err(Error::precondition(format!(
            "auxiliary code has dimension {}, the subcode chain needs {}",
            auxiliary.dimension(),
            expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Distance;
    use crate::codes::{hamming_code, reed_muller_code, repetition_code, CyclicCode};
    use crate::config::Config;
    use crate::galois::GaloisField;

    #[test]
    fn test_construction_x_bch() {
        // BCH [15, 7, 5] ⊂ Hamming [15, 11, 3], auxiliary [4, 4, 1] full space
        let c1 = CyclicCode::bch(2, 15, 5, 1).unwrap().into_linear();
        let c2 = CyclicCode::bch(2, 15, 3, 1).unwrap().into_linear();
        let c3 = LinearCode::full_space(GaloisField::new(2).unwrap(), 4).unwrap();
        let code = construction_x(&c1, &c2, &c3).unwrap();
        assert_eq!(code.length(), 19);
        assert_eq!(code.dimension(), 11);
        assert!(code.lower_bound() >= 4);
        assert!(c1.is_subcode_of(&c2));
    }

    #[test]
    fn test_construction_x_requires_proper_subcode() {
        let c1 = hamming_code(2, 3).unwrap();
        let c2 = repetition_code(2, 7).unwrap();
        let c3 = repetition_code(2, 3).unwrap();
        assert!(matches!(
            construction_x(&c1, &c2, &c3),
            Err(Error::ConstructionPrecondition(_))
        ));
        // Equal codes are not a proper chain
        assert!(matches!(
            construction_x(&c1, &c1, &c3),
            Err(Error::ConstructionPrecondition(_))
        ));
    }

    #[test]
    fn test_construction_x_dimension_mismatch() {
        let c1 = repetition_code(2, 7).unwrap();
        let c2 = hamming_code(2, 3).unwrap();
        let c3 = repetition_code(2, 3).unwrap();
        assert!(matches!(
            construction_x(&c1, &c2, &c3),
            Err(Error::ConstructionPrecondition(_))
        ));
        let ternary = repetition_code(3, 3).unwrap();
        assert!(matches!(
            construction_x(&c1, &c2, &ternary),
            Err(Error::ConstructionPrecondition(_))
        ));
    }

    #[test]
    fn test_construction_x3() {
        // [15, 5, 7] ⊂ [15, 7, 5] ⊂ [15, 11, 3]
        let c1 = CyclicCode::bch(2, 15, 7, 1).unwrap().into_linear();
        let c2 = CyclicCode::bch(2, 15, 5, 1).unwrap().into_linear();
        let c3 = CyclicCode::bch(2, 15, 3, 1).unwrap().into_linear();
        let a1 = LinearCode::full_space(GaloisField::new(2).unwrap(), 2).unwrap();
        let a2 = LinearCode::full_space(GaloisField::new(2).unwrap(), 4).unwrap();
        let code = construction_x3(&c1, &c2, &c3, &a1, &a2).unwrap();
        assert_eq!(code.length(), 21);
        assert_eq!(code.dimension(), 11);
        // min(7, 5 + 1, 3 + 1)
        assert!(code.lower_bound() >= 4);
        assert!(matches!(
            construction_x3(&c1, &c2, &c3, &a2, &a1),
            Err(Error::ConstructionPrecondition(_))
        ));
    }

    #[test]
    fn test_plotkin_builds_reed_muller() {
        // RM(1, 3) = (RM(1, 2) | RM(1, 2) + RM(0, 2))
        let u = reed_muller_code(1, 2).unwrap();
        let v = reed_muller_code(0, 2).unwrap();
        let mut code = plotkin(&u, &v).unwrap();
        assert_eq!(code.length(), 8);
        assert_eq!(code.dimension(), 4);
        assert_eq!(code.distance(), Distance::Known(4));
        let mut rm = reed_muller_code(1, 3).unwrap();
        assert_eq!(
            code.compute_weight_enumerator(&Config::default()).unwrap(),
            rm.compute_weight_enumerator(&Config::default()).unwrap()
        );
    }

    #[test]
    fn test_plotkin_length_mismatch() {
        let u = repetition_code(2, 3).unwrap();
        let v = repetition_code(2, 4).unwrap();
        assert!(matches!(plotkin(&u, &v), Err(Error::ConstructionPrecondition(_))));
    }

    #[test]
    fn test_construction_uvw() {
        let u = repetition_code(2, 4).unwrap();
        let v = reed_muller_code(1, 2).unwrap();
        let w = reed_muller_code(1, 2).unwrap().even_subcode().unwrap();
        let code = construction_uvw(&u, &v, &w).unwrap();
        assert_eq!(code.length(), 12);
        assert_eq!(code.dimension(), u.dimension() + v.dimension() + w.dimension());
        assert!(code.lower_bound() >= 2);
    }
}
