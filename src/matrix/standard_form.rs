//! Reduction of a generator matrix to standard (systematic) form.
//!
//! The standard form of a `k x n` generator matrix of rank `r` is an `r x n`
//! matrix `[I_r | A]` spanning the same code up to a column permutation,
//! together with the matching parity-check matrix `[-A^T | I_{n-r}]`.

use crate::error::{Error, Result};
use crate::matrix::FieldMatrix;

/// Result of [`standard_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardForm {
    /// `[I_r | A]`, in permuted column order.
    pub generator: FieldMatrix,
    /// `[-A^T | I_{n-r}]`, in permuted column order.
    pub parity_check: FieldMatrix,
    /// Column `j` of the standard form is column `permutation[j]` of the
    /// input. `None` when no columns moved.
    pub permutation: Option<Vec<usize>>,
    /// Row rank of the input.
    pub rank: usize,
}

impl StandardForm {
    /// The permutation as a full vector, identity when none was needed.
    pub fn permutation_or_identity(&self) -> Vec<usize> {
        self.permutation
            .clone()
            .unwrap_or_else(|| (0..self.generator.ncols()).collect())
    }

    /// The standard parity-check matrix with columns moved back to the
    /// input's order; it annihilates the input matrix.
    pub fn parity_check_in_input_order(&self) -> Result<FieldMatrix> {
        match &self.permutation {
            Some(p) => self.parity_check.unpermute_columns(p),
            None => Ok(self.parity_check.clone()),
        }
    }

    /// The standard generator matrix with columns moved back to the input's order.
    pub fn generator_in_input_order(&self) -> Result<FieldMatrix> {
        match &self.permutation {
            Some(p) => self.generator.unpermute_columns(p),
            None => Ok(self.generator.clone()),
        }
    }
}

/// Reduces `matrix` to standard form.
///
/// Row reduction picks each pivot at the lowest column index available, so
/// the result is deterministic. Pivot columns are then moved to the front in
/// order, followed by the remaining columns in their original order.
///
/// # Errors
///
/// Returns [`Error::ZeroMatrix`] when `matrix` has no non-zero entry.
pub fn standard_form(matrix: &FieldMatrix) -> Result<StandardForm> {
    if matrix.is_zero() {
        return Err(Error::ZeroMatrix);
    }

    let (reduced, pivots) = matrix.rref()?;
    let rank = pivots.len();
    let n = matrix.ncols();
    let field = matrix.field();

    let mut permutation = pivots.clone();
    permutation.extend((0..n).filter(|c| !pivots.contains(c)));

    let rows: Vec<usize> = (0..rank).collect();
    let generator = reduced.select_rows(&rows)?.select_columns(&permutation)?;

    let redundancy: Vec<usize> = (rank..n).collect();
    let a = generator.select_columns(&redundancy)?;
    let parity_check = a
        .transpose()
        .negate()
        .hcat(&FieldMatrix::identity(std::sync::Arc::clone(field), n - rank))?;

    if rank < matrix.nrows() {
        tracing::trace!(
            "standard form dropped {} dependent rows ({}x{} -> rank {})",
            matrix.nrows() - rank,
            matrix.nrows(),
            n,
            rank
        );
    }

    let identity = permutation.iter().enumerate().all(|(j, &p)| j == p);
    Ok(StandardForm {
        generator,
        parity_check,
        permutation: (!identity).then_some(permutation),
        rank,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::galois::GaloisField;

    fn matrix(order: usize, rows: &[&[u32]]) -> FieldMatrix {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        FieldMatrix::from_rows(GaloisField::new(order).unwrap(), &rows).unwrap()
    }

    #[test]
    fn test_hamming_standard_form() {
        // Cyclic [7,4] Hamming generator, shifts of 1 + x + x^3
        let g = matrix(
            2,
            &[
                &[1, 1, 0, 1, 0, 0, 0],
                &[0, 1, 1, 0, 1, 0, 0],
                &[0, 0, 1, 1, 0, 1, 0],
                &[0, 0, 0, 1, 1, 0, 1],
            ],
        );
        let sf = standard_form(&g).unwrap();
        assert_eq!(sf.rank, 4);
        assert!(sf.permutation.is_none());
        assert_eq!(sf.parity_check.nrows(), 3);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(sf.generator.get(i, j), u32::from(i == j));
            }
        }
        assert!(sf.generator.mul(&sf.parity_check.transpose()).unwrap().is_zero());
    }

    #[test]
    fn test_permutation_tracking() {
        let g = matrix(3, &[&[0, 1, 2, 0], &[0, 0, 0, 1]]);
        let sf = standard_form(&g).unwrap();
        assert_eq!(sf.rank, 2);
        assert_eq!(sf.permutation, Some(vec![1, 3, 0, 2]));
        assert_eq!(sf.generator, matrix(3, &[&[1, 0, 0, 2], &[0, 1, 0, 0]]));

        let h = sf.parity_check_in_input_order().unwrap();
        assert!(g.mul(&h.transpose()).unwrap().is_zero());
        assert_eq!(h.nrows(), 2);
    }

    #[test]
    fn test_rank_deficient_input() {
        let g = matrix(5, &[&[1, 2, 3], &[2, 4, 1]]);
        let sf = standard_form(&g).unwrap();
        assert_eq!(sf.rank, 1);
        assert_eq!(sf.generator.nrows(), 1);
        assert_eq!(sf.parity_check.nrows(), 2);
        assert!(g.mul(&sf.parity_check_in_input_order().unwrap().transpose()).unwrap().is_zero());
    }

    #[test]
    fn test_idempotent() {
        let g = matrix(7, &[&[3, 1, 4, 1, 5], &[2, 6, 5, 3, 5], &[0, 0, 1, 2, 3]]);
        let first = standard_form(&g).unwrap();
        let second = standard_form(&first.generator).unwrap();
        assert!(second.permutation.is_none());
        assert_eq!(second.generator, first.generator);
        assert_eq!(second.parity_check, first.parity_check);
    }

    #[test]
    fn test_full_space() {
        let f = GaloisField::new(4).unwrap();
        let sf = standard_form(&FieldMatrix::identity(Arc::clone(&f), 3)).unwrap();
        assert_eq!(sf.rank, 3);
        assert_eq!(sf.parity_check.nrows(), 0);
        assert_eq!(sf.parity_check.ncols(), 3);
    }

    #[test]
    fn test_zero_matrix_rejected() {
        let f = GaloisField::new(2).unwrap();
        assert!(matches!(
            standard_form(&FieldMatrix::zeros(f, 2, 4)),
            Err(Error::ZeroMatrix)
        ));
    }
}
