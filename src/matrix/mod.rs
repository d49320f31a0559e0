//! Matrices over a Galois field.
//!
//! [`FieldMatrix`] wraps an [`ndarray::Array2`] of element codes together with
//! the field they belong to. All arithmetic is exact. The reduction routines
//! here (row echelon form, rank, kernel) back the standard-form engine in
//! [`standard_form`].

use std::fmt;
use std::sync::Arc;

use ndarray::{concatenate, s, Array2, Axis};

use crate::error::{Error, Result};
use crate::galois::GaloisField;

pub mod standard_form;

pub use standard_form::{standard_form, StandardForm};

/// An immutable rectangular matrix over a Galois field.
#[derive(Clone, PartialEq, Eq)]
pub struct FieldMatrix {
    field: Arc<GaloisField>,
    data: Array2<u32>,
}

impl FieldMatrix {
    /// All-zero matrix.
    pub fn zeros(field: Arc<GaloisField>, rows: usize, cols: usize) -> Self {
        Self {
            field,
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Identity matrix of size `n`.
    pub fn identity(field: Arc<GaloisField>, n: usize) -> Self {
        Self {
            field,
            data: Array2::from_diag_elem(n, 1),
        }
    }

    /// Builds a matrix from rows of element codes.
    ///
    /// # Errors
    ///
    /// Fails if rows have different lengths or an entry is not a field element.
    pub fn from_rows(field: Arc<GaloisField>, rows: &[Vec<u32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), cols), flat)
            .map_err(|e| Error::InvalidParameter(e.to_string()))?;
        Self::from_array(field, data)
    }

    /// Wraps an existing array after checking every entry is a field element.
    pub fn from_array(field: Arc<GaloisField>, data: Array2<u32>) -> Result<Self> {
        if let Some(&bad) = data.iter().find(|&&v| !field.contains(v)) {
            return Err(Error::GaloisField(format!(
                "Element {} is not in GF({})",
                bad,
                field.order()
            )));
        }
        Ok(Self { field, data })
    }

    /// The field the entries belong to.
    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[[row, col]]
    }

    /// Row `i` as a vector.
    pub fn row(&self, i: usize) -> Vec<u32> {
        self.data.row(i).to_vec()
    }

    /// All rows as vectors.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.data.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Underlying array.
    pub fn as_array(&self) -> &Array2<u32> {
        &self.data
    }

    /// Returns true if every entry is zero (including empty matrices).
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    fn check_field(&self, other: &Self) -> Result<()> {
        if self.field != other.field {
            return Err(Error::FieldMismatch {
                left: self.field.order(),
                right: other.field.order(),
            });
        }
        Ok(())
    }

    fn with_data(&self, data: Array2<u32>) -> Self {
        Self {
            field: Arc::clone(&self.field),
            data,
        }
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        self.with_data(self.data.t().to_owned())
    }

    /// Entrywise additive inverse.
    pub fn negate(&self) -> Self {
        self.with_data(self.data.mapv(|v| self.field.negate(v)))
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        if self.ncols() != other.nrows() {
            return Err(Error::DimensionMismatch {
                expected: self.ncols(),
                actual: other.nrows(),
            });
        }

        let field = &self.field;
        let mut result = Array2::zeros((self.nrows(), other.ncols()));
        for i in 0..self.nrows() {
            for k in 0..self.ncols() {
                let a = self.data[[i, k]];
                if a == 0 {
                    continue;
                }
                for j in 0..other.ncols() {
                    let b = other.data[[k, j]];
                    if b != 0 {
                        result[[i, j]] = field.add(result[[i, j]], field.multiply(a, b));
                    }
                }
            }
        }
        Ok(self.with_data(result))
    }

    /// Row vector times matrix, `v * self`.
    pub fn left_mul_vector(&self, v: &[u32]) -> Result<Vec<u32>> {
        if v.len() != self.nrows() {
            return Err(Error::DimensionMismatch {
                expected: self.nrows(),
                actual: v.len(),
            });
        }
        let field = &self.field;
        let mut result = vec![0u32; self.ncols()];
        for (i, &a) in v.iter().enumerate().filter(|(_, a)| **a != 0) {
            for (j, out) in result.iter_mut().enumerate() {
                *out = field.add(*out, field.multiply(a, self.data[[i, j]]));
            }
        }
        Ok(result)
    }

    /// Matrix times column vector, `self * v`.
    pub fn mul_vector(&self, v: &[u32]) -> Result<Vec<u32>> {
        self.transpose().left_mul_vector(v)
    }

    /// Horizontal concatenation `[self | other]`.
    pub fn hcat(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let data = concatenate(Axis(1), &[self.data.view(), other.data.view()]).map_err(|_| {
            Error::DimensionMismatch {
                expected: self.nrows(),
                actual: other.nrows(),
            }
        })?;
        Ok(self.with_data(data))
    }

    /// Vertical concatenation of `self` above `other`.
    pub fn vcat(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let data = concatenate(Axis(0), &[self.data.view(), other.data.view()]).map_err(|_| {
            Error::DimensionMismatch {
                expected: self.ncols(),
                actual: other.ncols(),
            }
        })?;
        Ok(self.with_data(data))
    }

    /// Block-diagonal matrix `[[self, 0], [0, other]]`.
    pub fn block_diag(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let mut data = Array2::zeros((self.nrows() + other.nrows(), self.ncols() + other.ncols()));
        data.slice_mut(s![..self.nrows(), ..self.ncols()])
            .assign(&self.data);
        data.slice_mut(s![self.nrows().., self.ncols()..])
            .assign(&other.data);
        Ok(self.with_data(data))
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let (r2, c2) = (other.nrows(), other.ncols());
        let mut data = Array2::zeros((self.nrows() * r2, self.ncols() * c2));
        for ((i, j), &a) in self.data.indexed_iter() {
            if a == 0 {
                continue;
            }
            let block = other.data.mapv(|b| self.field.multiply(a, b));
            data.slice_mut(s![i * r2..(i + 1) * r2, j * c2..(j + 1) * c2])
                .assign(&block);
        }
        Ok(self.with_data(data))
    }

    fn check_indices(indices: &[usize], bound: usize) -> Result<()> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= bound) {
            return Err(Error::InvalidParameter(format!(
                "index {} out of range for {} entries",
                bad, bound
            )));
        }
        Ok(())
    }

    /// Keeps the listed columns, in the listed order.
    pub fn select_columns(&self, columns: &[usize]) -> Result<Self> {
        Self::check_indices(columns, self.ncols())?;
        Ok(self.with_data(self.data.select(Axis(1), columns)))
    }

    /// Keeps the listed rows, in the listed order.
    pub fn select_rows(&self, rows: &[usize]) -> Result<Self> {
        Self::check_indices(rows, self.nrows())?;
        Ok(self.with_data(self.data.select(Axis(0), rows)))
    }

    /// Deletes the listed columns.
    pub fn remove_columns(&self, columns: &[usize]) -> Result<Self> {
        Self::check_indices(columns, self.ncols())?;
        let keep: Vec<usize> = (0..self.ncols()).filter(|j| !columns.contains(j)).collect();
        self.select_columns(&keep)
    }

    /// Deletes the listed rows.
    pub fn remove_rows(&self, rows: &[usize]) -> Result<Self> {
        Self::check_indices(rows, self.nrows())?;
        let keep: Vec<usize> = (0..self.nrows()).filter(|i| !rows.contains(i)).collect();
        self.select_rows(&keep)
    }

    /// Column `j` of the result is column `permutation[j]` of `self`.
    pub fn permute_columns(&self, permutation: &[usize]) -> Result<Self> {
        check_permutation(permutation, self.ncols())?;
        self.select_columns(permutation)
    }

    /// Undoes [`permute_columns`](Self::permute_columns): column
    /// `permutation[j]` of the result is column `j` of `self`.
    pub fn unpermute_columns(&self, permutation: &[usize]) -> Result<Self> {
        check_permutation(permutation, self.ncols())?;
        let mut inverse = vec![0usize; permutation.len()];
        for (j, &p) in permutation.iter().enumerate() {
            inverse[p] = j;
        }
        self.select_columns(&inverse)
    }

    /// Removes all-zero rows.
    pub fn drop_zero_rows(&self) -> Self {
        let keep: Vec<usize> = (0..self.nrows())
            .filter(|&i| self.data.row(i).iter().any(|&v| v != 0))
            .collect();
        self.with_data(self.data.select(Axis(0), &keep))
    }

    /// Number of non-zero entries in each row.
    pub fn row_weights(&self) -> Vec<usize> {
        self.data
            .rows()
            .into_iter()
            .map(|r| r.iter().filter(|&&v| v != 0).count())
            .collect()
    }

    /// Smallest non-zero row weight, if any row is non-zero.
    pub fn min_row_weight(&self) -> Option<usize> {
        self.row_weights().into_iter().filter(|&w| w > 0).min()
    }

    /// Reduced row echelon form and its pivot columns.
    ///
    /// Pivots are chosen left to right, so each pivot is the lowest column
    /// index holding a non-zero entry below the rows already reduced. Only row
    /// swaps, row scaling and row additions are used.
    pub fn rref(&self) -> Result<(Self, Vec<usize>)> {
        let field = &self.field;
        let mut a = self.data.clone();
        let (rows, cols) = a.dim();
        let mut pivots = Vec::new();
        let mut r = 0;

        for c in 0..cols {
            if r == rows {
                break;
            }
            let Some(p) = (r..rows).find(|&i| a[[i, c]] != 0) else {
                continue;
            };
            if p != r {
                for j in 0..cols {
                    a.swap([p, j], [r, j]);
                }
            }

            let inv = field.inverse(a[[r, c]])?;
            for j in c..cols {
                a[[r, j]] = field.multiply(a[[r, j]], inv);
            }

            for i in 0..rows {
                let factor = a[[i, c]];
                if i == r || factor == 0 {
                    continue;
                }
                for j in c..cols {
                    let v = field.multiply(factor, a[[r, j]]);
                    a[[i, j]] = field.subtract(a[[i, j]], v);
                }
            }

            pivots.push(c);
            r += 1;
        }

        Ok((self.with_data(a), pivots))
    }

    /// Row rank.
    pub fn rank(&self) -> Result<usize> {
        Ok(self.rref()?.1.len())
    }

    /// Basis of the right null space `{x : self * x = 0}`, one vector per row.
    ///
    /// The result has `ncols - rank` rows; it is empty when `self` has full
    /// column rank.
    pub fn kernel(&self) -> Result<Self> {
        let (reduced, pivots) = self.rref()?;
        let cols = self.ncols();
        let free: Vec<usize> = (0..cols).filter(|c| !pivots.contains(c)).collect();

        let mut basis = Array2::zeros((free.len(), cols));
        for (k, &f) in free.iter().enumerate() {
            basis[[k, f]] = 1;
            for (i, &p) in pivots.iter().enumerate() {
                basis[[k, p]] = self.field.negate(reduced.data[[i, f]]);
            }
        }
        Ok(self.with_data(basis))
    }
}

/// Checks that `permutation` is a permutation of `0..n`.
pub(crate) fn check_permutation(permutation: &[usize], n: usize) -> Result<()> {
    if permutation.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            actual: permutation.len(),
        });
    }
    let mut seen = vec![false; n];
    for &p in permutation {
        if p >= n || std::mem::replace(&mut seen[p], true) {
            return Err(Error::InvalidParameter(format!(
                "{:?} is not a permutation of 0..{}",
                permutation, n
            )));
        }
    }
    Ok(())
}

impl fmt::Debug for FieldMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "FieldMatrix {}x{} over GF({})",
            self.nrows(),
            self.ncols(),
            self.field.order()
        )?;
        for row in self.data.rows() {
            writeln!(f, "  {:?}", row.to_vec())?;
        }
        Ok(())
    }
}
