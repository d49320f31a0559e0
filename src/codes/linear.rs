//! Generic linear codes.
//!
//! A [`LinearCode`] is built once from a generator or parity-check matrix and
//! is immutable afterwards apart from narrowing its distance bounds. Derived
//! codes are produced by the operators in [`crate::algebra`].

use std::sync::Arc;

use crate::bounds::{singleton_bound, Distance, DistanceBounds};
use crate::codes::CodeType;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::galois::GaloisField;
use crate::matrix::{standard_form, FieldMatrix};
use crate::weight::{weight_distribution, WeightEnumerator};

/// A linear code over a Galois field.
#[derive(Debug, Clone)]
pub struct LinearCode {
    /// Base field
    field: Arc<GaloisField>,
    /// Code length n
    length: usize,
    /// Dimension k
    dimension: usize,
    /// Bounds on the minimum distance
    bounds: DistanceBounds,
    /// Full-rank generator matrix, k x n
    generator_matrix: FieldMatrix,
    /// Full-rank parity-check matrix, (n - k) x n
    parity_check_matrix: FieldMatrix,
    /// `[I | A]` in permuted column order
    standard_generator_matrix: FieldMatrix,
    /// `[-A^T | I]` in permuted column order
    standard_parity_check_matrix: FieldMatrix,
    /// Column permutation of the standard forms, `None` for the identity
    permutation: Option<Vec<usize>>,
    /// Generator matrix as supplied, when it had to be reduced
    original_generator_matrix: Option<FieldMatrix>,
    /// Parity-check matrix as supplied, when it had to be reduced
    original_parity_check_matrix: Option<FieldMatrix>,
    /// Weight distribution, once computed or supplied
    weight_enumerator: Option<WeightEnumerator>,
    /// Family tag reported through [`Code::code_type`](crate::codes::Code::code_type)
    family: CodeType,
}

impl LinearCode {
    /// Builds a code from a generator matrix, or from a parity-check matrix
    /// when `is_parity_check` is set.
    pub fn new(matrix: &FieldMatrix, is_parity_check: bool) -> Result<Self> {
        if is_parity_check {
            Self::from_parity_check_matrix(matrix)
        } else {
            Self::from_generator_matrix(matrix)
        }
    }

    /// Builds the code spanned by the rows of `generator`.
    ///
    /// Zero rows are dropped and dependent rows reduced away; the matrix as
    /// supplied is then kept as the original generator matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroMatrix`] if `generator` has no non-zero entry and
    /// [`Error::InvalidLength`] if it has no columns.
    pub fn from_generator_matrix(generator: &FieldMatrix) -> Result<Self> {
        if generator.ncols() == 0 {
            return Err(Error::InvalidLength("a code needs at least one coordinate".to_string()));
        }
        if generator.is_zero() {
            return Err(Error::ZeroMatrix);
        }

        let nonzero = generator.drop_zero_rows();
        let sf = standard_form(&nonzero)?;
        let reduced = sf.rank < generator.nrows();

        let generator_matrix = if sf.rank < nonzero.nrows() {
            sf.generator_in_input_order()?
        } else {
            nonzero
        };
        let parity_check_matrix = match sf.permutation {
            None => generator_matrix.kernel()?,
            Some(_) => sf.parity_check_in_input_order()?,
        };

        let mut code = Self::assemble(generator_matrix, parity_check_matrix, sf)?;
        if reduced {
            tracing::debug!(
                "generator matrix with {} rows reduced to rank {}",
                generator.nrows(),
                code.dimension
            );
            code.original_generator_matrix = Some(generator.clone());
        }
        Ok(code)
    }

    /// Builds the code whose parity-check matrix is `parity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroMatrix`] for a zero matrix and
    /// [`Error::ConstructionPrecondition`] when `parity_check` has full column
    /// rank, since only the zero word would remain.
    pub fn from_parity_check_matrix(parity_check: &FieldMatrix) -> Result<Self> {
        let mut code = Self::from_generator_matrix(parity_check)?.dual()?;
        if code.original_parity_check_matrix.is_none() && code.parity_check_matrix != *parity_check {
            code.original_parity_check_matrix = Some(parity_check.clone());
        }
        Ok(code)
    }

    /// Builds a code from a full-rank generator matrix and a matching
    /// full-rank parity-check matrix, verifying that they are orthogonal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] when the matrices do not
    /// describe dual codes.
    pub fn from_matrices(generator: FieldMatrix, parity_check: FieldMatrix) -> Result<Self> {
        let sf = standard_form(&generator)?;
        if sf.rank != generator.nrows() {
            return Err(Error::internal(format!(
                "generator matrix has {} rows but rank {}",
                generator.nrows(),
                sf.rank
            )));
        }
        Self::assemble(generator, parity_check, sf)
    }

    /// The whole space `GF(q)^n`.
    pub fn full_space(field: Arc<GaloisField>, length: usize) -> Result<Self> {
        Self::from_generator_matrix(&FieldMatrix::identity(field, length))
    }

    fn assemble(
        generator_matrix: FieldMatrix,
        parity_check_matrix: FieldMatrix,
        sf: crate::matrix::StandardForm,
    ) -> Result<Self> {
        let length = generator_matrix.ncols();
        let dimension = sf.rank;

        if parity_check_matrix.ncols() != length || parity_check_matrix.nrows() != length - dimension {
            return Err(Error::internal(format!(
                "parity-check matrix is {}x{}, expected {}x{}",
                parity_check_matrix.nrows(),
                parity_check_matrix.ncols(),
                length - dimension,
                length
            )));
        }
        if !generator_matrix.mul(&parity_check_matrix.transpose())?.is_zero() {
            return Err(Error::internal("G * H^T != 0"));
        }

        let upper = [
            generator_matrix.min_row_weight(),
            sf.generator.min_row_weight(),
            Some(singleton_bound(length, dimension)),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(length);

        Ok(Self {
            field: Arc::clone(generator_matrix.field()),
            length,
            dimension,
            bounds: DistanceBounds::with_bounds(length, 1, upper)?,
            generator_matrix,
            parity_check_matrix,
            standard_generator_matrix: sf.generator,
            standard_parity_check_matrix: sf.parity_check,
            permutation: sf.permutation,
            original_generator_matrix: None,
            original_parity_check_matrix: None,
            weight_enumerator: None,
            family: CodeType::Linear,
        })
    }

    /// Base field.
    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    /// Code length `n`.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Dimension `k`.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Minimum distance, known once the bounds meet.
    pub fn distance(&self) -> Distance {
        self.bounds.distance()
    }

    /// Distance bounds.
    pub fn bounds(&self) -> &DistanceBounds {
        &self.bounds
    }

    /// Lower bound on the minimum distance.
    pub fn lower_bound(&self) -> usize {
        self.bounds.lower()
    }

    /// Upper bound on the minimum distance.
    pub fn upper_bound(&self) -> usize {
        self.bounds.upper()
    }

    /// Generator matrix, `k x n` with full rank.
    pub fn generator_matrix(&self) -> &FieldMatrix {
        &self.generator_matrix
    }

    /// Parity-check matrix, `(n - k) x n` with full rank.
    pub fn parity_check_matrix(&self) -> &FieldMatrix {
        &self.parity_check_matrix
    }

    /// Systematic generator matrix `[I | A]`, in the columns order of [`permutation`](Self::permutation).
    pub fn standard_generator_matrix(&self) -> &FieldMatrix {
        &self.standard_generator_matrix
    }

    /// Systematic parity-check matrix `[-A^T | I]`.
    pub fn standard_parity_check_matrix(&self) -> &FieldMatrix {
        &self.standard_parity_check_matrix
    }

    /// Column `j` of the standard forms is column `permutation[j]` of the
    /// code; `None` means no column moved.
    pub fn permutation(&self) -> Option<&[usize]> {
        self.permutation.as_deref()
    }

    /// Generator matrix as supplied, if it had to be reduced.
    pub fn original_generator_matrix(&self) -> Option<&FieldMatrix> {
        self.original_generator_matrix.as_ref()
    }

    /// Parity-check matrix as supplied, if it had to be reduced.
    pub fn original_parity_check_matrix(&self) -> Option<&FieldMatrix> {
        self.original_parity_check_matrix.as_ref()
    }

    /// Attached weight distribution, if any.
    pub fn weight_enumerator(&self) -> Option<&WeightEnumerator> {
        self.weight_enumerator.as_ref()
    }

    pub(crate) fn family(&self) -> CodeType {
        self.family
    }

    pub(crate) fn with_family(mut self, family: CodeType) -> Self {
        self.family = family;
        self
    }

    /// Swaps generator and parity-check roles, keeping the canonical forms
    /// of `generator` and the provenance matrices.
    pub(crate) fn swapped(&self, dual_standard: Self) -> Self {
        Self {
            parity_check_matrix: self.generator_matrix.clone(),
            original_generator_matrix: self.original_parity_check_matrix.clone(),
            original_parity_check_matrix: self.original_generator_matrix.clone(),
            weight_enumerator: None,
            family: CodeType::Linear,
            ..dual_standard
        }
    }

    /// Fixes the exact minimum distance.
    pub fn set_distance(&mut self, d: usize) -> Result<()> {
        self.bounds.set_distance(d)
    }

    /// Raises the lower bound on the minimum distance.
    pub fn set_lower_bound(&mut self, d: usize) -> Result<()> {
        self.bounds.set_lower_bound(d)
    }

    /// Lowers the upper bound on the minimum distance.
    pub fn set_upper_bound(&mut self, d: usize) -> Result<()> {
        self.bounds.set_upper_bound(d)
    }

    /// Attaches a weight distribution and fixes the distance from it.
    ///
    /// # Errors
    ///
    /// Fails if the distribution does not describe a code of this length,
    /// field and size, or contradicts the current bounds.
    pub fn attach_weight_enumerator(&mut self, enumerator: WeightEnumerator) -> Result<()> {
        let expected = (self.field.order() as u128).checked_pow(self.dimension as u32);
        if enumerator.length() != self.length || Some(enumerator.total()) != expected {
            return Err(Error::InvalidParameter(format!(
                "weight distribution of length {} with {} words does not fit a [{}, {}] code",
                enumerator.length(),
                enumerator.total(),
                self.length,
                self.dimension
            )));
        }
        if let Some(d) = enumerator.minimum_distance() {
            self.bounds.set_distance(d)?;
        }
        self.weight_enumerator = Some(enumerator);
        Ok(())
    }

    /// Enumerates every codeword to compute the weight distribution, within
    /// the limit set by `config`, and fixes the exact distance.
    pub fn compute_weight_enumerator(&mut self, config: &Config) -> Result<&WeightEnumerator> {
        if self.weight_enumerator.is_none() {
            let enumerator =
                weight_distribution(&self.generator_matrix, config.max_enumeration_size())?;
            self.attach_weight_enumerator(enumerator)?;
        }
        self.weight_enumerator
            .as_ref()
            .ok_or_else(|| Error::internal("weight enumerator missing after attach"))
    }

    /// Encodes a message of length `k` as `message * G`.
    pub fn encode(&self, message: &[u32]) -> Result<Vec<u32>> {
        self.generator_matrix.left_mul_vector(message)
    }

    /// Syndrome `H * word`.
    pub fn syndrome(&self, word: &[u32]) -> Result<Vec<u32>> {
        if word.len() != self.length {
            return Err(Error::DimensionMismatch {
                expected: self.length,
                actual: word.len(),
            });
        }
        self.parity_check_matrix.mul_vector(word)
    }

    /// Returns true if `word` is a codeword.
    pub fn is_codeword(&self, word: &[u32]) -> Result<bool> {
        Ok(self.syndrome(word)?.iter().all(|&s| s == 0))
    }

    /// Returns true if the code is contained in its dual.
    pub fn is_self_orthogonal(&self) -> Result<bool> {
        Ok(self
            .generator_matrix
            .mul(&self.generator_matrix.transpose())?
            .is_zero())
    }

    /// Returns true if the code equals its dual.
    pub fn is_self_dual(&self) -> Result<bool> {
        Ok(2 * self.dimension == self.length && self.is_self_orthogonal()?)
    }

    /// Returns true if both codes have the same codewords.
    pub fn same_code(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.is_subcode_of(other)
    }
}
