//! Operators on generic linear codes.

use std::sync::Arc;

use crate::algebra::{check_same_field, check_same_space, narrow};
use crate::codes::LinearCode;
use crate::error::{Error, Result};
use crate::matrix::FieldMatrix;

impl LinearCode {
    /// Returns true if every codeword of `self` is a codeword of `other`.
    ///
    /// Codes over different fields or of different lengths are never
    /// subcodes of each other.
    pub fn is_subcode_of(&self, other: &Self) -> bool {
        if check_same_space(self, other).is_err() {
            return false;
        }
        self.generator_matrix()
            .mul(&other.parity_check_matrix().transpose())
            .map(|syndromes| syndromes.is_zero())
            .unwrap_or(false)
    }

    /// The dual code `{x : x · c = 0 for all c in C}`.
    ///
    /// Generator and parity-check roles are swapped, together with the
    /// matrices kept from construction. An attached weight distribution is
    /// carried over through the MacWilliams identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionPrecondition`] for the full space, whose
    /// dual is the zero code.
    pub fn dual(&self) -> Result<Self> {
        if self.dimension() == self.length() {
            return Err(Error::precondition(format!(
                "the dual of the full space GF({})^{} is the zero code",
                self.field().order(),
                self.length()
            )));
        }
        let standard = Self::from_generator_matrix(self.parity_check_matrix())?;
        let mut dual = self.swapped(standard);
        if let Some(enumerator) = self.weight_enumerator() {
            match enumerator.macwilliams_transform() {
                Ok(transformed) => dual.attach_weight_enumerator(transformed)?,
                Err(Error::Overflow(reason)) => {
                    tracing::debug!("dual left without a weight distribution: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }
        tracing::trace!(
            "dual of [{}, {}] is [{}, {}]",
            self.length(),
            self.dimension(),
            dual.length(),
            dual.dimension()
        );
        Ok(dual)
    }

    /// The smallest code containing both codes.
    pub fn sum(&self, other: &Self) -> Result<Self> {
        check_same_space(self, other)?;
        let generator = self.generator_matrix().vcat(other.generator_matrix())?;
        let mut sum = Self::from_generator_matrix(&generator)?;
        narrow(&mut sum, 1, self.upper_bound().min(other.upper_bound()))?;
        Ok(sum)
    }

    /// The codewords common to both codes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionPrecondition`] when only the zero word is
    /// shared.
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        check_same_space(self, other)?;
        let parity_check = self.parity_check_matrix().vcat(other.parity_check_matrix())?;
        let mut intersection = if parity_check.is_zero() {
            Self::full_space(Arc::clone(self.field()), self.length())?
        } else {
            Self::from_parity_check_matrix(&parity_check).map_err(|e| match e {
                Error::ConstructionPrecondition(_) => {
                    Error::precondition("the codes intersect in the zero code only")
                }
                other => other,
            })?
        };
        let lower = self.lower_bound().max(other.lower_bound());
        let length = intersection.length();
        narrow(&mut intersection, lower, length)?;
        Ok(intersection)
    }

    /// The direct sum `{(a, b) : a in C1, b in C2}`.
    ///
    /// Its minimum distance is the smaller of the two distances.
    pub fn direct_sum(&self, other: &Self) -> Result<Self> {
        check_same_field(self, other)?;
        let generator = self.generator_matrix().block_diag(other.generator_matrix())?;
        let parity_check = self.parity_check_matrix().block_diag(other.parity_check_matrix())?;
        let mut sum = Self::from_matrices(generator, parity_check)?;
        narrow(
            &mut sum,
            self.lower_bound().min(other.lower_bound()),
            self.upper_bound().min(other.upper_bound()),
        )?;
        Ok(sum)
    }

    /// The direct product, generated by the Kronecker product of the two
    /// generator matrices.
    ///
    /// Its minimum distance is the product of the two distances.
    pub fn direct_product(&self, other: &Self) -> Result<Self> {
        check_same_field(self, other)?;
        let generator = self.generator_matrix().kron(other.generator_matrix())?;
        let mut product = Self::from_generator_matrix(&generator)?;
        narrow(
            &mut product,
            self.lower_bound() * other.lower_bound(),
            self.upper_bound() * other.upper_bound(),
        )?;
        Ok(product)
    }

    /// Deletes the coordinates in `columns`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConstructionPrecondition`] when every coordinate
    /// would be removed or only the zero code would remain, and with
    /// [`Error::InvalidParameter`] for an index out of range.
    pub fn puncture(&self, columns: &[usize]) -> Result<Self> {
        let columns = self.coordinate_set(columns)?;
        let generator = self.generator_matrix().remove_columns(&columns)?;
        if generator.is_zero() {
            return Err(Error::precondition(format!(
                "puncturing {:?} leaves only the zero code",
                columns
            )));
        }
        let mut punctured = Self::from_generator_matrix(&generator)?;
        let lower = self.lower_bound().saturating_sub(columns.len()).max(1);
        // Without a rank drop no non-zero codeword collapses to zero
        let upper = if punctured.dimension() == self.dimension() {
            self.upper_bound()
        } else {
            punctured.length()
        };
        narrow(&mut punctured, lower, upper)?;
        Ok(punctured)
    }

    /// Deletes the generator-matrix rows in `rows`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConstructionPrecondition`] when every row would be
    /// removed.
    pub fn expurgate(&self, rows: &[usize]) -> Result<Self> {
        let mut rows = rows.to_vec();
        rows.sort_unstable();
        rows.dedup();
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.dimension()) {
            return Err(Error::InvalidParameter(format!(
                "row {} out of range for dimension {}",
                bad,
                self.dimension()
            )));
        }
        if rows.len() == self.dimension() {
            return Err(Error::precondition("expurgation would remove every row"));
        }
        let generator = self.generator_matrix().remove_rows(&rows)?;
        let mut expurgated = Self::from_generator_matrix(&generator)?;
        let length = expurgated.length();
        narrow(&mut expurgated, self.lower_bound(), length)?;
        Ok(expurgated)
    }

    /// Adds the rows of `rows` to the generator matrix.
    pub fn augment(&self, rows: &FieldMatrix) -> Result<Self> {
        if rows.ncols() != self.length() {
            return Err(Error::DimensionMismatch {
                expected: self.length(),
                actual: rows.ncols(),
            });
        }
        let generator = self.generator_matrix().vcat(rows)?;
        let mut augmented = Self::from_generator_matrix(&generator)?;
        narrow(&mut augmented, 1, self.upper_bound())?;
        Ok(augmented)
    }

    /// Appends an overall parity symbol making every codeword sum to zero.
    ///
    /// Over `GF(2)` an odd distance grows by one.
    pub fn extend(&self) -> Result<Self> {
        let field = self.field();
        let generator = self.generator_matrix();
        let rows: Vec<Vec<u32>> = generator
            .rows()
            .into_iter()
            .map(|mut row| {
                let sum = row.iter().fold(0, |acc, &v| field.add(acc, v));
                row.push(field.negate(sum));
                row
            })
            .collect();
        let extended_generator = FieldMatrix::from_rows(Arc::clone(field), &rows)?;
        let mut extended = Self::from_generator_matrix(&extended_generator)?;

        let (lower, upper) = (self.lower_bound(), self.upper_bound());
        let (lower, upper) = if field.order() == 2 {
            (lower + lower % 2, upper + upper % 2)
        } else {
            (lower, upper + 1)
        };
        narrow(&mut extended, lower, upper)?;
        Ok(extended)
    }

    /// Keeps the codewords vanishing on `columns`, then deletes those
    /// coordinates. Equal to `dual(puncture(dual(C), columns))`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConstructionPrecondition`] when every coordinate
    /// would be removed or only the zero code would remain.
    pub fn shorten(&self, columns: &[usize]) -> Result<Self> {
        let columns = self.coordinate_set(columns)?;
        let remaining = self.length() - columns.len();

        let parity_rest = self.parity_check_matrix().remove_columns(&columns)?;
        let mut shortened = if self.dimension() == self.length() || parity_rest.is_zero() {
            // No parity constraint survives on the kept coordinates
            Self::full_space(Arc::clone(self.field()), remaining)?
        } else {
            let punctured_dual = self.dual()?.puncture(&columns)?;
            if punctured_dual.dimension() == remaining {
                return Err(Error::precondition(format!(
                    "shortening on {:?} leaves only the zero code",
                    columns
                )));
            }
            punctured_dual.dual()?
        };
        narrow(&mut shortened, self.lower_bound(), remaining)?;
        Ok(shortened)
    }

    /// Adds the all-ones word, then extends.
    pub fn lengthen(&self) -> Result<Self> {
        let ones = FieldMatrix::from_rows(Arc::clone(self.field()), &[vec![1; self.length()]])?;
        self.augment(&ones)?.extend()
    }

    /// The subcode of codewords whose coordinates sum to zero; over `GF(2)`
    /// the even-weight subcode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionPrecondition`] when only the zero word
    /// sums to zero.
    pub fn even_subcode(&self) -> Result<Self> {
        if self.length() == 1 {
            return Err(Error::precondition(
                "the zero-sum subcode of a length-one code is trivial",
            ));
        }
        let ones = FieldMatrix::from_rows(Arc::clone(self.field()), &[vec![1; self.length()]])?;
        let zero_sum = Self::from_generator_matrix(&ones)?.dual()?;
        let mut even = self.intersection(&zero_sum)?;
        let lower = self.lower_bound();
        let lower = if self.field().order() == 2 {
            lower + lower % 2
        } else {
            lower
        };
        let length = even.length();
        narrow(&mut even, lower, length)?;
        Ok(even)
    }

    /// Reorders coordinates: coordinate `j` of the result is coordinate
    /// `permutation[j]` of `self`.
    pub fn permute_code(&self, permutation: &[usize]) -> Result<Self> {
        let generator = self.generator_matrix().permute_columns(permutation)?;
        let parity_check = self.parity_check_matrix().permute_columns(permutation)?;
        let mut permuted = Self::from_matrices(generator, parity_check)?;
        narrow(&mut permuted, self.lower_bound(), self.upper_bound())?;
        if let Some(enumerator) = self.weight_enumerator() {
            permuted.attach_weight_enumerator(enumerator.clone())?;
        }
        Ok(permuted)
    }

    /// Sorted, deduplicated coordinate indices, leaving at least one coordinate.
    fn coordinate_set(&self, columns: &[usize]) -> Result<Vec<usize>> {
        let mut columns = columns.to_vec();
        columns.sort_unstable();
        columns.dedup();
        if let Some(&bad) = columns.iter().find(|&&c| c >= self.length()) {
            return Err(Error::InvalidParameter(format!(
                "coordinate {} out of range for length {}",
                bad,
                self.length()
            )));
        }
        if columns.len() == self.length() {
            return Err(Error::precondition("the operation would remove every coordinate"));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Distance;
    use crate::codes::{hamming_code, reed_muller_code, repetition_code, simplex_code, CyclicCode};
    use crate::config::Config;
    use crate::galois::GaloisField;

    fn matrix(order: usize, rows: &[&[u32]]) -> FieldMatrix {
        let rows: Vec<Vec<u32>> = rows.iter().map(|r| r.to_vec()).collect();
        FieldMatrix::from_rows(GaloisField::new(order).unwrap(), &rows).unwrap()
    }

    #[test]
    fn test_subcode() {
        let hamming = hamming_code(2, 3).unwrap();
        let repetition = repetition_code(2, 7).unwrap();
        assert!(repetition.is_subcode_of(&hamming));
        assert!(!hamming.is_subcode_of(&repetition));
        assert!(hamming.is_subcode_of(&hamming));
        let ternary = repetition_code(3, 7).unwrap();
        assert!(!ternary.is_subcode_of(&hamming));
    }

    #[test]
    fn test_dual_twice() {
        let code = CyclicCode::new(3, 13, &[1]).unwrap().into_linear();
        let back = code.dual().unwrap().dual().unwrap();
        assert!(back.same_code(&code));
        assert_eq!(back.generator_matrix(), code.generator_matrix());
    }

    #[test]
    fn test_dual_of_full_space() {
        let full = LinearCode::full_space(GaloisField::new(2).unwrap(), 4).unwrap();
        assert!(matches!(full.dual(), Err(Error::ConstructionPrecondition(_))));
    }

    #[test]
    fn test_dual_carries_weight_distribution() {
        let mut code = hamming_code(2, 3).unwrap();
        code.compute_weight_enumerator(&Config::default()).unwrap();
        let dual = code.dual().unwrap();
        assert_eq!(
            dual.weight_enumerator().unwrap().distribution(),
            &[1, 0, 0, 0, 7, 0, 0, 0]
        );
        assert_eq!(dual.distance(), Distance::Known(4));
    }

    #[test]
    fn test_dual_of_long_repetition_code() {
        let mut code = repetition_code(2, 100).unwrap();
        code.compute_weight_enumerator(&Config::default()).unwrap();
        let dual = code.dual().unwrap();
        let enumerator = dual.weight_enumerator().unwrap();
        assert_eq!(enumerator.count(2), 4950);
        assert_eq!(enumerator.count(3), 0);
        assert_eq!(dual.distance(), Distance::Known(2));

        // C(140, 70) exceeds i128, so the dual keeps no distribution
        let mut code = repetition_code(2, 140).unwrap();
        code.compute_weight_enumerator(&Config::default()).unwrap();
        let dual = code.dual().unwrap();
        assert_eq!(dual.dimension(), 139);
        assert!(dual.weight_enumerator().is_none());
    }

    #[test]
    fn test_dual_keeps_provenance() {
        let g = matrix(2, &[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1]]);
        let code = LinearCode::from_generator_matrix(&g).unwrap();
        let dual = code.dual().unwrap();
        assert_eq!(dual.original_parity_check_matrix(), Some(&g));
        assert!(dual.original_generator_matrix().is_none());
    }

    #[test]
    fn test_sum_and_intersection() {
        // Two [4, 1] binary codes spanning independent words
        let a = LinearCode::from_generator_matrix(&matrix(2, &[&[1, 1, 0, 0]])).unwrap();
        let b = LinearCode::from_generator_matrix(&matrix(2, &[&[0, 0, 1, 1]])).unwrap();
        let sum = a.sum(&b).unwrap();
        assert_eq!(sum.dimension(), 2);
        assert!(a.is_subcode_of(&sum) && b.is_subcode_of(&sum));
        assert_eq!(sum.upper_bound(), 2);
        assert!(matches!(a.intersection(&b), Err(Error::ConstructionPrecondition(_))));

        let hamming = hamming_code(2, 3).unwrap();
        let even = hamming.even_subcode().unwrap();
        let both = hamming.intersection(&even).unwrap();
        assert!(both.same_code(&even));
    }

    #[test]
    fn test_direct_sum() {
        let a = hamming_code(2, 3).unwrap();
        let mut b = LinearCode::from_generator_matrix(&matrix(2, &[&[1, 1, 0, 0, 0], &[0, 0, 1, 1, 1]])).unwrap();
        b.compute_weight_enumerator(&Config::default()).unwrap();
        let sum = a.direct_sum(&b).unwrap();
        assert_eq!(sum.length(), 12);
        assert_eq!(sum.dimension(), 6);
        assert_eq!(sum.distance(), Distance::Known(2));
    }

    #[test]
    fn test_direct_product() {
        let a = repetition_code(2, 3).unwrap();
        let b = hamming_code(2, 3).unwrap();
        let product = a.direct_product(&b).unwrap();
        assert_eq!(product.length(), 21);
        assert_eq!(product.dimension(), 4);
        assert_eq!(product.distance(), Distance::Known(9));
    }

    #[test]
    fn test_puncture() {
        let code = hamming_code(2, 3).unwrap();
        let punctured = code.puncture(&[6]).unwrap();
        assert_eq!(punctured.length(), 6);
        assert_eq!(punctured.dimension(), 4);
        assert!(punctured.lower_bound() >= 2);
        assert!(punctured.upper_bound() <= 3);
        assert!(matches!(
            code.puncture(&(0..7).collect::<Vec<_>>()),
            Err(Error::ConstructionPrecondition(_))
        ));
        assert!(matches!(code.puncture(&[9]), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_puncture_to_zero_rejected() {
        let code = LinearCode::from_generator_matrix(&matrix(2, &[&[1, 1, 0]])).unwrap();
        assert!(matches!(code.puncture(&[0, 1]), Err(Error::ConstructionPrecondition(_))));
    }

    #[test]
    fn test_expurgate_and_augment() {
        let code = hamming_code(2, 3).unwrap();
        let smaller = code.expurgate(&[0]).unwrap();
        assert_eq!(smaller.dimension(), 3);
        assert!(smaller.is_subcode_of(&code));
        assert!(smaller.lower_bound() >= 3);
        assert!(matches!(code.expurgate(&[0, 1, 2, 3]), Err(Error::ConstructionPrecondition(_))));

        let removed = FieldMatrix::from_rows(
            Arc::clone(code.field()),
            &[code.generator_matrix().row(0)],
        )
        .unwrap();
        let restored = smaller.augment(&removed).unwrap();
        assert!(restored.same_code(&code));
    }

    #[test]
    fn test_extend_hamming() {
        let extended = hamming_code(2, 3).unwrap().extend().unwrap();
        assert_eq!(extended.length(), 8);
        assert_eq!(extended.dimension(), 4);
        assert_eq!(extended.distance(), Distance::Known(4));
        assert!(extended.is_self_dual().unwrap());
    }

    #[test]
    fn test_extend_ternary_sums_to_zero() {
        let code = hamming_code(3, 2).unwrap();
        let extended = code.extend().unwrap();
        let field = extended.field();
        for row in extended.generator_matrix().rows() {
            assert_eq!(row.iter().fold(0, |acc, &v| field.add(acc, v)), 0);
        }
    }

    #[test]
    fn test_shorten_matches_dual_puncture_dual() {
        let code = CyclicCode::bch(2, 15, 5, 1).unwrap().into_linear();
        let columns = [2, 3, 5];
        let shortened = code.shorten(&columns).unwrap();
        let reference = code.dual().unwrap().puncture(&columns).unwrap().dual().unwrap();
        assert!(shortened.same_code(&reference));
        assert_eq!(shortened.length(), 12);
        assert_eq!(shortened.dimension(), 4);
        assert!(shortened.lower_bound() >= 5);
    }

    #[test]
    fn test_shorten_full_space() {
        let full = LinearCode::full_space(GaloisField::new(5).unwrap(), 4).unwrap();
        let shortened = full.shorten(&[1]).unwrap();
        assert_eq!(shortened.length(), 3);
        assert_eq!(shortened.dimension(), 3);
    }

    #[test]
    fn test_lengthen() {
        let simplex = simplex_code(2, 3).unwrap();
        let lengthened = simplex.lengthen().unwrap();
        assert_eq!(lengthened.length(), 8);
        assert_eq!(lengthened.dimension(), 4);
        // Simplex column j is the point j + 1; the new coordinate is point 0
        let reordered = lengthened.permute_code(&[7, 0, 1, 2, 3, 4, 5, 6]).unwrap();
        assert!(reordered.same_code(&reed_muller_code(1, 3).unwrap()));
    }

    #[test]
    fn test_even_subcode() {
        let code = hamming_code(2, 3).unwrap();
        let even = code.even_subcode().unwrap();
        assert_eq!(even.dimension(), 3);
        assert_eq!(even.distance(), Distance::Known(4));
        assert!(even.is_subcode_of(&code));
    }

    #[test]
    fn test_permute_code() {
        let code = hamming_code(2, 3).unwrap();
        let permutation = [6, 5, 4, 3, 2, 1, 0];
        let permuted = code.permute_code(&permutation).unwrap();
        assert_eq!(permuted.distance(), Distance::Known(3));
        let back = permuted.permute_code(&permutation).unwrap();
        assert!(back.same_code(&code));
        assert!(code.permute_code(&[0, 0, 1, 2, 3, 4, 5]).is_err());
    }
}
