//! Polynomials over a Galois field.
//!
//! Coefficients are stored lowest degree first and kept trimmed, so the zero
//! polynomial has no coefficients and every other polynomial has a non-zero
//! leading coefficient.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::galois::{GaloisField, SubfieldEmbedding};

/// A polynomial with coefficients in a Galois field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    field: Arc<GaloisField>,
    coefficients: Vec<u32>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients, lowest degree first.
    pub fn new(field: Arc<GaloisField>, mut coefficients: Vec<u32>) -> Self {
        while coefficients.last() == Some(&0) {
            coefficients.pop();
        }
        Self {
            field,
            coefficients,
        }
    }

    /// The zero polynomial.
    pub fn zero(field: Arc<GaloisField>) -> Self {
        Self::new(field, Vec::new())
    }

    /// The constant polynomial 1.
    pub fn one(field: Arc<GaloisField>) -> Self {
        Self::new(field, vec![1])
    }

    /// `coefficient * x^degree`.
    pub fn monomial(field: Arc<GaloisField>, coefficient: u32, degree: usize) -> Self {
        let mut coefficients = vec![0; degree + 1];
        coefficients[degree] = coefficient;
        Self::new(field, coefficients)
    }

    /// `x^n - 1`.
    pub fn x_n_minus_one(field: Arc<GaloisField>, n: usize) -> Self {
        let mut coefficients = vec![0; n + 1];
        coefficients[0] = field.negate(1);
        coefficients[n] = 1;
        Self::new(field, coefficients)
    }

    /// The monic polynomial `(x - r_1)(x - r_2)...` with the given roots.
    pub fn from_roots(field: Arc<GaloisField>, roots: impl IntoIterator<Item = u32>) -> Self {
        let mut coefficients = vec![1u32];
        for root in roots {
            let minus_root = field.negate(root);
            // Multiply the current product by (x - root) in place
            coefficients.push(0);
            for j in (0..coefficients.len()).rev() {
                let shifted = if j > 0 { coefficients[j - 1] } else { 0 };
                coefficients[j] = field.add(shifted, field.multiply(coefficients[j], minus_root));
            }
        }
        Self::new(field, coefficients)
    }

    /// The field the coefficients live in.
    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    /// Coefficients, lowest degree first, without trailing zeros.
    pub fn coefficients(&self) -> &[u32] {
        &self.coefficients
    }

    /// Coefficient of `x^i`; zero beyond the degree.
    pub fn coefficient(&self, i: usize) -> u32 {
        self.coefficients.get(i).copied().unwrap_or(0)
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// Returns true for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Leading coefficient; zero for the zero polynomial.
    pub fn leading_coefficient(&self) -> u32 {
        self.coefficients.last().copied().unwrap_or(0)
    }

    /// Number of non-zero coefficients.
    pub fn weight(&self) -> usize {
        self.coefficients.iter().filter(|&&c| c != 0).count()
    }

    /// Coefficients padded with zeros to `len` entries.
    pub fn to_vector(&self, len: usize) -> Vec<u32> {
        let mut vector = self.coefficients.clone();
        vector.resize(len.max(vector.len()), 0);
        vector
    }

    /// Add two polynomials.
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.field, other.field);
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| self.field.add(self.coefficient(i), other.coefficient(i)))
            .collect();
        Self::new(Arc::clone(&self.field), coefficients)
    }

    /// Subtract two polynomials.
    pub fn subtract(&self, other: &Self) -> Self {
        debug_assert_eq!(self.field, other.field);
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| self.field.subtract(self.coefficient(i), other.coefficient(i)))
            .collect();
        Self::new(Arc::clone(&self.field), coefficients)
    }

    /// Multiply every coefficient by a scalar.
    pub fn scale(&self, scalar: u32) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .map(|&c| self.field.multiply(c, scalar))
            .collect();
        Self::new(Arc::clone(&self.field), coefficients)
    }

    /// Multiply two polynomials.
    pub fn multiply(&self, other: &Self) -> Self {
        debug_assert_eq!(self.field, other.field);
        if self.is_zero() || other.is_zero() {
            return Self::zero(Arc::clone(&self.field));
        }

        let mut result = vec![0u32; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coefficients.iter().enumerate() {
                result[i + j] = self.field.add(result[i + j], self.field.multiply(a, b));
            }
        }
        Self::new(Arc::clone(&self.field), result)
    }

    /// Polynomial long division, returning `(quotient, remainder)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        debug_assert_eq!(self.field, divisor.field);
        let divisor_degree = divisor.degree().ok_or_else(|| {
            Error::GaloisField("Polynomial division by zero".to_string())
        })?;
        let lead_inverse = self.field.inverse(divisor.leading_coefficient())?;

        let mut remainder = self.coefficients.clone();
        if remainder.len() <= divisor_degree {
            return Ok((Self::zero(Arc::clone(&self.field)), self.clone()));
        }

        let mut quotient = vec![0u32; remainder.len() - divisor_degree];
        for shift in (0..quotient.len()).rev() {
            let top = remainder[shift + divisor_degree];
            if top == 0 {
                continue;
            }
            let factor = self.field.multiply(top, lead_inverse);
            quotient[shift] = factor;
            for (j, &d) in divisor.coefficients.iter().enumerate() {
                remainder[shift + j] =
                    self.field.subtract(remainder[shift + j], self.field.multiply(factor, d));
            }
        }

        Ok((
            Self::new(Arc::clone(&self.field), quotient),
            Self::new(Arc::clone(&self.field), remainder),
        ))
    }

    /// Remainder of division by `divisor`.
    pub fn rem(&self, divisor: &Self) -> Result<Self> {
        Ok(self.div_rem(divisor)?.1)
    }

    /// Exact division: `Some(quotient)` when `divisor` divides `self`.
    pub fn exact_div(&self, divisor: &Self) -> Result<Option<Self>> {
        let (quotient, remainder) = self.div_rem(divisor)?;
        Ok(remainder.is_zero().then_some(quotient))
    }

    /// Scales to leading coefficient 1. The zero polynomial stays zero.
    pub fn monic(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        Ok(self.scale(self.field.inverse(self.leading_coefficient())?))
    }

    /// Monic greatest common divisor.
    pub fn gcd(&self, other: &Self) -> Result<Self> {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = a.rem(&b)?;
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Extended Euclid: returns `(g, s, t)` with `s*self + t*other = g` and `g` monic.
    pub fn extended_gcd(&self, other: &Self) -> Result<(Self, Self, Self)> {
        let field = Arc::clone(&self.field);
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(Arc::clone(&field)), Self::zero(Arc::clone(&field)));
        let (mut t0, mut t1) = (Self::zero(Arc::clone(&field)), Self::one(Arc::clone(&field)));

        while !r1.is_zero() {
            let (q, r) = r0.div_rem(&r1)?;
            let s = s0.subtract(&q.multiply(&s1));
            let t = t0.subtract(&q.multiply(&t1));
            r0 = std::mem::replace(&mut r1, r);
            s0 = std::mem::replace(&mut s1, s);
            t0 = std::mem::replace(&mut t1, t);
        }

        if r0.is_zero() {
            return Ok((r0, s0, t0));
        }
        let normalizer = field.inverse(r0.leading_coefficient())?;
        Ok((r0.scale(normalizer), s0.scale(normalizer), t0.scale(normalizer)))
    }

    /// Evaluate at `x` using Horner's rule.
    pub fn eval(&self, x: u32) -> u32 {
        self.coefficients
            .iter()
            .rev()
            .fold(0, |acc, &c| self.field.add(self.field.multiply(acc, x), c))
    }

    /// Reciprocal polynomial `x^deg * p(1/x)`.
    pub fn reverse(&self) -> Self {
        let mut coefficients = self.coefficients.clone();
        coefficients.reverse();
        Self::new(Arc::clone(&self.field), coefficients)
    }

    /// Maps every coefficient into an extension field.
    pub fn embed(&self, embedding: &SubfieldEmbedding, ext: &Arc<GaloisField>) -> Result<Self> {
        let coefficients = self
            .coefficients
            .iter()
            .map(|&c| embedding.embed(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(Arc::clone(ext), coefficients))
    }

    /// Pulls every coefficient back into a subfield.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalConsistency`] if a coefficient lies outside the
    /// subfield; callers only restrict polynomials they know to be defined
    /// over it.
    pub fn restrict(&self, embedding: &SubfieldEmbedding, sub: &Arc<GaloisField>) -> Result<Self> {
        let coefficients = self
            .coefficients
            .iter()
            .map(|&c| {
                embedding.restrict(c).ok_or_else(|| {
                    Error::internal(format!(
                        "coefficient {} of {:?} is not in GF({})",
                        c,
                        self.coefficients,
                        sub.order()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(Arc::clone(sub), coefficients))
    }
}
