//! Cyclic codes combined through their defining sets.
//!
//! For cyclic codes of the same length over the same field, the sum has
//! defining set `D1 ∩ D2`, the intersection `D1 ∪ D2`, and `C1 ⊆ C2` holds
//! exactly when `D2 ⊆ D1`. Results are rebuilt through the full cyclic
//! construction pipeline.

use std::sync::Arc;

use crate::codes::{build_cyclic, CyclicCode};
use crate::cyclotomic;
use crate::error::{Error, Result};

impl CyclicCode {
    /// Returns true if every codeword of `self` is a codeword of `other`.
    pub fn is_subcode_of(&self, other: &Self) -> bool {
        self.check_compatible(other).is_ok()
            && other
                .defining_set()
                .iter()
                .all(|i| self.defining_set().binary_search(i).is_ok())
    }

    /// The sum, with defining set `D1 ∩ D2`.
    pub fn sum(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let cosets: Vec<Vec<usize>> = self
            .cyclotomic_cosets()
            .iter()
            .filter(|coset| other.contains_coset(coset))
            .cloned()
            .collect();
        self.rebuild(cosets)
    }

    /// The intersection, with defining set `D1 ∪ D2`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructionPrecondition`] when the union covers every
    /// residue, leaving only the zero code.
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        self.check_compatible(other)?;
        let mut cosets = self.cyclotomic_cosets().to_vec();
        cosets.extend(
            other
                .cyclotomic_cosets()
                .iter()
                .filter(|coset| !self.contains_coset(coset))
                .cloned(),
        );
        if cyclotomic::flatten(&cosets).len() == self.base().length() {
            return Err(Error::precondition("the codes intersect in the zero code only"));
        }
        self.rebuild(cosets)
    }

    /// The dual code, with defining set `{-i mod n : i not in D}`.
    pub fn dual(&self) -> Result<Self> {
        let n = self.base().length();
        let q = self.base().field().order();
        let dual_set = cyclotomic::dual_defining_set(self.defining_set(), n);
        if dual_set.len() == n {
            return Err(Error::precondition(format!(
                "the dual of the full space of length {} is the zero code",
                n
            )));
        }
        self.rebuild(cyclotomic::defining_set_cosets(&dual_set, q, n)?)
    }

    /// The code generated by the parity polynomial `h(x)`, whose defining set
    /// is the complement of `D`.
    pub fn complement(&self) -> Result<Self> {
        let n = self.base().length();
        let q = self.base().field().order();
        if self.defining_set().is_empty() {
            return Err(Error::precondition(
                "the complement of the full space is the zero code",
            ));
        }
        self.rebuild(cyclotomic::complement_cosets(q, n, self.cyclotomic_cosets())?)
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        let (a, b) = (self.base(), other.base());
        if a.field() != b.field() {
            return Err(Error::precondition(format!(
                "cyclic codes over GF({}) and GF({}) cannot be combined",
                a.field().order(),
                b.field().order()
            )));
        }
        if a.length() != b.length() {
            return Err(Error::precondition(format!(
                "cyclic codes of lengths {} and {} cannot be combined",
                a.length(),
                b.length()
            )));
        }
        Ok(())
    }

    fn contains_coset(&self, coset: &[usize]) -> bool {
        coset
            .first()
            .map_or(false, |c| self.defining_set().binary_search(c).is_ok())
    }

    fn rebuild(&self, cosets: Vec<Vec<usize>>) -> Result<Self> {
        build_cyclic(
            Arc::clone(self.base().field()),
            self.base().length(),
            cosets,
            None,
            self.config(),
        )
    }
}
