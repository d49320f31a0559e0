//! Cyclic codes and their construction pipeline.
//!
//! A cyclic code of length `n` over `GF(q)`, `gcd(n, q) = 1`, is determined by
//! its defining set `D`: the exponents `i` for which `β^i` is a root of the
//! generator polynomial, where `β` is a primitive `n`-th root of unity in the
//! splitting field `GF(q^m)`, `m = ord_n(q)`. The pipeline here builds the
//! generator, parity and idempotent polynomials from `D`, the matching
//! matrices and standard forms, checks the algebraic invariants, computes the
//! BCH / Hartmann-Tzeng bound and finally classifies the result as a plain
//! cyclic, BCH or Reed-Solomon code.

use std::collections::BTreeSet;
use std::sync::Arc;

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::bounds::find_bound;
use crate::codes::LinearCode;
use crate::config::Config;
use crate::cyclotomic::{self, multiplicative_order};
use crate::error::{Error, Result};
use crate::galois::{GaloisField, Polynomial};
use crate::matrix::FieldMatrix;

/// Classification of a cyclic code, decided after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclicKind {
    /// Cyclic code whose defining set is not a single BCH run
    Cyclic,
    /// Defining set generated by a run of consecutive exponents
    Bch,
    /// BCH code over `GF(q)` of length `q - 1`
    ReedSolomon,
}

/// A cyclic code together with its algebraic description.
#[derive(Debug, Clone)]
pub struct CyclicCode {
    /// Generic linear code data
    base: LinearCode,
    /// Classification
    kind: CyclicKind,
    /// Splitting field `GF(q^m)` holding the n-th roots of unity
    splitting_field: Arc<GaloisField>,
    /// Primitive n-th root of unity β in the splitting field
    root_element: u32,
    /// First exponent of the longest consecutive run in the defining set
    offset: usize,
    /// BCH bound δ
    design_distance: usize,
    /// Hartmann-Tzeng refinement of δ
    hartmann_tzeng_bound: usize,
    /// Cyclotomic cosets making up the defining set
    cyclotomic_cosets: Vec<Vec<usize>>,
    /// First element of each coset
    coset_representatives: Vec<usize>,
    /// Sorted union of the cosets
    defining_set: Vec<usize>,
    /// g(x), monic, dividing x^n - 1
    generator_polynomial: Polynomial,
    /// h(x) = (x^n - 1) / g(x)
    parity_polynomial: Polynomial,
    /// Idempotent generator e(x) of the code
    idempotent: Polynomial,
    /// Settings used to build this code, reused for derived codes
    config: Config,
}

impl CyclicCode {
    /// Builds the cyclic code of length `n` over `GF(q)` whose defining set is
    /// the union of the cyclotomic cosets of `values`.
    pub fn new(q: usize, n: usize, values: &[usize]) -> Result<Self> {
        Self::new_with_config(q, n, values, &Config::default())
    }

    /// As [`new`](Self::new) with explicit settings.
    pub fn new_with_config(q: usize, n: usize, values: &[usize], config: &Config) -> Result<Self> {
        check_length(q, n)?;
        let field = GaloisField::new(q)?;
        let cosets = cyclotomic::defining_set_cosets(values, q, n)?;
        Self::from_cosets(field, n, cosets, config)
    }

    /// Builds the cyclic code with the given defining-set cosets.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidParameter`] if a coset is not a complete
    /// cyclotomic coset, the cosets overlap, or they cover every residue.
    pub fn from_cosets(
        field: Arc<GaloisField>,
        n: usize,
        cosets: Vec<Vec<usize>>,
        config: &Config,
    ) -> Result<Self> {
        build(field, n, cosets, None, config)
    }

    /// Builds the cyclic code generated by `generator`, which must divide `x^n - 1`.
    pub fn from_generator_polynomial(generator: &Polynomial, n: usize, config: &Config) -> Result<Self> {
        let field = Arc::clone(generator.field());
        let q = field.order();
        check_length(q, n)?;

        let x_n_minus_one = Polynomial::x_n_minus_one(Arc::clone(&field), n);
        if generator.is_zero() || x_n_minus_one.exact_div(generator)?.is_none() {
            return Err(Error::InvalidParameter(format!(
                "{:?} does not divide x^{} - 1",
                generator.coefficients(),
                n
            )));
        }

        let splitting = splitting_field(&field, n, config)?;
        let embedding = field.embedding_into(&splitting)?;
        let beta = root_of_unity(&splitting, n)?;
        let lifted = generator.embed(&embedding, &splitting)?;

        // Roots of g are exactly the β^i it vanishes on
        let roots: Vec<usize> = (0..n)
            .filter(|&i| lifted.eval(splitting.power(beta, i as u64)) == 0)
            .collect();
        let cosets = cyclotomic::defining_set_cosets(&roots, q, n)?;
        let code = build(field, n, cosets, None, config)?;

        if code.generator_polynomial != generator.monic()? {
            return Err(Error::internal(
                "generator polynomial rebuilt from its roots differs from the input",
            ));
        }
        Ok(code)
    }

    /// Builds the code with defining set `{b, b+1, ..., b+δ-2}` closed under
    /// multiplication by `q`.
    pub(crate) fn from_run(
        q: usize,
        n: usize,
        delta: usize,
        offset: usize,
        config: &Config,
    ) -> Result<Self> {
        check_length(q, n)?;
        let field = GaloisField::new(q)?;
        if delta < 2 {
            return Err(Error::InvalidDistance(format!(
                "design distance {} is below 2",
                delta
            )));
        }
        if delta > n {
            return Err(Error::InvalidDistance(format!(
                "design distance {} exceeds the length {}",
                delta, n
            )));
        }
        let run: Vec<usize> = (0..delta - 1).map(|i| (offset + i) % n).collect();
        let cosets = cyclotomic::defining_set_cosets(&run, q, n)?;
        build(field, n, cosets, Some((delta, offset)), config)
    }

    /// Underlying linear code.
    pub fn base(&self) -> &LinearCode {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut LinearCode {
        &mut self.base
    }

    /// Consumes the cyclic code, returning the underlying linear code.
    pub fn into_linear(self) -> LinearCode {
        self.base
    }

    /// Classification.
    pub fn kind(&self) -> CyclicKind {
        self.kind
    }

    /// Splitting field `GF(q^m)`.
    pub fn splitting_field(&self) -> &Arc<GaloisField> {
        &self.splitting_field
    }

    /// Primitive `n`-th root of unity used for the defining set.
    pub fn root_element(&self) -> u32 {
        self.root_element
    }

    /// Offset `b` of the BCH run.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// BCH design distance δ.
    pub fn design_distance(&self) -> usize {
        self.design_distance
    }

    /// Hartmann-Tzeng bound, at least δ.
    pub fn hartmann_tzeng_bound(&self) -> usize {
        self.hartmann_tzeng_bound
    }

    /// Defining-set cosets, in construction order.
    pub fn cyclotomic_cosets(&self) -> &[Vec<usize>] {
        &self.cyclotomic_cosets
    }

    /// First element of each defining-set coset.
    pub fn coset_representatives(&self) -> &[usize] {
        &self.coset_representatives
    }

    /// Sorted defining set.
    pub fn defining_set(&self) -> &[usize] {
        &self.defining_set
    }

    /// Generator polynomial g(x).
    pub fn generator_polynomial(&self) -> &Polynomial {
        &self.generator_polynomial
    }

    /// Parity polynomial h(x) = (x^n - 1) / g(x).
    pub fn parity_polynomial(&self) -> &Polynomial {
        &self.parity_polynomial
    }

    /// Idempotent e(x), with e(x)^2 = e(x) mod x^n - 1.
    pub fn idempotent(&self) -> &Polynomial {
        &self.idempotent
    }

    /// Settings the code was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Non-systematic encoding `m(x) g(x)` of a message of length `k`.
    pub fn encode_polynomial(&self, message: &[u32]) -> Result<Polynomial> {
        if message.len() != self.base.dimension() {
            return Err(Error::DimensionMismatch {
                expected: self.base.dimension(),
                actual: message.len(),
            });
        }
        let m = Polynomial::new(Arc::clone(self.base.field()), message.to_vec());
        Ok(m.multiply(&self.generator_polynomial))
    }
}

fn check_length(q: usize, n: usize) -> Result<()> {
    if q <= 1 {
        return Err(Error::InvalidLength(format!("field size {} is below 2", q)));
    }
    if n <= 1 {
        return Err(Error::InvalidLength(format!("length {} is below 2", n)));
    }
    if n.gcd(&q) != 1 {
        return Err(Error::InvalidParameter(format!(
            "length {} is not coprime to the field size {}",
            n, q
        )));
    }
    Ok(())
}

/// `GF(q^m)` with `m = ord_n(q)`, within the configured size limit.
fn splitting_field(field: &GaloisField, n: usize, config: &Config) -> Result<Arc<GaloisField>> {
    let q = field.order();
    let m = multiplicative_order(q, n).ok_or_else(|| {
        Error::InvalidParameter(format!("{} has no multiplicative order modulo {}", q, n))
    })?;
    let order = u32::try_from(m)
        .ok()
        .and_then(|m| q.checked_pow(m))
        .filter(|&order| order <= config.max_field_order())
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "splitting field GF({}^{}) exceeds the maximum field order {}",
                q,
                m,
                config.max_field_order()
            ))
        })?;
    tracing::trace!("splitting field of x^{} - 1 over GF({}) is GF({})", n, q, order);
    GaloisField::new(order)
}

/// Primitive `n`-th root of unity `γ^((Q-1)/n)`.
fn root_of_unity(splitting: &GaloisField, n: usize) -> Result<u32> {
    let group = splitting.element_count();
    if group % n != 0 {
        return Err(Error::internal(format!(
            "{} does not divide the multiplicative group order {}",
            n, group
        )));
    }
    Ok(splitting.exp((group / n) as i64))
}

/// Rows `x^i p(x)` for `i < rows`, as a `rows x n` matrix.
fn shift_matrix(poly: &Polynomial, rows: usize, n: usize) -> Result<FieldMatrix> {
    let coefficients = poly.coefficients();
    let matrix_rows: Vec<Vec<u32>> = (0..rows)
        .map(|i| {
            let mut row = vec![0u32; n];
            row[i..i + coefficients.len()].copy_from_slice(coefficients);
            row
        })
        .collect();
    if matrix_rows.is_empty() {
        return Ok(FieldMatrix::zeros(Arc::clone(poly.field()), 0, n));
    }
    FieldMatrix::from_rows(Arc::clone(poly.field()), &matrix_rows)
}

fn validate_cosets(q: usize, n: usize, cosets: &[Vec<usize>]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for coset in cosets {
        let Some(&first) = coset.first() else {
            return Err(Error::InvalidParameter("empty cyclotomic coset".to_string()));
        };
        if first >= n {
            return Err(Error::InvalidParameter(format!(
                "coset element {} is not below n = {}",
                first, n
            )));
        }
        let expected: BTreeSet<usize> = cyclotomic::cyclotomic_coset(first, q, n)?.into_iter().collect();
        let actual: BTreeSet<usize> = coset.iter().copied().collect();
        if expected != actual || actual.len() != coset.len() {
            return Err(Error::InvalidParameter(format!(
                "{:?} is not a {}-cyclotomic coset modulo {}",
                coset, q, n
            )));
        }
        if !seen.is_disjoint(&actual) {
            return Err(Error::InvalidParameter(format!(
                "coset {:?} overlaps an earlier coset",
                coset
            )));
        }
        seen.extend(actual);
    }
    Ok(())
}

/// The construction pipeline shared by every cyclic-family constructor.
///
/// `seed` carries the requested `(δ, b)` of a BCH request so that the
/// classification accepts the requested run as well as the one found by the
/// bound search.
pub(crate) fn build(
    field: Arc<GaloisField>,
    n: usize,
    cosets: Vec<Vec<usize>>,
    seed: Option<(usize, usize)>,
    config: &Config,
) -> Result<CyclicCode> {
    let q = field.order();
    check_length(q, n)?;
    validate_cosets(q, n, &cosets)?;

    let defining_set = cyclotomic::flatten(&cosets);
    if defining_set.len() == n {
        return Err(Error::InvalidParameter(
            "defining set covers every residue, leaving only the zero code".to_string(),
        ));
    }
    let complement = cyclotomic::complement_cosets(q, n, &cosets)?;
    let complement_set = cyclotomic::flatten(&complement);

    // Polynomials are built over the splitting field and pulled back
    let splitting = splitting_field(&field, n, config)?;
    let embedding = field.embedding_into(&splitting)?;
    let beta = root_of_unity(&splitting, n)?;

    let roots = |set: &[usize]| -> Vec<u32> {
        set.iter()
            .map(|&i| splitting.power(beta, i as u64))
            .collect()
    };
    let generator_polynomial = Polynomial::from_roots(Arc::clone(&splitting), roots(&defining_set))
        .restrict(&embedding, &field)?;
    let parity_polynomial = Polynomial::from_roots(Arc::clone(&splitting), roots(&complement_set))
        .restrict(&embedding, &field)?;

    // g must divide x^n - 1 with quotient h
    let x_n_minus_one = Polynomial::x_n_minus_one(Arc::clone(&field), n);
    match x_n_minus_one.exact_div(&generator_polynomial)? {
        Some(quotient) if quotient == parity_polynomial => {}
        Some(_) => {
            return Err(Error::internal(
                "(x^n - 1) / g(x) differs from the parity polynomial",
            ))
        }
        None => return Err(Error::internal("g(x) does not divide x^n - 1")),
    }

    // 1 = s g + t h, and e = s g mod (x^n - 1)
    let (gcd, s, _) = generator_polynomial.extended_gcd(&parity_polynomial)?;
    if gcd != Polynomial::one(Arc::clone(&field)) {
        return Err(Error::internal("g(x) and h(x) are not coprime"));
    }
    let idempotent = s.multiply(&generator_polynomial).rem(&x_n_minus_one)?;

    let dimension = n - defining_set.len();
    let generator = shift_matrix(&generator_polynomial, dimension, n)?;
    let parity_check = shift_matrix(&parity_polynomial.reverse(), n - dimension, n)?;
    let mut base = LinearCode::from_matrices(generator, parity_check)?;
    if base.dimension() != dimension {
        return Err(Error::internal(format!(
            "dimension {} differs from n - |D| = {}",
            base.dimension(),
            dimension
        )));
    }

    let report = find_bound(n, &cosets, config.hartmann_tzeng_refinement())?;
    base.set_upper_bound(generator_polynomial.weight())
        .map_err(|e| Error::internal(format!("generator weight below the BCH bound: {}", e)))?;
    base.set_lower_bound(report.hartmann_tzeng).map_err(|e| {
        Error::internal(format!(
            "bound {} exceeds the upper bound: {}",
            report.hartmann_tzeng, e
        ))
    })?;

    let run_set = |delta: usize, offset: usize| -> Result<Vec<usize>> {
        let run: Vec<usize> = (0..delta.saturating_sub(1)).map(|i| (offset + i) % n).collect();
        cyclotomic::defining_set(&run, q, n)
    };
    // A sub-run only generates a subset of what its maximal run generates
    let mut candidate_runs: Vec<(usize, usize)> = report
        .runs
        .iter()
        .map(|&(start, length)| (length + 1, start))
        .collect();
    candidate_runs.extend(seed);
    let mut is_bch = false;
    for (delta, offset) in candidate_runs {
        if run_set(delta, offset)? == defining_set {
            is_bch = true;
            break;
        }
    }
    let is_bch = is_bch && !defining_set.is_empty();

    let kind = if is_bch && splitting.order() == q && n == q - 1 {
        CyclicKind::ReedSolomon
    } else if is_bch {
        CyclicKind::Bch
    } else {
        CyclicKind::Cyclic
    };

    if kind == CyclicKind::ReedSolomon {
        let d = n - dimension + 1;
        base.set_distance(d)
            .map_err(|e| Error::internal(format!("Reed-Solomon distance {}: {}", d, e)))?;
    }

    tracing::debug!(
        "built {:?} code [{}, {}] over GF({}): δ = {}, b = {}, HT = {}, bounds {}..={}",
        kind,
        n,
        dimension,
        q,
        report.design_distance,
        report.offset,
        report.hartmann_tzeng,
        base.lower_bound(),
        base.upper_bound()
    );

    let coset_representatives = cyclotomic::representatives(&cosets);
    Ok(CyclicCode {
        base,
        kind,
        splitting_field: splitting,
        root_element: beta,
        offset: report.offset,
        design_distance: report.design_distance,
        hartmann_tzeng_bound: report.hartmann_tzeng,
        cyclotomic_cosets: cosets,
        coset_representatives,
        defining_set,
        generator_polynomial,
        parity_polynomial,
        idempotent,
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Distance;

    #[test]
    fn test_binary_hamming_as_cyclic() {
        let code = CyclicCode::new(2, 7, &[1]).unwrap();
        assert_eq!(code.base().dimension(), 4);
        assert_eq!(code.defining_set(), &[1, 2, 4]);
        assert_eq!(code.generator_polynomial().degree(), Some(3));
        assert_eq!(code.parity_polynomial().degree(), Some(4));
        assert_eq!(code.kind(), CyclicKind::Bch);
        assert_eq!(code.design_distance(), 3);
        assert_eq!(code.base().distance(), Distance::Known(3));
    }

    #[test]
    fn test_matrices_are_orthogonal() {
        for (q, n, values) in [(2, 15, vec![1, 5]), (3, 13, vec![1]), (4, 5, vec![1]), (2, 21, vec![1, 3, 7])] {
            let code = CyclicCode::new(q, n, &values).unwrap();
            let g = code.base().generator_matrix();
            let h = code.base().parity_check_matrix();
            assert!(g.mul(&h.transpose()).unwrap().is_zero());
            assert_eq!(code.base().dimension() + code.defining_set().len(), n);
        }
    }

    #[test]
    fn test_idempotent_properties() {
        let code = CyclicCode::new(2, 15, &[1, 3]).unwrap();
        let field = Arc::clone(code.base().field());
        let modulus = Polynomial::x_n_minus_one(Arc::clone(&field), 15);
        let e = code.idempotent();
        assert_eq!(e.multiply(e).rem(&modulus).unwrap(), *e);
        // e generates the same ideal as g
        assert_eq!(e.gcd(&modulus).unwrap(), *code.generator_polynomial());
    }

    #[test]
    fn test_non_bch_cyclic_code() {
        // D = C0 u C5 = {0, 5, 10}: no run of consecutive exponents generates it
        let code = CyclicCode::new(2, 15, &[0, 5]).unwrap();
        assert_eq!(code.kind(), CyclicKind::Cyclic);
        assert_eq!(code.design_distance(), 2);
        assert_eq!(code.offset(), 0);
        assert_eq!(code.base().dimension(), 12);
    }

    #[test]
    fn test_bch_recognised_from_any_maximal_run() {
        // D = C1 u C5 = {1,2,4,5,8,10}: the run {4,5} generates all of it
        let code = CyclicCode::new(2, 15, &[1, 5]).unwrap();
        assert_eq!(code.kind(), CyclicKind::Bch);
        assert_eq!(code.design_distance(), 3);
        assert_eq!(code.offset(), 1);
    }

    #[test]
    fn test_reed_solomon_over_extension_field() {
        let code = CyclicCode::new(8, 7, &[1, 2]).unwrap();
        assert_eq!(code.kind(), CyclicKind::ReedSolomon);
        assert_eq!(code.base().dimension(), 5);
        assert_eq!(code.base().distance(), Distance::Known(3));
    }

    #[test]
    fn test_from_generator_polynomial() {
        let field = GaloisField::new(2).unwrap();
        let g = Polynomial::new(Arc::clone(&field), vec![1, 1, 0, 1]);
        let code = CyclicCode::from_generator_polynomial(&g, 7, &Config::default()).unwrap();
        assert_eq!(code.defining_set(), &[1, 2, 4]);
        assert_eq!(code.generator_polynomial(), &g);

        let not_a_divisor = Polynomial::new(field, vec![1, 1, 1]);
        assert!(CyclicCode::from_generator_polynomial(&not_a_divisor, 7, &Config::default()).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(CyclicCode::new(6, 5, &[1]), Err(Error::InvalidField(6))));
        assert!(matches!(CyclicCode::new(2, 1, &[0]), Err(Error::InvalidLength(_))));
        assert!(matches!(CyclicCode::new(1, 5, &[1]), Err(Error::InvalidLength(_))));
        assert!(matches!(CyclicCode::new(0, 5, &[1]), Err(Error::InvalidLength(_))));
        assert!(matches!(CyclicCode::bch(1, 5, 2, 1), Err(Error::InvalidLength(_))));
        assert!(matches!(CyclicCode::new(2, 14, &[1]), Err(Error::InvalidParameter(_))));
        // Every residue in the defining set
        assert!(CyclicCode::new(2, 7, &[0, 1, 3]).is_err());
    }

    #[test]
    fn test_field_size_limit() {
        let config = Config::new().with_max_field_order(64);
        // ord_23(2) = 11, so GF(2^11) is needed
        assert!(CyclicCode::new_with_config(2, 23, &[1], &config).is_err());
        assert!(CyclicCode::new_with_config(2, 21, &[1], &config).is_ok());
    }

    #[test]
    fn test_invalid_cosets_rejected() {
        let field = GaloisField::new(2).unwrap();
        let config = Config::default();
        assert!(CyclicCode::from_cosets(Arc::clone(&field), 7, vec![vec![1, 2]], &config).is_err());
        assert!(CyclicCode::from_cosets(
            Arc::clone(&field),
            7,
            vec![vec![1, 2, 4], vec![2, 4, 1]],
            &config
        )
        .is_err());
        assert!(CyclicCode::from_cosets(field, 7, vec![vec![4, 1, 2]], &config).is_ok());
    }

    #[test]
    fn test_full_space_cyclic_code() {
        let field = GaloisField::new(3).unwrap();
        let code = CyclicCode::from_cosets(field, 4, Vec::new(), &Config::default()).unwrap();
        assert_eq!(code.base().dimension(), 4);
        assert_eq!(code.kind(), CyclicKind::Cyclic);
        assert_eq!(code.base().distance(), Distance::Known(1));
    }

    #[test]
    fn test_encode_polynomial() {
        let code = CyclicCode::new(2, 7, &[1]).unwrap();
        let c = code.encode_polynomial(&[1, 0, 1, 1]).unwrap();
        assert!(code.base().is_codeword(&c.to_vector(7)).unwrap());
        assert!(code.encode_polynomial(&[1]).is_err());
    }
}
