//! Galois Field implementation for finite field arithmetic.
//!
//! This module provides the finite fields `GF(p^m)` that every code in the
//! crate is defined over. Elements are stored as `u32` codes: the radix-`p`
//! digits of a code are the coefficients of the element in the polynomial
//! basis `1, x, x^2, ...`, so the prime subfield element `c` has code `c` in
//! every field of characteristic `p`. Multiplication goes through exp/log
//! tables generated from a primitive modulus.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use num_integer::Integer;
use parking_lot::Mutex;

use crate::error::{Error, Result};

pub mod polynomial;

pub use polynomial::Polynomial;

/// The maximum supported field order.
pub const MAX_FIELD_ORDER: usize = 1 << 24;

/// A Galois Field implementation for finite field arithmetic.
#[derive(Clone)]
pub struct GaloisField {
    /// The prime characteristic p.
    characteristic: u32,

    /// Extension degree m over the prime field.
    degree: u32,

    /// The number of elements, p^m.
    order: u32,

    /// Monic primitive modulus, lowest degree first, length m + 1.
    modulus: Vec<u32>,

    /// Exponential table (maps power of primitive element to field element),
    /// doubled so that log sums never need reducing.
    exp_table: Vec<u32>,

    /// Logarithm table (maps field element to power of primitive element).
    log_table: Vec<u32>,
}

/// Tables produced by the primitive-polynomial search.
#[derive(Debug)]
struct GaloisTables {
    characteristic: u32,
    degree: u32,
    /// Primitive modulus, lowest degree first
    modulus: Vec<u32>,
    exp_table: Vec<u32>,
    log_table: Vec<u32>,
}

// Fields are immutable once built, so each (p, m) is built once per process
lazy_static! {
    static ref FIELD_CACHE: Mutex<HashMap<(u32, u32), Arc<GaloisField>>> =
        Mutex::new(HashMap::new());
}

/// Splits `q` into `(p, m)` with `q = p^m` and `p` prime.
///
/// Returns `None` when `q` is not a prime power.
pub fn prime_power(q: usize) -> Option<(u32, u32)> {
    if q < 2 {
        return None;
    }
    let mut p = 2usize;
    while p * p <= q && q % p != 0 {
        p += 1;
    }
    if q % p != 0 {
        // q itself is prime
        p = q;
    }
    let mut rest = q;
    let mut m = 0u32;
    while rest % p == 0 {
        rest /= p;
        m += 1;
    }
    if rest != 1 {
        return None;
    }
    Some((u32::try_from(p).ok()?, m))
}

impl GaloisField {
    /// Returns the field with `order` elements.
    ///
    /// Fields are cached, so asking twice for the same order returns the same
    /// shared instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if `order` is not a prime power and
    /// [`Error::InvalidParameter`] if it exceeds [`MAX_FIELD_ORDER`].
    pub fn new(order: usize) -> Result<Arc<Self>> {
        let (p, m) = prime_power(order).ok_or(Error::InvalidField(order))?;
        Self::from_prime_power(p, m)
    }

    /// Returns the field `GF(p^m)`.
    pub fn from_prime_power(p: u32, m: u32) -> Result<Arc<Self>> {
        if m == 0 || prime_power(p as usize) != Some((p, 1)) {
            return Err(Error::InvalidParameter(format!(
                "GF({}^{}) is not a field: characteristic must be prime and degree positive",
                p, m
            )));
        }
        let order = num_traits::checked_pow(p as usize, m as usize)
            .filter(|&order| order <= MAX_FIELD_ORDER)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "GF({}^{}) exceeds the maximum field order {}",
                    p, m, MAX_FIELD_ORDER
                ))
            })?;

        if let Some(field) = FIELD_CACHE.lock().get(&(p, m)) {
            return Ok(Arc::clone(field));
        }

        let tables = Self::generate_tables(p, m, order as u32)?;
        let field = Arc::new(Self::from_tables(tables));
        tracing::debug!(
            "built GF({}^{}) with modulus {:?}",
            p,
            m,
            field.modulus
        );

        // Another thread may have raced us; keep whichever landed first.
        let mut cache = FIELD_CACHE.lock();
        Ok(Arc::clone(cache.entry((p, m)).or_insert(field)))
    }

    fn from_tables(tables: GaloisTables) -> Self {
        let order = tables.log_table.len() as u32;
        Self {
            characteristic: tables.characteristic,
            degree: tables.degree,
            order,
            modulus: tables.modulus,
            exp_table: tables.exp_table,
            log_table: tables.log_table,
        }
    }

    /// Finds the first primitive monic polynomial of degree `m` over `GF(p)`
    /// and generates the exponential and logarithm tables from it.
    ///
    /// Candidates are tried in increasing order of the code of their tail
    /// `c_0 + c_1 x + ... + c_{m-1} x^{m-1}`. A candidate is primitive exactly
    /// when `x` has multiplicative order `p^m - 1` modulo it.
    fn generate_tables(p: u32, m: u32, order: u32) -> Result<GaloisTables> {
        let element_count = (order - 1) as usize;
        let width = m as usize;

        for tail_code in 1..order {
            let tail = Self::digits(tail_code, p, width);
            if tail[0] == 0 {
                continue;
            }

            let mut exp_table = Vec::with_capacity(2 * element_count);
            let mut state = vec![0u32; width];
            state[0] = 1;
            let mut primitive = true;

            for i in 0..element_count {
                let code = Self::encode(&state, p);
                if i > 0 && code == 1 {
                    primitive = false;
                    break;
                }
                exp_table.push(code);

                // Multiply by x and reduce with x^m = -tail
                let top = state[width - 1];
                for j in (1..width).rev() {
                    state[j] = state[j - 1];
                }
                state[0] = 0;
                if top != 0 {
                    for j in 0..width {
                        let reduction = (top as u64 * tail[j] as u64 % p as u64) as u32;
                        state[j] = (state[j] + p - reduction) % p;
                    }
                }
            }

            if !primitive || Self::encode(&state, p) != 1 {
                continue;
            }

            // Extend the exp table to handle wrap-around
            for i in 0..element_count {
                let value = exp_table[i];
                exp_table.push(value);
            }

            let mut log_table = vec![0u32; order as usize];
            for (i, &value) in exp_table.iter().take(element_count).enumerate() {
                log_table[value as usize] = i as u32;
            }

            let mut modulus = tail;
            modulus.push(1);

            return Ok(GaloisTables {
                characteristic: p,
                degree: m,
                modulus,
                exp_table,
                log_table,
            });
        }

        Err(Error::internal(format!(
            "no primitive polynomial of degree {} over GF({})",
            m, p
        )))
    }

    fn digits(mut code: u32, p: u32, width: usize) -> Vec<u32> {
        let mut digits = vec![0u32; width];
        for digit in digits.iter_mut() {
            *digit = code % p;
            code /= p;
        }
        digits
    }

    fn encode(digits: &[u32], p: u32) -> u32 {
        digits.iter().rev().fold(0u32, |acc, &d| acc * p + d)
    }

    /// Returns the characteristic p.
    pub fn characteristic(&self) -> u32 {
        self.characteristic
    }

    /// Returns the extension degree m over the prime field.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Returns the number of elements p^m.
    pub fn order(&self) -> usize {
        self.order as usize
    }

    /// Returns the number of elements in the multiplicative group.
    pub fn element_count(&self) -> usize {
        self.order as usize - 1
    }

    /// Returns the primitive modulus, lowest degree first.
    pub fn modulus(&self) -> &[u32] {
        &self.modulus
    }

    /// Returns the primitive element used to build the tables.
    pub fn primitive_element(&self) -> u32 {
        self.exp_table[1 % self.exp_table.len()]
    }

    /// Returns true if `a` is a valid element code of this field.
    #[inline]
    pub fn contains(&self, a: u32) -> bool {
        a < self.order
    }

    /// Add two elements in the Galois field.
    #[inline]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        let p = self.characteristic;
        if p == 2 {
            return a ^ b;
        }
        if self.degree == 1 {
            return ((a as u64 + b as u64) % p as u64) as u32;
        }

        let (mut a, mut b) = (a, b);
        let mut result = 0u32;
        let mut place = 1u32;
        while a > 0 || b > 0 {
            result += ((a % p + b % p) % p) * place;
            a /= p;
            b /= p;
            if a > 0 || b > 0 {
                place *= p;
            }
        }
        result
    }

    /// Additive inverse.
    #[inline]
    pub fn negate(&self, a: u32) -> u32 {
        let p = self.characteristic;
        if p == 2 {
            return a;
        }
        if self.degree == 1 {
            return (p - a % p) % p;
        }

        let mut a = a;
        let mut result = 0u32;
        let mut place = 1u32;
        while a > 0 {
            result += ((p - a % p) % p) * place;
            a /= p;
            if a > 0 {
                place *= p;
            }
        }
        result
    }

    /// Subtract two elements in the Galois field.
    #[inline]
    pub fn subtract(&self, a: u32, b: u32) -> u32 {
        self.add(a, self.negate(b))
    }

    /// Multiply two elements in the Galois field using lookup tables.
    #[inline]
    pub fn multiply(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = self.log_table[a as usize] as usize + self.log_table[b as usize] as usize;
        self.exp_table[log_sum]
    }

    /// Compute the multiplicative inverse of a field element.
    ///
    /// # Errors
    ///
    /// Returns an error for zero, which has no inverse.
    pub fn inverse(&self, value: u32) -> Result<u32> {
        if value == 0 {
            return Err(Error::GaloisField(
                "Zero has no multiplicative inverse".to_string(),
            ));
        }
        let element_count = self.element_count();
        let log_value = self.log_table[value as usize] as usize;
        Ok(self.exp_table[(element_count - log_value) % element_count])
    }

    /// Divide one element by another in the Galois field.
    ///
    /// # Errors
    ///
    /// Returns an error if the denominator is zero.
    pub fn divide(&self, a: u32, b: u32) -> Result<u32> {
        if b == 0 {
            return Err(Error::GaloisField("Division by zero".to_string()));
        }
        Ok(self.multiply(a, self.inverse(b)?))
    }

    /// Raise a field element to a power. `0^0 = 1` by convention.
    pub fn power(&self, a: u32, n: u64) -> u32 {
        if a == 0 {
            return if n > 0 { 0 } else { 1 };
        }
        let log_a = self.log_table[a as usize] as u64;
        let log_result = (log_a * (n % self.element_count() as u64)) % self.element_count() as u64;
        self.exp_table[log_result as usize]
    }

    /// Returns the primitive element raised to `power`; negative powers wrap.
    pub fn exp(&self, power: i64) -> u32 {
        let element_count = self.element_count() as i64;
        self.exp_table[power.rem_euclid(element_count) as usize]
    }

    /// Compute the discrete logarithm of a non-zero field element.
    pub fn log(&self, value: u32) -> Result<u32> {
        if value == 0 || !self.contains(value) {
            return Err(Error::GaloisField(format!(
                "Logarithm undefined for element {}",
                value
            )));
        }
        Ok(self.log_table[value as usize])
    }

    /// Multiplicative order of a non-zero element.
    pub fn element_order(&self, value: u32) -> Result<usize> {
        let log = self.log(value)? as usize;
        let element_count = self.element_count();
        Ok(element_count / element_count.gcd(&log))
    }

    /// Embeds this field into `ext`, which must be an extension of it.
    ///
    /// The embedding sends this field's primitive element to the first root
    /// of its modulus found among the subfield elements of `ext`, so it is a
    /// ring homomorphism and not merely a multiplicative one.
    pub fn embedding_into(&self, ext: &GaloisField) -> Result<SubfieldEmbedding> {
        if ext.characteristic != self.characteristic || ext.degree % self.degree != 0 {
            return Err(Error::GaloisField(format!(
                "GF({}) is not a subfield of GF({})",
                self.order, ext.order
            )));
        }

        if self == ext {
            let image: Vec<u32> = (0..self.order).collect();
            return Ok(SubfieldEmbedding::from_image(image));
        }

        let q_minus_one = self.element_count();
        let step = (ext.element_count() / q_minus_one) as i64;
        let beta = (1..=q_minus_one.max(1))
            .filter(|j| j.gcd(&q_minus_one) == 1)
            .map(|j| ext.exp(j as i64 * step))
            .find(|&candidate| {
                // Modulus digits are prime-field codes, valid in ext as-is
                let value = self
                    .modulus
                    .iter()
                    .rev()
                    .fold(0u32, |acc, &c| ext.add(ext.multiply(acc, candidate), c));
                value == 0
            })
            .ok_or_else(|| {
                Error::internal(format!(
                    "modulus of GF({}) has no root in GF({})",
                    self.order, ext.order
                ))
            })?;

        let mut image = vec![0u32; self.order as usize];
        for i in 0..q_minus_one {
            image[self.exp_table[i] as usize] = ext.power(beta, i as u64);
        }
        Ok(SubfieldEmbedding::from_image(image))
    }
}

impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.characteristic == other.characteristic
            && self.degree == other.degree
            && self.modulus == other.modulus
    }
}

impl Eq for GaloisField {}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("characteristic", &self.characteristic)
            .field("degree", &self.degree)
            .field("modulus", &self.modulus)
            .finish()
    }
}

/// Injective ring homomorphism from a field into one of its extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfieldEmbedding {
    image: Vec<u32>,
    preimage: HashMap<u32, u32>,
}

impl SubfieldEmbedding {
    fn from_image(image: Vec<u32>) -> Self {
        let preimage = image
            .iter()
            .enumerate()
            .map(|(a, &b)| (b, a as u32))
            .collect();
        Self { image, preimage }
    }

    /// Image of a subfield element in the extension.
    pub fn embed(&self, a: u32) -> Result<u32> {
        self.image.get(a as usize).copied().ok_or_else(|| {
            Error::GaloisField(format!("Element {} is outside the subfield", a))
        })
    }

    /// Preimage of an extension element, or `None` when it lies outside the subfield.
    pub fn restrict(&self, b: u32) -> Option<u32> {
        self.preimage.get(&b).copied()
    }
}
