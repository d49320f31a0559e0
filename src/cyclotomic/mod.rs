//! Cyclotomic cosets modulo `n`.
//!
//! The `q`-cyclotomic coset of `x` modulo `n` is the orbit
//! `{x, xq, xq^2, ...} mod n`. For `gcd(q, n) = 1` these orbits partition
//! `0..n`, and a set of exponents is the defining set of a cyclic code over
//! `GF(q)` exactly when it is a union of whole cosets.

use num_integer::Integer;

use crate::error::{Error, Result};

fn check_modulus(q: usize, n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidLength("modulus n must be positive".to_string()));
    }
    if q < 2 {
        return Err(Error::InvalidLength(format!("field size {} is below 2", q)));
    }
    if q.gcd(&n) != 1 {
        return Err(Error::InvalidParameter(format!(
            "gcd({}, {}) != 1, cyclotomic cosets do not partition the residues",
            q, n
        )));
    }
    Ok(())
}

/// The coset of `x` in generation order: `x mod n` first, then successive
/// multiples by `q` until the orbit closes.
pub fn cyclotomic_coset(x: usize, q: usize, n: usize) -> Result<Vec<usize>> {
    check_modulus(q, n)?;
    let start = x % n;
    let step = q % n;
    let mut coset = vec![start];
    let mut current = (start * step) % n;
    while current != start {
        coset.push(current);
        current = (current * step) % n;
    }
    Ok(coset)
}

/// Cosets of each value, skipping values whose coset was already produced.
///
/// Cosets appear in the order their first value appears in `values`.
pub fn defining_set_cosets(values: &[usize], q: usize, n: usize) -> Result<Vec<Vec<usize>>> {
    check_modulus(q, n)?;
    let mut covered = vec![false; n];
    let mut cosets = Vec::new();
    for &value in values {
        if covered[value % n] {
            continue;
        }
        let coset = cyclotomic_coset(value, q, n)?;
        for &c in &coset {
            covered[c] = true;
        }
        cosets.push(coset);
    }
    Ok(cosets)
}

/// Sorted union of the cosets of `values`.
pub fn defining_set(values: &[usize], q: usize, n: usize) -> Result<Vec<usize>> {
    Ok(flatten(&defining_set_cosets(values, q, n)?))
}

/// Sorted, deduplicated union of a collection of cosets.
pub fn flatten(cosets: &[Vec<usize>]) -> Vec<usize> {
    let mut set: Vec<usize> = cosets.iter().flatten().copied().collect();
    set.sort_unstable();
    set.dedup();
    set
}

/// First element of each coset.
pub fn representatives(cosets: &[Vec<usize>]) -> Vec<usize> {
    cosets.iter().filter_map(|c| c.first().copied()).collect()
}

/// The cosets partitioning `0..n` minus the union of `cosets`, in order of
/// their smallest element.
pub fn complement_cosets(q: usize, n: usize, cosets: &[Vec<usize>]) -> Result<Vec<Vec<usize>>> {
    check_modulus(q, n)?;
    let mut covered = vec![false; n];
    for &c in cosets.iter().flatten() {
        if c < n {
            covered[c] = true;
        }
    }
    let remaining: Vec<usize> = (0..n).filter(|&x| !covered[x]).collect();
    defining_set_cosets(&remaining, q, n)
}

/// Every coset modulo `n`, in order of their smallest element.
pub fn all_cosets(q: usize, n: usize) -> Result<Vec<Vec<usize>>> {
    complement_cosets(q, n, &[])
}

/// `{(n - i) mod n : i not in defining_set}`, sorted.
///
/// This is the defining set of the dual of the cyclic code with defining set
/// `defining_set`.
pub fn dual_defining_set(defining_set: &[usize], n: usize) -> Vec<usize> {
    let mut dual: Vec<usize> = (0..n)
        .filter(|i| !defining_set.contains(i))
        .map(|i| (n - i) % n)
        .collect();
    dual.sort_unstable();
    dual
}

/// Returns true if `set` is closed under multiplication by `q` modulo `n`.
pub fn is_q_closed(set: &[usize], q: usize, n: usize) -> bool {
    n > 0 && set.iter().all(|&x| x < n && set.contains(&((x * q) % n)))
}

/// Smallest `m >= 1` with `q^m = 1 (mod n)`, or `None` when `gcd(q, n) != 1`.
pub fn multiplicative_order(q: usize, n: usize) -> Option<usize> {
    if n == 0 || q.gcd(&n) != 1 {
        return None;
    }
    if n == 1 {
        return Some(1);
    }
    let step = q % n;
    let mut power = step;
    let mut m = 1;
    while power != 1 {
        power = (power * step) % n;
        m += 1;
    }
    Some(m)
}
