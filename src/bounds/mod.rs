//! Minimum distance bounds.
//!
//! This module holds the typed distance information carried by every code
//! ([`Distance`], [`DistanceBounds`]) and the BCH / Hartmann-Tzeng lower
//! bound computed from the defining set of a cyclic code ([`find_bound`]).

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::cyclotomic;
use crate::error::{Error, Result};

/// Minimum distance of a code: exact when known, otherwise only bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    /// The exact minimum distance.
    Known(usize),
    /// Only lower and upper bounds are available.
    Unknown,
}

impl Distance {
    /// The exact value, if known.
    pub fn known(self) -> Option<usize> {
        match self {
            Distance::Known(d) => Some(d),
            Distance::Unknown => None,
        }
    }

    /// Returns true if the exact value is known.
    pub fn is_known(self) -> bool {
        matches!(self, Distance::Known(_))
    }
}

/// Bounds `1 <= lower <= upper <= length` on the minimum distance.
///
/// The bounds can only be narrowed. Once `lower == upper` the distance is
/// known exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistanceBounds {
    length: usize,
    lower: usize,
    upper: usize,
}

impl DistanceBounds {
    /// Trivial bounds `[1, length]`.
    pub fn new(length: usize) -> Result<Self> {
        Self::with_bounds(length, 1, length)
    }

    /// Bounds `[lower, upper]` for a code of the given length.
    pub fn with_bounds(length: usize, lower: usize, upper: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidLength("code length must be positive".to_string()));
        }
        if lower < 1 || lower > upper || upper > length {
            return Err(Error::BoundViolation {
                lower: 1,
                upper: length,
                value: if lower < 1 || lower > length { lower } else { upper },
            });
        }
        Ok(Self {
            length,
            lower,
            upper,
        })
    }

    /// Code length the bounds refer to.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Lower bound.
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// The distance, known when the bounds meet.
    pub fn distance(&self) -> Distance {
        if self.lower == self.upper {
            Distance::Known(self.lower)
        } else {
            Distance::Unknown
        }
    }

    /// Raises the lower bound to `d`. A weaker value leaves the bounds unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundViolation`] if `d` exceeds the upper bound.
    pub fn set_lower_bound(&mut self, d: usize) -> Result<()> {
        if d > self.upper {
            return Err(self.violation(d));
        }
        self.lower = self.lower.max(d);
        Ok(())
    }

    /// Lowers the upper bound to `d`. A weaker value leaves the bounds unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundViolation`] if `d` is below the lower bound.
    pub fn set_upper_bound(&mut self, d: usize) -> Result<()> {
        if d < self.lower {
            return Err(self.violation(d));
        }
        self.upper = self.upper.min(d);
        Ok(())
    }

    /// Fixes the exact distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundViolation`] if `d` lies outside the current bounds.
    pub fn set_distance(&mut self, d: usize) -> Result<()> {
        if d < self.lower || d > self.upper {
            return Err(self.violation(d));
        }
        self.lower = d;
        self.upper = d;
        Ok(())
    }

    fn violation(&self, value: usize) -> Error {
        Error::BoundViolation {
            lower: self.lower,
            upper: self.upper,
            value,
        }
    }
}

/// Singleton bound `n - k + 1`.
pub fn singleton_bound(length: usize, dimension: usize) -> usize {
    length.saturating_sub(dimension) + 1
}

/// Result of [`find_bound`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundReport {
    /// BCH design distance: longest consecutive run in the defining set, plus one.
    pub design_distance: usize,
    /// First element of the first longest run.
    pub offset: usize,
    /// Hartmann-Tzeng bound; equals `design_distance` when no refinement applies.
    pub hartmann_tzeng: usize,
    /// Second step `c2` that achieved the Hartmann-Tzeng bound, if it improved.
    pub hartmann_tzeng_step: Option<usize>,
    /// Every maximal run as `(start, length)`, in order of start.
    pub runs: Vec<(usize, usize)>,
}

/// Computes the BCH bound of the cyclic code with the given defining-set
/// cosets and, when `refine` is set, the Hartmann-Tzeng refinement.
///
/// Runs of consecutive exponents are taken modulo `n`, so a run may wrap
/// past `n - 1` to `0`. Each run is scanned once from its first element, and
/// the run with the smallest starting exponent wins among runs of maximal
/// length. The refinement is tried on every maximal run: for a step `c2` with
/// `gcd(c2, n) < δ`, if the run shifted by `0, c2, ..., s*c2` stays inside
/// the defining set for some `s <= δ - 2`, then `δ + s` is a lower bound.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `n` is zero or a coset element is
/// not below `n`.
pub fn find_bound(n: usize, cosets: &[Vec<usize>], refine: bool) -> Result<BoundReport> {
    if n == 0 {
        return Err(Error::InvalidLength("code length must be positive".to_string()));
    }
    let set = cyclotomic::flatten(cosets);
    if let Some(&bad) = set.iter().find(|&&x| x >= n) {
        return Err(Error::InvalidParameter(format!(
            "defining set element {} is not below n = {}",
            bad, n
        )));
    }

    let mut member = vec![false; n];
    for &x in &set {
        member[x] = true;
    }

    if set.is_empty() {
        return Ok(BoundReport {
            design_distance: 1,
            offset: 0,
            hartmann_tzeng: 1,
            hartmann_tzeng_step: None,
            runs: Vec::new(),
        });
    }
    if set.len() == n {
        // Every residue is a root: only the zero word remains
        return Ok(BoundReport {
            design_distance: n + 1,
            offset: 0,
            hartmann_tzeng: n + 1,
            hartmann_tzeng_step: None,
            runs: vec![(0, n)],
        });
    }

    let mut longest = 0;
    let mut starts: Vec<usize> = Vec::new();
    let mut runs = Vec::new();
    for &x in &set {
        if member[(x + n - 1) % n] {
            continue;
        }
        let mut length = 0;
        while length < n && member[(x + length) % n] {
            length += 1;
        }
        runs.push((x, length));
        if length > longest {
            longest = length;
            starts.clear();
        }
        if length == longest {
            starts.push(x);
        }
    }

    let design_distance = longest + 1;
    let offset = starts
        .first()
        .copied()
        .ok_or_else(|| Error::internal("proper defining set has no run start"))?;
    let mut hartmann_tzeng = design_distance;
    let mut hartmann_tzeng_step = None;

    if refine {
        for &start in &starts {
            for c2 in 1..n {
                if c2.gcd(&n) >= design_distance {
                    continue;
                }
                let run_fits = |t: usize| {
                    (0..longest).all(|i| member[(start + i + t * c2) % n])
                };
                let s = (1..=design_distance - 2)
                    .take_while(|&t| run_fits(t))
                    .count();
                if design_distance + s > hartmann_tzeng {
                    hartmann_tzeng = design_distance + s;
                    hartmann_tzeng_step = Some(c2);
                }
            }
        }
        if hartmann_tzeng > design_distance {
            tracing::debug!(
                "Hartmann-Tzeng refinement raised the bound from {} to {} (c2 = {:?})",
                design_distance,
                hartmann_tzeng,
                hartmann_tzeng_step
            );
        }
    }

    Ok(BoundReport {
        design_distance,
        offset,
        hartmann_tzeng,
        hartmann_tzeng_step,
        runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyclotomic::defining_set_cosets;

    #[test]
    fn test_distance_bounds_narrowing() {
        let mut bounds = DistanceBounds::new(7).unwrap();
        assert_eq!(bounds.distance(), Distance::Unknown);
        bounds.set_lower_bound(3).unwrap();
        bounds.set_lower_bound(2).unwrap();
        assert_eq!(bounds.lower(), 3);
        bounds.set_upper_bound(4).unwrap();
        assert!(bounds.set_upper_bound(2).is_err());
        assert!(bounds.set_lower_bound(5).is_err());
        bounds.set_distance(3).unwrap();
        assert_eq!(bounds.distance(), Distance::Known(3));
        assert!(bounds.set_distance(4).is_err());
    }

    #[test]
    fn test_distance_bounds_validation() {
        assert!(DistanceBounds::new(0).is_err());
        assert!(DistanceBounds::with_bounds(5, 0, 3).is_err());
        assert!(DistanceBounds::with_bounds(5, 4, 3).is_err());
        assert!(DistanceBounds::with_bounds(5, 2, 6).is_err());
        let exact = DistanceBounds::with_bounds(5, 5, 5).unwrap();
        assert_eq!(exact.distance().known(), Some(5));
    }

    #[test]
    fn test_singleton_bound() {
        assert_eq!(singleton_bound(12, 8), 5);
        assert_eq!(singleton_bound(7, 7), 1);
    }

    #[test]
    fn test_bch_bound_binary_15() {
        // C1 u C3: run {1,2,3,4}, design distance 5
        let cosets = defining_set_cosets(&[1, 3], 2, 15).unwrap();
        let report = find_bound(15, &cosets, false).unwrap();
        assert_eq!(report.design_distance, 5);
        assert_eq!(report.offset, 1);
        assert_eq!(report.hartmann_tzeng, 5);
    }

    #[test]
    fn test_bch_bound_with_three_cosets() {
        // C1 u C3 u C5 = {1,2,3,4,5,6,8,9,10,12}: run {1..6}, δ = 7
        let cosets = defining_set_cosets(&[3, 4, 5], 2, 15).unwrap();
        let report = find_bound(15, &cosets, true).unwrap();
        assert_eq!(report.design_distance, 7);
        assert_eq!(report.offset, 1);
        assert!(report.hartmann_tzeng >= 7);
    }

    #[test]
    fn test_wrap_around_run() {
        // {0} u C1 mod 7 over GF(2): {0,1,2,4}, run 0,1,2 -> δ = 4
        let cosets = defining_set_cosets(&[0, 1], 2, 7).unwrap();
        let report = find_bound(7, &cosets, false).unwrap();
        assert_eq!(report.design_distance, 4);
        assert_eq!(report.offset, 0);

        // Set {5, 6, 0} wraps past n - 1
        let report = find_bound(7, &[vec![5, 6, 0]], false).unwrap();
        assert_eq!(report.design_distance, 4);
        assert_eq!(report.offset, 5);
    }

    #[test]
    fn test_first_maximal_run_wins() {
        let report = find_bound(11, &[vec![1, 2], vec![5, 6], vec![8]], false).unwrap();
        assert_eq!(report.design_distance, 3);
        assert_eq!(report.offset, 1);
        assert_eq!(report.runs, vec![(1, 2), (5, 2), (8, 1)]);
    }

    #[test]
    fn test_refinement_never_below_bch_bound() {
        // The refinement never falls below the BCH bound
        let cosets = defining_set_cosets(&[1, 5, 11], 2, 31).unwrap();
        let plain = find_bound(31, &cosets, false).unwrap();
        let refined = find_bound(31, &cosets, true).unwrap();
        assert!(refined.hartmann_tzeng >= plain.design_distance);
        assert_eq!(refined.design_distance, plain.design_distance);
    }

    #[test]
    fn test_hartmann_tzeng_known_example() {
        // Binary n = 21, D = C1 u C3 u C7 u C9: runs {1..4} and {6..9} tie
        let cosets = defining_set_cosets(&[1, 3, 7, 9], 2, 21).unwrap();
        let report = find_bound(21, &cosets, true).unwrap();
        assert_eq!(report.design_distance, 5);
        assert_eq!(report.offset, 1);
        assert!(report.hartmann_tzeng >= 5);
    }

    #[test]
    fn test_hartmann_tzeng_raises_quadratic_residue_bound() {
        // Binary n = 17, D = C1 = {1,2,4,8,9,13,15,16}: runs {1,2}, {8,9},
        // {15,16} are spaced by 7, so the bound rises from 3 to 4
        let cosets = defining_set_cosets(&[1], 2, 17).unwrap();
        let plain = find_bound(17, &cosets, false).unwrap();
        assert_eq!(plain.design_distance, 3);
        assert_eq!(plain.hartmann_tzeng, 3);
        assert_eq!(plain.hartmann_tzeng_step, None);

        let refined = find_bound(17, &cosets, true).unwrap();
        assert_eq!(refined.design_distance, 3);
        assert_eq!(refined.offset, 1);
        assert_eq!(refined.hartmann_tzeng, 4);
        assert_eq!(refined.hartmann_tzeng_step, Some(7));
    }

    #[test]
    fn test_hartmann_tzeng_strict_improvement() {
        // D = {1,2,3,5,6,7} mod 15 is not q-closed but exercises the search:
        // run {1,2,3} (δ = 4) shifted by 4 gives {5,6,7}, so bound 5.
        let report = find_bound(15, &[vec![1, 2, 3, 5, 6, 7]], true).unwrap();
        assert_eq!(report.design_distance, 4);
        assert_eq!(report.offset, 1);
        assert_eq!(report.hartmann_tzeng, 5);
        assert_eq!(report.hartmann_tzeng_step, Some(4));
    }

    #[test]
    fn test_degenerate_sets() {
        let report = find_bound(7, &[], true).unwrap();
        assert_eq!(report.design_distance, 1);
        let report = find_bound(3, &[vec![0], vec![1, 2]], true).unwrap();
        assert_eq!(report.design_distance, 4);
        assert!(find_bound(5, &[vec![7]], true).is_err());
    }
}
