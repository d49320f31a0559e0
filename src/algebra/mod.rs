//! # Code Algebra
//!
//! Operators deriving new codes from existing ones. Every operator returns a
//! freshly constructed code and leaves its inputs untouched.
//!
//! ## Operators
//!
//! - Subcode test, dual, sum, intersection on [`LinearCode`]
//! - Direct sum and direct (Kronecker) product
//! - Puncturing, expurgation, augmentation, extension, shortening,
//!   lengthening, even-weight subcode and coordinate permutation
//! - Construction X, construction X3, the Plotkin `(u | u + v)` sum and the
//!   `(u + w | v + w | u + v + w)` construction
//! - Sum, intersection, dual and complement of cyclic codes through their
//!   defining sets
//!
//! Distance bounds of a derived code combine the bounds found by
//! constructing it with those implied by the operator.

use crate::codes::LinearCode;
use crate::error::{Error, Result};

mod construction;
mod cyclic;
mod linear;

pub use construction::{construction_uvw, construction_x, construction_x3, plotkin};

/// Narrows the bounds of a freshly derived code with the bounds implied by
/// the operator that produced it.
///
/// Both sets of bounds are valid for the same code, so a contradiction
/// signals an engine bug.
pub(crate) fn narrow(code: &mut LinearCode, lower: usize, upper: usize) -> Result<()> {
    code.set_upper_bound(upper).map_err(|e| {
        Error::internal(format!("derived upper bound {} contradicts construction: {}", upper, e))
    })?;
    code.set_lower_bound(lower).map_err(|e| {
        Error::internal(format!("derived lower bound {} contradicts construction: {}", lower, e))
    })?;
    Ok(())
}

/// Checks that two codes live over the same field.
pub(crate) fn check_same_field(a: &LinearCode, b: &LinearCode) -> Result<()> {
    if a.field() != b.field() {
        return Err(Error::FieldMismatch {
            left: a.field().order(),
            right: b.field().order(),
        });
    }
    Ok(())
}

/// Checks that two codes live in the same ambient space `GF(q)^n`.
pub(crate) fn check_same_space(a: &LinearCode, b: &LinearCode) -> Result<()> {
    check_same_field(a, b)?;
    if a.length() != b.length() {
        return Err(Error::precondition(format!(
            "codes of lengths {} and {} do not share an ambient space",
            a.length(),
            b.length()
        )));
    }
    Ok(())
}
