//! # Linear Codes
//!
//! This module provides the code entities of the crate: the generic
//! [`LinearCode`], the cyclic family ([`CyclicCode`], classified as plain
//! cyclic, BCH or Reed-Solomon after construction), and constructors for the
//! classical families built on top of them.
//!
//! ## Families
//!
//! - Cyclic codes from cyclotomic cosets or a generator polynomial
//! - BCH codes from a designed distance and offset
//! - Reed-Solomon codes over `GF(q)` of length `q - 1`
//! - Hamming and simplex codes over any field
//! - Binary Reed-Muller codes
//! - Binary and ternary Golay codes and their extensions
//! - Repetition codes

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bounds::{singleton_bound, Distance, DistanceBounds};
use crate::error::Result;
use crate::galois::GaloisField;
use crate::matrix::FieldMatrix;

// Submodules
mod bch;
mod cyclic;
mod golay;
mod hamming;
mod linear;
mod reed_muller;
mod reed_solomon;

// Public exports
pub use cyclic::{CyclicCode, CyclicKind};
pub(crate) use cyclic::build as build_cyclic;
pub use golay::{extended_golay_code, golay_code, repetition_code};
pub use hamming::{hamming_code, simplex_code};
pub use linear::LinearCode;
pub use reed_muller::reed_muller_code;

/// Enum representing the kinds of code the crate constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeType {
    /// Generic linear code
    Linear,
    /// Cyclic code not recognised as BCH
    Cyclic,
    /// BCH code
    Bch,
    /// Reed-Solomon code
    ReedSolomon,
    /// Hamming code
    Hamming,
    /// Simplex code
    Simplex,
    /// Binary Reed-Muller code
    ReedMuller,
    /// Golay code or extended Golay code
    Golay,
    /// Repetition code
    Repetition,
}

/// Trait defining the interface shared by every code entity
pub trait Code: Debug + Send + Sync {
    /// Returns the type of this code
    fn code_type(&self) -> CodeType;

    /// Returns the underlying linear code
    fn as_linear(&self) -> &LinearCode;

    /// Returns the underlying linear code for bound narrowing
    fn as_linear_mut(&mut self) -> &mut LinearCode;

    /// Returns a short description such as `[7, 4, 3] Hamming code over GF(2)`
    fn name(&self) -> String {
        let linear = self.as_linear();
        let distance = match linear.distance() {
            Distance::Known(d) => d.to_string(),
            Distance::Unknown => format!("{}..{}", linear.lower_bound(), linear.upper_bound()),
        };
        format!(
            "[{}, {}, {}] {:?} code over GF({})",
            linear.length(),
            linear.dimension(),
            distance,
            self.code_type(),
            linear.field().order()
        )
    }

    /// Base field
    fn field(&self) -> &Arc<GaloisField> {
        self.as_linear().field()
    }

    /// Code length `n`
    fn length(&self) -> usize {
        self.as_linear().length()
    }

    /// Dimension `k`
    fn dimension(&self) -> usize {
        self.as_linear().dimension()
    }

    /// Minimum distance, if known
    fn distance(&self) -> Distance {
        self.as_linear().distance()
    }

    /// Distance bounds
    fn bounds(&self) -> &DistanceBounds {
        self.as_linear().bounds()
    }

    /// Generator matrix
    fn generator_matrix(&self) -> &FieldMatrix {
        self.as_linear().generator_matrix()
    }

    /// Parity-check matrix
    fn parity_check_matrix(&self) -> &FieldMatrix {
        self.as_linear().parity_check_matrix()
    }

    /// Information rate `k / n`
    fn rate(&self) -> f64 {
        self.dimension() as f64 / self.length() as f64
    }

    /// Singleton bound `n - k + 1`
    fn singleton_bound(&self) -> usize {
        singleton_bound(self.length(), self.dimension())
    }

    /// Returns true if the distance is known to meet the Singleton bound
    fn is_mds(&self) -> bool {
        self.distance().known() == Some(self.singleton_bound())
    }

    /// Fixes the exact minimum distance
    fn set_distance(&mut self, d: usize) -> Result<()> {
        self.as_linear_mut().set_distance(d)
    }
}

impl Code for LinearCode {
    fn code_type(&self) -> CodeType {
        self.family()
    }

    fn as_linear(&self) -> &LinearCode {
        self
    }

    fn as_linear_mut(&mut self) -> &mut LinearCode {
        self
    }
}

impl Code for CyclicCode {
    fn code_type(&self) -> CodeType {
        match self.kind() {
            CyclicKind::Cyclic => CodeType::Cyclic,
            CyclicKind::Bch => CodeType::Bch,
            CyclicKind::ReedSolomon => CodeType::ReedSolomon,
        }
    }

    fn as_linear(&self) -> &LinearCode {
        self.base()
    }

    fn as_linear_mut(&mut self) -> &mut LinearCode {
        self.base_mut()
    }
}
