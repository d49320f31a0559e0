//! # codealgebra
//!
//! codealgebra constructs linear error-correcting codes over finite fields
//! and derives new codes from existing ones. Every code carries its
//! generator and parity-check matrices, their systematic forms and typed
//! bounds on its minimum distance.
//!
//! ## Features
//!
//! - Systematic (standard) form of any matrix over `GF(q)` with column
//!   permutation tracking
//! - Cyclotomic cosets, defining sets and their duals
//! - BCH and Hartmann-Tzeng lower bounds on the minimum distance
//! - Cyclic, BCH and Reed-Solomon codes, classified after construction
//! - Hamming, simplex, Reed-Muller, Golay and repetition codes
//! - Dual, sum, intersection, direct sum and product, puncturing,
//!   shortening, extension and the X, X3 and Plotkin constructions
//! - Weight distributions and the MacWilliams identity
//!
//! ## Modules
//!
//! - `config`: Construction switches and resource limits
//! - `error`: Error type and result alias
//! - `galois`: Finite field arithmetic and polynomials
//! - `matrix`: Matrices over finite fields and the standard form
//! - `cyclotomic`: Cyclotomic cosets and defining sets
//! - `bounds`: Distance bounds and the BCH / Hartmann-Tzeng bound
//! - `weight`: Weight enumerators
//! - `codes`: Code entities and classical families
//! - `algebra`: Operators deriving new codes
//!
//! ## Example
//!
//! ```
//! use codealgebra::prelude::*;
//!
//! let code = CyclicCode::reed_solomon(13, 5, 1)?;
//! assert_eq!((code.length(), code.dimension()), (12, 8));
//! assert_eq!(code.distance(), Distance::Known(5));
//! # Ok::<(), codealgebra::Error>(())
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

// Re-export error types
pub use crate::error::{Error, Result};

// Modules
pub mod algebra;
pub mod bounds;
pub mod codes;
pub mod config;
pub mod cyclotomic;
pub mod error;
pub mod galois;
pub mod matrix;
pub mod weight;

pub mod prelude {
    //! Prelude module that re-exports commonly used types and functions.

    pub use crate::algebra::{construction_uvw, construction_x, construction_x3, plotkin};
    pub use crate::bounds::{find_bound, BoundReport, Distance, DistanceBounds};
    pub use crate::codes::{
        extended_golay_code, golay_code, hamming_code, reed_muller_code, repetition_code,
        simplex_code, Code, CodeType, CyclicCode, CyclicKind, LinearCode,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::galois::{GaloisField, Polynomial};
    pub use crate::matrix::{standard_form, FieldMatrix, StandardForm};
    pub use crate::weight::WeightEnumerator;
}
