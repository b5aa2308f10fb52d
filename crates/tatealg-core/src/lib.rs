//! Core engine for ideals in Tate algebras over p-adic fields
//!
//! A Tate algebra over a p-adic field is the ring of formal power series
//! whose coefficients tend to zero as the total degree grows; its elements
//! carry a Gauss valuation and a finite absolute precision. This crate
//! implements the ideal-theoretic engine for such algebras: valuation-aware
//! Gröbner bases (Buchberger with field and integral variants, plus a
//! signature-based F5 variant) and the operations built on the canonical
//! basis — membership, inclusion, comparison, saturation under the
//! uniformizer, and the is-saturated predicate.

pub mod core;
pub mod error;
pub mod groebner;
pub mod ideal;

// Curated re-exports (no wildcards for maintainability)

// Core algebraic types
pub use crate::core::{Monomial, MonomialOrder, TateAlgebra, TateSeries, TateTerm};

// Engine surface
pub use crate::groebner::{CancelToken, GroebnerAlgorithm, GroebnerConfig};
pub use crate::ideal::TateIdeal;

// Error types
pub use crate::error::{TateError, TateResult};

/// Convenience prelude for common imports
///
/// Import with `use tatealg_core::prelude::*;` to access the types needed
/// for typical ideal-theoretic computations.
pub mod prelude {
    pub use crate::core::{Monomial, MonomialOrder, TateAlgebra, TateSeries, TateTerm};
    pub use crate::error::{TateError, TateResult};
    pub use crate::groebner::{CancelToken, GroebnerAlgorithm, GroebnerConfig};
    pub use crate::ideal::TateIdeal;
}
