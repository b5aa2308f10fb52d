//! Gröbner bases and ideal arithmetic for Tate algebras over p-adic fields
//!
//! This crate is the user-facing surface of the tatealg workspace; the
//! engine lives in `tatealg-core` and is re-exported here.
//!
//! # Examples
//!
//! ```rust
//! use tatealg::prelude::*;
//!
//! let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
//! let f = algebra.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
//! let g = algebra.series(&[(5, vec![2, 1]), (3, vec![0, 0])]);
//! let ideal = algebra.ideal(vec![f.clone(), g]);
//!
//! let basis = ideal.groebner_basis().unwrap();
//! assert_eq!(basis.len(), 3);
//! assert!(ideal.contains(&f).unwrap());
//! ```

pub use tatealg_core::{
    CancelToken, GroebnerAlgorithm, GroebnerConfig, Monomial, MonomialOrder, TateAlgebra,
    TateError, TateIdeal, TateResult, TateSeries, TateTerm,
};

pub use tatealg_core::{core, error, groebner, ideal};

/// Convenience prelude re-exported from the core crate
pub mod prelude {
    pub use tatealg_core::prelude::*;
}
