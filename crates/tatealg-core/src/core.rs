//! Core algebraic types: coefficients, terms, series, and the ambient algebra

pub mod algebra;
pub mod coefficient;
pub mod series;
pub mod term;

pub use algebra::TateAlgebra;
pub use series::TateSeries;
pub use term::{Monomial, MonomialOrder, TateTerm};
