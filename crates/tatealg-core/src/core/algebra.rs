//! The ambient Tate algebra
//!
//! A `TateAlgebra` fixes the uniformizer, the variables, the default
//! precision cap, the monomial order, and whether elements live over the
//! fraction field or over the ring of integers. It is a cheap-to-clone
//! handle; elements hold one and use it for all valuation-aware operations.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use super::series::TateSeries;
use super::term::{Monomial, MonomialOrder, TateTerm};
use crate::error::{TateError, TateResult};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct AlgebraInner {
    p: BigInt,
    var_names: Vec<String>,
    default_prec: i64,
    order: MonomialOrder,
    integral_base: bool,
}

/// Handle to a Tate algebra K{x₁,…,xₙ} or its ring of integers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TateAlgebra {
    inner: Arc<AlgebraInner>,
}

impl PartialEq for TateAlgebra {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for TateAlgebra {}

impl TateAlgebra {
    /// Create a Tate algebra over Q_p with the given variables and default
    /// precision cap, using the graded reverse lexicographic order
    ///
    /// The uniformizer must be a prime; this is the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tatealg_core::TateAlgebra;
    ///
    /// let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
    /// assert_eq!(algebra.num_vars(), 2);
    /// ```
    pub fn new(p: u64, var_names: &[&str], default_prec: i64) -> TateResult<Self> {
        Self::with_order(p, var_names, default_prec, MonomialOrder::Grevlex)
    }

    /// Create a Tate algebra with an explicit monomial order
    pub fn with_order(
        p: u64,
        var_names: &[&str],
        default_prec: i64,
        order: MonomialOrder,
    ) -> TateResult<Self> {
        if default_prec <= 0 {
            return Err(TateError::InvalidPrecision {
                requested: default_prec,
            });
        }
        debug_assert!(p >= 2, "uniformizer must be a prime");
        Ok(Self {
            inner: Arc::new(AlgebraInner {
                p: BigInt::from(p),
                var_names: var_names.iter().map(|s| s.to_string()).collect(),
                default_prec,
                order,
                integral_base: false,
            }),
        })
    }

    /// The ring of integers of this algebra (same variables and precision)
    pub fn integer_ring(&self) -> Self {
        if self.inner.integral_base {
            return self.clone();
        }
        Self {
            inner: Arc::new(AlgebraInner {
                p: self.inner.p.clone(),
                var_names: self.inner.var_names.clone(),
                default_prec: self.inner.default_prec,
                order: self.inner.order,
                integral_base: true,
            }),
        }
    }

    /// The fraction-field version of this algebra
    pub fn fraction_field(&self) -> Self {
        if !self.inner.integral_base {
            return self.clone();
        }
        Self {
            inner: Arc::new(AlgebraInner {
                p: self.inner.p.clone(),
                var_names: self.inner.var_names.clone(),
                default_prec: self.inner.default_prec,
                order: self.inner.order,
                integral_base: false,
            }),
        }
    }

    /// The uniformizer p
    pub fn uniformizer(&self) -> &BigInt {
        &self.inner.p
    }

    pub fn num_vars(&self) -> usize {
        self.inner.var_names.len()
    }

    pub fn variable_names(&self) -> &[String] {
        &self.inner.var_names
    }

    /// The default absolute precision cap for freshly built elements
    pub fn precision_cap(&self) -> i64 {
        self.inner.default_prec
    }

    pub fn monomial_order(&self) -> MonomialOrder {
        self.inner.order
    }

    /// Whether the base is the ring of integers rather than the field
    pub fn integral_base(&self) -> bool {
        self.inner.integral_base
    }

    /// The zero element at the default precision
    pub fn zero(&self) -> TateSeries {
        TateSeries::from_terms(self.clone(), Vec::new(), self.precision_cap())
    }

    /// The unit element at the default precision
    pub fn one(&self) -> TateSeries {
        self.series(&[(1, vec![0; self.num_vars()])])
    }

    /// The multiplicative identity term of the term monoid
    pub fn term_one(&self) -> TateTerm {
        TateTerm::one(self.num_vars())
    }

    /// Build an element from integer coefficients and exponent vectors
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tatealg_core::TateAlgebra;
    ///
    /// let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
    /// // 3*x^2 + 5*x*y^2
    /// let f = algebra.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
    /// assert_eq!(f.valuation(), 0);
    /// ```
    pub fn series(&self, terms: &[(i64, Vec<usize>)]) -> TateSeries {
        let rational: Vec<(BigRational, Vec<usize>)> = terms
            .iter()
            .map(|(c, e)| (BigRational::from_integer(BigInt::from(*c)), e.clone()))
            .collect();
        self.series_from_rationals(&rational)
    }

    /// Build an element from rational coefficients and exponent vectors
    pub fn series_from_rationals(&self, terms: &[(BigRational, Vec<usize>)]) -> TateSeries {
        let soup: Vec<TateTerm> = terms
            .iter()
            .filter_map(|(c, e)| {
                debug_assert_eq!(e.len(), self.num_vars());
                TateTerm::new(c.clone(), Monomial::new(e.clone()), self.uniformizer())
            })
            .collect();
        TateSeries::from_terms(self.clone(), soup, self.precision_cap())
    }

    /// A single-term element, `None` for a zero coefficient
    pub fn monomial(&self, coefficient: i64, exponents: Vec<usize>) -> Option<TateSeries> {
        if coefficient == 0 {
            return None;
        }
        Some(self.series(&[(coefficient, exponents)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebra_creation() {
        let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        assert_eq!(algebra.num_vars(), 2);
        assert_eq!(algebra.precision_cap(), 10);
        assert!(!algebra.integral_base());
        assert_eq!(algebra.monomial_order(), MonomialOrder::Grevlex);
    }

    #[test]
    fn test_invalid_precision_rejected() {
        let err = TateAlgebra::new(3, &["x"], 0).unwrap_err();
        assert_eq!(err, TateError::InvalidPrecision { requested: 0 });
        let err = TateAlgebra::new(3, &["x"], -5).unwrap_err();
        assert_eq!(err, TateError::InvalidPrecision { requested: -5 });
    }

    #[test]
    fn test_integer_ring_round_trip() {
        let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let ring = algebra.integer_ring();
        assert!(ring.integral_base());
        assert_eq!(ring.fraction_field(), algebra);
        assert_ne!(ring, algebra);
    }

    #[test]
    fn test_element_constructors() {
        let algebra = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        assert!(algebra.zero().is_zero());
        assert!(!algebra.one().is_zero());
        assert_eq!(algebra.one().valuation(), 0);
        assert!(algebra.monomial(0, vec![1, 0]).is_none());
        let x = algebra.monomial(1, vec![1, 0]).unwrap();
        assert_eq!(x.leading_term().unwrap().monomial().exponents, vec![1, 0]);
    }
}
