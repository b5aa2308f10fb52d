//! Tate series arithmetic
//!
//! A Tate series is a finite sorted sum of terms together with an absolute
//! precision O(π^N): every term with valuation at least N is zero by
//! convention and never stored. The leading term is the greatest term under
//! the valuation-aware order, so the Gauss valuation of the series is the
//! valuation of its leading term.
//!
//! Every operation documents how it propagates precision; nothing here ever
//! returns an element more precise than its inputs justify.

use std::collections::HashMap;
use std::fmt;

use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::algebra::TateAlgebra;
use super::coefficient;
use super::term::{Monomial, TateTerm};
use crate::error::{TateError, TateResult};

/// Element of a Tate algebra: sorted terms plus an absolute precision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TateSeries {
    algebra: TateAlgebra,
    terms: Vec<TateTerm>,
    prec: i64,
}

impl TateSeries {
    /// Build a series from an arbitrary soup of terms: coefficients on equal
    /// monomials are combined, terms at or above the precision are dropped,
    /// and the result is sorted decreasing under the term order.
    pub(crate) fn from_terms(algebra: TateAlgebra, terms: Vec<TateTerm>, prec: i64) -> Self {
        let mut acc: HashMap<Monomial, BigRational> = HashMap::new();
        for t in terms {
            *acc.entry(t.monomial().clone())
                .or_insert_with(BigRational::zero) += t.coefficient();
        }
        let order = algebra.monomial_order();
        let mut out: Vec<TateTerm> = acc
            .into_iter()
            .filter_map(|(m, c)| TateTerm::new(c, m, algebra.uniformizer()))
            .filter(|t| t.valuation() < prec)
            .collect();
        out.sort_by(|a, b| b.cmp_in(a, order));
        Self {
            algebra,
            terms: out,
            prec,
        }
    }

    pub fn algebra(&self) -> &TateAlgebra {
        &self.algebra
    }

    /// The terms, leading first
    pub fn terms(&self) -> &[TateTerm] {
        &self.terms
    }

    /// Whether the element is indistinguishable from zero at its precision
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Absolute precision N of the O(π^N) cap
    pub fn precision(&self) -> i64 {
        self.prec
    }

    /// Gauss valuation; for a zero element this is the precision
    pub fn valuation(&self) -> i64 {
        self.terms.first().map_or(self.prec, TateTerm::valuation)
    }

    pub fn leading_term(&self) -> Option<&TateTerm> {
        self.terms.first()
    }

    pub fn leading_coefficient(&self) -> Option<&BigRational> {
        self.terms.first().map(TateTerm::coefficient)
    }

    /// The series without its leading term (same precision)
    pub(crate) fn tail(&self) -> Self {
        Self {
            algebra: self.algebra.clone(),
            terms: self.terms.iter().skip(1).cloned().collect(),
            prec: self.prec,
        }
    }

    /// Sum; the precision is the meet of the operands' precisions
    pub fn add(&self, other: &Self) -> Self {
        debug_assert!(self.algebra == other.algebra);
        let mut soup = self.terms.clone();
        soup.extend(other.terms.iter().cloned());
        Self::from_terms(self.algebra.clone(), soup, self.prec.min(other.prec))
    }

    pub fn neg(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                TateTerm::from_raw(-t.coefficient().clone(), t.monomial().clone(), t.valuation())
            })
            .collect();
        Self {
            algebra: self.algebra.clone(),
            terms,
            prec: self.prec,
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiply by a term; the precision shifts by the term's valuation
    pub fn mul_term(&self, t: &TateTerm) -> Self {
        let terms = self.terms.iter().map(|s| s.mul(t)).collect();
        Self {
            algebra: self.algebra.clone(),
            terms,
            prec: self.prec + t.valuation(),
        }
    }

    /// Product; precision is min(p₁ + v₂, p₂ + v₁)
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert!(self.algebra == other.algebra);
        let prec = (self.prec + other.valuation()).min(other.prec + self.valuation());
        let mut soup = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                soup.push(a.mul(b));
            }
        }
        Self::from_terms(self.algebra.clone(), soup, prec)
    }

    /// Scale by a non-zero rational; precision shifts by its valuation
    pub fn scale(&self, factor: &BigRational) -> Self {
        let v = coefficient::valuation(factor, self.algebra.uniformizer())
            .expect("scaling by zero");
        let terms = self
            .terms
            .iter()
            .map(|t| {
                TateTerm::from_raw(
                    t.coefficient() * factor,
                    t.monomial().clone(),
                    t.valuation() + v,
                )
            })
            .collect();
        Self {
            algebra: self.algebra.clone(),
            terms,
            prec: self.prec + v,
        }
    }

    /// Multiply by π^k for k >= 0
    pub fn positive_pi_shift(&self, k: i64) -> Self {
        debug_assert!(k >= 0);
        self.scale(&coefficient::pi_power(self.algebra.uniformizer(), k))
    }

    /// Divide by π^k for k >= 0; over the ring of integers, terms with
    /// valuation below k are truncated away first
    pub fn negative_pi_shift(&self, k: i64) -> Self {
        debug_assert!(k >= 0);
        let shiftee = if self.algebra.integral_base() {
            let terms = self
                .terms
                .iter()
                .filter(|t| t.valuation() >= k)
                .cloned()
                .collect();
            Self {
                algebra: self.algebra.clone(),
                terms,
                prec: self.prec,
            }
        } else {
            self.clone()
        };
        if shiftee.is_zero() {
            return Self {
                algebra: shiftee.algebra,
                terms: Vec::new(),
                prec: shiftee.prec - k,
            };
        }
        shiftee.scale(&coefficient::pi_power(self.algebra.uniformizer(), -k))
    }

    /// Cap the precision at n, dropping terms that fall above it
    pub fn add_bigoh(&self, n: i64) -> Self {
        let prec = self.prec.min(n);
        let terms = self
            .terms
            .iter()
            .filter(|t| t.valuation() < prec)
            .cloned()
            .collect();
        Self {
            algebra: self.algebra.clone(),
            terms,
            prec,
        }
    }

    /// Rescale so the leading coefficient is 1
    ///
    /// Fails with `PrecisionExhausted` on an element that is zero at its
    /// precision. Precision shifts down by the leading valuation.
    pub fn monic(&self) -> TateResult<Self> {
        let c = self
            .leading_coefficient()
            .ok_or_else(|| TateError::PrecisionExhausted {
                operation: "monic normalisation".to_string(),
            })?;
        Ok(self.scale(&c.recip()))
    }

    /// Rescale by the inverse of the unit part of the leading coefficient,
    /// so the leading coefficient becomes an exact power of π
    pub fn unit_normalize(&self) -> TateResult<Self> {
        let c = self
            .leading_coefficient()
            .ok_or_else(|| TateError::PrecisionExhausted {
                operation: "unit normalisation".to_string(),
            })?;
        let u = coefficient::unit_part(c, self.algebra.uniformizer());
        Ok(self.scale(&u.recip()))
    }

    /// S-polynomial: with τ the term-lcm of the leading terms,
    /// (τ/lt(f))·f − (τ/lt(g))·g, so the leading terms cancel exactly
    pub fn s_polynomial(&self, other: &Self) -> Self {
        debug_assert!(!self.is_zero() && !other.is_zero());
        let p = self.algebra.uniformizer();
        let lt_f = self.leading_term().expect("s_polynomial of zero");
        let lt_g = other.leading_term().expect("s_polynomial of zero");
        let tau = lt_f.lcm(lt_g, p);
        let qf = tau.quotient(lt_f);
        let qg = tau.quotient(lt_g);
        self.mul_term(&qf).sub(&other.mul_term(&qg))
    }

    /// Multi-divisor division
    ///
    /// Repeatedly cancels the greatest term of the running remainder against
    /// the first divisor whose leading term divides it under the requested
    /// mode. With `reduce_tail`, terms no divisor reaches are set aside and
    /// reduction continues on the rest; otherwise it stops at the first such
    /// term. Zero divisors are skipped. Every cancellation against divisor d
    /// with quotient term q lowers the precision to min(prec, prec(d) +
    /// val(q)).
    ///
    /// Returns the quotients (parallel to the divisor family) and the
    /// remainder.
    pub fn quo_rem(
        &self,
        divisors: &[TateSeries],
        reduce_tail: bool,
        integral: bool,
    ) -> (Vec<TateSeries>, TateSeries) {
        let mut work = self.clone();
        let mut parked: Vec<TateTerm> = Vec::new();
        let mut quos: Vec<Vec<TateTerm>> = vec![Vec::new(); divisors.len()];
        'outer: while let Some(t) = work.leading_term().cloned() {
            for (k, d) in divisors.iter().enumerate() {
                let lt = match d.leading_term() {
                    Some(lt) => lt,
                    None => continue,
                };
                if lt.divides(&t, integral) {
                    let q = t.quotient(lt);
                    work = work.sub(&d.mul_term(&q));
                    quos[k].push(q);
                    continue 'outer;
                }
            }
            if !reduce_tail {
                break;
            }
            parked.push(t);
            work = work.tail();
        }
        let prec = work.prec;
        parked.extend(work.terms.iter().cloned());
        let remainder = Self::from_terms(self.algebra.clone(), parked, prec);
        let quotients = quos
            .into_iter()
            .zip(divisors)
            .map(|(q, d)| {
                let qprec = if d.is_zero() { prec } else { prec - d.valuation() };
                Self::from_terms(self.algebra.clone(), q, qprec)
            })
            .collect();
        (quotients, remainder)
    }
}

impl PartialEq for TateSeries {
    /// Equality at the joint precision: both elements are truncated to the
    /// meet of their precisions and compared term by term
    fn eq(&self, other: &Self) -> bool {
        if self.algebra != other.algebra {
            return false;
        }
        let m = self.prec.min(other.prec);
        self.add_bigoh(m).terms == other.add_bigoh(m).terms
    }
}

fn fmt_coefficient(c: &BigRational) -> String {
    if c.is_integer() {
        c.numer().to_string()
    } else {
        format!("{}/{}", c.numer(), c.denom())
    }
}

impl fmt::Display for TateSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = self.algebra.variable_names();
        for t in &self.terms {
            let mut parts: Vec<String> = Vec::new();
            for (name, e) in names.iter().zip(&t.monomial().exponents) {
                match *e {
                    0 => {}
                    1 => parts.push(name.clone()),
                    _ => parts.push(format!("{}^{}", name, e)),
                }
            }
            let c = fmt_coefficient(t.coefficient());
            if parts.is_empty() {
                write!(f, "{} + ", c)?;
            } else if c == "1" {
                write!(f, "{} + ", parts.join("*"))?;
            } else if c.contains('/') || c.starts_with('-') {
                write!(f, "({})*{} + ", c, parts.join("*"))?;
            } else {
                write!(f, "{}*{} + ", c, parts.join("*"))?;
            }
        }
        write!(f, "O({}^{})", self.algebra.uniformizer(), self.prec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebra() -> TateAlgebra {
        TateAlgebra::new(3, &["x", "y"], 10).unwrap()
    }

    #[test]
    fn test_leading_term_respects_valuation() {
        let a = algebra();
        // 3*x^2 has valuation 1, 5*x*y^2 has valuation 0: the latter leads
        let f = a.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
        assert_eq!(f.leading_term().unwrap().monomial().exponents, vec![1, 2]);
        assert_eq!(f.valuation(), 0);
        assert_eq!(f.precision(), 10);
    }

    #[test]
    fn test_add_combines_and_cancels() {
        let a = algebra();
        let f = a.series(&[(1, vec![1, 0]), (2, vec![0, 1])]);
        let g = a.series(&[(-1, vec![1, 0]), (5, vec![0, 1])]);
        let s = f.add(&g);
        assert_eq!(s.terms().len(), 1);
        assert_eq!(s.leading_term().unwrap().monomial().exponents, vec![0, 1]);
        assert!(f.sub(&f).is_zero());
    }

    #[test]
    fn test_s_polynomial_cancels_leading_terms() {
        let a = algebra();
        let f = a.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
        let g = a.series(&[(5, vec![2, 1]), (3, vec![0, 0])]);
        // S = (1/5)x*f - (1/5)y*g = (3/5)x^3 - (3/5)y
        let s = f.s_polynomial(&g);
        assert_eq!(s.terms().len(), 2);
        let lt = s.leading_term().unwrap();
        assert_eq!(lt.monomial().exponents, vec![3, 0]);
        assert_eq!(lt.valuation(), 1);
        assert_eq!(
            lt.coefficient(),
            &BigRational::new(3.into(), 5.into())
        );
    }

    #[test]
    fn test_quo_rem_exact_division() {
        let a = algebra();
        let x = a.monomial(1, vec![1, 0]).unwrap();
        let f = a.series(&[(1, vec![2, 0])]);
        let (quotients, rem) = f.quo_rem(std::slice::from_ref(&x), true, false);
        assert!(rem.is_zero());
        assert_eq!(
            quotients[0].leading_term().unwrap().monomial().exponents,
            vec![1, 0]
        );
    }

    #[test]
    fn test_quo_rem_tail_flag() {
        let a = algebra();
        let y = a.monomial(1, vec![0, 1]).unwrap();
        // x^2 + x*y: the leading term x^2 is not reducible by y
        let f = a.series(&[(1, vec![2, 0]), (1, vec![1, 1])]);
        let (_, rem_head) = f.quo_rem(std::slice::from_ref(&y), false, false);
        assert_eq!(rem_head.terms().len(), 2);
        let (_, rem_tail) = f.quo_rem(std::slice::from_ref(&y), true, false);
        assert_eq!(rem_tail.terms().len(), 1);
        assert_eq!(
            rem_tail.leading_term().unwrap().monomial().exponents,
            vec![2, 0]
        );
    }

    #[test]
    fn test_quo_rem_skips_zero_divisors() {
        let a = algebra();
        let x = a.monomial(1, vec![1, 0]).unwrap();
        let f = a.series(&[(1, vec![2, 0])]);
        let divisors = vec![a.zero(), x];
        let (_, rem) = f.quo_rem(&divisors, true, false);
        assert!(rem.is_zero());
    }

    #[test]
    fn test_quo_rem_integral_mode_blocks_valuation_increase() {
        let ring = algebra().integer_ring();
        let three = ring.series(&[(3, vec![0, 0])]);
        let x = ring.monomial(1, vec![1, 0]).unwrap();
        // x has valuation 0, 3 has valuation 1: 3 does not divide x integrally
        let (_, rem) = x.quo_rem(std::slice::from_ref(&three), true, true);
        assert_eq!(rem, x);
        // but over the field it does
        let (_, rem) = x.quo_rem(std::slice::from_ref(&three), true, false);
        assert!(rem.is_zero());
    }

    #[test]
    fn test_pi_shifts() {
        let a = algebra();
        let f = a.series(&[(1, vec![1, 0]), (3, vec![0, 1])]);
        let shifted = f.positive_pi_shift(1);
        assert_eq!(shifted.valuation(), 1);
        assert_eq!(shifted.precision(), 11);
        let back = shifted.negative_pi_shift(1);
        assert_eq!(back, f);
        assert_eq!(back.precision(), 10);
    }

    #[test]
    fn test_negative_pi_shift_truncates_over_integer_ring() {
        let ring = algebra().integer_ring();
        // x + 3*y: dividing by 3 truncates x away over the integer ring
        let f = ring.series(&[(1, vec![1, 0]), (3, vec![0, 1])]);
        let shifted = f.negative_pi_shift(1);
        assert_eq!(shifted.terms().len(), 1);
        assert_eq!(shifted.leading_term().unwrap().monomial().exponents, vec![0, 1]);
        assert_eq!(shifted.leading_term().unwrap().valuation(), 0);
    }

    #[test]
    fn test_monic_drops_precision_by_leading_valuation() {
        let a = algebra();
        // 3*x^3 - 3*y at precision 10 becomes x^3 - y at precision 9
        let f = a.series(&[(3, vec![3, 0]), (-3, vec![0, 1])]);
        let m = f.monic().unwrap();
        assert_eq!(m.precision(), 9);
        assert_eq!(m.leading_coefficient().unwrap(), &BigRational::from_integer(1.into()));
        assert_eq!(m.valuation(), 0);
    }

    #[test]
    fn test_monic_of_zero_is_precision_exhausted() {
        let a = algebra();
        let err = a.zero().monic().unwrap_err();
        assert!(matches!(err, TateError::PrecisionExhausted { .. }));
    }

    #[test]
    fn test_unit_normalize_keeps_pi_power() {
        let a = algebra();
        // leading coefficient 6 = 2 * 3: unit part 2 is divided away
        let f = a.series(&[(6, vec![1, 0])]);
        let g = f.unit_normalize().unwrap();
        assert_eq!(
            g.leading_coefficient().unwrap(),
            &BigRational::from_integer(3.into())
        );
        assert_eq!(g.precision(), 10);
    }

    #[test]
    fn test_add_bigoh_and_equality_at_precision() {
        let a = algebra();
        let f = a.series(&[(1, vec![1, 0])]);
        let g = a.series(&[(1, vec![1, 0]), (9, vec![0, 1])]);
        // 9*y has valuation 2 and vanishes at O(3^2)
        assert_eq!(f.add_bigoh(2), g.add_bigoh(2));
        assert_ne!(f, g);
        let capped = g.add_bigoh(2);
        assert_eq!(capped.precision(), 2);
        assert_eq!(capped.terms().len(), 1);
    }

    #[test]
    fn test_mul_precision() {
        let a = algebra();
        let f = a.series(&[(3, vec![1, 0])]);
        let g = a.series(&[(1, vec![0, 1])]);
        let h = f.mul(&g);
        // min(10 + 0, 10 + 1) = 10
        assert_eq!(h.precision(), 10);
        assert_eq!(h.valuation(), 1);
        assert_eq!(h.leading_term().unwrap().monomial().exponents, vec![1, 1]);
    }

    #[test]
    fn test_display_mentions_precision() {
        let a = algebra();
        let f = a.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
        let s = f.to_string();
        assert!(s.contains("O(3^10)"));
        assert!(s.contains("x"));
    }

    #[test]
    fn test_serde_round_trip() {
        let a = algebra();
        let f = a.series(&[(3, vec![2, 0]), (5, vec![1, 2])]);
        let json = serde_json::to_string(&f).unwrap();
        let back: TateSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
