//! Tate terms and the valuation-aware term order
//!
//! A monomial is an exponent vector; for variables [x, y] the monomial x²y is
//! [2, 1]. A Tate term pairs a non-zero coefficient with a monomial and caches
//! the coefficient's p-adic valuation. The term order refines (valuation,
//! monomial): a term with smaller valuation has larger norm and is greater;
//! ties are broken by the monomial order of the ambient algebra.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use super::coefficient;

/// Monomial represented as an exponent vector
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Monomial {
    /// Exponents for each variable (index corresponds to variable order)
    pub exponents: Vec<usize>,
}

impl Monomial {
    /// Create a monomial from an exponent vector
    pub fn new(exponents: Vec<usize>) -> Self {
        Self { exponents }
    }

    /// The multiplicative identity (all exponents zero)
    pub fn unit(num_vars: usize) -> Self {
        Self {
            exponents: vec![0; num_vars],
        }
    }

    /// Total degree
    pub fn degree(&self) -> usize {
        self.exponents.iter().sum()
    }

    /// Multiply two monomials (add exponents)
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.exponents.len(), other.exponents.len());
        Self {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    /// Divide by another monomial, `None` if not divisible
    pub fn try_divide(&self, other: &Self) -> Option<Self> {
        debug_assert_eq!(self.exponents.len(), other.exponents.len());
        let mut result = Vec::with_capacity(self.exponents.len());
        for (a, b) in self.exponents.iter().zip(&other.exponents) {
            if a < b {
                return None;
            }
            result.push(a - b);
        }
        Some(Self { exponents: result })
    }

    /// Whether this monomial divides another (exponentwise <=)
    pub fn divides(&self, other: &Self) -> bool {
        debug_assert_eq!(self.exponents.len(), other.exponents.len());
        self.exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| a <= b)
    }

    /// Least common multiple (exponentwise max)
    pub fn lcm(&self, other: &Self) -> Self {
        debug_assert_eq!(self.exponents.len(), other.exponents.len());
        Self {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| (*a).max(*b))
                .collect(),
        }
    }

    /// Whether the two monomials share no variable
    pub fn is_coprime_with(&self, other: &Self) -> bool {
        self.exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| *a == 0 || *b == 0)
    }
}

/// Monomial ordering fixed by the ambient algebra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonomialOrder {
    /// Lexicographic: compare exponents left to right
    Lex,
    /// Graded lexicographic: total degree first, then lex
    Grlex,
    /// Graded reverse lexicographic: total degree first, then reverse lex
    Grevlex,
}

impl MonomialOrder {
    /// Compare two monomials under this ordering
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        match self {
            MonomialOrder::Lex => Self::compare_lex(a, b),
            MonomialOrder::Grlex => match a.degree().cmp(&b.degree()) {
                Ordering::Equal => Self::compare_lex(a, b),
                other => other,
            },
            MonomialOrder::Grevlex => match a.degree().cmp(&b.degree()) {
                Ordering::Equal => {
                    for (ea, eb) in a.exponents.iter().zip(&b.exponents).rev() {
                        match eb.cmp(ea) {
                            Ordering::Equal => continue,
                            other => return other,
                        }
                    }
                    Ordering::Equal
                }
                other => other,
            },
        }
    }

    fn compare_lex(a: &Monomial, b: &Monomial) -> Ordering {
        for (ea, eb) in a.exponents.iter().zip(&b.exponents) {
            match ea.cmp(eb) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

/// A non-zero coefficient together with its monomial and cached valuation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TateTerm {
    coefficient: BigRational,
    monomial: Monomial,
    val: i64,
}

impl TateTerm {
    /// Create a term, computing the coefficient valuation; `None` for a zero
    /// coefficient (zero is never represented as a term)
    pub fn new(coefficient: BigRational, monomial: Monomial, p: &BigInt) -> Option<Self> {
        let val = coefficient::valuation(&coefficient, p)?;
        Some(Self {
            coefficient,
            monomial,
            val,
        })
    }

    pub(crate) fn from_raw(coefficient: BigRational, monomial: Monomial, val: i64) -> Self {
        debug_assert!(!coefficient.is_zero());
        Self {
            coefficient,
            monomial,
            val,
        }
    }

    /// The multiplicative identity term
    pub fn one(num_vars: usize) -> Self {
        Self {
            coefficient: BigRational::one(),
            monomial: Monomial::unit(num_vars),
            val: 0,
        }
    }

    pub fn coefficient(&self) -> &BigRational {
        &self.coefficient
    }

    pub fn monomial(&self) -> &Monomial {
        &self.monomial
    }

    /// The p-adic valuation of the coefficient
    pub fn valuation(&self) -> i64 {
        self.val
    }

    /// Term product (valuations add)
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            coefficient: &self.coefficient * &other.coefficient,
            monomial: self.monomial.mul(&other.monomial),
            val: self.val + other.val,
        }
    }

    /// Exact quotient of this term by a divisor
    ///
    /// The divisor's monomial must divide this term's monomial.
    pub fn quotient(&self, divisor: &Self) -> Self {
        let monomial = self
            .monomial
            .try_divide(&divisor.monomial)
            .expect("term quotient: monomial not divisible");
        Self {
            coefficient: &self.coefficient / &divisor.coefficient,
            monomial,
            val: self.val - divisor.val,
        }
    }

    /// Least common multiple of two terms: monomial lcm, valuation max,
    /// coefficient the corresponding power of p
    pub fn lcm(&self, other: &Self, p: &BigInt) -> Self {
        let val = self.val.max(other.val);
        Self {
            coefficient: coefficient::pi_power(p, val),
            monomial: self.monomial.lcm(&other.monomial),
            val,
        }
    }

    /// Whether this term divides another
    ///
    /// Monomial divisibility always; in integral mode the divisor must also
    /// have valuation at most the dividend's.
    pub fn divides(&self, other: &Self, integral: bool) -> bool {
        if integral && self.val > other.val {
            return false;
        }
        self.monomial.divides(&other.monomial)
    }

    /// Product-criterion coprimality
    ///
    /// Over a DVR the criterion is only sound when the lcm of the leading
    /// terms equals their product, which requires the monomials to be coprime
    /// and at least one valuation to vanish.
    pub fn is_coprime_with(&self, other: &Self) -> bool {
        self.val.min(other.val) == 0 && self.monomial.is_coprime_with(&other.monomial)
    }

    /// Multiply by p^k
    pub fn pi_shift(&self, k: i64, p: &BigInt) -> Self {
        Self {
            coefficient: &self.coefficient * coefficient::pi_power(p, k),
            monomial: self.monomial.clone(),
            val: self.val + k,
        }
    }

    /// Term order: smaller valuation is greater, ties by monomial order
    pub fn cmp_in(&self, other: &Self, order: MonomialOrder) -> Ordering {
        match other.val.cmp(&self.val) {
            Ordering::Equal => order.compare(&self.monomial, &other.monomial),
            ord => ord,
        }
    }
}
