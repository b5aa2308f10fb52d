//! Coefficient arithmetic for Tate series
//!
//! Coefficients are exact rationals whose denominators are powers of the
//! uniformizer p; the engine never constructs anything else. The p-adic
//! valuation and the unit/π-power split of a coefficient are computed here.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// p-adic valuation of a non-zero integer
fn int_valuation(n: &BigInt, p: &BigInt) -> i64 {
    debug_assert!(!n.is_zero(), "valuation of zero integer");
    let mut v = 0;
    let mut m = n.abs();
    loop {
        let (q, r) = m.div_rem(p);
        if r.is_zero() {
            v += 1;
            m = q;
        } else {
            return v;
        }
    }
}

/// p-adic valuation of a rational coefficient, `None` for zero
pub fn valuation(c: &BigRational, p: &BigInt) -> Option<i64> {
    if c.is_zero() {
        return None;
    }
    Some(int_valuation(c.numer(), p) - int_valuation(c.denom(), p))
}

/// p^k as an exact rational, for any integer k
pub fn pi_power(p: &BigInt, k: i64) -> BigRational {
    let mut abs = BigInt::one();
    for _ in 0..k.unsigned_abs() {
        abs *= p;
    }
    if k >= 0 {
        BigRational::from_integer(abs)
    } else {
        BigRational::new(BigInt::one(), abs)
    }
}

/// Unit part of a non-zero coefficient: c / p^val(c)
///
/// The result has valuation zero and is invertible in the valuation ring.
pub fn unit_part(c: &BigRational, p: &BigInt) -> BigRational {
    let v = valuation(c, p).expect("unit part of zero coefficient");
    c * pi_power(p, -v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_valuation() {
        let p = BigInt::from(3);
        assert_eq!(valuation(&q(9, 1), &p), Some(2));
        assert_eq!(valuation(&q(5, 1), &p), Some(0));
        assert_eq!(valuation(&q(1, 3), &p), Some(-1));
        assert_eq!(valuation(&q(6, 5), &p), Some(1));
        assert_eq!(valuation(&q(-27, 2), &p), Some(3));
        assert_eq!(valuation(&BigRational::zero(), &p), None);
    }

    #[test]
    fn test_pi_power() {
        let p = BigInt::from(3);
        assert_eq!(pi_power(&p, 0), q(1, 1));
        assert_eq!(pi_power(&p, 2), q(9, 1));
        assert_eq!(pi_power(&p, -1), q(1, 3));
    }

    #[test]
    fn test_unit_part() {
        let p = BigInt::from(3);
        assert_eq!(unit_part(&q(9, 5), &p), q(1, 5));
        assert_eq!(unit_part(&q(5, 3), &p), q(5, 1));
        let c = q(-45, 7);
        let v = valuation(&c, &p).unwrap();
        assert_eq!(unit_part(&c, &p) * pi_power(&p, v), c);
    }
}
