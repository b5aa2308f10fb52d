//! Canonicalisation of a computed basis
//!
//! Both drivers end here: the working basis is minimised under the output
//! divisibility (monomial-only over a field base, valuation-aware over the
//! ring of integers), tail-reduced, normalised, and sorted strictly
//! decreasing by leading term. The result is the canonical Gröbner basis the
//! ideal surface interprets.

use super::reduction;
use crate::core::algebra::TateAlgebra;
use crate::core::series::TateSeries;
use crate::error::TateResult;

/// Drop every element whose leading term is divisible, under the requested
/// mode, by another kept element's leading term
///
/// Elements with equal leading terms divide each other; the earliest one is
/// kept.
pub fn minimise(basis: &mut Vec<TateSeries>, integral: bool) {
    basis.retain(|g| !g.is_zero());
    let n = basis.len();
    let mut keep = vec![true; n];
    for i in 0..n {
        for j in 0..n {
            if i == j || !keep[j] {
                continue;
            }
            let li = basis[i].leading_term().expect("minimise: zero element");
            let lj = basis[j].leading_term().expect("minimise: zero element");
            if lj.divides(li, integral) && (j < i || !li.divides(lj, integral)) {
                keep[i] = false;
                break;
            }
        }
    }
    let mut it = keep.iter();
    basis.retain(|_| *it.next().expect("keep mask length"));
}

/// Tail-reduce each element against the others and against its own π-shift
///
/// The π·gᵢ divisor removes tail terms hiding behind the leading monomial at
/// higher valuation, which plain self-reduction cannot touch without
/// cancelling the element outright.
fn tail_reduce(basis: &mut [TateSeries], integral: bool) -> TateResult<()> {
    for i in 0..basis.len() {
        let g = basis[i].clone();
        let lt = g.leading_term().expect("tail_reduce: zero element").clone();
        let head = TateSeries::from_terms(g.algebra().clone(), vec![lt], g.precision());
        let tail = g.tail();
        let mut divisors: Vec<TateSeries> = Vec::with_capacity(basis.len());
        for (j, h) in basis.iter().enumerate() {
            if j != i {
                divisors.push(h.clone());
            }
        }
        divisors.push(g.positive_pi_shift(1));
        let reduced_tail = reduction::reduce(&tail, &divisors, integral, true, false)?;
        basis[i] = head.add(&reduced_tail);
    }
    Ok(())
}

/// Minimise, tail-reduce, normalise, and sort a computed basis
///
/// Over a field base each element ends up monic; over the ring of integers
/// each leading coefficient ends up an exact power of the uniformizer.
pub fn canonicalize(
    mut basis: Vec<TateSeries>,
    algebra: &TateAlgebra,
) -> TateResult<Vec<TateSeries>> {
    let integral = algebra.integral_base();
    minimise(&mut basis, integral);
    tail_reduce(&mut basis, integral)?;
    let mut out = Vec::with_capacity(basis.len());
    for g in basis {
        if integral {
            out.push(g.unit_normalize()?);
        } else {
            out.push(g.monic()?);
        }
    }
    let order = algebra.monomial_order();
    out.sort_by(|a, b| {
        let la = a.leading_term().expect("canonicalize: zero element");
        let lb = b.leading_term().expect("canonicalize: zero element");
        lb.cmp_in(la, order)
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TateAlgebra;

    #[test]
    fn test_minimise_monomial_mode() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let mut basis = vec![
            a.series(&[(5, vec![1, 2]), (3, vec![2, 0])]), // lead x*y^2
            a.series(&[(1, vec![0, 2])]),                  // lead y^2
            a.series(&[(1, vec![3, 0])]),                  // lead x^3
        ];
        minimise(&mut basis, false);
        // x*y^2 is divisible by y^2 and goes away
        assert_eq!(basis.len(), 2);
        let leads: Vec<_> = basis
            .iter()
            .map(|g| g.leading_term().unwrap().monomial().exponents.clone())
            .collect();
        assert!(leads.contains(&vec![0, 2]));
        assert!(leads.contains(&vec![3, 0]));
    }

    #[test]
    fn test_minimise_integral_mode_respects_valuation() {
        let ring = TateAlgebra::new(3, &["x", "y"], 10).unwrap().integer_ring();
        let mut basis = vec![
            ring.series(&[(5, vec![1, 2])]), // lead x*y^2, valuation 0
            ring.series(&[(3, vec![0, 2])]), // lead 3*y^2, valuation 1
        ];
        minimise(&mut basis, true);
        // 3*y^2 divides x*y^2 monomially but not integrally
        assert_eq!(basis.len(), 2);
    }

    #[test]
    fn test_minimise_keeps_one_of_equal_leads() {
        let a = TateAlgebra::new(3, &["x"], 10).unwrap();
        let mut basis = vec![a.series(&[(1, vec![2])]), a.series(&[(2, vec![2])])];
        minimise(&mut basis, false);
        assert_eq!(basis.len(), 1);
    }

    #[test]
    fn test_canonicalize_sorts_and_normalises() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        let basis = vec![
            a.series(&[(2, vec![0, 2])]),
            a.series(&[(5, vec![2, 1])]),
        ];
        let canonical = canonicalize(basis, &a).unwrap();
        assert_eq!(canonical.len(), 2);
        // sorted decreasing: x^2*y before y^2 under grevlex
        assert_eq!(
            canonical[0].leading_term().unwrap().monomial().exponents,
            vec![2, 1]
        );
        for g in &canonical {
            assert!(g.leading_coefficient().unwrap().is_integer());
            assert_eq!(g.leading_coefficient().unwrap().numer(), &1.into());
        }
    }

    #[test]
    fn test_canonicalize_tail_reduction() {
        let a = TateAlgebra::new(3, &["x", "y"], 10).unwrap();
        // x^2 + y and y: the tail y of the first element reduces away
        let basis = vec![
            a.series(&[(1, vec![2, 0]), (1, vec![0, 1])]),
            a.series(&[(1, vec![0, 1])]),
        ];
        let canonical = canonicalize(basis, &a).unwrap();
        assert_eq!(canonical.len(), 2);
        let x2 = canonical
            .iter()
            .find(|g| g.leading_term().unwrap().monomial().exponents == vec![2, 0])
            .unwrap();
        assert_eq!(x2.terms().len(), 1);
    }
}
