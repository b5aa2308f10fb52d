//! End-to-end scenario over the 2-adic field at precision cap 5
//!
//! Three dense generators whose ideal collapses onto the leading monomials
//! x^4, x^2*y, y^2. The integral variant keeps more precision than the
//! plain field variant on the same input.

use num_bigint::BigInt;
use num_rational::BigRational;
use tatealg_core::prelude::*;

fn generators(a: &TateAlgebra) -> Vec<TateSeries> {
    let f = a.series(&[
        (1, vec![2, 6]),
        (1, vec![4, 0]),
        (25, vec![0, 2]),
        (2, vec![3, 3]),
        (10, vec![1, 4]),
        (10, vec![2, 1]),
    ]);
    let g = a.series(&[
        (1, vec![4, 5]),
        (1, vec![5, 2]),
        (1, vec![4, 0]),
        (5, vec![2, 1]),
        (2, vec![5, 4]),
        (2, vec![6, 1]),
        (6, vec![3, 3]),
    ]);
    let h = a.series(&[
        (2, vec![6, 4]),
        (2, vec![4, 0]),
        (4, vec![5, 2]),
        (8, vec![8, 2]),
        (8, vec![7, 3]),
        (8, vec![6, 1]),
    ]);
    vec![f, g, h]
}

fn sorted_leads(basis: &[TateSeries]) -> Vec<Vec<usize>> {
    let mut leads: Vec<Vec<usize>> = basis
        .iter()
        .map(|g| g.leading_term().unwrap().monomial().exponents.clone())
        .collect();
    leads.sort();
    leads
}

#[test]
fn test_integral_variant_basis() {
    let a = TateAlgebra::new(2, &["x", "y"], 5).unwrap();
    let ideal = a.ideal(generators(&a));
    let basis = ideal
        .groebner_basis_with(&GroebnerConfig::algorithm_named("buchberger-integral").unwrap())
        .unwrap();
    assert_eq!(sorted_leads(&basis), vec![vec![0, 2], vec![2, 1], vec![4, 0]]);
    let one = BigRational::from_integer(BigInt::from(1));
    for b in basis.iter() {
        assert_eq!(b.leading_coefficient().unwrap(), &one);
        assert!(b.precision() <= 5);
        assert!(b.precision() >= 1);
    }
}

#[test]
fn test_field_variant_is_less_precise() {
    let a = TateAlgebra::new(2, &["x", "y"], 5).unwrap();
    let ideal = a.ideal(generators(&a));
    let integral = ideal
        .groebner_basis_with(&GroebnerConfig::algorithm_named("buchberger-integral").unwrap())
        .unwrap();
    let field = ideal
        .groebner_basis_with(&GroebnerConfig::algorithm_named("buchberger").unwrap())
        .unwrap();
    assert_eq!(sorted_leads(&field), sorted_leads(&integral));
    // both runs are sorted decreasing by leading term, so elements pair up
    for (f, i) in field.iter().zip(integral.iter()) {
        assert_eq!(
            f.leading_term().unwrap().monomial(),
            i.leading_term().unwrap().monomial()
        );
        assert!(f.precision() <= i.precision());
    }
}

#[test]
fn test_both_variants_generate_the_same_ideal() {
    let a = TateAlgebra::new(2, &["x", "y"], 5).unwrap();
    let ideal = a.ideal(generators(&a));
    let integral = ideal
        .groebner_basis_with(&GroebnerConfig::algorithm_named("buchberger-integral").unwrap())
        .unwrap();
    for b in integral.iter() {
        assert!(ideal.contains(b).unwrap());
    }
    for g in ideal.gens() {
        let (_, r) = g.quo_rem(&integral, true, false);
        assert!(r.is_zero());
    }
}
