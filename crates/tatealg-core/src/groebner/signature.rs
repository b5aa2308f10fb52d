//! Signature-based (F5) Gröbner basis computation
//!
//! Generators are processed one at a time. For each new generator the
//! current basis is wrapped into signed pairs with the null signature, the
//! generator enters with the identity-term signature, and J-pairs are popped
//! smallest-signature first. Three filters keep the work regular: recorded
//! syzygy signatures prune divisible signatures, the cover criterion prunes
//! pairs an existing signed element already accounts for, and reduction only
//! uses reducers whose induced signature is strictly smaller than the pair's.
//!
//! A J-pair of two signed elements with equal induced signatures is
//! redundant and omitted.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::info;

use super::canonical;
use super::{check_cancel, CancelToken};
use crate::core::series::TateSeries;
use crate::core::term::{MonomialOrder, TateTerm};
use crate::error::TateResult;

/// Signature of a signed basis element
///
/// Elements inherited from earlier rounds carry `Null`, which loses every
/// signature comparison and never constrains a reduction.
#[derive(Debug, Clone)]
pub enum Signature {
    Null,
    Term(TateTerm),
}

/// A pending J-pair, keyed by its signature
#[derive(Debug, Clone)]
struct JPair {
    order: MonomialOrder,
    sig: TateTerm,
    elem: TateSeries,
}

impl PartialEq for JPair {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JPair {}

impl PartialOrd for JPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JPair {
    /// Signatures compare by (valuation, monomial); ties broken by the
    /// element's leading term for determinism
    fn cmp(&self, other: &Self) -> Ordering {
        self.sig.cmp_in(&other.sig, self.order).then_with(|| {
            match (self.elem.leading_term(), other.elem.leading_term()) {
                (Some(a), Some(b)) => a.cmp_in(b, self.order),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            }
        })
    }
}

/// J-pair of two signed elements: the half of the S-pair with the larger
/// induced signature; `None` when the pair is redundant
fn j_pair(
    a: (&Signature, &TateSeries),
    b: (&Signature, &TateSeries),
    order: MonomialOrder,
) -> Option<JPair> {
    let (s1, v1) = a;
    let (s2, v2) = b;
    if v1.is_zero() || v2.is_zero() {
        return None;
    }
    let p = v1.algebra().uniformizer();
    let l1 = v1.leading_term().expect("non-zero signed element");
    let l2 = v2.leading_term().expect("non-zero signed element");
    let t = l1.lcm(l2, p);
    let t1 = t.quotient(l1);
    let t2 = t.quotient(l2);
    match (s1, s2) {
        (Signature::Null, Signature::Null) => None,
        (Signature::Term(u1), Signature::Null) => Some(JPair {
            order,
            sig: t1.mul(u1),
            elem: v1.mul_term(&t1),
        }),
        (Signature::Null, Signature::Term(u2)) => Some(JPair {
            order,
            sig: t2.mul(u2),
            elem: v2.mul_term(&t2),
        }),
        (Signature::Term(u1), Signature::Term(u2)) => {
            let su1 = t1.mul(u1);
            let su2 = t2.mul(u2);
            match su1.cmp_in(&su2, order) {
                // equal induced signatures: the pair is redundant
                Ordering::Equal => None,
                Ordering::Greater => Some(JPair {
                    order,
                    sig: su1,
                    elem: v1.mul_term(&t1),
                }),
                Ordering::Less => Some(JPair {
                    order,
                    sig: su2,
                    elem: v2.mul_term(&t2),
                }),
            }
        }
    }
}

/// Cover criterion: an existing signed element (S, V) covers the pair when S
/// divides its signature and the corresponding multiple of V has a strictly
/// smaller leading term
fn is_covered(
    sig: &TateTerm,
    elem: &TateSeries,
    sgb: &[(Signature, TateSeries)],
    order: MonomialOrder,
) -> bool {
    let lt = match elem.leading_term() {
        Some(lt) => lt,
        None => return false,
    };
    for (s, v) in sgb {
        let u = match s {
            Signature::Term(u) => u,
            Signature::Null => continue,
        };
        if !u.divides(sig, true) {
            continue;
        }
        let vt = match v.leading_term() {
            Some(vt) => vt,
            None => continue,
        };
        let shifted = sig.quotient(u).mul(vt);
        if shifted.cmp_in(lt, order) == Ordering::Less {
            return true;
        }
    }
    false
}

/// Reduce the element using only reducers whose induced signature is
/// strictly below `sig`; null-signature reducers are always allowed
fn regular_reduce(
    elem: &TateSeries,
    sig: &TateTerm,
    sgb: &[(Signature, TateSeries)],
    order: MonomialOrder,
) -> TateSeries {
    let mut work = elem.clone();
    let mut parked: Vec<TateTerm> = Vec::new();
    'outer: while let Some(t) = work.leading_term().cloned() {
        for (s, v) in sgb {
            let lt = match v.leading_term() {
                Some(lt) => lt,
                None => continue,
            };
            if !lt.divides(&t, false) {
                continue;
            }
            let q = t.quotient(lt);
            let allowed = match s {
                Signature::Null => true,
                Signature::Term(u) => q.mul(u).cmp_in(sig, order) == Ordering::Less,
            };
            if !allowed {
                continue;
            }
            work = work.sub(&v.mul_term(&q));
            continue 'outer;
        }
        parked.push(t);
        work = work.tail();
    }
    let prec = work.precision();
    TateSeries::from_terms(elem.algebra().clone(), parked, prec)
}

/// Compute a canonical Gröbner basis with the signature-based algorithm
///
/// Field base only; the ideal surface rejects integer-ring requests before
/// calling in here.
pub fn f5(
    generators: &[TateSeries],
    prec: i64,
    verbosity: u8,
    cancel: Option<&CancelToken>,
) -> TateResult<Vec<TateSeries>> {
    let algebra = match generators.first() {
        Some(g) => g.algebra().clone(),
        None => return Ok(Vec::new()),
    };
    let order = algebra.monomial_order();
    let mut gb: Vec<TateSeries> = Vec::new();

    for (round, f) in generators.iter().enumerate() {
        if f.is_zero() {
            continue;
        }
        let f0 = f.add_bigoh(f.valuation() + prec);
        if f0.is_zero() {
            continue;
        }
        let mut sgb: Vec<(Signature, TateSeries)> = gb
            .iter()
            .cloned()
            .map(|g| (Signature::Null, g))
            .collect();
        let mut syzygies: Vec<TateTerm> = Vec::new();
        let mut heap: BinaryHeap<Reverse<JPair>> = BinaryHeap::new();
        heap.push(Reverse(JPair {
            order,
            sig: algebra.term_one(),
            elem: f0,
        }));
        if verbosity >= 1 {
            info!("F5: entering generator {} with basis of size {}", round, gb.len());
        }

        while let Some(Reverse(JPair { sig, elem, .. })) = heap.pop() {
            check_cancel(cancel)?;
            if syzygies.iter().any(|z| z.divides(&sig, true)) {
                continue;
            }
            if is_covered(&sig, &elem, &sgb, order) {
                continue;
            }
            let reduced = regular_reduce(&elem, &sig, &sgb, order);
            if reduced.is_zero() {
                if verbosity >= 2 {
                    info!("F5: new syzygy signature of valuation {}", sig.valuation());
                }
                syzygies.push(sig);
                continue;
            }
            for entry in &sgb {
                if let Some(jp) = j_pair(
                    (&Signature::Term(sig.clone()), &reduced),
                    (&entry.0, &entry.1),
                    order,
                ) {
                    heap.push(Reverse(jp));
                }
            }
            if verbosity >= 2 {
                info!(
                    "F5: signed element appended, basis size {}",
                    sgb.len() + 1
                );
            }
            sgb.push((Signature::Term(sig), reduced));
        }

        gb = sgb.into_iter().map(|(_, v)| v).collect();
    }

    canonical::canonicalize(gb, &algebra)
}
