//! Valuation-aware Buchberger algorithm
//!
//! The driver keeps two views of the basis: `gb`, an append-only list whose
//! slots are tombstoned (`None`) instead of removed so queued pair indices
//! stay valid, and `rgb`, the live minimised working basis with a parallel
//! `idx` array mapping working positions back to `gb` slots.
//!
//! Over a discrete valuation ring, subtracting multiples during reduction can
//! lower the leading valuation and hide terms behind the precision cap. The
//! inter-reduction pass therefore multiplies each element by π, reduces it
//! against the rest of the working basis, and shifts back down; the extra π
//! of slack re-exposes those terms so the reduced form is stable under
//! further cancellation. This step looks redundant and is not.

use tracing::info;

use super::canonical;
use super::pair_queue::{CriticalPair, PairQueue};
use super::reduction;
use super::{check_cancel, CancelToken};
use crate::core::series::TateSeries;
use crate::error::TateResult;

/// Compute a canonical Gröbner basis of the ideal generated by `generators`
///
/// `prec` is the relative working precision: each generator g is truncated to
/// O(π^(val(g) + prec)) before the main loop. `integral` selects the
/// valuation-aware divisibility used for reductions and minimisation.
pub fn buchberger(
    generators: &[TateSeries],
    prec: i64,
    integral: bool,
    verbosity: u8,
    cancel: Option<&CancelToken>,
) -> TateResult<Vec<TateSeries>> {
    let algebra = match generators.first() {
        Some(g) => g.algebra().clone(),
        None => return Ok(Vec::new()),
    };

    // Truncate to the working precision; zero generators are dropped here.
    let mut gb: Vec<Option<TateSeries>> = Vec::new();
    for g in generators {
        if g.is_zero() {
            continue;
        }
        let t = g.add_bigoh(g.valuation() + prec);
        if !t.is_zero() {
            gb.push(Some(t));
        }
    }
    if gb.is_empty() {
        return Ok(Vec::new());
    }

    // Initial minimisation: drop generators whose leading term another
    // generator's leading term divides. Survivors seed the working basis;
    // dropped slots are tombstoned immediately.
    let n = gb.len();
    let mut keep = vec![true; n];
    for i in 0..n {
        for j in 0..n {
            if i == j || !keep[j] {
                continue;
            }
            let li = lead(&gb[i]);
            let lj = lead(&gb[j]);
            if lj.divides(li, integral) && (j < i || !li.divides(lj, integral)) {
                keep[i] = false;
                break;
            }
        }
    }
    let mut rgb: Vec<TateSeries> = Vec::new();
    let mut idx: Vec<usize> = Vec::new();
    for (i, kept) in keep.iter().enumerate() {
        if *kept {
            rgb.push(gb[i].clone().expect("kept slot is live"));
            idx.push(i);
        } else {
            gb[i] = None;
        }
    }
    let initial_count = gb.len();

    // Seed the queue with the S-polynomials of non-coprime pairs.
    let mut queue = PairQueue::new();
    for a in 0..rgb.len() {
        for b in (a + 1)..rgb.len() {
            let ta = rgb[a].leading_term().expect("working basis element is zero");
            let tb = rgb[b].leading_term().expect("working basis element is zero");
            if ta.is_coprime_with(tb) {
                continue;
            }
            let s = rgb[a].s_polynomial(&rgb[b]);
            if !s.is_zero() {
                queue.push(CriticalPair::new(s, idx[a] as isize, idx[b] as isize));
            }
        }
    }
    if verbosity >= 1 {
        info!(
            "Buchberger: {} generators, {} initial pairs",
            rgb.len(),
            queue.len()
        );
    }

    let mut needs_interreduction = false;
    while !queue.is_empty() {
        check_cancel(cancel)?;
        if needs_interreduction {
            check_cancel(cancel)?;
            inter_reduce(&mut rgb, integral);
            needs_interreduction = false;
            if verbosity >= 2 {
                info!("inter-reduced working basis of size {}", rgb.len());
            }
        }
        let pair = queue.pop_min().expect("queue is non-empty");
        if !pair.is_rescued() {
            // Skip pairs whose slots were tombstoned after queueing.
            if gb[pair.i as usize].is_none() || gb[pair.j as usize].is_none() {
                continue;
            }
        }
        if verbosity >= 3 {
            info!(
                "pop pair ({}, {}) with key (val {}, degree {})",
                pair.i,
                pair.j,
                pair.val,
                pair.exponent.degree()
            );
        }
        let r = reduction::reduce(&pair.spoly, &rgb, integral, false, false)?;
        if r.is_zero() {
            continue;
        }
        gb.push(Some(r.clone()));
        let new_slot = gb.len() - 1;
        let rt = r.leading_term().expect("non-zero remainder").clone();
        if verbosity >= 2 {
            info!("new basis element with leading valuation {}", rt.valuation());
        }
        for (a, g) in rgb.iter().enumerate() {
            let gt = g.leading_term().expect("working basis element is zero");
            if rt.is_coprime_with(gt) {
                continue;
            }
            let s = r.s_polynomial(g);
            if !s.is_zero() {
                queue.push(CriticalPair::new(s, idx[a] as isize, new_slot as isize));
            }
        }
        // Shrink: working elements the new leading term now covers are
        // rescued through the queue so their tails are not lost. Initial
        // generators stay put; final minimisation handles them.
        let mut a = 0;
        while a < rgb.len() {
            let covered = {
                let gt = rgb[a].leading_term().expect("working basis element is zero");
                idx[a] >= initial_count && rt.divides(gt, integral)
            };
            if covered {
                let displaced = rgb.remove(a);
                let slot = idx.remove(a);
                gb[slot] = None;
                queue.push(CriticalPair::rescue(displaced));
            } else {
                a += 1;
            }
        }
        rgb.push(r);
        idx.push(new_slot);
        needs_interreduction = true;
    }

    if verbosity >= 1 {
        info!("Buchberger finished with working basis of size {}", rgb.len());
    }
    canonical::canonicalize(rgb, &algebra)
}

fn lead<'a>(slot: &'a Option<TateSeries>) -> &'a crate::core::term::TateTerm {
    slot.as_ref()
        .expect("tombstoned slot")
        .leading_term()
        .expect("zero element in basis")
}

/// π-shift inter-reduction of the working basis, in place
///
/// Each element is taken out (its slot holds zero meanwhile, which the
/// reducer skips), multiplied by π, tail-reduced against the rest, and
/// shifted back down. Every term of the reduced form has valuation at least
/// one, so the down-shift is exact. If the shifted element vanishes entirely
/// the original is kept: a zero remainder certifies nothing at this
/// precision and must not erase a generator.
fn inter_reduce(rgb: &mut [TateSeries], integral: bool) {
    for i in 0..rgb.len() {
        let placeholder = rgb[i].algebra().zero();
        let g = std::mem::replace(&mut rgb[i], placeholder);
        let shifted = g.positive_pi_shift(1);
        let (_, r) = shifted.quo_rem(rgb, true, integral);
        if r.is_zero() {
            rgb[i] = g;
        } else {
            rgb[i] = r.negative_pi_shift(1);
        }
    }
}
