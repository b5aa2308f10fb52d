//! Reduction of an element against a divisor family
//!
//! Thin driver-facing wrapper over the multi-divisor division of
//! [`TateSeries::quo_rem`], adding the `require_nonzero_remainder` contract:
//! callers that must certify a non-zero normal form get a
//! `PrecisionExhausted` error when everything vanishes below the working
//! precision instead of a silent zero.

use crate::core::series::TateSeries;
use crate::error::{TateError, TateResult};

/// Reduce `f` against the family `divisors`, returning the remainder
///
/// The remainder is either zero or has a leading term not divisible (under
/// the requested mode) by any divisor's leading term; with `reduce_tail` no
/// term of the remainder is divisible by any divisor's leading term. Zero
/// divisors in the family are skipped.
pub fn reduce(
    f: &TateSeries,
    divisors: &[TateSeries],
    integral: bool,
    reduce_tail: bool,
    require_nonzero_remainder: bool,
) -> TateResult<TateSeries> {
    let (_, remainder) = f.quo_rem(divisors, reduce_tail, integral);
    if require_nonzero_remainder && remainder.is_zero() {
        return Err(TateError::PrecisionExhausted {
            operation: "reduction".to_string(),
        });
    }
    Ok(remainder)
}
