//! Gröbner-basis engine for ideals in Tate algebras
//!
//! Two drivers share the pair-queue and reducer abstractions: a
//! valuation-aware Buchberger algorithm with field and integral variants,
//! and a signature-based (F5) variant. Both end in the canonicalisation
//! pass, so the basis handed to the ideal surface is minimal, reduced,
//! normalised, and sorted.

pub mod buchberger;
pub mod canonical;
pub mod pair_queue;
pub mod reduction;
pub mod signature;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{TateError, TateResult};

pub use buchberger::buchberger;
pub use canonical::{canonicalize, minimise};
pub use pair_queue::{CriticalPair, PairQueue};
pub use reduction::reduce;
pub use signature::{f5, Signature};

/// The Gröbner-basis algorithms the engine implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroebnerAlgorithm {
    /// Valuation-aware Buchberger over the field
    Buchberger,
    /// Buchberger with integral (valuation-respecting) divisibility
    BuchbergerIntegral,
    /// Signature-based variant (field base only)
    F5,
}

static ALGORITHMS: Lazy<HashMap<&'static str, GroebnerAlgorithm>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("buchberger", GroebnerAlgorithm::Buchberger);
    m.insert("buchberger-integral", GroebnerAlgorithm::BuchbergerIntegral);
    m.insert("F5", GroebnerAlgorithm::F5);
    m
});

impl GroebnerAlgorithm {
    /// Resolve an algorithm name; unknown names are a
    /// `NotImplementedAlgorithm` error
    pub fn parse(name: &str) -> TateResult<Self> {
        ALGORITHMS
            .get(name)
            .copied()
            .ok_or_else(|| TateError::NotImplementedAlgorithm {
                algorithm: name.to_string(),
            })
    }
}

/// Cooperative cancellation token
///
/// The drivers check it at every pair pop and every inter-reduction pass;
/// on cancellation all intermediate state is abandoned and the basis cache
/// is left untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub(crate) fn check_cancel(cancel: Option<&CancelToken>) -> TateResult<()> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(TateError::Cancelled);
        }
    }
    Ok(())
}

/// Parameters of a Gröbner-basis computation
///
/// `precision` falls back to the algebra's default cap; `verbosity` (0-4)
/// gates human-readable progress lines on the log channel.
#[derive(Debug, Clone, Default)]
pub struct GroebnerConfig {
    pub precision: Option<i64>,
    pub algorithm: Option<GroebnerAlgorithm>,
    pub verbosity: u8,
    pub cancel: Option<CancelToken>,
}

impl GroebnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the algorithm by name ("buchberger", "buchberger-integral",
    /// "F5")
    pub fn algorithm_named(name: &str) -> TateResult<Self> {
        Ok(Self {
            algorithm: Some(GroebnerAlgorithm::parse(name)?),
            ..Self::default()
        })
    }

    pub fn with_algorithm(mut self, algorithm: GroebnerAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_precision(mut self, precision: i64) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!(
            GroebnerAlgorithm::parse("buchberger").unwrap(),
            GroebnerAlgorithm::Buchberger
        );
        assert_eq!(
            GroebnerAlgorithm::parse("buchberger-integral").unwrap(),
            GroebnerAlgorithm::BuchbergerIntegral
        );
        assert_eq!(GroebnerAlgorithm::parse("F5").unwrap(), GroebnerAlgorithm::F5);
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = GroebnerAlgorithm::parse("F4").unwrap_err();
        assert_eq!(
            err,
            TateError::NotImplementedAlgorithm {
                algorithm: "F4".to_string()
            }
        );
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(check_cancel(Some(&token)).is_ok());
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(check_cancel(Some(&token)).unwrap_err(), TateError::Cancelled);
        assert!(check_cancel(None).is_ok());
    }

    #[test]
    fn test_config_builders() {
        let cfg = GroebnerConfig::algorithm_named("F5")
            .unwrap()
            .with_precision(5)
            .with_verbosity(2);
        assert_eq!(cfg.algorithm, Some(GroebnerAlgorithm::F5));
        assert_eq!(cfg.precision, Some(5));
        assert_eq!(cfg.verbosity, 2);
        assert!(cfg.cancel.is_none());
    }
}
