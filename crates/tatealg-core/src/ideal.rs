//! Ideals of Tate algebras and the operations built on their canonical bases
//!
//! An ideal is a finite generator list plus a memoised canonical Gröbner
//! basis per (precision, algorithm, mode) key. Membership, inclusion,
//! comparison, saturation, and the is-saturated predicate are lazy façades
//! that request a canonical basis and interpret it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::core::algebra::TateAlgebra;
use crate::core::series::TateSeries;
use crate::error::{TateError, TateResult};
use crate::groebner::{buchberger, f5, reduce, GroebnerAlgorithm, GroebnerConfig};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BasisKey {
    precision: i64,
    algorithm: GroebnerAlgorithm,
    integral: bool,
}

/// Ideal of a Tate algebra
///
/// The basis cache is written exactly once per key and is not populated when
/// a computation is cancelled.
pub struct TateIdeal {
    algebra: TateAlgebra,
    gens: Vec<TateSeries>,
    cache: Mutex<HashMap<BasisKey, Arc<Vec<TateSeries>>>>,
}

impl TateAlgebra {
    /// The ideal generated by the given elements
    pub fn ideal(&self, gens: Vec<TateSeries>) -> TateIdeal {
        debug_assert!(gens.iter().all(|g| g.algebra() == self));
        TateIdeal {
            algebra: self.clone(),
            gens,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl TateIdeal {
    pub fn algebra(&self) -> &TateAlgebra {
        &self.algebra
    }

    /// The generators the ideal was constructed with
    pub fn gens(&self) -> &[TateSeries] {
        &self.gens
    }

    /// The canonical Gröbner basis at default parameters
    pub fn groebner_basis(&self) -> TateResult<Arc<Vec<TateSeries>>> {
        self.groebner_basis_with(&GroebnerConfig::default())
    }

    /// The canonical Gröbner basis for an explicit configuration
    ///
    /// The basis is computed lazily at first need and cached per
    /// (precision, algorithm, mode); later calls with the same key return
    /// the cached value.
    pub fn groebner_basis_with(&self, config: &GroebnerConfig) -> TateResult<Arc<Vec<TateSeries>>> {
        let precision = config.precision.unwrap_or_else(|| self.algebra.precision_cap());
        if precision <= 0 {
            return Err(TateError::InvalidPrecision {
                requested: precision,
            });
        }
        let algorithm = config.algorithm.unwrap_or(GroebnerAlgorithm::Buchberger);
        let integral =
            self.algebra.integral_base() || algorithm == GroebnerAlgorithm::BuchbergerIntegral;
        let key = BasisKey {
            precision,
            algorithm,
            integral,
        };
        {
            let cache = self.cache.lock().expect("basis cache poisoned");
            if let Some(basis) = cache.get(&key) {
                return Ok(basis.clone());
            }
        }
        let basis = match algorithm {
            GroebnerAlgorithm::Buchberger | GroebnerAlgorithm::BuchbergerIntegral => buchberger(
                &self.gens,
                precision,
                integral,
                config.verbosity,
                config.cancel.as_ref(),
            )?,
            GroebnerAlgorithm::F5 => {
                if self.algebra.integral_base() {
                    return Err(TateError::NotImplementedAlgorithm {
                        algorithm: "F5 over the ring of integers".to_string(),
                    });
                }
                f5(&self.gens, precision, config.verbosity, config.cancel.as_ref())?
            }
        };
        let basis = Arc::new(basis);
        let mut cache = self.cache.lock().expect("basis cache poisoned");
        Ok(cache.entry(key).or_insert(basis).clone())
    }

    /// Ideal membership: the element reduces to zero modulo the canonical
    /// basis
    pub fn contains(&self, element: &TateSeries) -> TateResult<bool> {
        let basis = self.groebner_basis()?;
        if basis.is_empty() {
            return Ok(element.is_zero());
        }
        let remainder = reduce(element, &basis, self.algebra.integral_base(), true, false)?;
        Ok(remainder.is_zero())
    }

    /// Whether every generator of the other ideal is a member of this one
    pub fn contains_ideal(&self, other: &TateIdeal) -> TateResult<bool> {
        for g in &other.gens {
            if !self.contains(g)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Over a field base every ideal is saturated; over the ring of integers
    /// the ideal is saturated iff every basis element has valuation zero
    pub fn is_saturated(&self) -> TateResult<bool> {
        if !self.algebra.integral_base() {
            return Ok(true);
        }
        let basis = self.groebner_basis()?;
        Ok(basis.iter().all(|g| g.valuation() == 0))
    }

    /// The saturation {f : π^n·f ∈ I for some n}
    ///
    /// Over a field base this is the ideal itself; over the ring of integers
    /// it is generated by the monic rescaling of each basis element.
    pub fn saturate(&self) -> TateResult<TateIdeal> {
        if !self.algebra.integral_base() {
            return Ok(self.clone());
        }
        let basis = self.groebner_basis()?;
        let mut gens = Vec::with_capacity(basis.len());
        for g in basis.iter() {
            gens.push(g.monic()?);
        }
        Ok(self.algebra.ideal(gens))
    }
}

impl Clone for TateIdeal {
    /// Cloning copies the generators; the basis cache starts empty
    fn clone(&self) -> Self {
        Self {
            algebra: self.algebra.clone(),
            gens: self.gens.clone(),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl fmt::Debug for TateIdeal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TateIdeal")
            .field("algebra", &self.algebra)
            .field("gens", &self.gens)
            .finish()
    }
}

impl fmt::Display for TateIdeal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ideal (")?;
        for (i, g) in self.gens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, ")")
    }
}

impl PartialEq for TateIdeal {
    /// Ideal equality through mutual containment; a failed basis computation
    /// compares unequal
    fn eq(&self, other: &Self) -> bool {
        self.contains_ideal(other).unwrap_or(false)
            && other.contains_ideal(self).unwrap_or(false)
    }
}

impl PartialOrd for TateIdeal {
    /// Inclusion order lifted from containment; incomparable ideals (or a
    /// failed basis computation) yield `None`
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let below = other.contains_ideal(self).ok()?;
        let above = self.contains_ideal(other).ok()?;
        match (below, above) {
            (true, true) => Some(std::cmp::Ordering::Equal),
            (true, false) => Some(std::cmp::Ordering::Less),
            (false, true) => Some(std::cmp::Ordering::Greater),
            (false, false) => None,
        }
    }
}
