//! Ordered strategy resolution with recorded fallbacks.
//!
//! Every fallback chain in the workspace (live risk-free rate to configured
//! constant, requested FCF method to the next viable one) is expressed as an
//! ordered list of strategies handed to [`resolve_first`]. The resolver
//! returns the winning strategy together with every strategy that failed
//! before it, so callers can always report which fallback fired.
//!
//! ```rust
//! use dcf_core::fallback::resolve_first;
//!
//! let live: Option<f64> = None;
//! let resolution = resolve_first(&["live", "constant"], |source| match *source {
//!     "live" => live.ok_or(vec!["risk_free_rate"]),
//!     _ => Ok(0.045),
//! })
//! .unwrap();
//!
//! assert_eq!(resolution.selected, "constant");
//! assert!(resolution.fallback_used());
//! assert_eq!(resolution.failed[0].missing, vec!["risk_free_rate"]);
//! ```

use crate::types::{FailedMethod, MissingDataError};
use std::fmt;

/// A strategy that was tried and could not produce a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt<S> {
    /// The strategy tried
    pub strategy: S,
    /// Inputs the strategy needed but did not have
    pub missing: Vec<&'static str>,
}

/// Outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<S, T> {
    /// The strategy that produced the value
    pub selected: S,
    /// The value produced
    pub value: T,
    /// Strategies tried before `selected`, in order
    pub failed: Vec<Attempt<S>>,
}

impl<S, T> Resolution<S, T> {
    /// Whether any strategy ahead of the selected one failed.
    #[inline]
    pub fn fallback_used(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Every strategy in the chain failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exhausted<S> {
    /// All attempts, in order
    pub attempts: Vec<Attempt<S>>,
}

impl<S: fmt::Display> From<Exhausted<S>> for MissingDataError {
    fn from(exhausted: Exhausted<S>) -> Self {
        MissingDataError {
            attempted: exhausted
                .attempts
                .into_iter()
                .map(|a| FailedMethod {
                    method: a.strategy.to_string(),
                    missing: a.missing.into_iter().map(str::to_string).collect(),
                })
                .collect(),
        }
    }
}

/// Tries `strategies` in order and returns the first that succeeds.
///
/// `attempt` returns the produced value, or the names of the inputs the
/// strategy lacked.
///
/// # Errors
///
/// Returns [`Exhausted`] listing every attempt when no strategy succeeds
/// (including when `strategies` is empty).
pub fn resolve_first<S, T, F>(
    strategies: &[S],
    mut attempt: F,
) -> Result<Resolution<S, T>, Exhausted<S>>
where
    S: Clone,
    F: FnMut(&S) -> Result<T, Vec<&'static str>>,
{
    let mut failed = Vec::new();

    for strategy in strategies {
        match attempt(strategy) {
            Ok(value) => {
                return Ok(Resolution {
                    selected: strategy.clone(),
                    value,
                    failed,
                })
            }
            Err(missing) => failed.push(Attempt {
                strategy: strategy.clone(),
                missing,
            }),
        }
    }

    Err(Exhausted { attempts: failed })
}
