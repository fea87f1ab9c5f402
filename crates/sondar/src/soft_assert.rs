//! Soft assertions: record every check, fail once at the end.
//!
//! A [`SoftAssert`] never aborts the scenario mid-flight. Each check is
//! recorded in order; the consuming [`assert_all`](SoftAssert::assert_all)
//! call either succeeds or folds every failure into a single
//! [`AggregateAssertion`](crate::SondarError::AggregateAssertion) error.
//! Because finalization takes `self` by value, a collector cannot be
//! finalized twice and a forgotten finalization is visible as an unused
//! `#[must_use]` value.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::result::{SondarError, SondarResult};

/// One recorded check, pass or fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// What the check verified
    pub description: String,
    /// Whether it held
    pub passed: bool,
    /// Failure detail, empty for passes
    pub detail: String,
}

/// A failed check, as carried by the aggregate error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFailure {
    /// What the check verified
    pub description: String,
    /// Why it failed
    pub detail: String,
}

/// Ordered collector of soft assertion outcomes
#[derive(Debug, Default)]
#[must_use = "call assert_all() to surface recorded failures"]
pub struct SoftAssert {
    checks: Vec<CheckOutcome>,
}

impl SoftAssert {
    /// An empty collector
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, description: &str, passed: bool, detail: String) {
        if passed {
            tracing::trace!(check = description, "soft check passed");
        } else {
            tracing::debug!(check = description, detail, "soft check failed");
        }
        self.checks.push(CheckOutcome {
            description: description.to_string(),
            passed,
            detail,
        });
    }

    /// Record the outcome of a fallible condition.
    ///
    /// `Ok(true)` passes; `Ok(false)` and `Err` are both recorded as
    /// failures. The error case never propagates here, so a broken page
    /// read cannot abort the remaining checks.
    pub fn record<F>(&mut self, description: &str, check: F)
    where
        F: FnOnce() -> SondarResult<bool>,
    {
        match check() {
            Ok(true) => self.push(description, true, String::new()),
            Ok(false) => self.push(description, false, "condition was false".to_string()),
            Err(err) => self.push(description, false, err.to_string()),
        }
    }

    /// Record a plain boolean check
    pub fn assert_true(&mut self, description: &str, condition: bool) {
        if condition {
            self.push(description, true, String::new());
        } else {
            self.push(description, false, "condition was false".to_string());
        }
    }

    /// Record an equality check
    pub fn assert_eq<T>(&mut self, description: &str, expected: &T, actual: &T)
    where
        T: PartialEq + Debug,
    {
        if expected == actual {
            self.push(description, true, String::new());
        } else {
            self.push(
                description,
                false,
                format!("expected {expected:?}, got {actual:?}"),
            );
        }
    }

    /// Record a membership check
    pub fn contains<T>(&mut self, description: &str, haystack: &[T], needle: &T)
    where
        T: PartialEq + Debug,
    {
        if haystack.contains(needle) {
            self.push(description, true, String::new());
        } else {
            self.push(description, false, format!("{needle:?} not found"));
        }
    }

    /// Record an unconditional failure
    pub fn fail(&mut self, description: &str) {
        self.push(description, false, "explicit failure".to_string());
    }

    /// Whether every check so far has passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// All recorded outcomes, in recording order
    #[must_use]
    pub fn checks(&self) -> &[CheckOutcome] {
        &self.checks
    }

    /// Finalize the collector.
    ///
    /// `Ok(())` when every check passed, otherwise an
    /// [`AggregateAssertion`](SondarError::AggregateAssertion) carrying
    /// every failure in recording order. Consumes the collector.
    pub fn assert_all(self) -> SondarResult<()> {
        let failures: Vec<CheckFailure> = self
            .checks
            .into_iter()
            .filter(|check| !check.passed)
            .map(|check| CheckFailure {
                description: check.description,
                detail: check.detail,
            })
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(SondarError::AggregateAssertion { failures })
        }
    }
}
