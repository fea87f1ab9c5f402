//! Result and error types for sondar.

use std::time::Duration;

use thiserror::Error;

use crate::locator::Locator;
use crate::soft_assert::CheckFailure;

/// Result type for sondar operations
pub type SondarResult<T> = Result<T, SondarError>;

/// Errors that can occur while driving a page
#[derive(Debug, Error)]
pub enum SondarError {
    /// A wait condition never became true within its policy.
    ///
    /// Recoverable by the caller: retry, skip, or record a soft failure.
    #[error("waiting for {condition} on {locator} timed out after {elapsed:?}")]
    Timeout {
        /// Locator that was polled
        locator: Locator,
        /// Condition that never held
        condition: String,
        /// Time spent polling
        elapsed: Duration,
    },

    /// A locator matched zero elements at resolution time, independent of
    /// any wait. Usually a locator typo, so usually fatal.
    #[error("no element matched {locator}")]
    NotFound {
        /// Locator that matched nothing
        locator: Locator,
    },

    /// A previously resolved handle no longer corresponds to a live DOM
    /// node. The caller must re-resolve, never reuse the handle.
    #[error("element resolved from {locator} is no longer attached to the DOM")]
    StaleElement {
        /// Locator the stale handle was resolved from
        locator: Locator,
    },

    /// A selection widget has no option with the given visible text.
    #[error("no option with visible text '{option}' in {locator}")]
    OptionNotFound {
        /// Locator of the selection widget
        locator: Locator,
        /// Visible text that was requested
        option: String,
    },

    /// One or more soft assertions failed; raised only by
    /// [`SoftAssert::assert_all`](crate::SoftAssert::assert_all) and
    /// carries every recorded failure in input order.
    #[error("{} soft assertion(s) failed:{}", .failures.len(), format_failures(.failures))]
    AggregateAssertion {
        /// Failed checks, in the order they were recorded
        failures: Vec<CheckFailure>,
    },

    /// The browser-automation backend reported a fault of its own
    /// (lost session, protocol error, element not interactable).
    #[error("driver error: {message}")]
    Driver {
        /// Backend error message
        message: String,
    },
}

fn format_failures(failures: &[CheckFailure]) -> String {
    let mut out = String::new();
    for (index, failure) in failures.iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. {}: {}",
            index + 1,
            failure.description,
            failure.detail
        ));
    }
    out
}
