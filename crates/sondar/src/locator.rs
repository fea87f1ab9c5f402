//! Locators and wait policies.
//!
//! A [`Locator`] is an immutable description of how to find one UI element,
//! independent of any live session. Page objects build their locators once,
//! at construction time, and re-resolve them through the driver on every
//! action.
//!
//! A [`WaitPolicy`] pairs a timeout with a polling interval. Two named
//! presets exist: [`WaitPolicy::interaction`] for the short waits inside
//! composite click/type primitives, and [`WaitPolicy::test_level`] for
//! whole-page transitions a test case waits on. They are independent values,
//! never a shared global.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default timeout for interaction-level waits (10 seconds)
pub const INTERACTION_TIMEOUT_MS: u64 = 10_000;

/// Default timeout for test-level waits (30 seconds)
pub const TEST_LEVEL_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval for interaction-level waits (250ms)
pub const INTERACTION_POLL_MS: u64 = 250;

/// Default polling interval for test-level waits (500ms)
pub const TEST_LEVEL_POLL_MS: u64 = 500;

/// Strategy for resolving a locator to DOM elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Match by element id attribute
    Id,
    /// Match by CSS selector
    Css,
    /// Match by XPath expression
    XPath,
    /// Match an anchor by its exact link text
    LinkText,
    /// Match by name attribute
    Name,
}

impl Strategy {
    /// Short name used in error messages and logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::LinkText => "link-text",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable strategy + value pair identifying one UI element.
///
/// Equality is by value, so locators work as map keys and compare cleanly
/// in tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: Strategy,
    value: String,
}

impl Locator {
    /// Create a locator with an explicit strategy
    #[must_use]
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Locator matching by element id
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    /// Locator matching by CSS selector
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::Css, value)
    }

    /// Locator matching by XPath expression
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    /// Locator matching an anchor by its exact link text
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, value)
    }

    /// Locator matching by name attribute
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    /// Get the resolution strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the strategy-specific selector value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}

/// Timeout + polling interval for one wait.
///
/// A policy is a plain value: thread it explicitly into each call rather
/// than stashing one mutable instance somewhere shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Total time to keep polling before giving up
    pub timeout: Duration,
    /// Pause between polls
    pub poll_interval: Duration,
}

impl WaitPolicy {
    /// Create a policy from explicit durations
    #[must_use]
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Preset for the waits inside composite click/type primitives
    #[must_use]
    pub const fn interaction() -> Self {
        Self::new(
            Duration::from_millis(INTERACTION_TIMEOUT_MS),
            Duration::from_millis(INTERACTION_POLL_MS),
        )
    }

    /// Preset for test-level waits on whole-page transitions
    #[must_use]
    pub const fn test_level() -> Self {
        Self::new(
            Duration::from_millis(TEST_LEVEL_TIMEOUT_MS),
            Duration::from_millis(TEST_LEVEL_POLL_MS),
        )
    }

    /// Override the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::interaction()
    }
}
