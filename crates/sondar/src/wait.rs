//! Explicit synchronization between test execution and page rendering.
//!
//! The engine is a single polling loop: resolve the locator, evaluate a
//! named [`WaitCondition`] against the handles, and either return them or
//! sleep one poll interval and try again until the policy's timeout runs
//! out. There are no fixed sleeps anywhere; every pause is tied to a
//! condition that can end it early.
//!
//! [`Waiter`] layers the two composite primitives every page-object action
//! is built from, `click_when_ready` and `send_keys_when_ready`, plus the
//! selection and scrolling helpers. Page objects hold a `Waiter` by
//! composition; there is no base page type.

use std::fmt;
use std::thread;
use std::time::Instant;

use crate::driver::{Driver, DriverRef, ElementRef};
use crate::locator::{Locator, WaitPolicy};
use crate::result::{SondarError, SondarResult};

/// A named predicate over a freshly resolved element set.
///
/// Conditions are pure: they read current DOM state through the handles
/// and hold no state of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// At least one element matches the locator
    Present,
    /// The first matching element is displayed
    Visible,
    /// The first matching element is displayed and enabled
    Clickable,
    /// The first matching element's text equals the expected string
    TextEquals(String),
}

impl WaitCondition {
    /// Evaluate the condition against a resolved handle set.
    ///
    /// An empty set never satisfies any condition.
    pub fn holds(&self, handles: &[ElementRef]) -> SondarResult<bool> {
        let Some(first) = handles.first() else {
            return Ok(false);
        };
        match self {
            Self::Present => Ok(true),
            Self::Visible => first.is_displayed(),
            Self::Clickable => Ok(first.is_displayed()? && first.is_enabled()?),
            Self::TextEquals(expected) => Ok(first.text()? == *expected),
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Visible => f.write_str("visible"),
            Self::Clickable => f.write_str("clickable"),
            Self::TextEquals(expected) => write!(f, "text == '{expected}'"),
        }
    }
}

/// Poll until `condition` holds on `locator`, returning the resolved
/// handles.
///
/// The handles satisfied the condition at the instant of return; nothing
/// stops the page from changing before the follow-up action runs, which is
/// why actions re-resolve rather than cache.
///
/// A `NotFound` from resolution and a `StaleElement` raised while the
/// condition reads the handles both mean "not yet" and are retried; any
/// other driver error propagates immediately. The loop evaluates at least
/// once, sleeps `policy.poll_interval` between polls, and gives up with
/// [`SondarError::Timeout`] within one poll interval of `policy.timeout`.
pub fn wait_for(
    driver: &dyn Driver,
    locator: &Locator,
    condition: &WaitCondition,
    policy: &WaitPolicy,
) -> SondarResult<Vec<ElementRef>> {
    let start = Instant::now();
    loop {
        match driver.resolve(locator) {
            Ok(handles) => match condition.holds(&handles) {
                Ok(true) => {
                    tracing::debug!(%locator, %condition, elapsed = ?start.elapsed(), "condition met");
                    return Ok(handles);
                }
                Ok(false) => {}
                // The node went away between resolve and read; the next
                // poll re-resolves it.
                Err(SondarError::StaleElement { .. }) => {}
                Err(other) => return Err(other),
            },
            // Zero matches may mean "not rendered yet"; keep polling.
            Err(SondarError::NotFound { .. }) => {}
            Err(other) => return Err(other),
        }

        let elapsed = start.elapsed();
        if elapsed >= policy.timeout {
            tracing::debug!(%locator, %condition, ?elapsed, "wait timed out");
            return Err(SondarError::Timeout {
                locator: locator.clone(),
                condition: condition.to_string(),
                elapsed,
            });
        }
        tracing::trace!(%locator, %condition, "condition not met yet");
        thread::sleep(policy.poll_interval);
    }
}

/// Resolve a locator to its first matching handle, without waiting.
///
/// This is the accessor path: zero matches is a hard
/// [`NotFound`](SondarError::NotFound). Callers that expect the element to
/// appear asynchronously use [`wait_for`] instead.
pub fn resolve_one(driver: &dyn Driver, locator: &Locator) -> SondarResult<ElementRef> {
    let handles = driver.resolve(locator)?;
    first(handles, locator)
}

fn first(handles: Vec<ElementRef>, locator: &Locator) -> SondarResult<ElementRef> {
    handles
        .into_iter()
        .next()
        .ok_or_else(|| SondarError::NotFound {
            locator: locator.clone(),
        })
}

/// Composite wait-then-act primitives bound to one driver session.
///
/// Carries the two named wait presets; every method re-resolves its
/// locator, so no handle outlives a single call.
#[derive(Clone)]
pub struct Waiter {
    driver: DriverRef,
    interaction: WaitPolicy,
    test_level: WaitPolicy,
}

impl fmt::Debug for Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waiter")
            .field("interaction", &self.interaction)
            .field("test_level", &self.test_level)
            .finish_non_exhaustive()
    }
}

impl Waiter {
    /// Bind the default policy presets to a driver session
    #[must_use]
    pub fn new(driver: DriverRef) -> Self {
        Self {
            driver,
            interaction: WaitPolicy::interaction(),
            test_level: WaitPolicy::test_level(),
        }
    }

    /// Override the interaction-level preset
    #[must_use]
    pub fn with_interaction_policy(mut self, policy: WaitPolicy) -> Self {
        self.interaction = policy;
        self
    }

    /// Override the test-level preset
    #[must_use]
    pub fn with_test_level_policy(mut self, policy: WaitPolicy) -> Self {
        self.test_level = policy;
        self
    }

    /// The driver session this waiter is bound to
    #[must_use]
    pub fn driver(&self) -> &DriverRef {
        &self.driver
    }

    /// The interaction-level preset in effect
    #[must_use]
    pub const fn interaction_policy(&self) -> WaitPolicy {
        self.interaction
    }

    /// The test-level preset in effect
    #[must_use]
    pub const fn test_level_policy(&self) -> WaitPolicy {
        self.test_level
    }

    /// Wait with an explicit policy
    pub fn wait_for(
        &self,
        locator: &Locator,
        condition: &WaitCondition,
        policy: &WaitPolicy,
    ) -> SondarResult<Vec<ElementRef>> {
        wait_for(self.driver.as_ref(), locator, condition, policy)
    }

    /// Wait at the test-level preset until the element is visible, then
    /// return its handle
    pub fn wait_visible(&self, locator: &Locator) -> SondarResult<ElementRef> {
        let handles = self.wait_for(locator, &WaitCondition::Visible, &self.test_level)?;
        first(handles, locator)
    }

    /// Wait until the element is clickable, then click it
    pub fn click_when_ready(&self, locator: &Locator) -> SondarResult<()> {
        let handles = self.wait_for(locator, &WaitCondition::Clickable, &self.interaction)?;
        let element = first(handles, locator)?;
        tracing::debug!(%locator, "click");
        element.click()
    }

    /// Wait until the element is clickable, then type into it
    pub fn send_keys_when_ready(&self, locator: &Locator, text: &str) -> SondarResult<()> {
        let handles = self.wait_for(locator, &WaitCondition::Clickable, &self.interaction)?;
        let element = first(handles, locator)?;
        tracing::debug!(%locator, "send keys");
        element.send_text(text)
    }

    /// Wait until the selection widget is clickable, then pick the option
    /// with the given visible text.
    ///
    /// Fails with [`OptionNotFound`](SondarError::OptionNotFound) when no
    /// option matches.
    pub fn select(&self, locator: &Locator, visible_text: &str) -> SondarResult<()> {
        let handles = self.wait_for(locator, &WaitCondition::Clickable, &self.interaction)?;
        let widget = first(handles, locator)?;
        for option in widget.options()? {
            if option.text()? == visible_text {
                tracing::debug!(%locator, option = visible_text, "select option");
                return option.click();
            }
        }
        Err(SondarError::OptionNotFound {
            locator: locator.clone(),
            option: visible_text.to_string(),
        })
    }

    /// Scroll the viewport to the given coordinates
    pub fn scroll_to(&self, x: i64, y: i64) -> SondarResult<()> {
        let _ = self
            .driver
            .execute_script(&format!("window.scrollTo({x}, {y});"))?;
        Ok(())
    }

    /// Accessor read of the element's text, without waiting
    pub fn read_text(&self, locator: &Locator) -> SondarResult<String> {
        resolve_one(self.driver.as_ref(), locator)?.text()
    }

    /// Accessor read of the element's visibility, without waiting
    pub fn is_displayed(&self, locator: &Locator) -> SondarResult<bool> {
        resolve_one(self.driver.as_ref(), locator)?.is_displayed()
    }
}
