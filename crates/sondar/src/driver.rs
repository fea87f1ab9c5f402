//! The driver capability consumed by the harness.
//!
//! The harness never talks to a browser directly; it talks to whatever
//! implements [`Driver`]. Any backend that can resolve a [`Locator`] to
//! element handles and run a script satisfies the contract, whether it is
//! a WebDriver bridge, a CDP client, or the in-memory
//! [`FakeDriver`](crate::fake::FakeDriver) used in tests. The trait-object
//! seam is what lets backends be swapped without touching page objects or
//! the wait engine.

use std::sync::Arc;

use crate::locator::Locator;
use crate::result::SondarResult;

/// Shared handle to one resolved DOM element
pub type ElementRef = Arc<dyn Element>;

/// Shared handle to one browser session
pub type DriverRef = Arc<dyn Driver>;

/// One resolved DOM element.
///
/// Handles are snapshots: a handle resolved before a re-render may go
/// stale, in which case every operation fails with
/// [`StaleElement`](crate::SondarError::StaleElement) rather than acting on
/// the wrong node. Callers re-resolve instead of caching.
pub trait Element: std::fmt::Debug + Send + Sync {
    /// Click the element
    fn click(&self) -> SondarResult<()>;

    /// Type text into the element
    fn send_text(&self, text: &str) -> SondarResult<()>;

    /// Visible text content of the element
    fn text(&self) -> SondarResult<String>;

    /// Whether the element is rendered and visible
    fn is_displayed(&self) -> SondarResult<bool>;

    /// Whether the element accepts interaction
    fn is_enabled(&self) -> SondarResult<bool>;

    /// Option elements of a selection widget, in document order.
    ///
    /// Empty for anything that is not a selection widget.
    fn options(&self) -> SondarResult<Vec<ElementRef>> {
        Ok(Vec::new())
    }
}

/// Minimal browser-automation surface the harness requires.
///
/// One session is exclusively owned by one executing test at a time; page
/// objects within that test share the session read-only through a
/// [`DriverRef`].
pub trait Driver: Send + Sync {
    /// Resolve a locator against the current DOM.
    ///
    /// Zero matches fail with [`NotFound`](crate::SondarError::NotFound);
    /// the wait engine is the one caller that treats that as "not yet"
    /// and polls again.
    fn resolve(&self, locator: &Locator) -> SondarResult<Vec<ElementRef>>;

    /// Evaluate a script in the page. Used by the harness for viewport
    /// scrolling only.
    fn execute_script(&self, script: &str) -> SondarResult<serde_json::Value>;
}
