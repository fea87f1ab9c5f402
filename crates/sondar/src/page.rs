//! The page-object contract.
//!
//! A page object names its locators, owns a [`Waiter`](crate::Waiter) by
//! composition, and exposes intent-level methods built from the composite
//! primitives. The trait itself is identity only; there is no base page
//! type to inherit from and no hidden state, so a page object can be
//! dropped and rebuilt against the same session at any point.
//!
//! ```ignore
//! struct LoginPage {
//!     waiter: Waiter,
//! }
//!
//! impl LoginPage {
//!     fn username() -> Locator {
//!         Locator::id("user-name")
//!     }
//!
//!     fn login(&self, user: &str, pass: &str) -> SondarResult<()> {
//!         self.waiter.send_keys_when_ready(&Self::username(), user)?;
//!         self.waiter.send_keys_when_ready(&Self::password(), pass)?;
//!         self.waiter.click_when_ready(&Self::submit())
//!     }
//! }
//!
//! impl PageObject for LoginPage {
//!     fn page_name(&self) -> &str {
//!         "login"
//!     }
//! }
//! ```

use crate::result::SondarResult;

/// Identity contract for a page object.
///
/// Implementations hold their locators and a `Waiter`; the trait only
/// asks for a name and an optional readiness probe.
pub trait PageObject {
    /// Human-readable page name, used in step events and logs
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether the page's landmark elements are currently rendered.
    ///
    /// A probe, not a wait: it reads current state and returns
    /// immediately. The default claims readiness unconditionally.
    fn is_loaded(&self) -> SondarResult<bool> {
        Ok(true)
    }
}
