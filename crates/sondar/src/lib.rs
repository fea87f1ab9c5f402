//! Sondar: Page-Object Core for Browser End-to-End Suites
//!
//! Sondar (Spanish: "to probe") is the synchronization and reporting core
//! a page-object test suite is built on. It owns three cross-cutting
//! mechanisms: condition-based explicit waits, soft assertion
//! aggregation, and lifecycle step reporting. Browser control itself sits
//! behind the [`Driver`] capability trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SONDAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Page       │    │ Driver     │            │
//! │   │ SoftAssert │───►│ Objects    │───►│ Capability │            │
//! │   │ Listener   │    │ + Waiter   │    │ (session)  │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Page objects are stateless over composition: they hold locators and a
//! [`Waiter`], never element handles, so every action re-resolves against
//! the live page. The [`fake`] module ships a scripted in-memory driver
//! for testing suites without a browser.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod driver;
mod locator;
mod page;
mod reporter;
mod result;
mod soft_assert;
mod wait;

/// Scripted in-memory driver for tests that run without a browser
pub mod fake;

pub use driver::{Driver, DriverRef, Element, ElementRef};
pub use locator::{
    Locator, Strategy, WaitPolicy, INTERACTION_POLL_MS, INTERACTION_TIMEOUT_MS,
    TEST_LEVEL_POLL_MS, TEST_LEVEL_TIMEOUT_MS,
};
pub use page::PageObject;
pub use reporter::{RecordingListener, StepEvent, StepListener, StepStatus, TracingListener};
pub use result::{SondarError, SondarResult};
pub use soft_assert::{CheckFailure, CheckOutcome, SoftAssert};
pub use wait::{resolve_one, wait_for, WaitCondition, Waiter};
