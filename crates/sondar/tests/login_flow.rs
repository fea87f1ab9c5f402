//! End-to-End Scenarios Over the Scripted Fake Driver
//!
//! Exercises the full stack the way a real suite would: page objects
//! composed from a `Waiter`, soft assertions collected across a scenario,
//! and step events flowing to a listener, all against an in-memory DOM
//! that appears and re-renders on its own schedule.

use std::sync::Arc;
use std::time::Duration;

use sondar::fake::{FakeDriver, FakeNode};
use sondar::{
    Locator, PageObject, RecordingListener, SoftAssert, SondarError, SondarResult, StepEvent,
    StepListener, StepStatus, WaitCondition, WaitPolicy, Waiter,
};

/// Subscriber honoring RUST_LOG, shared across the test binary
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wait policy small enough to keep scenario tests fast
fn fast_policy() -> WaitPolicy {
    WaitPolicy::new(Duration::from_millis(400), Duration::from_millis(20))
}

fn waiter_over(driver: &FakeDriver) -> Waiter {
    Waiter::new(Arc::new(driver.clone()))
        .with_interaction_policy(fast_policy())
        .with_test_level_policy(fast_policy())
}

// =============================================================================
// Page objects under test
// =============================================================================

struct LoginPage {
    waiter: Waiter,
    listener: Arc<RecordingListener>,
}

impl LoginPage {
    fn open_form() -> Locator {
        Locator::css(".fa-sign-in-alt")
    }

    fn username() -> Locator {
        Locator::id("user-name")
    }

    fn password() -> Locator {
        Locator::id("password")
    }

    fn submit() -> Locator {
        Locator::css(".btn.btn-primary")
    }

    fn logged_in_label() -> Locator {
        Locator::link_text("dino")
    }

    fn login(&self, user: &str, pass: &str) -> SondarResult<()> {
        self.listener
            .on_step(&StepEvent::info("login.open", "opening login form"));
        self.waiter.click_when_ready(&Self::open_form())?;
        self.waiter.send_keys_when_ready(&Self::username(), user)?;
        self.waiter.send_keys_when_ready(&Self::password(), pass)?;
        self.waiter.click_when_ready(&Self::submit())?;
        self.listener
            .on_step(&StepEvent::pass("login.submit", "credentials submitted"));
        Ok(())
    }

    fn logged_in_user(&self) -> SondarResult<String> {
        let label = self.waiter.wait_visible(&Self::logged_in_label())?;
        label.text()
    }
}

impl PageObject for LoginPage {
    fn page_name(&self) -> &str {
        "login"
    }

    fn is_loaded(&self) -> SondarResult<bool> {
        self.waiter.is_displayed(&Self::username())
    }
}

struct InventoryPage {
    waiter: Waiter,
}

impl InventoryPage {
    fn sort_widget() -> Locator {
        Locator::css(".right-column select")
    }

    fn first_product() -> Locator {
        Locator::css(".product-name")
    }

    fn sort_by(&self, order: &str) -> SondarResult<()> {
        self.waiter.select(&Self::sort_widget(), order)
    }

    fn first_product_name(&self) -> SondarResult<String> {
        self.waiter.read_text(&Self::first_product())
    }
}

impl PageObject for InventoryPage {
    fn page_name(&self) -> &str {
        "inventory"
    }
}

// =============================================================================
// Login scenario
// =============================================================================

#[test]
fn test_login_end_to_end() {
    init_tracing();
    let driver = FakeDriver::new();
    driver.install(LoginPage::open_form(), FakeNode::visible("Sign in"));
    driver.install(LoginPage::username(), FakeNode::visible(""));
    driver.install(LoginPage::password(), FakeNode::visible(""));
    driver.install(LoginPage::submit(), FakeNode::visible("Log in"));
    // The post-login label renders only after the app round-trips.
    driver.appear_after(
        LoginPage::logged_in_label(),
        FakeNode::visible("dino"),
        Duration::from_millis(80),
    );

    let listener = Arc::new(RecordingListener::new());
    let page = LoginPage {
        waiter: waiter_over(&driver),
        listener: Arc::clone(&listener),
    };

    assert_eq!(page.page_name(), "login");
    assert!(page.is_loaded().unwrap());
    page.login("dino", "choochoo").unwrap();

    assert_eq!(page.logged_in_user().unwrap(), "dino");
    assert_eq!(driver.typed_text(&LoginPage::username()), "dino");
    assert_eq!(driver.typed_text(&LoginPage::password()), "choochoo");

    let events = listener.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].status, StepStatus::Info);
    assert_eq!(events[1].name, "login.submit");
    assert!(events.iter().all(|event| !event.status.is_fail()));
}

#[test]
fn test_login_against_dead_form_times_out_with_context() {
    let driver = FakeDriver::new();
    driver.install(LoginPage::open_form(), FakeNode::visible("Sign in"));
    // Username field never renders.

    let page = LoginPage {
        waiter: waiter_over(&driver),
        listener: Arc::new(RecordingListener::new()),
    };

    let err = page.login("dino", "choochoo").unwrap_err();
    match err {
        SondarError::Timeout {
            locator, condition, ..
        } => {
            assert_eq!(locator, LoginPage::username());
            assert_eq!(condition, "clickable");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

// =============================================================================
// Sorting scenario
// =============================================================================

#[test]
fn test_sort_via_select_reorders_products() {
    let driver = FakeDriver::new();
    driver.install(
        InventoryPage::sort_widget(),
        FakeNode::select([
            "Best Match",
            "Price (Low - High)",
            "Price (High - Low)",
        ]),
    );
    driver.install(
        InventoryPage::first_product(),
        FakeNode::visible("Bone Dog Treats"),
    );

    let page = InventoryPage {
        waiter: waiter_over(&driver),
    };

    page.sort_by("Price (High - Low)").unwrap();
    // The re-render swaps the leading product card.
    driver.replace(
        &InventoryPage::first_product(),
        FakeNode::visible("Diamond Collar"),
    );

    assert_eq!(
        driver.selected(&InventoryPage::sort_widget()),
        Some("Price (High - Low)".to_string())
    );
    assert_eq!(page.first_product_name().unwrap(), "Diamond Collar");
}

#[test]
fn test_sort_by_unknown_order_reports_missing_option() {
    let driver = FakeDriver::new();
    driver.install(
        InventoryPage::sort_widget(),
        FakeNode::select(["Best Match", "Price (Low - High)"]),
    );

    let page = InventoryPage {
        waiter: waiter_over(&driver),
    };

    let err = page.sort_by("Rating").unwrap_err();
    match err {
        SondarError::OptionNotFound { locator, option } => {
            assert_eq!(locator, InventoryPage::sort_widget());
            assert_eq!(option, "Rating");
        }
        other => panic!("expected OptionNotFound, got {other:?}"),
    }
}

// =============================================================================
// Search scenario with soft assertions
// =============================================================================

#[test]
fn test_search_collects_all_failures_before_reporting() {
    let driver = FakeDriver::new();
    let results = Locator::css(".search-results .product-name");
    driver.install(results.clone(), FakeNode::visible("Dog Leash"));

    let waiter = waiter_over(&driver);
    let shown: Vec<String> = vec![waiter.read_text(&results).unwrap()];

    let mut soft = SoftAssert::new();
    soft.contains("leash listed", &shown, &"Dog Leash".to_string());
    soft.contains("collar listed", &shown, &"Dog Collar".to_string());
    soft.assert_eq("one result shown", &1, &shown.len());
    soft.record("results visible", || waiter.is_displayed(&results));
    soft.fail("screenshot capture unavailable");

    assert!(!soft.passed());
    let err = soft.assert_all().unwrap_err();
    match err {
        SondarError::AggregateAssertion { failures } => {
            let names: Vec<&str> = failures.iter().map(|f| f.description.as_str()).collect();
            assert_eq!(names, vec!["collar listed", "screenshot capture unavailable"]);
        }
        other => panic!("expected AggregateAssertion, got {other:?}"),
    }
}

// =============================================================================
// Statelessness and synchronization properties
// =============================================================================

#[test]
fn test_page_object_survives_full_page_rerender() {
    let driver = FakeDriver::new();
    driver.install(LoginPage::open_form(), FakeNode::visible("Sign in"));
    driver.install(LoginPage::username(), FakeNode::visible(""));
    driver.install(LoginPage::password(), FakeNode::visible(""));
    driver.install(LoginPage::submit(), FakeNode::visible("Log in"));

    let page = LoginPage {
        waiter: waiter_over(&driver),
        listener: Arc::new(RecordingListener::new()),
    };
    page.login("dino", "choochoo").unwrap();

    // Re-render every node; stale handles from the first pass must not
    // matter because each action re-resolves.
    for locator in [
        LoginPage::open_form(),
        LoginPage::username(),
        LoginPage::password(),
        LoginPage::submit(),
    ] {
        driver.replace(&locator, FakeNode::visible(""));
    }

    page.login("rex", "bonebone").unwrap();
    assert_eq!(driver.typed_text(&LoginPage::username()), "rex");
}

#[test]
fn test_scroll_then_wait_replaces_fixed_sleep() {
    let driver = FakeDriver::new();
    let footer_link = Locator::link_text("Special deals");
    driver.appear_after(
        footer_link.clone(),
        FakeNode::visible("Special deals"),
        Duration::from_millis(60),
    );

    let waiter = waiter_over(&driver);
    waiter.scroll_to(0, 2800).unwrap();
    waiter
        .wait_for(&footer_link, &WaitCondition::Clickable, &fast_policy())
        .unwrap();
    waiter.click_when_ready(&footer_link).unwrap();

    assert_eq!(driver.scripts(), vec!["window.scrollTo(0, 2800);"]);
    assert_eq!(driver.click_count(&footer_link), 1);
}
