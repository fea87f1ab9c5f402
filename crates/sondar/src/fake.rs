//! Scripted in-memory driver for tests.
//!
//! [`FakeDriver`] implements the [`Driver`] capability over a hash map of
//! [`FakeNode`]s instead of a browser. Tests script the DOM (install
//! nodes, delay their appearance, replace them mid-test) and then observe
//! what the harness did to them (clicks, typed text, selected options,
//! executed scripts).
//!
//! Handles carry a per-node generation counter. [`FakeDriver::replace`]
//! bumps it, so any handle resolved before the replacement fails with
//! [`StaleElement`](SondarError::StaleElement) on its next use, the same
//! life cycle a re-rendered page gives real WebDriver handles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::driver::{Driver, Element, ElementRef};
use crate::locator::Locator;
use crate::result::{SondarError, SondarResult};

/// Scripted state for one fake DOM node
#[derive(Debug, Clone)]
pub struct FakeNode {
    /// Visible text
    pub text: String,
    /// Whether the node is rendered and visible
    pub displayed: bool,
    /// Whether the node accepts interaction
    pub enabled: bool,
    /// Visible texts of option children, for selection widgets
    pub options: Vec<String>,
}

impl FakeNode {
    /// A visible, enabled node with the given text
    #[must_use]
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            displayed: true,
            enabled: true,
            options: Vec::new(),
        }
    }

    /// A node that exists in the DOM but is not displayed
    #[must_use]
    pub fn hidden(text: impl Into<String>) -> Self {
        Self {
            displayed: false,
            ..Self::visible(text)
        }
    }

    /// A visible node that rejects interaction
    #[must_use]
    pub fn disabled(text: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::visible(text)
        }
    }

    /// A visible selection widget with the given option texts
    #[must_use]
    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::visible("")
        }
    }
}

#[derive(Debug)]
struct NodeState {
    node: FakeNode,
    generation: u64,
    appears_at: Option<Instant>,
    removed: bool,
    selected: Option<String>,
    clicks: u64,
    typed: String,
}

impl NodeState {
    fn new(node: FakeNode) -> Self {
        Self {
            node,
            generation: 0,
            appears_at: None,
            removed: false,
            selected: None,
            clicks: 0,
            typed: String::new(),
        }
    }
}

#[derive(Debug, Default)]
struct DomState {
    nodes: HashMap<Locator, NodeState>,
    scripts: Vec<String>,
    resolve_count: u64,
}

/// In-memory [`Driver`] with a scripted DOM.
///
/// Cloning shares the underlying DOM, so a test can keep one handle for
/// scripting while the harness drives another.
#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    state: Arc<Mutex<DomState>>,
}

impl FakeDriver {
    /// Create a driver with an empty DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a node at the given locator
    pub fn install(&self, locator: Locator, node: FakeNode) {
        let mut state = self.state.lock().unwrap();
        let _ = state.nodes.insert(locator, NodeState::new(node));
    }

    /// Install a node that only starts resolving after `delay`
    pub fn appear_after(&self, locator: Locator, node: FakeNode, delay: Duration) {
        let mut state = self.state.lock().unwrap();
        let mut node_state = NodeState::new(node);
        node_state.appears_at = Some(Instant::now() + delay);
        let _ = state.nodes.insert(locator, node_state);
    }

    /// Replace the node at the given locator, invalidating every handle
    /// resolved from it so far
    pub fn replace(&self, locator: &Locator, node: FakeNode) {
        let mut state = self.state.lock().unwrap();
        match state.nodes.get_mut(locator) {
            Some(existing) => {
                let generation = existing.generation + 1;
                *existing = NodeState::new(node);
                existing.generation = generation;
            }
            None => {
                let _ = state.nodes.insert(locator.clone(), NodeState::new(node));
            }
        }
    }

    /// Detach the node; existing handles go stale, new resolves find nothing
    pub fn remove(&self, locator: &Locator) {
        let mut state = self.state.lock().unwrap();
        if let Some(node_state) = state.nodes.get_mut(locator) {
            node_state.removed = true;
        }
    }

    /// Update a node's visible text in place
    pub fn set_text(&self, locator: &Locator, text: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        if let Some(node_state) = state.nodes.get_mut(locator) {
            node_state.node.text = text.into();
        }
    }

    /// Update a node's visibility in place
    pub fn set_displayed(&self, locator: &Locator, displayed: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some(node_state) = state.nodes.get_mut(locator) {
            node_state.node.displayed = displayed;
        }
    }

    /// Update a node's enabled flag in place
    pub fn set_enabled(&self, locator: &Locator, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some(node_state) = state.nodes.get_mut(locator) {
            node_state.node.enabled = enabled;
        }
    }

    /// Option text selected on a selection widget, if any
    #[must_use]
    pub fn selected(&self, locator: &Locator) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.nodes.get(locator).and_then(|n| n.selected.clone())
    }

    /// Text typed into a node so far
    #[must_use]
    pub fn typed_text(&self, locator: &Locator) -> String {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .get(locator)
            .map(|n| n.typed.clone())
            .unwrap_or_default()
    }

    /// Number of clicks a node has received
    #[must_use]
    pub fn click_count(&self, locator: &Locator) -> u64 {
        let state = self.state.lock().unwrap();
        state.nodes.get(locator).map_or(0, |n| n.clicks)
    }

    /// Scripts passed to [`Driver::execute_script`], in call order
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts.clone()
    }

    /// Total number of [`Driver::resolve`] calls made against this driver
    #[must_use]
    pub fn resolve_count(&self) -> u64 {
        self.state.lock().unwrap().resolve_count
    }
}

impl Driver for FakeDriver {
    fn resolve(&self, locator: &Locator) -> SondarResult<Vec<ElementRef>> {
        let mut state = self.state.lock().unwrap();
        state.resolve_count += 1;
        let Some(node_state) = state.nodes.get(locator) else {
            return Err(SondarError::NotFound {
                locator: locator.clone(),
            });
        };
        if node_state.removed {
            return Err(SondarError::NotFound {
                locator: locator.clone(),
            });
        }
        if let Some(appears_at) = node_state.appears_at {
            if Instant::now() < appears_at {
                return Err(SondarError::NotFound {
                    locator: locator.clone(),
                });
            }
        }
        let handle: ElementRef = Arc::new(FakeElement {
            state: Arc::clone(&self.state),
            locator: locator.clone(),
            generation: node_state.generation,
            option_index: None,
        });
        Ok(vec![handle])
    }

    fn execute_script(&self, script: &str) -> SondarResult<serde_json::Value> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push(script.to_string());
        Ok(serde_json::Value::Null)
    }
}

/// A handle into the fake DOM. `option_index` is set when the handle was
/// produced by [`Element::options`] on a selection widget.
#[derive(Debug)]
struct FakeElement {
    state: Arc<Mutex<DomState>>,
    locator: Locator,
    generation: u64,
    option_index: Option<usize>,
}

impl FakeElement {
    fn with_live<T>(&self, op: impl FnOnce(&mut NodeState) -> SondarResult<T>) -> SondarResult<T> {
        let mut state = self.state.lock().unwrap();
        let Some(node_state) = state.nodes.get_mut(&self.locator) else {
            return Err(SondarError::StaleElement {
                locator: self.locator.clone(),
            });
        };
        if node_state.removed || node_state.generation != self.generation {
            return Err(SondarError::StaleElement {
                locator: self.locator.clone(),
            });
        }
        op(node_state)
    }

    fn interactable(node_state: &NodeState, locator: &Locator) -> SondarResult<()> {
        if node_state.node.displayed && node_state.node.enabled {
            Ok(())
        } else {
            Err(SondarError::Driver {
                message: format!("element {locator} is not interactable"),
            })
        }
    }
}

impl Element for FakeElement {
    fn click(&self) -> SondarResult<()> {
        self.with_live(|node_state| {
            Self::interactable(node_state, &self.locator)?;
            match self.option_index {
                Some(index) => {
                    let option = node_state.node.options.get(index).cloned().ok_or_else(|| {
                        SondarError::StaleElement {
                            locator: self.locator.clone(),
                        }
                    })?;
                    node_state.selected = Some(option);
                }
                None => node_state.clicks += 1,
            }
            Ok(())
        })
    }

    fn send_text(&self, text: &str) -> SondarResult<()> {
        self.with_live(|node_state| {
            Self::interactable(node_state, &self.locator)?;
            node_state.typed.push_str(text);
            Ok(())
        })
    }

    fn text(&self) -> SondarResult<String> {
        self.with_live(|node_state| {
            Ok(match self.option_index {
                Some(index) => node_state
                    .node
                    .options
                    .get(index)
                    .cloned()
                    .unwrap_or_default(),
                None => node_state.node.text.clone(),
            })
        })
    }

    fn is_displayed(&self) -> SondarResult<bool> {
        self.with_live(|node_state| Ok(node_state.node.displayed))
    }

    fn is_enabled(&self) -> SondarResult<bool> {
        self.with_live(|node_state| Ok(node_state.node.enabled))
    }

    fn options(&self) -> SondarResult<Vec<ElementRef>> {
        let count = self.with_live(|node_state| Ok(node_state.node.options.len()))?;
        Ok((0..count)
            .map(|index| {
                Arc::new(FakeElement {
                    state: Arc::clone(&self.state),
                    locator: self.locator.clone(),
                    generation: self.generation,
                    option_index: Some(index),
                }) as ElementRef
            })
            .collect())
    }
}
