//! Scripted in-memory page tree for unit tests
//!
//! Time is simulated: every poll of a wait advances the clock by one second, so a
//! loading indicator "visible for 3 units" blocks a wait for exactly three polls.

use crate::contract::{
    CONTENT_FRAME_NAME, COLLAPSED_CHEVRON, LOADING_INDICATOR, NODE_LABEL, TREE_CONTAINER, TREE_ITEM,
    content_frame_selector, label_parent_xpath,
};
use crate::driver::{AutomationDriver, ElementRef, Locator};
use crate::error::{BrowserError, Result};
use crate::frame::FrameContext;
use std::cell::{Cell, RefCell};
use std::time::Duration;

const CONTAINER_ID: u64 = 1;
const NODE_BASE: u64 = 10_000;
const CHEVRON_BASE: u64 = 20_000;
const LABEL_BASE: u64 = 30_000;

/// How a node's chevron reacts to clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chevron {
    /// Click expands the node
    Normal,
    /// Click is rejected as not interactable
    Stuck,
    /// Chevron detaches before the click lands
    Vanishes,
}

#[derive(Debug, Clone)]
struct FakeNode {
    label: String,
    parent: Option<usize>,
    collapsed: bool,
    chevron: Chevron,
    appears_at: Duration,
}

/// Recorded driver interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    WaitInvisible { frame: FrameContext, selector: String },
    WaitVisible { frame: FrameContext, selector: String },
    WaitText { frame: FrameContext, text: String },
    Count { frame: FrameContext, selector: String },
    FindWithin { scope: u64, locator: Locator },
    EnterFrame { frame: FrameContext, name: String },
    ClickChevron { label: String, accepted: bool },
    ClickLabel { label: String },
}

pub(crate) struct FakeDriver {
    nodes: RefCell<Vec<FakeNode>>,
    clock: Cell<Duration>,
    indicator_until: Duration,
    content_frame: bool,
    tree_visible: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeDriver {
    /// Backend with a visible, empty page tree and a content frame
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            clock: Cell::new(Duration::ZERO),
            indicator_until: Duration::ZERO,
            content_frame: true,
            tree_visible: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Keep the loading indicator visible for the given simulated time
    pub fn indicator_for(mut self, duration: Duration) -> Self {
        self.indicator_until = duration;
        self
    }

    pub fn without_content_frame(mut self) -> Self {
        self.content_frame = false;
        self
    }

    pub fn without_tree(mut self) -> Self {
        self.tree_visible = false;
        self
    }

    /// Add a node; returns its index for use as a parent
    pub fn node(&self, label: &str, parent: Option<usize>, collapsed: bool) -> usize {
        self.node_with(label, parent, collapsed, Chevron::Normal, Duration::ZERO)
    }

    pub fn node_with(
        &self,
        label: &str,
        parent: Option<usize>,
        collapsed: bool,
        chevron: Chevron,
        appears_at: Duration,
    ) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode { label: label.to_string(), parent, collapsed, chevron, appears_at });
        nodes.len() - 1
    }

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.nodes.borrow()[index].collapsed
    }

    pub fn now(&self) -> Duration {
        self.clock.get()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Labels whose chevron click was accepted, in order
    pub fn expand_clicks(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::ClickChevron { label, accepted: true } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Labels that received the terminal click, in order
    pub fn label_clicks(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::ClickLabel { label } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Labels resolved through the label XPath, in order
    pub fn resolved_labels(&self) -> Vec<String> {
        let nodes = self.nodes.borrow();
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::FindWithin { locator: Locator::XPath(xpath), .. } => nodes
                    .iter()
                    .find(|node| &label_parent_xpath(&node.label) == xpath)
                    .map(|node| node.label.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn indicator_waits(&self) -> Vec<FrameContext> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::WaitInvisible { frame, selector } if selector == LOADING_INDICATOR => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn rendered(&self, index: usize) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = index;
        if nodes[current].appears_at > self.now() {
            return false;
        }
        while let Some(parent) = nodes[current].parent {
            if nodes[parent].collapsed {
                return false;
            }
            current = parent;
        }
        true
    }

    fn is_descendant(&self, index: usize, ancestor: usize) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = nodes[index].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = nodes[parent].parent;
        }
        false
    }

    fn node_index(id: u64, base: u64) -> Option<usize> {
        (id >= base && id < base + 10_000).then(|| (id - base) as usize)
    }

    fn poll<T>(&self, what: &str, timeout: Duration, mut check: impl FnMut() -> Option<T>) -> Result<T> {
        let start = self.now();
        loop {
            if let Some(found) = check() {
                return Ok(found);
            }
            if self.now() - start >= timeout {
                return Err(BrowserError::timeout(what, timeout));
            }
            self.clock.set(self.now() + Duration::from_secs(1));
        }
    }
}

impl AutomationDriver for FakeDriver {
    fn wait_until_invisible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<()> {
        self.record(Call::WaitInvisible { frame: frame.clone(), selector: selector.to_string() });
        self.poll(selector, timeout, || {
            let visible = selector == LOADING_INDICATOR && self.now() < self.indicator_until;
            (!visible).then_some(())
        })
    }

    fn wait_until_visible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<ElementRef> {
        self.record(Call::WaitVisible { frame: frame.clone(), selector: selector.to_string() });
        let present = frame.is_root() && selector == TREE_CONTAINER && self.tree_visible;
        self.poll(selector, timeout, || present.then(|| ElementRef::new(CONTAINER_ID, frame.clone())))
    }

    fn wait_for_label(
        &self,
        frame: &FrameContext,
        item: &str,
        label: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.record(Call::WaitText { frame: frame.clone(), text: text.to_string() });
        self.poll(text, timeout, || {
            let count = self.nodes.borrow().len();
            // A node's own label only, and only once the node itself is rendered
            let seen = frame.is_root()
                && item == TREE_ITEM
                && label == NODE_LABEL
                && (0..count).any(|i| self.rendered(i) && self.nodes.borrow()[i].label.contains(text));
            seen.then_some(())
        })
    }

    fn count(&self, frame: &FrameContext, selector: &str) -> Result<usize> {
        self.record(Call::Count { frame: frame.clone(), selector: selector.to_string() });
        let present = frame.is_root() && self.content_frame && selector == content_frame_selector();
        Ok(usize::from(present))
    }

    fn find_within(&self, scope: &ElementRef, locator: &Locator) -> Result<ElementRef> {
        self.record(Call::FindWithin { scope: scope.id(), locator: locator.clone() });
        let not_found = || BrowserError::ElementNotFound(locator.to_string());
        if !scope.frame().is_root() {
            return Err(not_found());
        }
        let frame = scope.frame().clone();
        let scope_node = Self::node_index(scope.id(), NODE_BASE);

        match locator {
            Locator::XPath(xpath) => {
                let count = self.nodes.borrow().len();
                (0..count)
                    .find(|&i| {
                        self.rendered(i)
                            && &label_parent_xpath(&self.nodes.borrow()[i].label) == xpath
                            && (scope.id() == CONTAINER_ID || scope_node.is_some_and(|s| self.is_descendant(i, s)))
                    })
                    .map(|i| ElementRef::new(NODE_BASE + i as u64, frame))
                    .ok_or_else(not_found)
            }
            Locator::Css(selector) => {
                let index = scope_node.filter(|&i| self.rendered(i)).ok_or_else(not_found)?;
                if selector == COLLAPSED_CHEVRON && self.nodes.borrow()[index].collapsed {
                    Ok(ElementRef::new(CHEVRON_BASE + index as u64, frame))
                } else if selector == NODE_LABEL {
                    Ok(ElementRef::new(LABEL_BASE + index as u64, frame))
                } else {
                    Err(not_found())
                }
            }
        }
    }

    fn enter_frame(&self, frame: &FrameContext, name: &str) -> Result<FrameContext> {
        self.record(Call::EnterFrame { frame: frame.clone(), name: name.to_string() });
        if frame.is_root() && self.content_frame && name == CONTENT_FRAME_NAME {
            Ok(frame.child(name))
        } else {
            Err(BrowserError::FrameNotFound(name.to_string()))
        }
    }

    fn click(&self, element: &ElementRef) -> Result<()> {
        if let Some(index) = Self::node_index(element.id(), CHEVRON_BASE) {
            let (label, chevron) = {
                let nodes = self.nodes.borrow();
                (nodes[index].label.clone(), nodes[index].chevron)
            };
            let accepted = chevron == Chevron::Normal;
            self.record(Call::ClickChevron { label, accepted });
            return match chevron {
                Chevron::Normal => {
                    let mut nodes = self.nodes.borrow_mut();
                    nodes[index].collapsed = !nodes[index].collapsed;
                    Ok(())
                }
                Chevron::Stuck => Err(BrowserError::NotInteractable(format!("chevron {}", index))),
                Chevron::Vanishes => Err(BrowserError::ElementNotFound(format!("chevron {}", index))),
            };
        }

        if let Some(index) = Self::node_index(element.id(), LABEL_BASE) {
            let label = self.nodes.borrow()[index].label.clone();
            self.record(Call::ClickLabel { label });
            return Ok(());
        }

        Err(BrowserError::NotInteractable(format!("element {}", element.id())))
    }
}
