//! Automation driver abstraction
//!
//! The navigator never talks to Chrome directly. It issues frame-scoped queries,
//! bounded waits and clicks through [`AutomationDriver`], which keeps the tree
//! logic independent of the browser backend:
//! - [`CdpDriver`]: production driver over a `headless_chrome` tab
//! - `fake::FakeDriver` (tests only): scripted in-memory page tree with a simulated clock

pub mod cdp;

#[cfg(test)]
pub(crate) mod fake;

pub use cdp::CdpDriver;

use crate::error::Result;
use crate::frame::FrameContext;
use std::fmt;
use std::time::Duration;

/// How to find an element below a resolved scope element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector, matched against descendants
    Css(String),
    /// XPath expression evaluated with the scope element as context node
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css '{}'", selector),
            Locator::XPath(expression) => write!(f, "xpath '{}'", expression),
        }
    }
}

/// Handle to a live element, valid only inside the frame it was resolved in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    id: u64,
    frame: FrameContext,
}

impl ElementRef {
    /// Drivers mint handles; `id` must identify the element within `frame`
    pub fn new(id: u64, frame: FrameContext) -> Self {
        Self { id, frame }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Frame the element was resolved in
    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }
}

/// Element queries, bounded waits, frame entry and clicks against a live page
///
/// Every call blocks until it completes. Waits poll at a driver-defined interval
/// and fail with `BrowserError::Timeout` when `timeout` expires; any other failure
/// ends the wait immediately. Lookups that match
/// nothing fail with `BrowserError::ElementNotFound`; clicks on elements that cannot
/// take the event fail with `BrowserError::NotInteractable`.
pub trait AutomationDriver {
    /// Wait until no element matching `selector` is visible in `frame`
    fn wait_until_invisible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<()>;

    /// Wait until an element matching `selector` is visible in `frame` and return the first one
    fn wait_until_visible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<ElementRef>;

    /// Wait until an element matching `item` in `frame` has a visible direct child matching
    /// `label` whose text contains `text`
    ///
    /// Text of nested items does not count, so a collapsed parent never satisfies the
    /// wait for one of its hidden children.
    fn wait_for_label(
        &self,
        frame: &FrameContext,
        item: &str,
        label: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<()>;

    /// Number of elements matching `selector` in `frame`; leaves the document untouched
    fn count(&self, frame: &FrameContext, selector: &str) -> Result<usize>;

    /// First element matched by `locator` below `scope`
    fn find_within(&self, scope: &ElementRef, locator: &Locator) -> Result<ElementRef>;

    /// Context of the iframe named `name` inside `frame`
    ///
    /// Fails with `BrowserError::FrameNotFound` when the frame is absent or its document
    /// cannot be scripted.
    fn enter_frame(&self, frame: &FrameContext, name: &str) -> Result<FrameContext>;

    /// Click a resolved element
    fn click(&self, element: &ElementRef) -> Result<()>;
}
