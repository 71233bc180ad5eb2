//! Page tree navigation over an [`AutomationDriver`]
//!
//! A [`Navigator`] is the session handle for one automation session. It owns the
//! driver and the active [`FrameContext`]; every call that changes the context takes
//! `&mut self`, so a frame switch can never interleave with a path being opened.
//!
//! - `frames`: switching between the backend's top-level document and content frame
//! - `locate`: resolving a label to its tree node wrapper
//! - `expand`: probing and clicking the expand affordance
//! - `path`: opening a whole label path and clicking its target

mod expand;
mod frames;
mod locate;
mod path;

use crate::browser::WaitOptions;
use crate::driver::{AutomationDriver, ElementRef};
use crate::error::{BrowserError, Result};
use crate::frame::FrameContext;

/// Session handle tying a driver to its active frame context
pub struct Navigator<D: AutomationDriver> {
    driver: D,
    frame: FrameContext,
    options: WaitOptions,
}

impl<D: AutomationDriver> Navigator<D> {
    /// Start at the top-level document
    pub fn new(driver: D, options: WaitOptions) -> Self {
        Self { driver, frame: FrameContext::root(), options }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Context subsequent queries run against
    pub fn frame(&self) -> &FrameContext {
        &self.frame
    }

    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Reject handles resolved in a frame other than the active one
    pub fn ensure_current(&self, element: &ElementRef) -> Result<()> {
        if element.frame() == &self.frame {
            return Ok(());
        }
        Err(BrowserError::StaleContext {
            element: element.id(),
            element_frame: element.frame().to_string(),
            active_frame: self.frame.to_string(),
        })
    }

    /// Click an element resolved in the active frame
    pub fn click(&self, element: &ElementRef) -> Result<()> {
        self.ensure_current(element)?;
        self.driver.click(element)
    }
}
