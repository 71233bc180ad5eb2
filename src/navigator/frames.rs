use super::Navigator;
use crate::contract::{CONTENT_FRAME_NAME, LOADING_INDICATOR, content_frame_selector};
use crate::driver::AutomationDriver;
use crate::error::Result;
use crate::frame::FrameContext;

impl<D: AutomationDriver> Navigator<D> {
    /// Switch to the top-level document, the one with module menu and top bar
    ///
    /// Waits for the loading indicator in the current frame first. A stuck indicator
    /// is reported as a timeout and leaves the context unchanged.
    pub fn switch_to_root(&mut self) -> Result<FrameContext> {
        self.wait_for_indicator()?;
        self.frame = FrameContext::root();
        log::info!("Switched to root frame");
        Ok(self.frame.clone())
    }

    /// Switch into the content frame, the one with module content
    ///
    /// The indicator is awaited both before and after entering the frame, since
    /// the content frame shows its own loading state once it starts rendering.
    pub fn switch_to_content(&mut self) -> Result<FrameContext> {
        self.wait_for_indicator()?;
        self.frame = self.driver.enter_frame(&self.frame, CONTENT_FRAME_NAME)?;
        self.wait_for_indicator()?;
        log::info!("Switched to content frame {}", self.frame);
        Ok(self.frame.clone())
    }

    /// Whether the active frame contains the content iframe
    pub fn is_on_root(&self) -> Result<bool> {
        Ok(self.driver.count(&self.frame, &content_frame_selector())? > 0)
    }

    fn wait_for_indicator(&self) -> Result<()> {
        log::debug!("Waiting for loading indicator to disappear in {}", self.frame);
        self.driver
            .wait_until_invisible(&self.frame, LOADING_INDICATOR, self.options.indicator_timeout_duration())
    }
}
