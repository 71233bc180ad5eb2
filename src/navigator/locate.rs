use super::Navigator;
use crate::contract::{NODE_LABEL, TREE_ITEM, label_parent_xpath};
use crate::driver::{AutomationDriver, ElementRef, Locator};
use crate::error::{BrowserError, Result};
use crate::tree::TreeNode;

impl<D: AutomationDriver> Navigator<D> {
    /// Resolve the tree node labelled `label` below `container`
    ///
    /// Waits until a tree item whose own visible label contains `label` is rendered
    /// anywhere in the active frame, then returns the parent of the element whose own text is exactly
    /// `label`, searching only the container's descendants. Both a barrier timeout
    /// and a missing match are reported as `ElementNotFound`.
    pub fn locate(&self, container: &ElementRef, label: &str) -> Result<TreeNode> {
        self.ensure_current(container)?;

        self.driver
            .wait_for_label(&self.frame, TREE_ITEM, NODE_LABEL, label, self.options.element_timeout_duration())
            .map_err(|e| match e {
                BrowserError::Timeout { .. } => {
                    BrowserError::ElementNotFound(format!("tree item '{}' never rendered: {}", label, e))
                }
                other => other,
            })?;

        let element = self.driver.find_within(container, &Locator::xpath(label_parent_xpath(label)))?;
        log::debug!("Located tree node '{}' as element {}", label, element.id());

        Ok(TreeNode::located(label, element))
    }
}
