use super::Navigator;
use crate::contract::COLLAPSED_CHEVRON;
use crate::driver::{AutomationDriver, Locator};
use crate::error::{BrowserError, Result};
use crate::tree::{AffordanceState, ExpandOutcome, TreeNode};

impl<D: AutomationDriver> Navigator<D> {
    /// Look for a collapsed chevron below `node` without clicking anything
    pub fn probe_expand_affordance(&self, node: &TreeNode) -> Result<AffordanceState> {
        self.ensure_current(node.element())?;

        match self.driver.find_within(node.element(), &Locator::css(COLLAPSED_CHEVRON)) {
            Ok(chevron) => Ok(AffordanceState::Collapsed(chevron)),
            Err(BrowserError::ElementNotFound(_)) => Ok(AffordanceState::AlreadyExpanded),
            Err(BrowserError::NotInteractable(_)) => Ok(AffordanceState::Indeterminate),
            Err(e) => Err(e),
        }
    }

    /// Make sure `node` is open, clicking its chevron at most once
    ///
    /// A chevron that is missing, or that detaches before the click lands, means the
    /// node is already open. A chevron that refuses the click is treated the same way
    /// without checking that the node really opened; nothing is retried, because a
    /// second click on an open node would collapse it again.
    pub fn ensure_expanded(&self, node: TreeNode) -> Result<TreeNode> {
        let outcome = match self.probe_expand_affordance(&node)? {
            AffordanceState::Collapsed(chevron) => match self.driver.click(&chevron) {
                Ok(()) => ExpandOutcome::Expanded,
                Err(BrowserError::ElementNotFound(_)) => ExpandOutcome::AlreadyExpanded,
                Err(BrowserError::NotInteractable(_)) => ExpandOutcome::Indeterminate,
                Err(e) => return Err(e),
            },
            AffordanceState::AlreadyExpanded => ExpandOutcome::AlreadyExpanded,
            AffordanceState::Indeterminate => ExpandOutcome::Indeterminate,
        };

        match outcome {
            ExpandOutcome::Indeterminate => {
                log::warn!("Chevron of '{}' is not clickable, continuing without confirmed expansion", node.label())
            }
            _ => log::debug!("Tree node '{}': {:?}", node.label(), outcome),
        }

        Ok(node.with_expansion(outcome))
    }
}
