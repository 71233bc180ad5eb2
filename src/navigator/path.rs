use super::Navigator;
use crate::contract::{NODE_LABEL, TREE_CONTAINER};
use crate::driver::{AutomationDriver, ElementRef, Locator};
use crate::error::Result;
use crate::tree::{NavigationPath, TreeNode};

impl<D: AutomationDriver> Navigator<D> {
    /// Open the given hierarchical path in the page tree and click the last node
    ///
    /// Example opening "styleguide TCA demo -> elements basic":
    ///
    /// ```rust,no_run
    /// # use page_tree_nav::{BrowserSession, LaunchOptions, NavigationPath, WaitOptions};
    /// # fn main() -> page_tree_nav::Result<()> {
    /// # let session = BrowserSession::launch(LaunchOptions::default())?;
    /// let mut navigator = session.navigator(WaitOptions::default())?;
    /// let path = NavigationPath::new(["styleguide TCA demo", "elements basic"])?;
    /// navigator.open_path(&path)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// Each label is located below the previously resolved node and expanded before
    /// descending; the only other click is on the final node's label. The first
    /// failure aborts the whole path and is returned unchanged.
    pub fn open_path(&mut self, path: &NavigationPath) -> Result<TreeNode> {
        self.switch_to_root()?;
        let container = self
            .driver
            .wait_until_visible(&self.frame, TREE_CONTAINER, self.options.element_timeout_duration())?;

        let (first, rest) = path.split_first();
        let start = self.open_node(&container, first)?;
        let target = rest
            .iter()
            .try_fold(start, |node, label| self.open_node(node.element(), label))?;

        let anchor = self.driver.find_within(target.element(), &Locator::css(NODE_LABEL))?;
        self.click(&anchor)?;
        log::info!("Opened page tree path {:?}", path.labels());

        Ok(target)
    }

    fn open_node(&self, scope: &ElementRef, label: &str) -> Result<TreeNode> {
        let node = self.locate(scope, label)?;
        self.ensure_expanded(node)
    }
}
