//! Page tree value types
//!
//! Nodes are never cached between steps: a [`TreeNode`] is the result of resolving a
//! label against the live DOM once, and expanding it may re-render its neighbours.

use crate::driver::ElementRef;
use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of labels leading from the tree root to a target node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct NavigationPath {
    labels: Vec<String>,
}

impl NavigationPath {
    /// Build a path, rejecting empty paths and blank labels
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(BrowserError::InvalidPath("path must contain at least one label".to_string()));
        }
        if let Some(position) = labels.iter().position(|label| label.trim().is_empty()) {
            return Err(BrowserError::InvalidPath(format!("label at position {} is blank", position)));
        }

        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// First label and the remaining ones
    pub fn split_first(&self) -> (&str, &[String]) {
        // Non-empty by construction
        (&self.labels[0], &self.labels[1..])
    }

    /// Label of the node that receives the terminal click
    pub fn target(&self) -> &str {
        &self.labels[self.labels.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl TryFrom<Vec<String>> for NavigationPath {
    type Error = BrowserError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<NavigationPath> for Vec<String> {
    fn from(path: NavigationPath) -> Self {
        path.labels
    }
}

/// What probing a node's expand affordance found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffordanceState {
    /// A collapsed chevron is present and can be clicked
    Collapsed(ElementRef),
    /// No collapsed chevron, the node is open or has no children
    AlreadyExpanded,
    /// The chevron exists but does not accept clicks right now
    Indeterminate,
}

/// How a node ended up ready for descent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandOutcome {
    /// The chevron was clicked
    Expanded,
    /// Nothing to do
    AlreadyExpanded,
    /// Chevron was not clickable; descent continues unverified
    Indeterminate,
}

/// A page tree entry resolved from the live DOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    element: ElementRef,
    expansion: Option<ExpandOutcome>,
}

impl TreeNode {
    /// A node that was located but not yet expanded
    pub fn located(label: impl Into<String>, element: ElementRef) -> Self {
        Self { label: label.into(), element, expansion: None }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wrapper element holding the label and the chevron
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// `None` until the node went through expansion
    pub fn expansion(&self) -> Option<ExpandOutcome> {
        self.expansion
    }

    pub(crate) fn with_expansion(mut self, outcome: ExpandOutcome) -> Self {
        self.expansion = Some(outcome);
        self
    }
}
