//! Frame context values
//!
//! A [`FrameContext`] names the document that element queries run against: the
//! chain of iframe names leading from the top-level document to the target frame.
//! Every resolved [`ElementRef`](crate::driver::ElementRef) remembers the context
//! it came from, so handles from a previous context can be rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain of iframe names from the top-level document; empty means root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameContext {
    names: Vec<String>,
}

impl FrameContext {
    /// The top-level document
    pub fn root() -> Self {
        Self::default()
    }

    /// Context of the named iframe inside this one
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(name.into());
        Self { names }
    }

    pub fn is_root(&self) -> bool {
        self.names.is_empty()
    }

    /// Iframe names from the top-level document down
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Nesting depth, 0 for root
    pub fn depth(&self) -> usize {
        self.names.len()
    }
}

impl fmt::Display for FrameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.names.join(" > "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_context() {
        let root = FrameContext::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.to_string(), "<root>");
    }

    #[test]
    fn test_child_context() {
        let content = FrameContext::root().child("list_frame");
        assert!(!content.is_root());
        assert_eq!(content.names(), &["list_frame".to_string()]);

        let nested = content.child("inner");
        assert_eq!(nested.depth(), 2);
        assert_eq!(nested.to_string(), "list_frame > inner");
        assert_ne!(content, nested);
    }

    #[test]
    fn test_serializes_as_name_list() {
        let ctx = FrameContext::root().child("list_frame");
        assert_eq!(serde_json::to_value(&ctx).unwrap(), serde_json::json!(["list_frame"]));
    }
}
