//! Fixed DOM contract of the backend page tree

/// Progress bar shown while a module or frame is loading
pub const LOADING_INDICATOR: &str = "#nprogress";

/// `name` attribute of the iframe holding module content
pub const CONTENT_FRAME_NAME: &str = "list_frame";

/// Root element of the page tree widget
pub const TREE_CONTAINER: &str = "#typo3-pagetree-treeContainer";

/// One rendered tree entry
pub const TREE_ITEM: &str = "g.nodes > .node";

/// Clickable text label nested in a tree entry
pub const NODE_LABEL: &str = "text.node-name";

/// Expand affordance of a collapsed tree entry
pub const COLLAPSED_CHEVRON: &str = ".chevron.collapsed";

/// CSS selector matching the content iframe
pub fn content_frame_selector() -> String {
    format!("iframe[name='{}']", CONTENT_FRAME_NAME)
}

/// XPath resolving the wrapper of the element whose own text equals `label`,
/// relative to the element the query is scoped to
pub fn label_parent_xpath(label: &str) -> String {
    format!(".//*[text()={}]/..", xpath_literal(label))
}

/// Quote a string for use inside an XPath expression
///
/// XPath 1.0 has no escape sequences, so strings containing both quote kinds
/// are assembled with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
