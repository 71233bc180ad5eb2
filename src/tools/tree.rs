use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult, execution_failed};
use crate::tree::NavigationPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the open_tree_path tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenTreePathParams {
    /// Labels from the tree root down to the page to open, e.g. ["styleguide TCA demo", "elements basic"]
    pub path: Vec<String>,
}

/// Tool for opening a page tree path and clicking its last node
#[derive(Default)]
pub struct OpenTreePathTool;

impl Tool for OpenTreePathTool {
    type Params = OpenTreePathParams;

    fn name(&self) -> &str {
        "open_tree_path"
    }

    fn description(&self) -> &str {
        "Expand each node of a page tree path in turn and click the last one"
    }

    fn execute_typed(&self, params: OpenTreePathParams, context: &mut ToolContext) -> Result<ToolResult> {
        let path = NavigationPath::new(params.path)?;
        let target = context
            .navigator()?
            .open_path(&path)
            .map_err(|e| execution_failed("open_tree_path", path.labels().join(" > "), e))?;

        Ok(ToolResult::success_with(serde_json::json!({
            "path": path.labels(),
            "target": target.label(),
            "expansion": target.expansion()
        })))
    }
}
