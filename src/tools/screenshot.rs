use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult, execution_failed};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for the screenshot tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScreenshotParams {
    /// File the PNG is written to
    pub path: PathBuf,
}

/// Tool for capturing the visible viewport
#[derive(Default)]
pub struct ScreenshotTool;

impl Tool for ScreenshotTool {
    type Params = ScreenshotParams;

    fn name(&self) -> &str {
        "screenshot"
    }

    fn description(&self) -> &str {
        "Capture the visible viewport of the active tab as a PNG file"
    }

    fn execute_typed(&self, params: ScreenshotParams, context: &mut ToolContext) -> Result<ToolResult> {
        let bytes = context
            .session
            .screenshot(&params.path)
            .map_err(|e| execution_failed("screenshot", params.path.display(), e))?;

        Ok(ToolResult::success_with(serde_json::json!({
            "path": params.path,
            "bytes": bytes
        })))
    }
}
