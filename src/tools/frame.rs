use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult, execution_failed};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame to switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FrameTarget {
    /// Top-level document with module menu, top bar and page tree
    Root,
    /// Frame with module content
    Content,
}

/// Parameters for the switch_frame tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwitchFrameParams {
    /// Target frame
    pub frame: FrameTarget,
}

/// Tool for switching between the top-level document and the content frame
#[derive(Default)]
pub struct SwitchFrameTool;

impl Tool for SwitchFrameTool {
    type Params = SwitchFrameParams;

    fn name(&self) -> &str {
        "switch_frame"
    }

    fn description(&self) -> &str {
        "Wait for the loading indicator and switch to the root document or the content frame"
    }

    fn execute_typed(&self, params: SwitchFrameParams, context: &mut ToolContext) -> Result<ToolResult> {
        let navigator = context.navigator()?;
        let frame = match params.frame {
            FrameTarget::Root => navigator.switch_to_root(),
            FrameTarget::Content => navigator.switch_to_content(),
        }
        .map_err(|e| execution_failed("switch_frame", format!("{:?}", params.frame), e))?;

        Ok(ToolResult::success_with(serde_json::json!({
            "frame": frame,
            "target": params.frame
        })))
    }
}

/// Parameters for the frame_status tool (no parameters needed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrameStatusParams {}

/// Tool reporting the active frame without changing it
#[derive(Default)]
pub struct FrameStatusTool;

impl Tool for FrameStatusTool {
    type Params = FrameStatusParams;

    fn name(&self) -> &str {
        "frame_status"
    }

    fn description(&self) -> &str {
        "Report the active frame and whether the content frame is reachable from it"
    }

    fn execute_typed(&self, _params: FrameStatusParams, context: &mut ToolContext) -> Result<ToolResult> {
        let navigator = context.navigator()?;
        let on_root = navigator.is_on_root()?;

        Ok(ToolResult::success_with(serde_json::json!({
            "frame": navigator.frame(),
            "on_root": on_root
        })))
    }
}
