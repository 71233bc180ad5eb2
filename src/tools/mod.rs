//! Named navigation steps
//!
//! Test scenarios drive the backend through a small set of typed tools, each with
//! serde parameters and a JSON schema:
//! - `navigate`: load a backend URL
//! - `switch_frame`: move between the top-level document and the content frame
//! - `frame_status`: report the active frame and whether the content frame is reachable
//! - `open_tree_path`: open a page tree path and click its target
//! - `screenshot`: write the current viewport to a PNG file
//!
//! A [`ToolContext`] keeps one [`Navigator`] alive across steps, so the frame context
//! established by one step is the one the next step runs in.

pub mod frame;
pub mod navigate;
pub mod screenshot;
pub mod tree;
pub mod utils;

pub use frame::{FrameStatusParams, FrameStatusTool, FrameTarget, SwitchFrameParams, SwitchFrameTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use screenshot::{ScreenshotParams, ScreenshotTool};
pub use tree::{OpenTreePathParams, OpenTreePathTool};

use crate::browser::{BrowserSession, WaitOptions};
use crate::driver::CdpDriver;
use crate::error::{BrowserError, Result};
use crate::navigator::Navigator;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

impl From<BrowserError> for ToolResult {
    fn from(err: BrowserError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Attribute a failure of the page to `tool` and the input it was working on
///
/// Rejected input is reported as is.
pub(crate) fn execution_failed(tool: &str, input: impl std::fmt::Display, err: BrowserError) -> BrowserError {
    match err {
        BrowserError::InvalidPath(_) | BrowserError::InvalidArgument(_) => err,
        other => BrowserError::ToolExecutionFailed { tool: tool.to_string(), reason: format!("{}: {}", input, other) },
    }
}

/// State shared by the tools of one scenario
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,
    wait_options: WaitOptions,
    navigator: Option<Navigator<CdpDriver>>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self::with_wait_options(session, WaitOptions::default())
    }

    pub fn with_wait_options(session: &'a BrowserSession, wait_options: WaitOptions) -> Self {
        Self { session, wait_options, navigator: None }
    }

    pub fn wait_options(&self) -> &WaitOptions {
        &self.wait_options
    }

    /// Navigator for the active tab, created on first use
    pub fn navigator(&mut self) -> Result<&mut Navigator<CdpDriver>> {
        let navigator = match self.navigator.take() {
            Some(navigator) => navigator,
            None => self.session.navigator(self.wait_options.clone())?,
        };
        Ok(self.navigator.insert(navigator))
    }

    /// Forget the navigator; a page load puts the tab back at its top-level document
    pub fn reset_navigator(&mut self) {
        self.navigator = None;
    }
}

/// A typed navigation step
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe view of a [`Tool`] taking raw JSON parameters
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters_schema(&self) -> Value;

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params: T::Params = serde_json::from_value(params)
            .map_err(|e| BrowserError::InvalidArgument(format!("{}: {}", Tool::name(self), e)))?;
        self.execute_typed(params, context)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all built-in tools
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(SwitchFrameTool);
        registry.register(FrameStatusTool);
        registry.register(OpenTreePathTool);
        registry.register(ScreenshotTool);
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = Tool::name(&tool).to_string();
        self.tools.insert(name, Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute the named tool with raw JSON parameters
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| BrowserError::ToolNotFound(name.to_string()))?;
        log::debug!("Executing tool '{}' with {}", name, params);
        tool.execute(params, context)
    }
}
