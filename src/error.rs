use std::time::Duration;
use thiserror::Error;

/// Result type alias for browser and navigation operations
pub type Result<T> = std::result::Result<T, BrowserError>;

/// Errors raised by the session, the automation driver and the page tree navigator
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Browser could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Could not connect to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab lookup or manipulation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation did not succeed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript evaluation failed or returned something unexpected
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A bounded wait expired
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    /// Query matched no element
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element exists but cannot currently receive the action
    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    /// Named iframe does not exist in the active frame
    #[error("Frame not found: {0}")]
    FrameNotFound(String),

    /// Element handle was resolved in a frame that is no longer active
    #[error("Element {element} belongs to frame {element_frame}, active frame is {active_frame}")]
    StaleContext {
        element: u64,
        element_frame: String,
        active_frame: String,
    },

    /// Navigation path is unusable
    #[error("Invalid navigation path: {0}")]
    InvalidPath(String),

    /// Tool parameters could not be parsed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No tool registered under that name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool ran but failed
    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    /// Screenshot capture failed
    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Create a timeout error for the given wait target
    pub fn timeout(what: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout { what: what.into(), waited }
    }

    /// True when a query matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrowserError::ElementNotFound(_))
    }

    /// True when an element was present but not actionable
    pub fn is_not_interactable(&self) -> bool {
        matches!(self, BrowserError::NotInteractable(_))
    }

    /// True when a bounded wait expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::Timeout { .. })
    }
}
