//! # page-tree-nav
//!
//! Page tree navigation for browser-driven tests of a TYPO3-style backend, via Chrome
//! DevTools Protocol (CDP).
//!
//! The backend renders its page tree as an SVG widget next to a content iframe. Nodes
//! are rendered lazily as their parents expand, and a loading indicator comes and goes
//! around every frame transition. This crate opens a path of labels in that tree and
//! clicks the target page, tolerating the usual rendering races along the way.
//!
//! ## Opening a page tree path
//!
//! ```rust,no_run
//! use page_tree_nav::{BrowserSession, LaunchOptions, NavigationPath, WaitOptions};
//!
//! # fn main() -> page_tree_nav::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("http://localhost/typo3/module/web/layout")?;
//! session.wait_for_navigation()?;
//!
//! let mut navigator = session.navigator(WaitOptions::default())?;
//! navigator.open_path(&NavigationPath::new(["styleguide TCA demo", "elements basic"])?)?;
//!
//! // Module content of the clicked page
//! navigator.switch_to_content()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Running steps by name
//!
//! ```rust,no_run
//! use page_tree_nav::{BrowserSession, LaunchOptions};
//! use page_tree_nav::tools::ToolContext;
//! use serde_json::json;
//!
//! # fn main() -> page_tree_nav::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let mut context = ToolContext::new(&session);
//! let registry = session.tool_registry();
//!
//! registry.execute("navigate", json!({"url": "localhost/typo3/"}), &mut context)?;
//! registry.execute("open_tree_path", json!({"path": ["Top Page"]}), &mut context)?;
//! registry.execute("switch_frame", json!({"frame": "content"}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`driver`]: Automation driver trait and its CDP implementation
//! - [`navigator`]: Frame switching and page tree path opening
//! - [`tree`]: Navigation paths and resolved tree nodes
//! - [`tools`]: Named, JSON-parameterised navigation steps
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod contract;
pub mod driver;
pub mod error;
pub mod frame;
pub mod navigator;
pub mod tools;
pub mod tree;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, WaitOptions};
pub use driver::{AutomationDriver, CdpDriver, ElementRef, Locator};
pub use error::{BrowserError, Result};
pub use frame::FrameContext;
pub use navigator::Navigator;
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
pub use tree::{AffordanceState, ExpandOutcome, NavigationPath, TreeNode};
