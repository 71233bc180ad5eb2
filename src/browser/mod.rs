//! Browser session management and configuration

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions, WaitOptions};
pub use session::BrowserSession;
