//! page-tree-nav CLI
//!
//! Launches (or connects to) a browser, optionally loads a backend URL and then runs
//! navigation steps: either a single page tree path given with repeated `--path`
//! flags, or a JSON step file of the form
//! `[{"tool": "open_tree_path", "params": {"path": ["Top Page"]}}, ...]`.

use anyhow::{Context, bail};
use clap::Parser;
use page_tree_nav::{BrowserSession, ConnectionOptions, LaunchOptions, ToolContext, ToolResult, WaitOptions};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "page-tree-nav")]
#[command(version)]
#[command(about = "Open page tree paths in a TYPO3 backend", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory, e.g. one with a logged-in backend session
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL", conflicts_with_all = ["headed", "chrome_path", "user_data_dir"])]
    ws_url: Option<String>,

    /// JSON file with wait bounds (indicator_timeout_ms, element_timeout_ms, poll_interval_ms)
    #[arg(long, value_name = "FILE")]
    wait_config: Option<PathBuf>,

    /// Backend URL to load before running the steps
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Page tree label; repeat to build a path from the root down
    #[arg(long = "path", value_name = "LABEL", conflicts_with = "steps")]
    path: Vec<String>,

    /// JSON file with a list of steps
    #[arg(long, value_name = "FILE")]
    steps: Option<PathBuf>,
}

/// One named tool invocation
#[derive(Debug, Deserialize)]
struct Step {
    tool: String,
    #[serde(default = "empty_params")]
    params: Value,
}

fn empty_params() -> Value {
    json!({})
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let wait_options = match &cli.wait_config {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<WaitOptions>(&raw).with_context(|| format!("Invalid wait config {}", path.display()))?
        }
        None => WaitOptions::default(),
    };

    let steps = build_steps(&cli)?;
    if steps.is_empty() {
        bail!("Nothing to do: pass --url, --path or --steps");
    }

    let session = match &cli.ws_url {
        Some(ws_url) => BrowserSession::connect(ConnectionOptions::new(ws_url.clone()))?,
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.chrome_path {
                options = options.chrome_path(path.clone());
            }
            if let Some(dir) = &cli.user_data_dir {
                options = options.user_data_dir(dir.clone());
            }
            BrowserSession::launch(options)?
        }
    };

    let mut context = ToolContext::with_wait_options(&session, wait_options);
    for (position, step) in steps.into_iter().enumerate() {
        log::info!("Step {}: {}", position + 1, step.tool);
        let result = session
            .tool_registry()
            .execute(&step.tool, step.params, &mut context)
            .unwrap_or_else(ToolResult::from);

        println!("{}", serde_json::to_string_pretty(&result)?);
        if !result.success {
            bail!(
                "Step {} ({}) failed: {}",
                position + 1,
                step.tool,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn build_steps(cli: &Cli) -> anyhow::Result<Vec<Step>> {
    let mut steps = Vec::new();

    if let Some(url) = &cli.url {
        steps.push(Step { tool: "navigate".to_string(), params: json!({ "url": url }) });
    }

    if let Some(path) = &cli.steps {
        let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let file_steps: Vec<Step> =
            serde_json::from_str(&raw).with_context(|| format!("Invalid step file {}", path.display()))?;
        steps.extend(file_steps);
    } else if !cli.path.is_empty() {
        steps.push(Step { tool: "open_tree_path".to_string(), params: json!({ "path": cli.path }) });
    }

    Ok(steps)
}
