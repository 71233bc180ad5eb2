use crate::driver::{AutomationDriver, ElementRef, Locator};
use crate::error::{BrowserError, Result};
use crate::frame::FrameContext;
use headless_chrome::Tab;
use headless_chrome::util::Wait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Query script evaluated in the top-level document for every driver call
const DOM_QUERY_JS: &str = include_str!("dom_query.js");

/// Reply returned by the query script as a JSON string
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum QueryReply {
    Ok {
        #[serde(default)]
        refs: Vec<u64>,
        #[serde(default)]
        flag: bool,
        #[serde(default)]
        count: usize,
    },
    Missing {
        detail: String,
    },
    NotInteractable {
        detail: String,
    },
    NoFrame {
        frame: String,
    },
    Error {
        detail: String,
    },
}

/// [`AutomationDriver`] backed by a Chrome tab
///
/// Frames are reached by walking same-origin `iframe[name=...]` content windows from
/// the top-level document on every call, so no CDP frame state has to be tracked.
/// Resolved elements are tagged with a `data-tree-nav-ref` attribute and found again
/// through it; an element that was re-rendered since loses its tag and reports as missing.
pub struct CdpDriver {
    tab: Arc<Tab>,
    poll_interval: Duration,
}

impl CdpDriver {
    pub fn new(tab: Arc<Tab>, poll_interval: Duration) -> Self {
        Self { tab, poll_interval }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Evaluate one query operation against the given frame
    fn query(&self, op: &str, frame: &FrameContext, mut args: Value) -> Result<QueryReply> {
        args["frame"] = serde_json::to_value(frame)?;
        let script = format!("{}({}, {})", DOM_QUERY_JS.trim(), serde_json::to_string(op)?, args);

        let result = self
            .tab
            .evaluate(&script, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("DOM query '{}' failed: {}", op, e)))?;

        let value = result
            .value
            .ok_or_else(|| BrowserError::EvaluationFailed(format!("DOM query '{}' returned no value", op)))?;

        let json_str = value
            .as_str()
            .ok_or_else(|| BrowserError::EvaluationFailed(format!("DOM query '{}' returned non-string {}", op, value)))?;

        Ok(serde_json::from_str(json_str)?)
    }

    /// Run a query whose outcome is a boolean flag
    fn flag(&self, op: &str, frame: &FrameContext, args: Value) -> Result<bool> {
        match self.query(op, frame, args)? {
            QueryReply::Ok { flag, .. } => Ok(flag),
            other => Err(reply_error(other)),
        }
    }

    fn poll<T>(&self, what: &str, timeout: Duration, check: impl FnMut() -> Result<Option<T>>) -> Result<T> {
        poll_until(what, timeout, self.poll_interval, check)
    }
}

/// Poll `check` until it yields a value or `timeout` expires
///
/// Only `Ok(None)` means "not yet". An error cannot change between polls (a frame
/// that is gone, a broken query) and ends the wait at once.
fn poll_until<T>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut check: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
    Wait::new(timeout, interval)
        .until(|| check().transpose())
        .map_err(|_| BrowserError::timeout(what, timeout))?
        .inspect_err(|e| log::debug!("Polling for {} failed: {}", what, e))
}

/// Map a non-ok reply to the matching error
fn reply_error(reply: QueryReply) -> BrowserError {
    match reply {
        QueryReply::Missing { detail } => BrowserError::ElementNotFound(detail),
        QueryReply::NotInteractable { detail } => BrowserError::NotInteractable(detail),
        QueryReply::NoFrame { frame } => BrowserError::FrameNotFound(frame),
        QueryReply::Error { detail } => BrowserError::EvaluationFailed(detail),
        QueryReply::Ok { .. } => BrowserError::EvaluationFailed("unexpected ok reply".to_string()),
    }
}

/// Extract the single element handle of an ok reply
fn single_ref(reply: QueryReply, frame: &FrameContext) -> Result<ElementRef> {
    match reply {
        QueryReply::Ok { refs, .. } => refs
            .first()
            .map(|id| ElementRef::new(*id, frame.clone()))
            .ok_or_else(|| BrowserError::EvaluationFailed("query returned no element handle".to_string())),
        other => Err(reply_error(other)),
    }
}

impl AutomationDriver for CdpDriver {
    fn wait_until_invisible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<()> {
        let what = format!("'{}' to disappear in {}", selector, frame);
        self.poll(&what, timeout, || {
            let visible = self.flag("any_visible", frame, json!({ "selector": selector }))?;
            Ok((!visible).then_some(()))
        })
    }

    fn wait_until_visible(&self, frame: &FrameContext, selector: &str, timeout: Duration) -> Result<ElementRef> {
        let what = format!("'{}' to become visible in {}", selector, frame);
        self.poll(&what, timeout, || match self.query("first_visible", frame, json!({ "selector": selector }))? {
            QueryReply::Missing { .. } => Ok(None),
            reply => single_ref(reply, frame).map(Some),
        })
    }

    fn wait_for_label(
        &self,
        frame: &FrameContext,
        item: &str,
        label: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        let what = format!("'{}' labelled '{}' in {}", item, text, frame);
        let args = json!({ "selector": item, "label": label, "text": text });
        self.poll(&what, timeout, || {
            let seen = self.flag("has_label", frame, args.clone())?;
            Ok(seen.then_some(()))
        })
    }

    fn count(&self, frame: &FrameContext, selector: &str) -> Result<usize> {
        match self.query("count", frame, json!({ "selector": selector }))? {
            QueryReply::Ok { count, .. } => Ok(count),
            other => Err(reply_error(other)),
        }
    }

    fn find_within(&self, scope: &ElementRef, locator: &Locator) -> Result<ElementRef> {
        let args = match locator {
            Locator::Css(selector) => json!({ "scope": scope.id(), "css": selector }),
            Locator::XPath(expression) => json!({ "scope": scope.id(), "xpath": expression }),
        };
        let reply = self.query("find_within", scope.frame(), args)?;
        single_ref(reply, scope.frame())
    }

    fn enter_frame(&self, frame: &FrameContext, name: &str) -> Result<FrameContext> {
        // Resolved exactly like every later query in the child, so an unloaded or
        // cross-origin frame is rejected here rather than by the next wait
        let child = frame.child(name);
        match self.query("frame_ready", &child, json!({}))? {
            QueryReply::Ok { .. } => Ok(child),
            QueryReply::NoFrame { .. } => Err(BrowserError::FrameNotFound(format!("{} in {}", name, frame))),
            other => Err(reply_error(other)),
        }
    }

    fn click(&self, element: &ElementRef) -> Result<()> {
        match self.query("click", element.frame(), json!({ "ref": element.id() }))? {
            QueryReply::Ok { .. } => Ok(()),
            other => Err(reply_error(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_reply() {
        let reply: QueryReply = serde_json::from_str(r#"{"status":"ok","refs":[3,4]}"#).unwrap();
        match reply {
            QueryReply::Ok { refs, flag, count } => {
                assert_eq!(refs, vec![3, 4]);
                assert!(!flag);
                assert_eq!(count, 0);
            }
            other => panic!("Expected ok reply, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_errors() {
        let missing: QueryReply = serde_json::from_str(r#"{"status":"missing","detail":".chevron"}"#).unwrap();
        assert!(reply_error(missing).is_not_found());

        let stuck: QueryReply = serde_json::from_str(r#"{"status":"not_interactable","detail":"x"}"#).unwrap();
        assert!(reply_error(stuck).is_not_interactable());

        let no_frame: QueryReply = serde_json::from_str(r#"{"status":"no_frame","frame":"list_frame"}"#).unwrap();
        assert!(matches!(reply_error(no_frame), BrowserError::FrameNotFound(name) if name == "list_frame"));
    }

    #[test]
    fn test_single_ref_keeps_frame() {
        let frame = FrameContext::root().child("list_frame");
        let reply: QueryReply = serde_json::from_str(r#"{"status":"ok","refs":[12]}"#).unwrap();
        let element = single_ref(reply, &frame).unwrap();
        assert_eq!(element, ElementRef::new(12, frame));
    }

    #[test]
    fn test_poll_stops_on_error() {
        let mut polls = 0;
        let started = std::time::Instant::now();

        let err = poll_until::<()>("'#nprogress' to disappear", Duration::from_secs(60), Duration::from_millis(10), || {
            polls += 1;
            Err(BrowserError::FrameNotFound("list_frame".to_string()))
        })
        .unwrap_err();

        assert!(matches!(err, BrowserError::FrameNotFound(_)));
        assert_eq!(polls, 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_poll_retries_until_found() {
        let mut polls = 0;

        let value = poll_until("tree item", Duration::from_secs(5), Duration::from_millis(1), || {
            polls += 1;
            Ok((polls == 3).then_some(polls))
        })
        .unwrap();

        assert_eq!(value, 3);
    }

    #[test]
    fn test_poll_times_out() {
        let err = poll_until::<()>("tree item", Duration::from_millis(30), Duration::from_millis(5), || Ok(None))
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_query_script_handles_every_operation() {
        for op in ["any_visible", "first_visible", "has_label", "count", "frame_ready", "find_within", "click"] {
            assert!(DOM_QUERY_JS.contains(&format!("case '{}'", op)), "no handler for {}", op);
        }
    }

    #[test]
    fn test_query_script_is_callable_expression() {
        let script = DOM_QUERY_JS.trim();
        assert!(script.starts_with("(function (op, args)"));
        assert!(script.ends_with(')'));
    }
}
