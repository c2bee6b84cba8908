//! Interaction scripts: one step per line, `#` starts a comment. Event types
//! are taken as written; handler names are lowercased.
//!
//! ```text
//! click   <selector>
//! event   <selector> <event type>
//! move    [selector]
//! mutate  <selector> <attribute> <value...>
//! unset   <selector> <attribute>
//! html    <selector> <markup...>
//! listen  <selector> <event type>
//! handler <selector> <on-handler>
//! navigate <url>
//! reload
//! ```
use coverage::{CoverageError, Instrumenter, Page, Storage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Click(String),
    Event { selector: String, event_type: String },
    Move(Option<String>),
    Mutate { selector: String, attribute: String, value: String },
    Unset { selector: String, attribute: String },
    InnerHtml { selector: String, markup: String },
    Listen { selector: String, event_type: String },
    Handler { selector: String, handler: String },
    Navigate(String),
    Reload,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, CoverageError> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let error = |message: String| CoverageError::Script {
            line: index + 1,
            message,
        };
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();
        let step = match (command, args.as_slice()) {
            ("click", [selector]) => Step::Click(selector.to_string()),
            ("event", [selector, event_type]) => Step::Event {
                selector: selector.to_string(),
                event_type: event_type.to_string(),
            },
            ("move", []) => Step::Move(None),
            ("move", [selector]) => Step::Move(Some(selector.to_string())),
            ("mutate", [selector, attribute, ..]) => Step::Mutate {
                selector: selector.to_string(),
                attribute: attribute.to_string(),
                value: remainder(rest, 2),
            },
            ("unset", [selector, attribute]) => Step::Unset {
                selector: selector.to_string(),
                attribute: attribute.to_string(),
            },
            ("html", [selector, _, ..]) => Step::InnerHtml {
                selector: selector.to_string(),
                markup: remainder(rest, 1),
            },
            ("listen", [selector, event_type]) => Step::Listen {
                selector: selector.to_string(),
                event_type: event_type.to_string(),
            },
            ("handler", [selector, handler]) => Step::Handler {
                selector: selector.to_string(),
                handler: handler.to_ascii_lowercase(),
            },
            ("navigate", [url]) => Step::Navigate(url.to_string()),
            ("reload", []) => Step::Reload,
            (
                "click" | "event" | "move" | "mutate" | "unset" | "html" | "listen" | "handler"
                | "navigate" | "reload",
                _,
            ) => return Err(error(format!("wrong arguments for `{command}`"))),
            _ => return Err(error(format!("unknown command `{command}`"))),
        };
        steps.push(step);
    }
    Ok(steps)
}

/// `rest` without its first `skip` whitespace-separated words.
fn remainder(rest: &str, skip: usize) -> String {
    let mut tail = rest;
    for _ in 0..skip {
        tail = tail
            .trim_start()
            .split_once(char::is_whitespace)
            .map_or("", |(_, t)| t);
    }
    tail.trim().to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub scans: usize,
    pub recorded: usize,
}

/// Replay `steps` against an already attached page.
pub fn run_steps<S: Storage>(
    instrumenter: &mut Instrumenter<S>,
    page: &mut Page,
    steps: &[Step],
) -> Result<RunSummary, CoverageError> {
    let mut summary = RunSummary::default();
    for step in steps {
        log::debug!(target: "uicov.script", "{step:?}");
        summary.steps += 1;
        let outcome = match step {
            Step::Click(selector) => {
                let target = page.query(selector)?;
                Some(instrumenter.dispatch(page, target, "click")?)
            }
            Step::Event {
                selector,
                event_type,
            } => {
                let target = page.query(selector)?;
                Some(instrumenter.dispatch(page, target, event_type)?)
            }
            Step::Move(selector) => {
                let target = match selector {
                    Some(selector) => page.query(selector)?,
                    None => page.dom().id(),
                };
                Some(instrumenter.dispatch(page, target, "mousemove")?)
            }
            Step::Mutate {
                selector,
                attribute,
                value,
            } => {
                let target = page.query(selector)?;
                page.set_attribute(target, attribute, value)?;
                None
            }
            Step::Unset {
                selector,
                attribute,
            } => {
                let target = page.query(selector)?;
                page.remove_attribute(target, attribute)?;
                None
            }
            Step::InnerHtml { selector, markup } => {
                let target = page.query(selector)?;
                page.set_inner_html(target, markup)?;
                None
            }
            Step::Listen {
                selector,
                event_type,
            } => {
                let target = page.query(selector)?;
                page.targets_mut().add_page_listener(target, event_type);
                None
            }
            Step::Handler { selector, handler } => {
                let target = page.query(selector)?;
                page.targets_mut().set_handler_property(target, handler);
                None
            }
            Step::Navigate(url) => {
                page.push_state(url)?;
                None
            }
            Step::Reload => {
                page.reload();
                instrumenter.attach(page)?;
                summary.scans += 1;
                None
            }
        };
        if let Some(outcome) = outcome {
            summary.recorded += outcome.recorded.len();
            summary.scans += usize::from(outcome.scan.is_some());
        }
    }
    Ok(summary)
}
