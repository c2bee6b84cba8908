//! Optional visual outline reflecting each tracked element's coverage.
//!
//! The outline is appended to the element's own `style` attribute as
//! `<author style>;outline: 2px solid <color>`, or written alone when the
//! element had no `style` attribute. [`author_style`] undoes exactly that, so
//! identity keys never see the marker.
use crate::config::OutlineColors;
use crate::store::EventStates;
use html::Node;

const OUTLINE_PREFIX: &str = "outline: 2px solid ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageMark {
    /// Nothing triggered yet.
    Untouched,
    /// Some event types triggered.
    Partial,
    /// Every tracked event type triggered.
    Complete,
}

impl CoverageMark {
    pub fn of(states: Option<&EventStates>) -> Self {
        let Some(states) = states else {
            return CoverageMark::Untouched;
        };
        let triggered = states.values().filter(|t| **t).count();
        match triggered {
            0 => CoverageMark::Untouched,
            n if n == states.len() => CoverageMark::Complete,
            _ => CoverageMark::Partial,
        }
    }

    pub fn color<'a>(&self, colors: &'a OutlineColors) -> &'a str {
        match self {
            CoverageMark::Untouched => colors.untouched.as_str(),
            CoverageMark::Partial => colors.partial.as_str(),
            CoverageMark::Complete => colors.complete.as_str(),
        }
    }
}

pub fn outline_marker(color: &str) -> String {
    format!("{OUTLINE_PREFIX}{color}")
}

/// The page author's part of a `style` value. `None` means the attribute only
/// exists because an outline was injected.
pub fn author_style<'a>(style: &'a str, colors: &OutlineColors) -> Option<&'a str> {
    for color in [&colors.untouched, &colors.partial, &colors.complete] {
        let marker = outline_marker(color);
        if style == marker {
            return None;
        }
        if let Some(author) = style
            .strip_suffix(marker.as_str())
            .and_then(|rest| rest.strip_suffix(';'))
        {
            return Some(author);
        }
    }
    Some(style)
}

/// Set the outline for `mark` on an element, replacing a previous one.
/// Returns whether the `style` attribute changed.
pub fn apply_outline(node: &mut Node, mark: CoverageMark, colors: &OutlineColors) -> bool {
    let marker = outline_marker(mark.color(colors));
    let current = node.attr("style").map(str::to_string);
    let next = match current.as_deref().and_then(|s| author_style(s, colors)) {
        Some(author) => format!("{author};{marker}"),
        None => marker,
    };
    if current.as_deref() == Some(next.as_str()) {
        return false;
    }
    node.set_attr("style", &next)
}
