/// Handler properties exposed on every element and window (`GlobalEventHandlers`
/// plus `WindowEventHandlers`), i.e. every `on<event>` name a page can assign.
pub const GLOBAL_EVENT_HANDLERS: &[&str] = &[
    "onabort",
    "onafterprint",
    "onanimationcancel",
    "onanimationend",
    "onanimationiteration",
    "onanimationstart",
    "onauxclick",
    "onbeforeinput",
    "onbeforeprint",
    "onbeforeunload",
    "onblur",
    "oncancel",
    "oncanplay",
    "oncanplaythrough",
    "onchange",
    "onclick",
    "onclose",
    "oncontextmenu",
    "oncopy",
    "oncuechange",
    "oncut",
    "ondblclick",
    "ondrag",
    "ondragend",
    "ondragenter",
    "ondragleave",
    "ondragover",
    "ondragstart",
    "ondrop",
    "ondurationchange",
    "onemptied",
    "onended",
    "onerror",
    "onfocus",
    "onformdata",
    "ongotpointercapture",
    "onhashchange",
    "oninput",
    "oninvalid",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onlanguagechange",
    "onload",
    "onloadeddata",
    "onloadedmetadata",
    "onloadstart",
    "onlostpointercapture",
    "onmessage",
    "onmousedown",
    "onmouseenter",
    "onmouseleave",
    "onmousemove",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onoffline",
    "ononline",
    "onpagehide",
    "onpageshow",
    "onpaste",
    "onpause",
    "onplay",
    "onplaying",
    "onpointercancel",
    "onpointerdown",
    "onpointerenter",
    "onpointerleave",
    "onpointermove",
    "onpointerout",
    "onpointerover",
    "onpointerup",
    "onpopstate",
    "onprogress",
    "onratechange",
    "onrejectionhandled",
    "onreset",
    "onresize",
    "onscroll",
    "onscrollend",
    "onsecuritypolicyviolation",
    "onseeked",
    "onseeking",
    "onselect",
    "onselectionchange",
    "onselectstart",
    "onslotchange",
    "onstalled",
    "onstorage",
    "onsubmit",
    "onsuspend",
    "ontimeupdate",
    "ontoggle",
    "ontouchcancel",
    "ontouchend",
    "ontouchmove",
    "ontouchstart",
    "ontransitioncancel",
    "ontransitionend",
    "ontransitionrun",
    "ontransitionstart",
    "onunhandledrejection",
    "onunload",
    "onvolumechange",
    "onwaiting",
    "onwheel",
];

pub const HANDLER_PREFIX: &str = "on";

/// `onclick` → `click`. Names without the prefix pass through.
pub fn event_type_of(handler: &str) -> &str {
    handler.strip_prefix(HANDLER_PREFIX).unwrap_or(handler)
}

pub fn is_global_handler(name: &str) -> bool {
    GLOBAL_EVENT_HANDLERS.binary_search(&name).is_ok()
}

/// Whether a dispatched event of this type propagates to ancestors.
pub fn bubbles(event_type: &str) -> bool {
    !matches!(
        event_type,
        "blur"
            | "focus"
            | "load"
            | "unload"
            | "scroll"
            | "mouseenter"
            | "mouseleave"
            | "pointerenter"
            | "pointerleave"
            | "invalid"
            | "toggle"
            | "abort"
            | "error"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_table_is_sorted_and_prefixed() {
        assert!(
            GLOBAL_EVENT_HANDLERS.windows(2).all(|w| w[0] < w[1]),
            "table must stay sorted for binary_search"
        );
        assert!(GLOBAL_EVENT_HANDLERS.iter().all(|h| h.starts_with(HANDLER_PREFIX)));
        assert!(is_global_handler("onclick"));
        assert!(!is_global_handler("onfrobnicate"));
    }

    #[test]
    fn event_type_strips_only_the_prefix() {
        assert_eq!(event_type_of("onclick"), "click");
        assert_eq!(event_type_of("ononline"), "online");
        assert_eq!(event_type_of("keyup"), "keyup");
    }

    #[test]
    fn focus_family_does_not_bubble() {
        assert!(bubbles("click"));
        assert!(bubbles("input"));
        assert!(!bubbles("focus"));
        assert!(!bubbles("mouseenter"));
    }
}
