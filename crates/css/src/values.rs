use std::fmt;

/// CSS `cursor` keyword. Only the keywords the engine cares about get their
/// own variant; everything else is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Auto,
    Default,
    Pointer,
    Text,
    None,
    Other(String),
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Auto => f.write_str("auto"),
            Cursor::Default => f.write_str("default"),
            Cursor::Pointer => f.write_str("pointer"),
            Cursor::Text => f.write_str("text"),
            Cursor::None => f.write_str("none"),
            Cursor::Other(keyword) => f.write_str(keyword),
        }
    }
}

/// Parse a `cursor` value. Image fallbacks (`url(a.cur), pointer`) resolve to
/// the trailing keyword. `inherit`/`unset` return `None` so the caller keeps
/// the inherited value.
pub fn parse_cursor(value: &str) -> Option<Cursor> {
    let keyword = value
        .rsplit(',')
        .next()
        .map(|k| k.trim().to_ascii_lowercase())?;
    let cursor = match keyword.as_str() {
        "" | "inherit" | "unset" => return None,
        "initial" | "auto" => Cursor::Auto,
        "default" => Cursor::Default,
        "pointer" => Cursor::Pointer,
        "text" => Cursor::Text,
        "none" => Cursor::None,
        k if k.starts_with("url(") => return None,
        k => Cursor::Other(k.to_string()),
    };
    Some(cursor)
}

pub fn parse_color(value: &str) -> Option<(u8, u8, u8, u8)> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some((r, g, b, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some((r, g, b, 255))
            }
            _ => None,
        };
    }

    let named = match s.as_str() {
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "limegreen" => (50, 205, 50, 255),
        "orange" => (255, 165, 0, 255),
        "red" => (255, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "yellow" => (255, 255, 0, 255),
        _ => return None,
    };
    Some(named)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cursor_keywords_and_fallbacks() {
        assert_eq!(parse_cursor("Pointer"), Some(Cursor::Pointer));
        assert_eq!(parse_cursor("url(hand.cur), pointer"), Some(Cursor::Pointer));
        assert_eq!(parse_cursor("grab"), Some(Cursor::Other("grab".into())));
        assert_eq!(parse_cursor("initial"), Some(Cursor::Auto));
        assert_eq!(parse_cursor("inherit"), None);
        assert_eq!(parse_cursor("url(only.cur)"), None);
    }

    #[test]
    fn parse_color_hex_and_named() {
        assert_eq!(parse_color("#0f0"), Some((0, 255, 0, 255)));
        assert_eq!(parse_color("#FF8000"), Some((255, 128, 0, 255)));
        assert_eq!(parse_color("orange"), Some((255, 165, 0, 255)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }
}
