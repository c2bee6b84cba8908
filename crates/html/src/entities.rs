/// Named entities the tokenizer decodes. Anything else passes through untouched.
const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the small entity subset above plus well-formed, semicolon-terminated
/// numeric references (`&#215;`, `&#xD7;`). Malformed input is left unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        if let Some((len, ch)) = decode_one(tail) {
            out.push(ch);
            rest = &tail[len..];
        } else {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(tail: &str) -> Option<(usize, char)> {
    for (name, ch) in NAMED {
        if tail.starts_with(name) {
            return Some((name.len(), *ch));
        }
    }
    let body = tail.strip_prefix("&#")?;
    let (digits, radix, prefix_len) = match body.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => (hex, 16, 3),
        None => (body, 10, 2),
    };
    let max = if radix == 16 {
        MAX_HEX_DIGITS
    } else {
        MAX_DEC_DIGITS
    };
    let end = digits.find(';')?;
    if end == 0 || end > max || !digits[..end].chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let ch = u32::from_str_radix(&digits[..end], radix)
        .ok()
        .and_then(char::from_u32)?;
    Some((prefix_len + end + 1, ch))
}

/// Escape character data the way `outerHTML` does.
pub fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// Escape a double-quoted attribute value the way `outerHTML` does.
pub fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
