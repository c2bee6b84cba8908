// A single CSS property: "cursor: pointer"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Clone, Debug)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    /// `tag.class`, `tag#id`, `.a.b`: every part must match.
    Compound(Vec<Selector>),
}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

// input: "div, #id { cursor: pointer; } .class { outline: none; }"
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let input = strip_comments(input);
    let mut rules = Vec::new();
    for block in input.split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(parse_selector)
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

// input: "color: red; cursor: pointer;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "cursor", value: "pointer" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// input: "#id", ".class", "div", "*", "a.nav"
// output: Some(Selector::Id("id")), ...
// Combinators, pseudo-classes and attribute selectors are unsupported and yield None.
pub fn parse_selector(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s == "*" {
        return Some(Selector::Universal);
    }

    let mut parts = Vec::new();
    let mut rest = s;
    let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if !is_ident(tag) {
            return None;
        }
        parts.push(Selector::Type(tag.to_ascii_lowercase()));
        rest = &rest[tag_end..];
    }
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if !is_ident(name) {
            return None;
        }
        parts.push(match marker {
            '#' => Selector::Id(name.to_string()),
            _ => Selector::Class(name.to_string()),
        });
        rest = &body[end..];
    }

    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Selector::Compound(parts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selector_handles_simple_and_compound_forms() {
        assert_eq!(parse_selector("*"), Some(Selector::Universal));
        assert_eq!(parse_selector("DIV"), Some(Selector::Type("div".into())));
        assert_eq!(parse_selector("#go"), Some(Selector::Id("go".into())));
        assert_eq!(
            parse_selector("a.nav#home"),
            Some(Selector::Compound(vec![
                Selector::Type("a".into()),
                Selector::Class("nav".into()),
                Selector::Id("home".into()),
            ]))
        );
        assert_eq!(parse_selector("a:hover"), None);
        assert_eq!(parse_selector("ul li"), None);
        assert_eq!(parse_selector("#"), None);
    }

    #[test]
    fn parse_stylesheet_skips_comments_and_unsupported_selectors() {
        let sheet = parse_stylesheet(
            "/* widgets */ .card { cursor: pointer } a:hover { color: red } p, em { }",
        );
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selectors, vec![Selector::Class("card".into())]);
        assert_eq!(
            sheet.rules[0].declarations,
            vec![Declaration {
                name: "cursor".into(),
                value: "pointer".into()
            }]
        );
    }

    #[test]
    fn declarations_are_lowercased_and_trimmed() {
        let decls = parse_declarations("COLOR: red;; outline : 2px solid green ");
        let pairs: Vec<_> = decls
            .iter()
            .map(|d| (d.name.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(pairs, [("color", "red"), ("outline", "2px solid green")]);
    }
}
