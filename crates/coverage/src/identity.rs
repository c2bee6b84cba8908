use crate::colorize::author_style;
use crate::config::CoverageConfig;
use html::{AttrRewrite, Node, outer_html_with};

/// Identity key of an element: its markup as the page author wrote it.
///
/// Tracking attributes are dropped from the element and every descendant.
/// With colorization on, injected outlines are removed from `style` too.
pub fn identity_key(node: &Node, config: &CoverageConfig, colorize: bool) -> String {
    let prefix = config.tracking_attribute_prefix.as_str();
    outer_html_with(node, &|name, value| {
        if name
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            return AttrRewrite::Drop;
        }
        if colorize && name.eq_ignore_ascii_case("style") {
            let style = value.unwrap_or("");
            return match author_style(style, &config.outline_colors) {
                Some(author) if author == style => AttrRewrite::Keep,
                Some(author) => AttrRewrite::Replace(author.to_string()),
                None => AttrRewrite::Drop,
            };
        }
        AttrRewrite::Keep
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorize::{CoverageMark, apply_outline};
    use html::{outer_html, parse_document};

    #[test]
    fn tracking_attributes_do_not_change_identity() {
        let config = CoverageConfig::default();
        let mut doc = parse_document(r#"<ul class="menu"><li><a href="/a">A</a></li></ul>"#);
        let before = identity_key(&doc.children()[0], &config, false);
        assert_eq!(before, outer_html(&doc.children()[0]));

        let ul = &mut doc.children_mut().expect("document")[0];
        ul.set_attr("data-uicov-click", "true");
        let link = &mut ul.children_mut().expect("ul")[0].children_mut().expect("li")[0];
        link.set_attr("data-uicov-click", "true");
        link.set_attr("data-uicov-mouseover", "true");

        assert_eq!(identity_key(&doc.children()[0], &config, false), before);
    }

    #[test]
    fn injected_outlines_are_stripped_only_when_colorizing() {
        let config = CoverageConfig::default();
        let mut doc = parse_document(r#"<button style="margin: 0">Go</button>"#);
        let before = identity_key(&doc.children()[0], &config, true);

        let button = &mut doc.children_mut().expect("document")[0];
        apply_outline(button, CoverageMark::Partial, &config.outline_colors);

        assert_eq!(identity_key(&doc.children()[0], &config, true), before);
        assert_ne!(identity_key(&doc.children()[0], &config, false), before);
    }

    #[test]
    fn other_data_attributes_are_part_of_identity() {
        let config = CoverageConfig::default();
        let a = parse_document(r#"<a href="/x" data-id="1">x</a>"#);
        let b = parse_document(r#"<a href="/x" data-id="2">x</a>"#);
        assert_ne!(
            identity_key(&a.children()[0], &config, false),
            identity_key(&b.children()[0], &config, false)
        );
    }
}
