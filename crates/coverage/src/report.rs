//! Coverage summaries for report tooling.
use crate::store::Coverage;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub page_key: String,
    pub elements: usize,
    /// Tracked `(element, event type)` pairs.
    pub events: usize,
    pub triggered: usize,
    /// Untriggered pairs as `(element identity, event type)`.
    pub missing: Vec<(String, String)>,
}

impl PageSummary {
    pub fn percent(&self) -> f64 {
        percent(self.triggered, self.events)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageSummary {
    pub pages: Vec<PageSummary>,
}

impl CoverageSummary {
    pub fn from_coverage(coverage: &Coverage) -> Self {
        let pages = coverage
            .pages()
            .map(|(page_key, elements)| {
                let mut summary = PageSummary {
                    page_key: page_key.to_string(),
                    elements: elements.len(),
                    events: 0,
                    triggered: 0,
                    missing: Vec::new(),
                };
                for (identity, states) in elements {
                    for (event_type, triggered) in states {
                        summary.events += 1;
                        if *triggered {
                            summary.triggered += 1;
                        } else {
                            summary.missing.push((identity.clone(), event_type.clone()));
                        }
                    }
                }
                summary
            })
            .collect();
        Self { pages }
    }

    pub fn events(&self) -> usize {
        self.pages.iter().map(|p| p.events).sum()
    }

    pub fn triggered(&self) -> usize {
        self.pages.iter().map(|p| p.triggered).sum()
    }

    pub fn percent(&self) -> f64 {
        percent(self.triggered(), self.events())
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

impl fmt::Display for CoverageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            writeln!(
                f,
                "{:6.1}%  {:>4}/{:<4} {} ({} elements)",
                page.percent(),
                page.triggered,
                page.events,
                page.page_key,
                page.elements
            )?;
        }
        write!(
            f,
            "{:6.1}%  {:>4}/{:<4} total",
            self.percent(),
            self.triggered(),
            self.events()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_page_and_total() {
        let mut coverage = Coverage::new();
        coverage.ensure_page("https://shop.test/empty");
        coverage.ensure_event("https://shop.test/cart", "<a>", "click");
        coverage.mark_triggered("https://shop.test/cart", "<a>", "mouseover");
        coverage.mark_triggered("https://shop.test/items/[num]", "<button>", "click");

        let summary = CoverageSummary::from_coverage(&coverage);
        assert_eq!(summary.pages.len(), 3);
        let cart = &summary.pages[0];
        assert_eq!(cart.page_key, "https://shop.test/cart");
        assert_eq!((cart.elements, cart.events, cart.triggered), (1, 2, 1));
        assert_eq!(cart.missing, vec![("<a>".to_string(), "click".to_string())]);
        assert_eq!(summary.pages[1].percent(), 0.0);
        assert_eq!(summary.events(), 3);
        assert_eq!(summary.triggered(), 2);

        let text = summary.to_string();
        assert!(text.lines().last().is_some_and(|l| l.contains("total")));
    }
}
