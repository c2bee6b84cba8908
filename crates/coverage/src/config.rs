use crate::error::CoverageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outline colors used when colorization is on, one per coverage mark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineColors {
    pub untouched: String,
    pub partial: String,
    pub complete: String,
}

impl Default for OutlineColors {
    fn default() -> Self {
        Self {
            untouched: "red".to_string(),
            partial: "orange".to_string(),
            complete: "limegreen".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageConfig {
    /// Storage slot holding the serialized coverage store.
    pub storage_slot: String,
    /// Storage slot holding the persisted colorization flag.
    pub colors_slot: String,
    /// Tracking attributes are `<prefix><event type>`.
    pub tracking_attribute_prefix: String,
    /// Event types that are never user initiated.
    pub ignored_events: Vec<String>,
    /// Tags that count as clickable even without any handler.
    pub forced_click_tags: Vec<String>,
    /// Ask the page for listeners registered through `addEventListener`.
    pub introspect_listeners: bool,
    /// Colorization state until a flag has been persisted.
    pub colorize_default: bool,
    pub outline_colors: OutlineColors,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            storage_slot: "ui-coverage".to_string(),
            colors_slot: "ui-coverage-colors".to_string(),
            tracking_attribute_prefix: "data-uicov-".to_string(),
            ignored_events: ["popstate", "unhandledrejection", "error"]
                .map(String::from)
                .to_vec(),
            forced_click_tags: ["a", "button", "input"].map(String::from).to_vec(),
            introspect_listeners: true,
            colorize_default: false,
            outline_colors: OutlineColors::default(),
        }
    }
}

impl CoverageConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, CoverageError> {
        let config: CoverageConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CoverageError> {
        let text = std::fs::read_to_string(path).map_err(|e| CoverageError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), CoverageError> {
        if self.storage_slot.is_empty() || self.colors_slot.is_empty() {
            return Err(CoverageError::Config("storage slots must not be empty".into()));
        }
        if self.storage_slot == self.colors_slot {
            return Err(CoverageError::Config(
                "storage_slot and colors_slot must differ".into(),
            ));
        }
        let prefix = &self.tracking_attribute_prefix;
        if prefix.is_empty()
            || !prefix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(CoverageError::Config(format!(
                "tracking_attribute_prefix {prefix:?} must be lowercase ascii, digits or '-'"
            )));
        }
        let colors = &self.outline_colors;
        for color in [&colors.untouched, &colors.partial, &colors.complete] {
            if css::parse_color(color).is_none() {
                return Err(CoverageError::Config(format!("unknown outline color {color:?}")));
            }
        }
        Ok(())
    }

    pub fn is_ignored(&self, event_type: &str) -> bool {
        self.ignored_events.iter().any(|e| e == event_type)
    }

    /// Marker attribute for one event type. Attribute names are
    /// case-insensitive while event types are not, so an uppercase letter is
    /// written as `_` plus its lowercase form and `_` itself as `__`.
    pub fn tracking_attribute(&self, event_type: &str) -> String {
        let mut attribute = self.tracking_attribute_prefix.clone();
        for ch in event_type.chars() {
            match ch {
                '_' => attribute.push_str("__"),
                c if c.is_ascii_uppercase() => {
                    attribute.push('_');
                    attribute.push(c.to_ascii_lowercase());
                }
                c => attribute.push(c),
            }
        }
        attribute
    }
}
