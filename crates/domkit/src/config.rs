//! Page configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! url = "https://example.com/faq"
//!
//! [collapsible]
//! accordion = true
//! scope = "#faq"
//!
//! [counter]
//! enabled = false
//! ```

use std::path::Path;

use domkit_widgets::{CollapsibleConfig, CounterConfig, FloatingLabelConfig};
use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document URL
    pub url: String,
    pub collapsible: CollapsibleSection,
    pub counter: CounterSection,
    pub floating_label: FloatingLabelSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            collapsible: CollapsibleSection::default(),
            counter: CounterSection::default(),
            floating_label: FloatingLabelSection::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollapsibleSection {
    pub enabled: bool,
    pub accordion: bool,
    /// Selector of the element to activate within; whole document if unset
    pub scope: Option<String>,
    pub toggle_attribute: String,
    pub accordion_attribute: String,
    pub header_selector: String,
    pub content_selector: String,
    pub expanded_class: String,
}

impl Default for CollapsibleSection {
    fn default() -> Self {
        let widget = CollapsibleConfig::default();
        Self {
            enabled: true,
            accordion: false,
            scope: None,
            toggle_attribute: widget.toggle_attribute,
            accordion_attribute: widget.accordion_attribute,
            header_selector: widget.header_selector,
            content_selector: widget.content_selector,
            expanded_class: widget.expanded_class,
        }
    }
}

impl From<&CollapsibleSection> for CollapsibleConfig {
    fn from(section: &CollapsibleSection) -> Self {
        Self {
            toggle_attribute: section.toggle_attribute.clone(),
            accordion_attribute: section.accordion_attribute.clone(),
            header_selector: section.header_selector.clone(),
            content_selector: section.content_selector.clone(),
            expanded_class: section.expanded_class.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CounterSection {
    pub enabled: bool,
    pub attribute: String,
    pub over_limit_class: String,
}

impl Default for CounterSection {
    fn default() -> Self {
        let widget = CounterConfig::default();
        Self {
            enabled: true,
            attribute: widget.attribute,
            over_limit_class: widget.over_limit_class,
        }
    }
}

impl From<&CounterSection> for CounterConfig {
    fn from(section: &CounterSection) -> Self {
        Self {
            attribute: section.attribute.clone(),
            over_limit_class: section.over_limit_class.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FloatingLabelSection {
    pub enabled: bool,
    pub attribute: String,
    pub field_selector: String,
    pub focused_class: String,
    pub filled_class: String,
}

impl Default for FloatingLabelSection {
    fn default() -> Self {
        let widget = FloatingLabelConfig::default();
        Self {
            enabled: true,
            attribute: widget.attribute,
            field_selector: widget.field_selector,
            focused_class: widget.focused_class,
            filled_class: widget.filled_class,
        }
    }
}

impl From<&FloatingLabelSection> for FloatingLabelConfig {
    fn from(section: &FloatingLabelSection) -> Self {
        Self {
            attribute: section.attribute.clone(),
            field_selector: section.field_selector.clone(),
            focused_class: section.focused_class.clone(),
            filled_class: section.filled_class.clone(),
        }
    }
}
