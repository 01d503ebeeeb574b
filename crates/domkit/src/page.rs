//! Page - A parsed document plus the widgets bound to it

use std::rc::Rc;

use domkit_dom::{Document, Event, NodeId};
use domkit_util::{Value, dom};
use domkit_widgets::collapsible::{self, CollapsibleOptions, ToggleCallback};
use domkit_widgets::{ToggleState, counter, floating_label};

use crate::{Config, PageError};

/// What `Page::ready` bound
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyReport {
    /// Activated collapsibles; `None` when the configured scope did not resolve
    pub collapsibles: Option<Vec<NodeId>>,
    pub counters: Vec<NodeId>,
    pub floating_labels: Vec<NodeId>,
}

/// A loaded page
pub struct Page {
    document: Document,
    config: Config,
    on_toggle: Option<ToggleCallback>,
}

impl Page {
    /// Parse `html` as the page's document
    pub fn from_html(html: &str, config: Config) -> Result<Self, PageError> {
        let document = domkit_html::HtmlParser::new().parse_with_url(html, &config.url)?;
        Ok(Self {
            document,
            config,
            on_toggle: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    /// Callback passed to collapsibles activated by `ready`
    pub fn on_toggle<F>(&mut self, callback: F)
    where
        F: Fn(&mut Document, ToggleState, NodeId) + 'static,
    {
        self.on_toggle = Some(Rc::new(callback));
    }

    /// Bind every enabled widget. Running it again rebinds without stacking
    /// listeners and releases widgets whose elements were removed.
    pub fn ready(&mut self) -> ReadyReport {
        tracing::info!("Page ready: {}", self.document.url());
        let mut report = ReadyReport::default();
        collapsible::prune_detached(&mut self.document);
        counter::prune_detached(&mut self.document);
        floating_label::prune_detached(&mut self.document);

        let section = &self.config.collapsible;
        if section.enabled {
            let options = CollapsibleOptions {
                accordion: section.accordion,
                on_toggle: self.on_toggle.clone(),
                config: Rc::new(section.into()),
            };
            report.collapsibles = match &section.scope {
                Some(selector) => match dom::get_element(&self.document, selector, None) {
                    Ok(Some(scope)) => collapsible::activate_within(&mut self.document, scope, options),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::warn!("Invalid collapsible scope: {}", e);
                        None
                    }
                },
                None => collapsible::activate(&mut self.document, &Value::Undefined, options),
            };
        }
        if self.config.counter.enabled {
            report.counters = counter::activate(&mut self.document, None, &(&self.config.counter).into());
        }
        if self.config.floating_label.enabled {
            report.floating_labels =
                floating_label::activate(&mut self.document, None, &(&self.config.floating_label).into());
        }

        tracing::debug!(
            "Bound {} collapsibles, {} counters, {} floating labels",
            report.collapsibles.as_ref().map_or(0, Vec::len),
            report.counters.len(),
            report.floating_labels.len()
        );
        report
    }

    /// Click the first element matching `selector`
    pub fn click(&mut self, selector: &str) -> Result<Event, PageError> {
        let target = self.resolve(selector)?;
        Ok(self.document.click(target))
    }

    /// Focus the first element matching `selector`
    pub fn focus(&mut self, selector: &str) -> Result<NodeId, PageError> {
        let target = self.resolve(selector)?;
        self.document.focus(target);
        Ok(target)
    }

    /// Focus a field and replace its value, firing `input`
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<Event, PageError> {
        let target = self.focus(selector)?;
        Ok(self.document.input(target, text)?)
    }

    fn resolve(&self, selector: &str) -> Result<NodeId, PageError> {
        dom::get_element(&self.document, selector, None)?.ok_or_else(|| PageError::NoMatch(selector.to_string()))
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .field("config", &self.config)
            .finish()
    }
}
