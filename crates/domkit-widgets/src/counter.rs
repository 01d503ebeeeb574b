//! Character counters for text fields
//!
//! `<textarea maxlength="140" data-counter="#remaining">` keeps the element
//! matched by `#remaining` showing `"{len}/{max}"` (or just `"{len}"` without
//! `maxlength`) and flags the field with `over-limit` past the maximum.

use domkit_dom::{Document, EventType, NodeId};
use domkit_util::dom;

use crate::bindings::Bindings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Attribute holding the selector of the element that displays the count
    pub attribute: String,
    pub over_limit_class: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            attribute: "data-counter".to_string(),
            over_limit_class: "over-limit".to_string(),
        }
    }
}

struct Counter;

/// Release bindings on fields removed from the document
pub fn prune_detached(doc: &mut Document) -> usize {
    Bindings::<Counter>::prune_detached(doc)
}

/// Bind every counter field under `scope` (whole document if `None`).
/// Returns the bound fields in document order.
pub fn activate(doc: &mut Document, scope: Option<NodeId>, config: &CounterConfig) -> Vec<NodeId> {
    let fields: Vec<NodeId> = doc
        .tree()
        .descendants(scope.unwrap_or(NodeId::ROOT))
        .filter(|&id| doc.has_attribute(id, &config.attribute))
        .collect();

    for &field in &fields {
        update(doc, field, config);
        let cfg = config.clone();
        let listener = doc.add_event_listener(field, EventType::Input, move |doc, _| update(doc, field, &cfg));
        Bindings::<Counter>::replace(doc, field, vec![listener]);
    }
    tracing::debug!("Bound {} counters", fields.len());
    fields
}

/// Render the count for one field
pub fn update(doc: &mut Document, field: NodeId, config: &CounterConfig) {
    let len = doc.value(field).map_or(0, |v| v.chars().count());
    let max = doc
        .get_attribute(field, "maxlength")
        .and_then(|m| m.trim().parse::<usize>().ok());

    let text = match max {
        Some(max) => format!("{len}/{max}"),
        None => len.to_string(),
    };
    doc.toggle_class(field, &config.over_limit_class, Some(max.is_some_and(|m| len > m)));

    let Some(selector) = doc.get_attribute(field, &config.attribute).map(str::to_string) else {
        return;
    };
    match dom::get_element(doc, &selector, None) {
        Ok(Some(target)) => {
            if let Err(e) = doc.set_text_content(target, &text) {
                tracing::warn!("Cannot render counter: {}", e);
            }
        }
        Ok(None) => tracing::debug!("Counter target {:?} not found", selector),
        Err(e) => tracing::warn!("Invalid counter target: {}", e),
    }
}
