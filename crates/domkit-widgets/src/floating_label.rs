//! Floating labels
//!
//! A container carrying `data-float-label` wraps a label and a form field.
//! The container gets `is-focused` while the field has focus and `is-filled`
//! while the field holds a non-empty value, so CSS can lift the label.

use domkit_dom::{Document, EventType, NodeId};
use domkit_util::dom;

use crate::bindings::Bindings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingLabelConfig {
    pub attribute: String,
    pub field_selector: String,
    pub focused_class: String,
    pub filled_class: String,
}

impl Default for FloatingLabelConfig {
    fn default() -> Self {
        Self {
            attribute: "data-float-label".to_string(),
            field_selector: "input, textarea, select".to_string(),
            focused_class: "is-focused".to_string(),
            filled_class: "is-filled".to_string(),
        }
    }
}

struct FloatingLabel;

/// Release bindings on fields removed from the document
pub fn prune_detached(doc: &mut Document) -> usize {
    Bindings::<FloatingLabel>::prune_detached(doc)
}

/// Bind every floating-label container under `scope`. Containers without a
/// field are skipped. Returns the bound containers.
pub fn activate(doc: &mut Document, scope: Option<NodeId>, config: &FloatingLabelConfig) -> Vec<NodeId> {
    let containers: Vec<NodeId> = doc
        .tree()
        .descendants(scope.unwrap_or(NodeId::ROOT))
        .filter(|&id| doc.has_attribute(id, &config.attribute))
        .collect();

    let mut bound = Vec::with_capacity(containers.len());
    for container in containers {
        let field = match dom::get_element(doc, &config.field_selector, Some(container)) {
            Ok(Some(field)) => field,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Invalid floating label field selector: {}", e);
                return bound;
            }
        };

        sync_filled(doc, container, field, config);
        if doc.active_element() == Some(field) {
            dom::add_class(doc, container, &config.focused_class);
        }

        let focused = config.focused_class.clone();
        let on_focus = doc.add_event_listener(field, EventType::Focus, move |doc, _| {
            dom::add_class(doc, container, &focused);
        });
        let cfg = config.clone();
        let on_blur = doc.add_event_listener(field, EventType::Blur, move |doc, _| {
            dom::remove_class(doc, container, &cfg.focused_class);
            sync_filled(doc, container, field, &cfg);
        });
        let cfg = config.clone();
        let on_input = doc.add_event_listener(field, EventType::Input, move |doc, _| {
            sync_filled(doc, container, field, &cfg);
        });
        Bindings::<FloatingLabel>::replace(doc, field, vec![on_focus, on_blur, on_input]);
        bound.push(container);
    }
    tracing::debug!("Bound {} floating labels", bound.len());
    bound
}

fn sync_filled(doc: &mut Document, container: NodeId, field: NodeId, config: &FloatingLabelConfig) {
    let filled = doc.value(field).is_some_and(|v| !v.is_empty());
    doc.toggle_class(container, &config.filled_class, Some(filled));
}
