//! Listener bookkeeping so re-activating a widget replaces its listeners

use std::collections::HashMap;
use std::marker::PhantomData;

use domkit_dom::{Document, ListenerId, NodeId};

/// Listeners installed by widget `W`, keyed by the node they sit on.
/// Lives in the document's component store.
pub(crate) struct Bindings<W> {
    installed: HashMap<NodeId, Vec<ListenerId>>,
    _widget: PhantomData<W>,
}

impl<W> Default for Bindings<W> {
    fn default() -> Self {
        Self {
            installed: HashMap::new(),
            _widget: PhantomData,
        }
    }
}

impl<W: 'static> Bindings<W> {
    /// Drop whatever `W` previously installed on `node`
    pub(crate) fn clear(doc: &mut Document, node: NodeId) {
        let previous = doc.component_mut::<Self>().installed.remove(&node);
        for id in previous.into_iter().flatten() {
            doc.remove_event_listener(node, id);
        }
    }

    /// Drop listeners on nodes no longer in the document. Returns how many nodes were released.
    pub(crate) fn prune_detached(doc: &mut Document) -> usize {
        let detached: Vec<NodeId> = match doc.component::<Self>() {
            Some(bindings) => bindings
                .installed
                .keys()
                .copied()
                .filter(|&node| !doc.is_connected(node))
                .collect(),
            None => return 0,
        };
        for &node in &detached {
            Self::clear(doc, node);
        }
        detached.len()
    }

    /// Record listeners for `node`, removing earlier ones first
    pub(crate) fn replace(doc: &mut Document, node: NodeId, listeners: Vec<ListenerId>) {
        Self::clear(doc, node);
        doc.component_mut::<Self>().installed.insert(node, listeners);
    }
}
