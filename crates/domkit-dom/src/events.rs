//! DOM Events
//!
//! Event types, the event object passed to listeners, and the per-node
//! listener registry used by `Document::dispatch_event`.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// DOM event types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Input,
    Change,
    Focus,
    Blur,
    Custom(String),
}

impl EventType {
    /// Check if this event type bubbles
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Click => "click",
            EventType::Input => "input",
            EventType::Change => "change",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Custom(name) => name,
        }
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        match name {
            "click" => EventType::Click,
            "input" => EventType::Input,
            "change" => EventType::Change,
            "focus" => EventType::Focus,
            "blur" => EventType::Blur,
            other => EventType::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    AtTarget,
    Bubbling,
}

/// Event object handed to listeners
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched at
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub phase: EventPhase,
    pub bubbles: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            bubbles: event_type.bubbles(),
            event_type,
            target,
            current_target: target,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop propagation after the current node's listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener callback. Gets the document mutably so handlers can
/// mutate the tree while the event is being dispatched.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    event_type: EventType,
    callback: Listener,
}

/// Listeners by target node
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<Registration>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, event_type: EventType, callback: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_node.entry(node).or_default().push(Registration {
            id,
            event_type,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| r.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    pub(crate) fn count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.by_node
            .get(&node)
            .map_or(0, |list| list.iter().filter(|r| &r.event_type == event_type).count())
    }

    /// Snapshot of callbacks so they can run while the document is borrowed mutably
    pub(crate) fn callbacks(&self, node: NodeId, event_type: &EventType) -> Vec<Listener> {
        self.by_node.get(&node).map_or_else(Vec::new, |list| {
            list.iter()
                .filter(|r| &r.event_type == event_type)
                .map(|r| Rc::clone(&r.callback))
                .collect()
        })
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("nodes", &self.by_node.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
