//! Collapsible sections and accordions
//!
//! A container element carrying the toggle attribute (`data-collapsible` by
//! default) owns a header and a content region. Clicking anywhere inside a
//! collapsed container opens it; clicking the header of an open container
//! collapses it. Clicks are routed to the nearest container only, so nested
//! collapsibles do not fight over a bubbling click.
//!
//! The typed `ToggleState` held in the per-document `CollapsibleRegistry` is
//! authoritative. The toggle attribute (`open`/`collapsed`) is written through
//! on every transition for styling and other scripts to read.
//!
//! With accordion behaviour enabled, opening a container collapses every
//! other open container whose accordion attribute holds the same group name.
//! Members are scanned from the document at transition time, never cached.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use domkit_dom::{Document, EventType, ListenerId, NodeId};
use domkit_util::Value;
use domkit_util::classify::is_html_element;
use domkit_util::dom::{self, find_ancestor_with_attribute};

/// Open/collapsed state of one container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleState {
    #[default]
    Open,
    Collapsed,
}

impl ToggleState {
    pub fn as_str(self) -> &'static str {
        match self {
            ToggleState::Open => "open",
            ToggleState::Collapsed => "collapsed",
        }
    }

    /// Read an attribute value; missing or unrecognised values mean `Open`
    pub fn from_attribute(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown toggle state: {0:?}")]
pub struct ParseToggleStateError(String);

impl FromStr for ToggleState {
    type Err = ParseToggleStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(ToggleState::Open),
            "collapsed" => Ok(ToggleState::Collapsed),
            _ => Err(ParseToggleStateError(s.to_string())),
        }
    }
}

/// Invoked after a container changes state
pub type ToggleCallback = Rc<dyn Fn(&mut Document, ToggleState, NodeId)>;

/// Attribute names, sub-element selectors and the CSS marker class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsibleConfig {
    pub toggle_attribute: String,
    pub accordion_attribute: String,
    pub header_selector: String,
    pub content_selector: String,
    pub expanded_class: String,
}

impl Default for CollapsibleConfig {
    fn default() -> Self {
        Self {
            toggle_attribute: "data-collapsible".to_string(),
            accordion_attribute: "data-accordion".to_string(),
            header_selector: ".collapsible-header".to_string(),
            content_selector: ".collapsible-content".to_string(),
            expanded_class: "expanded".to_string(),
        }
    }
}

/// Per-call activation options
#[derive(Clone, Default)]
pub struct CollapsibleOptions {
    pub accordion: bool,
    pub on_toggle: Option<ToggleCallback>,
    pub config: Rc<CollapsibleConfig>,
}

impl CollapsibleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accordion(mut self, accordion: bool) -> Self {
        self.accordion = accordion;
        self
    }

    pub fn on_toggle<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Document, ToggleState, NodeId) + 'static,
    {
        self.on_toggle = Some(Rc::new(callback));
        self
    }

    pub fn config(mut self, config: CollapsibleConfig) -> Self {
        self.config = Rc::new(config);
        self
    }
}

impl fmt::Debug for CollapsibleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapsibleOptions")
            .field("accordion", &self.accordion)
            .field("on_toggle", &self.on_toggle.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Something that can be opened and collapsed
pub trait Toggleable {
    fn state(&self) -> ToggleState;
    fn open(&mut self, doc: &mut Document);
    fn collapse(&mut self, doc: &mut Document);
}

/// One activated container
#[derive(Clone)]
pub struct Collapsible {
    container: NodeId,
    header: Option<NodeId>,
    content: Option<NodeId>,
    state: ToggleState,
    /// Accordion group name, set only when activated in accordion mode
    group: Option<String>,
    on_toggle: Option<ToggleCallback>,
    listener: ListenerId,
    config: Rc<CollapsibleConfig>,
}

impl Collapsible {
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn header(&self) -> Option<NodeId> {
        self.header
    }

    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn transition(&mut self, doc: &mut Document, to: ToggleState) {
        if self.state == to {
            return;
        }
        tracing::debug!("Collapsible {} -> {}", self.container, to);
        self.state = to;
        render(doc, &self.config, self.container, self.content, to);
        if let Some(stored) = doc.component_mut::<CollapsibleRegistry>().instances.get_mut(&self.container) {
            stored.state = to;
        }

        if to == ToggleState::Open {
            if let Some(group) = self.group.clone() {
                collapse_group(doc, &self.config, &group, self.container);
            }
        }
        if let Some(callback) = self.on_toggle.clone() {
            callback(doc, to, self.container);
        }
    }
}

impl Toggleable for Collapsible {
    fn state(&self) -> ToggleState {
        self.state
    }

    fn open(&mut self, doc: &mut Document) {
        self.transition(doc, ToggleState::Open);
    }

    fn collapse(&mut self, doc: &mut Document) {
        self.transition(doc, ToggleState::Collapsed);
    }
}

impl fmt::Debug for Collapsible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collapsible")
            .field("container", &self.container)
            .field("header", &self.header)
            .field("content", &self.content)
            .field("state", &self.state)
            .field("group", &self.group)
            .finish()
    }
}

/// Activated containers of one document, keyed by container.
/// Containers removed from the document stay until `prune_detached`.
#[derive(Default)]
pub struct CollapsibleRegistry {
    instances: HashMap<NodeId, Collapsible>,
}

impl CollapsibleRegistry {
    pub fn get(&self, container: NodeId) -> Option<&Collapsible> {
        self.instances.get(&container)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Forget containers that are no longer in the document and remove their
/// click listeners. Entries stay until this runs, so a detached container
/// keeps its last state. Returns how many were dropped.
pub fn prune_detached(doc: &mut Document) -> usize {
    let detached: Vec<(NodeId, ListenerId)> = match doc.component::<CollapsibleRegistry>() {
        Some(registry) => registry
            .instances
            .values()
            .filter(|c| !doc.is_connected(c.container))
            .map(|c| (c.container, c.listener))
            .collect(),
        None => return 0,
    };
    for &(container, listener) in &detached {
        doc.remove_event_listener(container, listener);
        doc.component_mut::<CollapsibleRegistry>().instances.remove(&container);
    }
    if !detached.is_empty() {
        tracing::debug!("Pruned {} detached collapsibles", detached.len());
    }
    detached.len()
}

/// Snapshot of the instance bound to `container`
pub fn instance(doc: &Document, container: NodeId) -> Option<Collapsible> {
    doc.component::<CollapsibleRegistry>()
        .and_then(|r| r.get(container))
        .cloned()
}

/// Authoritative state of an activated container
pub fn state_of(doc: &Document, container: NodeId) -> Option<ToggleState> {
    instance(doc, container).map(|c| c.state)
}

/// Open an activated container as if its owner had been clicked
pub fn open(doc: &mut Document, container: NodeId) -> bool {
    with_instance(doc, container, |c, doc| c.open(doc))
}

/// Collapse an activated container
pub fn collapse(doc: &mut Document, container: NodeId) -> bool {
    with_instance(doc, container, |c, doc| c.collapse(doc))
}

fn with_instance(doc: &mut Document, container: NodeId, f: impl FnOnce(&mut Collapsible, &mut Document)) -> bool {
    match instance(doc, container) {
        Some(mut c) => {
            f(&mut c, doc);
            true
        }
        None => false,
    }
}

/// Activate collapsibles.
///
/// - element reference: that element, which must be connected and carry the
///   toggle attribute
/// - non-empty selector string: the first match, then as above
/// - `Undefined`/`Null`: every element carrying the toggle attribute
/// - anything else: `None`
///
/// Returns the activated containers in document order, or `None` when the
/// target could not be resolved to something activatable.
pub fn activate(doc: &mut Document, target: &Value, options: CollapsibleOptions) -> Option<Vec<NodeId>> {
    match target {
        Value::Element(id) => {
            if !is_html_element(target, doc) || !doc.has_attribute(*id, &options.config.toggle_attribute) {
                tracing::debug!("Element {} is not collapsible", id);
                return None;
            }
            Some(vec![activate_one(doc, *id, &options)])
        }
        Value::String(selector) if !selector.is_empty() => match dom::get_element(doc, selector, None) {
            Ok(Some(id)) => activate(doc, &Value::Element(id), options),
            Ok(None) => {
                tracing::debug!("No collapsible matches {:?}", selector);
                None
            }
            Err(e) => {
                tracing::debug!("Cannot resolve collapsible target: {}", e);
                None
            }
        },
        Value::Undefined | Value::Null => {
            let containers = toggle_elements(doc, NodeId::ROOT, &options.config.toggle_attribute);
            Some(activate_all(doc, containers, &options))
        }
        _ => None,
    }
}

/// Activate every toggle-bearing element inside `scope`, `scope` included
pub fn activate_within(doc: &mut Document, scope: NodeId, options: CollapsibleOptions) -> Option<Vec<NodeId>> {
    if !is_html_element(&Value::Element(scope), doc) {
        return None;
    }
    let attr = &options.config.toggle_attribute;
    let mut containers = Vec::new();
    if doc.has_attribute(scope, attr) {
        containers.push(scope);
    }
    containers.extend(toggle_elements(doc, scope, attr));
    Some(activate_all(doc, containers, &options))
}

fn activate_all(doc: &mut Document, containers: Vec<NodeId>, options: &CollapsibleOptions) -> Vec<NodeId> {
    tracing::debug!("Activating {} collapsibles", containers.len());
    containers
        .into_iter()
        .map(|id| activate_one(doc, id, options))
        .collect()
}

fn toggle_elements(doc: &Document, scope: NodeId, attribute: &str) -> Vec<NodeId> {
    doc.tree()
        .descendants(scope)
        .filter(|&id| doc.has_attribute(id, attribute))
        .collect()
}

fn activate_one(doc: &mut Document, container: NodeId, options: &CollapsibleOptions) -> NodeId {
    let config = Rc::clone(&options.config);

    if let Some(previous) = instance(doc, container) {
        doc.remove_event_listener(container, previous.listener);
    }

    let header = owned_part(doc, container, &config.header_selector, &config);
    let content = owned_part(doc, container, &config.content_selector, &config);
    if header.is_none() {
        tracing::debug!("Collapsible {} has no header", container);
    }

    let state = ToggleState::from_attribute(doc.get_attribute(container, &config.toggle_attribute));
    let group = if options.accordion {
        doc.get_attribute(container, &config.accordion_attribute).map(str::to_string)
    } else {
        None
    };
    render(doc, &config, container, content, state);

    let listener = doc.add_event_listener(container, EventType::Click, move |doc, event| {
        handle_click(doc, container, event.target);
    });

    doc.component_mut::<CollapsibleRegistry>().instances.insert(
        container,
        Collapsible {
            container,
            header,
            content,
            state,
            group,
            on_toggle: options.on_toggle.clone(),
            listener,
            config,
        },
    );
    container
}

/// First match of `selector` under `container` that belongs to it rather than
/// to a nested collapsible
fn owned_part(doc: &Document, container: NodeId, selector: &str, config: &CollapsibleConfig) -> Option<NodeId> {
    let candidates = match dom::get_elements(doc, selector, Some(container)) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Ignoring collapsible part selector: {}", e);
            return None;
        }
    };
    candidates
        .into_iter()
        .find(|&id| owner(doc, id, config) == Some(container))
}

fn owner(doc: &Document, node: NodeId, config: &CollapsibleConfig) -> Option<NodeId> {
    find_ancestor_with_attribute(doc, node, &config.toggle_attribute)
}

fn handle_click(doc: &mut Document, container: NodeId, target: NodeId) {
    let Some(mut collapsible) = instance(doc, container) else {
        return;
    };
    if owner(doc, target, &collapsible.config) != Some(container) {
        return;
    }
    match collapsible.state {
        ToggleState::Collapsed => collapsible.open(doc),
        ToggleState::Open => {
            let on_header = collapsible
                .header
                .is_some_and(|h| h == target || doc.tree().is_descendant_of(target, h));
            if on_header {
                collapsible.collapse(doc);
            }
        }
    }
}

/// Write `state` through to the attribute, content visibility and class
fn render(doc: &mut Document, config: &CollapsibleConfig, container: NodeId, content: Option<NodeId>, state: ToggleState) {
    if let Err(e) = doc.set_attribute(container, &config.toggle_attribute, state.as_str()) {
        tracing::warn!("Cannot write collapsible state: {}", e);
    }
    match state {
        ToggleState::Open => {
            dom::show(doc, content);
            dom::add_class(doc, container, &config.expanded_class);
        }
        ToggleState::Collapsed => {
            dom::hide(doc, content);
            dom::remove_class(doc, container, &config.expanded_class);
        }
    }
}

/// Collapse every other open member of `group`
fn collapse_group(doc: &mut Document, config: &CollapsibleConfig, group: &str, opened: NodeId) {
    let members: Vec<NodeId> = toggle_elements(doc, NodeId::ROOT, &config.toggle_attribute)
        .into_iter()
        .filter(|&id| id != opened && doc.get_attribute(id, &config.accordion_attribute) == Some(group))
        .collect();

    for member in members {
        match instance(doc, member) {
            Some(mut other) => other.collapse(doc),
            None => {
                let current = ToggleState::from_attribute(doc.get_attribute(member, &config.toggle_attribute));
                if current == ToggleState::Open {
                    let content = owned_part(doc, member, &config.content_selector, config);
                    render(doc, config, member, content, ToggleState::Collapsed);
                }
            }
        }
    }
}
