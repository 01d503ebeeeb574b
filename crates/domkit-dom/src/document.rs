//! Document - High-level document API
//!
//! Wraps the arena tree with attribute/class/style mutation, selector
//! queries, event dispatch and a per-document component store.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::rc::Rc;

use crate::events::ListenerRegistry;
use crate::{
    ClassList, DomError, DomResult, DomTree, ElementData, Event, EventPhase, EventType,
    ListenerId, NodeId, SelectorList,
};

/// HTML Document
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    listeners: ListenerRegistry,
    active_element: Option<NodeId>,
    components: HashMap<TypeId, Box<dyn Any>>,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let body = doc.tree.create_element("body");
        // Fresh nodes under the root cannot violate the hierarchy rules
        let _ = doc.tree.append_child(NodeId::ROOT, html);
        let _ = doc.tree.append_child(html, head);
        let _ = doc.tree.append_child(html, body);
        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create a document holding only the document node
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: ListenerRegistry::default(),
            active_element: None,
            components: HashMap::new(),
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after the tree was built externally
    pub fn finalize(&mut self) {
        let find = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|&id| tree.get(id).and_then(|n| n.as_element()).is_some_and(|e| e.tag == tag))
                .unwrap_or(NodeId::NONE)
        };
        self.html_element = find(&self.tree, NodeId::ROOT, "html");
        if self.html_element.is_valid() {
            self.head_element = find(&self.tree, self.html_element, "head");
            self.body_element = find(&self.tree, self.html_element, "body");
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.to_option()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head_element.to_option()
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body_element.to_option()
    }

    /// Text of the first `<title>` element
    pub fn title(&self) -> String {
        self.query_selector("title", None)
            .ok()
            .flatten()
            .map(|t| self.text_content(t))
            .unwrap_or_default()
    }

    // === Tree construction ===

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    /// Detach a node from the document
    pub fn remove(&mut self, id: NodeId) -> DomResult<NodeId> {
        if self.active_element.is_some_and(|a| a == id || self.tree.is_descendant_of(a, id)) {
            self.active_element = None;
        }
        self.tree.remove(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
    }

    // === Elements and attributes ===

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id).and_then(|n| n.as_element())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id).and_then(|n| n.as_element_mut())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        elem.attrs.set(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        Ok(elem.attrs.remove(name))
    }

    // === Class list ===

    pub fn class_list(&self, id: NodeId) -> ClassList {
        self.element(id).map(|e| e.class_list()).unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class. Returns true if the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.update_classes(id, |list| list.add(class))
    }

    /// Remove a class. Returns true if the class list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.update_classes(id, |list| list.remove(class))
    }

    /// Toggle a class, returns whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> bool {
        let mut present = false;
        self.update_classes(id, |list| {
            present = list.toggle(class, force);
            true
        });
        present
    }

    fn update_classes(&mut self, id: NodeId, f: impl FnOnce(&mut ClassList) -> bool) -> bool {
        let Some(elem) = self.element_mut(id) else {
            tracing::trace!("class update on non-element {}", id);
            return false;
        };
        let mut list = elem.class_list();
        let changed = f(&mut list);
        if changed {
            elem.write_class_list(&list);
        }
        changed
    }

    // === Inline style / visibility ===

    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.element(id).and_then(|e| e.style().get(property).map(str::to_string))
    }

    /// Set (`Some`) or clear (`None`) an inline style property
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: Option<&str>) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        let mut style = elem.style();
        match value {
            Some(v) => style.set(property, v),
            None => {
                style.remove(property);
            }
        }
        elem.write_style(&style);
        Ok(())
    }

    /// Force `display: none`, remembering any previous inline display value
    pub fn hide(&mut self, id: NodeId) -> bool {
        let Some(elem) = self.element_mut(id) else {
            return false;
        };
        let mut style = elem.style();
        match style.get("display") {
            Some(current) if is_none_keyword(current) => return true,
            Some(previous) => elem.saved_display = Some(previous.to_string()),
            None => elem.saved_display = None,
        }
        style.set("display", "none");
        elem.write_style(&style);
        true
    }

    /// Undo `hide`: restore the remembered display value or clear the forced one
    pub fn show(&mut self, id: NodeId) -> bool {
        let Some(elem) = self.element_mut(id) else {
            return false;
        };
        let mut style = elem.style();
        if !style.get("display").is_some_and(is_none_keyword) {
            return true;
        }
        match elem.saved_display.take().filter(|previous| !is_none_keyword(previous)) {
            Some(previous) => style.set("display", &previous),
            None => {
                style.remove("display");
            }
        }
        elem.write_style(&style);
        true
    }

    /// Whether the element carries an inline `display: none`
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.style().get("display").is_some_and(is_none_keyword))
    }

    // === Text and values ===

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.tree.get(id).and_then(|n| n.as_text()) {
            return text.to_string();
        }
        self.tree
            .descendants(id)
            .filter_map(|d| self.tree.get(d).and_then(|n| n.as_text()))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if !self.is_element(id) {
            return Err(DomError::NotAnElement(id));
        }
        self.tree.clear_children(id);
        if !text.is_empty() {
            let node = self.tree.create_text(text);
            self.tree.append_child(id, node)?;
        }
        Ok(())
    }

    /// Form-control value
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.value.as_str())
    }

    /// Set a form-control value without dispatching events
    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let elem = self.element_mut(id).ok_or(DomError::NotAnElement(id))?;
        elem.value = value.to_string();
        Ok(())
    }

    // === Queries ===

    /// First element matching `selector` under `scope` (whole document if `None`)
    pub fn query_selector(&self, selector: &str, scope: Option<NodeId>) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let scope = scope.unwrap_or(NodeId::ROOT);
        Ok(self.tree.descendants(scope).find(|&id| list.matches(&self.tree, id)))
    }

    /// All elements matching `selector` under `scope`, in document order
    pub fn query_selector_all(&self, selector: &str, scope: Option<NodeId>) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        let scope = scope.unwrap_or(NodeId::ROOT);
        Ok(self
            .tree
            .descendants(scope)
            .filter(|&id| list.matches(&self.tree, id))
            .collect())
    }

    pub fn matches(&self, id: NodeId, selector: &str) -> DomResult<bool> {
        Ok(SelectorList::parse(selector)?.matches(&self.tree, id))
    }

    /// Nearest inclusive ancestor matching `selector`
    pub fn closest(&self, id: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(id)
            .chain(self.tree.ancestors(id))
            .find(|&a| list.matches(&self.tree, a)))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .find(|&n| self.element(n).and_then(|e| e.id()) == Some(id))
    }

    // === Events ===

    /// Register a listener on `node`
    pub fn add_event_listener<F>(&mut self, node: NodeId, event_type: EventType, listener: F) -> ListenerId
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.listeners.add(node, event_type, Rc::new(listener))
    }

    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.listeners.remove(node, id)
    }

    /// Number of listeners of `event_type` registered directly on `node`
    pub fn listener_count(&self, node: NodeId, event_type: &EventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Dispatch an event at `target`, bubbling to the root for bubbling types.
    ///
    /// The propagation path is fixed before the first listener runs; every
    /// listener runs to completion before this returns.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> Event {
        let mut event = Event::new(event_type, target);
        if self.tree.get(target).is_none() {
            return event;
        }

        let mut path = vec![target];
        if event.bubbles {
            path.extend(self.tree.ancestors(target));
        }

        for node in path {
            event.current_target = node;
            event.phase = if node == target {
                EventPhase::AtTarget
            } else {
                EventPhase::Bubbling
            };
            for callback in self.listeners.callbacks(node, &event.event_type) {
                callback(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        tracing::trace!("Dispatched {} at {}", event.event_type, target);
        event.phase = EventPhase::None;
        event.current_target = target;
        event
    }

    pub fn click(&mut self, target: NodeId) -> Event {
        self.dispatch_event(target, EventType::Click)
    }

    /// Set a form-control value and dispatch `input` at it
    pub fn input(&mut self, target: NodeId, value: &str) -> DomResult<Event> {
        self.set_value(target, value)?;
        Ok(self.dispatch_event(target, EventType::Input))
    }

    /// Move focus to `id`, firing `blur` on the previous element and `focus` on the new one
    pub fn focus(&mut self, id: NodeId) {
        if self.active_element == Some(id) || !self.is_element(id) {
            return;
        }
        self.blur();
        self.active_element = Some(id);
        self.dispatch_event(id, EventType::Focus);
    }

    /// Drop focus from the active element
    pub fn blur(&mut self) {
        if let Some(previous) = self.active_element.take() {
            self.dispatch_event(previous, EventType::Blur);
        }
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    // === Component store ===

    /// Per-document state slot for a component type, created on first use
    pub fn component_mut<T: Default + 'static>(&mut self) -> &mut T {
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()))
            .downcast_mut::<T>()
            .expect("component store is keyed by TypeId")
    }

    pub fn component<T: 'static>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|c| c.downcast_ref::<T>())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("listeners", &self.listeners)
            .field("components", &self.components.len())
            .finish()
    }
}

/// CSS keywords are ASCII case-insensitive
fn is_none_keyword(display: &str) -> bool {
    display.trim().eq_ignore_ascii_case("none")
}
