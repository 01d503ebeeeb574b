//! DOM query/mutation facade
//!
//! Free functions over `Document` that tolerate absent elements. Mutators
//! take `impl Into<Option<NodeId>>` so a failed lookup can be passed
//! straight through and becomes a no-op.

use domkit_dom::{Document, DomResult, NodeId};

/// First element matching `selector` under `scope` (whole document if `None`)
pub fn get_element(doc: &Document, selector: &str, scope: Option<NodeId>) -> DomResult<Option<NodeId>> {
    doc.query_selector(selector, scope)
}

/// Every element matching `selector` under `scope`, in document order
pub fn get_elements(doc: &Document, selector: &str, scope: Option<NodeId>) -> DomResult<Vec<NodeId>> {
    doc.query_selector_all(selector, scope)
}

pub fn add_class(doc: &mut Document, element: impl Into<Option<NodeId>>, class: &str) {
    if let Some(id) = element.into() {
        doc.add_class(id, class);
    }
}

pub fn remove_class(doc: &mut Document, element: impl Into<Option<NodeId>>, class: &str) {
    if let Some(id) = element.into() {
        doc.remove_class(id, class);
    }
}

/// Whether `element` is present and carries `class`
pub fn has_class(doc: &Document, element: impl Into<Option<NodeId>>, class: &str) -> bool {
    element.into().is_some_and(|id| doc.has_class(id, class))
}

pub fn show(doc: &mut Document, element: impl Into<Option<NodeId>>) {
    if let Some(id) = element.into() {
        doc.show(id);
    }
}

pub fn hide(doc: &mut Document, element: impl Into<Option<NodeId>>) {
    if let Some(id) = element.into() {
        doc.hide(id);
    }
}

/// Walk from `start` (depth 0) towards the root and return the first node
/// accepted by `predicate`.
///
/// `max_depth` bounds how many parents are visited; `None` is unbounded.
/// The document node itself is never offered to the predicate.
pub fn find_ancestor<P>(doc: &Document, start: NodeId, mut predicate: P, max_depth: Option<usize>) -> Option<NodeId>
where
    P: FnMut(&Document, NodeId) -> bool,
{
    let tree = doc.tree();
    tree.get(start)?;
    std::iter::once(start)
        .chain(tree.ancestors(start))
        .take_while(|&id| id != NodeId::ROOT)
        .take(max_depth.map_or(usize::MAX, |d| d.saturating_add(1)))
        .find(|&id| predicate(doc, id))
}

/// Nearest inclusive ancestor carrying `attribute`, unbounded
pub fn find_ancestor_with_attribute(doc: &Document, start: NodeId, attribute: &str) -> Option<NodeId> {
    find_ancestor(doc, start, |doc, id| doc.has_attribute(id, attribute), None)
}
