//! Selector parsing and matching
//!
//! Supports selector groups (`a, b`), compound steps (`tag`, `*`, `#id`,
//! `.class`, attribute conditions) and the descendant / child combinators.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Attribute condition inside `[...]`
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
    DashMatch { key: String, value: String },
}

impl AttrCondition {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists { key } => element.has_attr(key),
            Self::Eq { key, value } => element.get_attr(key) == Some(value.as_str()),
            Self::StartsWith { key, value } => element
                .get_attr(key)
                .is_some_and(|v| !value.is_empty() && v.starts_with(value.as_str())),
            Self::EndsWith { key, value } => element
                .get_attr(key)
                .is_some_and(|v| !value.is_empty() && v.ends_with(value.as_str())),
            Self::Contains { key, value } => element
                .get_attr(key)
                .is_some_and(|v| !value.is_empty() && v.contains(value.as_str())),
            Self::Includes { key, value } => element
                .get_attr(key)
                .is_some_and(|v| v.split_whitespace().any(|t| t == value)),
            Self::DashMatch { key, value } => element.get_attr(key).is_some_and(|v| {
                v == value || v.strip_prefix(value.as_str()).is_some_and(|r| r.starts_with('-'))
            }),
        }
    }
}

/// One compound selector (no combinators)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl Compound {
    fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
            && self.attrs.iter().all(|a| a.matches(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    compound: Compound,
    // Relation to the part on the left
    combinator: Option<Combinator>,
}

/// A complex selector: compounds joined by combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<Part>,
}

impl Selector {
    /// Parse one complex selector (no commas)
    pub fn parse(selector: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(selector.to_string());
        let tokens = tokenize(selector).ok_or_else(invalid)?;

        let mut parts = Vec::new();
        let mut pending: Option<Combinator> = None;
        for token in tokens {
            if token == ">" {
                if pending.is_some() || parts.is_empty() {
                    return Err(invalid());
                }
                pending = Some(Combinator::Child);
                continue;
            }
            let compound = parse_compound(&token).ok_or_else(invalid)?;
            let combinator = if parts.is_empty() {
                None
            } else {
                Some(pending.take().unwrap_or(Combinator::Descendant))
            };
            parts.push(Part { compound, combinator });
        }

        if parts.is_empty() || pending.is_some() {
            return Err(invalid());
        }
        Ok(Self { parts })
    }

    /// Whether `id` matches, with combinators resolved against `tree`
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.matches_from(tree, id, self.parts.len())
    }

    // Match parts[..end] with parts[end - 1] anchored on `id`
    fn matches_from(&self, tree: &DomTree, id: NodeId, end: usize) -> bool {
        let Some(element) = tree.get(id).and_then(|n| n.as_element()) else {
            return false;
        };
        let part = &self.parts[end - 1];
        if !part.compound.matches(element) {
            return false;
        }
        if end == 1 {
            return true;
        }
        match part.combinator.unwrap_or(Combinator::Descendant) {
            Combinator::Child => tree
                .parent(id)
                .is_some_and(|p| self.matches_from(tree, p, end - 1)),
            Combinator::Descendant => tree
                .ancestors(id)
                .any(|a| self.matches_from(tree, a, end - 1)),
        }
    }
}

/// Comma-separated selector group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn parse(selector: &str) -> DomResult<Self> {
        let groups = split_groups(selector)
            .ok_or_else(|| DomError::InvalidSelector(selector.to_string()))?;
        let selectors = groups
            .iter()
            .map(|g| Selector::parse(g))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, id))
    }
}

fn split_groups(selector: &str) -> Option<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.checked_sub(1)?,
            (None, ',') if depth == 0 => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return None;
                }
                groups.push(trimmed.to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    let trimmed = current.trim();
    if depth != 0 || quote.is_some() || trimmed.is_empty() {
        return None;
    }
    groups.push(trimmed.to_string());
    Some(groups)
}

fn tokenize(selector: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    for ch in selector.trim().chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.checked_sub(1)?,
            (None, '>') if depth == 0 => {
                flush(&mut current, &mut tokens);
                tokens.push(">".to_string());
                continue;
            }
            (None, c) if c.is_whitespace() && depth == 0 => {
                flush(&mut current, &mut tokens);
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if depth != 0 || quote.is_some() {
        return None;
    }
    flush(&mut current, &mut tokens);
    Some(tokens)
}

fn parse_compound(part: &str) -> Option<Compound> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = Compound::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal || step.tag.is_some() || i != 0 {
                    return None;
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(part, i + 1)?;
                if step.id.replace(id).is_some() {
                    return None;
                }
                i = next;
            }
            b'.' => {
                let (class, next) = parse_ident(part, i + 1)?;
                step.classes.push(class);
                i = next;
            }
            b'[' => {
                let (cond, next) = parse_attr_condition(part, i)?;
                step.attrs.push(cond);
                i = next;
            }
            _ => {
                if i != 0 {
                    return None;
                }
                let (tag, next) = parse_ident(part, i)?;
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }
    Some(step)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    (end > start).then(|| (src[start..end].to_string(), end))
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn parse_attr_condition(src: &str, open: usize) -> Option<(AttrCondition, usize)> {
    let bytes = src.as_bytes();
    let i = skip_ws(bytes, open + 1);
    let (key, i) = parse_ident(src, i)?;
    let key = key.to_ascii_lowercase();
    let i = skip_ws(bytes, i);

    match bytes.get(i)? {
        b']' => return Some((AttrCondition::Exists { key }, i + 1)),
        b'=' => {}
        b'~' | b'^' | b'$' | b'*' | b'|' if bytes.get(i + 1) == Some(&b'=') => {}
        _ => return None,
    }
    let op = bytes[i];
    let i = skip_ws(bytes, if op == b'=' { i + 1 } else { i + 2 });

    let (value, i) = match bytes.get(i)? {
        q @ (b'"' | b'\'') => {
            let close = src[i + 1..].find(*q as char)? + i + 1;
            (src[i + 1..close].to_string(), close + 1)
        }
        _ => parse_ident(src, i)?,
    };
    let i = skip_ws(bytes, i);
    if bytes.get(i) != Some(&b']') {
        return None;
    }

    let cond = match op {
        b'=' => AttrCondition::Eq { key, value },
        b'~' => AttrCondition::Includes { key, value },
        b'^' => AttrCondition::StartsWith { key, value },
        b'$' => AttrCondition::EndsWith { key, value },
        b'*' => AttrCondition::Contains { key, value },
        _ => AttrCondition::DashMatch { key, value },
    };
    Some((cond, i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(attrs: &[(&str, &str)]) -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let outer = tree.create_element("section");
        let inner = tree.create_element("div");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        let elem = tree.get_mut(inner).unwrap().as_element_mut().unwrap();
        for (k, v) in attrs {
            elem.attrs.set(k, *v);
        }
        (tree, outer, inner)
    }

    #[test]
    fn test_compound_parse() {
        let sel = Selector::parse("div#main.card.open[data-x]").unwrap();
        let c = &sel.parts[0].compound;
        assert_eq!(c.tag.as_deref(), Some("div"));
        assert_eq!(c.id.as_deref(), Some("main"));
        assert_eq!(c.classes, vec!["card", "open"]);
        assert_eq!(c.attrs.len(), 1);
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "  ", "div >", "> div", "div > > p", "[data", "a,,b", "#", ".", "div*", "[x='y]"] {
            assert!(SelectorList::parse(bad).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn test_attribute_operators() {
        let (tree, _, inner) = tree_with(&[("data-accordion", "faq main"), ("lang", "en-US")]);
        let m = |s: &str| SelectorList::parse(s).unwrap().matches(&tree, inner);
        assert!(m("[data-accordion]"));
        assert!(m("[data-accordion='faq main']"));
        assert!(m("[data-accordion~=faq]"));
        assert!(m("[data-accordion^=faq]"));
        assert!(m("[data-accordion$=\"main\"]"));
        assert!(m("[data-accordion*='q m']"));
        assert!(m("[lang|=en]"));
        assert!(!m("[data-accordion=faq]"));
    }

    #[test]
    fn test_combinators() {
        let (tree, outer, inner) = tree_with(&[("class", "body")]);
        let m = |s: &str, id| SelectorList::parse(s).unwrap().matches(&tree, id);
        assert!(m("section .body", inner));
        assert!(m("section > div", inner));
        assert!(!m("div > section", outer));
        assert!(m("p, section", outer));
        assert!(m("*", outer));
    }
}
