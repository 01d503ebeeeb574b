//! Element Attributes
//!
//! Attribute manipulation: get, set, remove, has, toggle.

use std::collections::HashMap;

/// Named node map (attribute collection), kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    /// Attribute value by (case-insensitive) name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index_of(name)
            .and_then(|i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, returning the previous value if any
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        let attr = Attr::new(name, value);
        if let Some(index) = self.by_name.get(&attr.name).copied() {
            let old = std::mem::replace(&mut self.attributes[index], attr);
            Some(old.value)
        } else {
            self.by_name.insert(attr.name.clone(), self.attributes.len());
            self.attributes.push(attr);
            None
        }
    }

    /// Remove an attribute by name
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.index_of(name)?;
        let removed = self.attributes.remove(index);
        self.by_name.remove(&removed.name);
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(removed.value)
    }

    /// Check if an attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Toggle a boolean attribute, returns whether it is now present
    pub fn toggle(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = self.contains(name);
        match force {
            Some(true) | None if !present => {
                self.set(name, "");
                true
            }
            Some(true) => true,
            Some(false) | None => {
                self.remove(name);
                false
            }
        }
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        match self.by_name.get(name) {
            Some(&i) => Some(i),
            None if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                self.by_name.get(&name.to_ascii_lowercase()).copied()
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("class", "btn");
        attrs.set("data-collapsible", "open");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("class"), Some("btn"));
        assert_eq!(attrs.get("DATA-Collapsible"), Some("open"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        assert_eq!(attrs.set("a", "3"), Some("1".to_string()));
        assert_eq!(attrs.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut attrs = NamedNodeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("c", "3");

        assert_eq!(attrs.remove("a"), Some("1".to_string()));
        assert_eq!(attrs.get("c"), Some("3"));
        assert!(attrs.remove("missing").is_none());
    }

    #[test]
    fn test_toggle_attribute() {
        let mut attrs = NamedNodeMap::new();

        assert!(attrs.toggle("hidden", None));
        assert!(attrs.contains("hidden"));

        assert!(!attrs.toggle("hidden", None));
        assert!(!attrs.contains("hidden"));

        assert!(attrs.toggle("hidden", Some(true)));
        assert!(attrs.toggle("hidden", Some(true)));
        assert!(!attrs.toggle("hidden", Some(false)));
    }
}
