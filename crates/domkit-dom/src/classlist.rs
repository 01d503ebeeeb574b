//! ClassList
//!
//! Space-separated token list backing an element's `class` attribute.

/// Token list for the `class` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a space-separated string, dropping duplicates
    pub fn parse(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns false if it was already present or invalid.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || token.contains(char::is_whitespace) || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns false if it was absent.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        before != self.tokens.len()
    }

    /// Toggle a token, returns new membership
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let want = force.unwrap_or(!self.contains(token));
        if want {
            self.add(token);
        } else {
            self.remove(token);
        }
        want
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let list = ClassList::parse("  panel panel-open   panel ");
        assert_eq!(list.len(), 2);
        assert_eq!(list.value(), "panel panel-open");
    }

    #[test]
    fn test_add_remove_idempotent() {
        let mut list = ClassList::new();
        assert!(list.add("expanded"));
        assert!(!list.add("expanded"));
        assert_eq!(list.len(), 1);

        assert!(list.remove("expanded"));
        assert!(!list.remove("expanded"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_rejects_whitespace_tokens() {
        let mut list = ClassList::new();
        assert!(!list.add(""));
        assert!(!list.add("two words"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut list = ClassList::new();
        assert!(list.toggle("active", None));
        assert!(!list.toggle("active", None));
        assert!(!list.contains("active"));
        assert!(list.toggle("active", Some(true)));
        assert!(list.toggle("active", Some(true)));
        assert_eq!(list.len(), 1);
    }
}
