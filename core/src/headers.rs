//! Header sets with pure overlay merging.
//!
//! # Design
//! A `HeaderSet` is an insertion-ordered list of unique name/value pairs.
//! Names compare ASCII-case-insensitively, matching HTTP field semantics.
//! `merge` is pure: the client's base set and a request's overlay combine
//! into a fresh set, overlay winning on collision, so concurrent calls never
//! observe a half-merged header map.

/// An unordered-by-contract, insertion-ordered-in-practice header map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet(Vec<(String, String)>);

impl HeaderSet {
    pub fn new() -> Self {
        HeaderSet(Vec::new())
    }

    /// Set a header, replacing any existing entry with the same
    /// (case-insensitive) name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self
            .0
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            entry.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Combine with an overlay into a new set; the overlay wins on collision.
    pub fn merge(&self, overlay: &HeaderSet) -> HeaderSet {
        let mut merged = self.clone();
        for (name, value) in overlay.iter() {
            merged.set(name, value);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_case_insensitive() {
        let headers = HeaderSet::new().with("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn set_replaces_case_insensitively() {
        let mut headers = HeaderSet::new().with("Accept", "text/plain");
        headers.set("accept", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("application/json"));
    }

    #[test]
    fn merge_overlay_wins_on_collision() {
        let base = HeaderSet::new()
            .with("Accept", "application/json")
            .with("X-Base", "1");
        let overlay = HeaderSet::new().with("accept", "text/html");
        let merged = base.merge(&overlay);
        assert_eq!(merged.get("Accept"), Some("text/html"));
        assert_eq!(merged.get("X-Base"), Some("1"));
    }

    #[test]
    fn merge_leaves_both_inputs_untouched() {
        let base = HeaderSet::new().with("A", "1");
        let overlay = HeaderSet::new().with("A", "2");
        let _ = base.merge(&overlay);
        assert_eq!(base.get("A"), Some("1"));
        assert_eq!(overlay.get("A"), Some("2"));
    }

    #[test]
    fn missing_header_is_none() {
        assert!(HeaderSet::new().get("Authorization").is_none());
    }
}
