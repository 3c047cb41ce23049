//! Hierarchical cache keys.

use std::fmt;

/// A cache key made of ordered segments, e.g. `["products", "page=2&per_page=15"]`.
///
/// The first segment names the resource family. Invalidation works on prefixes:
/// invalidating `["products"]` marks every product list and detail entry stale,
/// while `["products", "detail", "12"]` only touches product 12.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Create a key for a resource family
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    /// Append a segment
    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    /// The resource family this key belongs to
    pub fn root(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` covers this key
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{segment:?}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching_is_segment_wise() {
        let list = QueryKey::new("products").with("page=2");
        let detail = QueryKey::new("products").with("detail").with(12);

        assert!(list.starts_with(&QueryKey::new("products")));
        assert!(detail.starts_with(&QueryKey::new("products").with("detail")));
        assert!(!detail.starts_with(&QueryKey::new("products").with("detail").with(1)));
        assert!(!QueryKey::new("products-export").starts_with(&QueryKey::new("products")));
    }

    #[test]
    fn displays_like_an_array() {
        assert_eq!(QueryKey::new("adminUsers").to_string(), r#"["adminUsers"]"#);
        assert_eq!(
            QueryKey::new("categories").with("page=1").to_string(),
            r#"["categories","page=1"]"#
        );
    }
}
