//! Ordered query-string parameters.

use std::fmt::Display;

use url::form_urlencoded;

/// Query parameters in insertion order.
///
/// Unset and empty values are dropped on insertion, so the serialized string
/// only ever carries parameters the caller actually chose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value` unless the value is empty after trimming.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        if !value.trim().is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    /// Appends `key=value` when a value is present.
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Appends a boolean as the `1`/`0` flag the backend expects.
    pub fn push_flag(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        self.push_opt(key, value.map(|v| if v { 1 } else { 0 }))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes to `a=1&b=two` with form encoding, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Parses a query string, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.push(&key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_unset_and_empty_values() {
        let mut params = QueryParams::new();
        params
            .push("page", 2)
            .push("search", "  ")
            .push_opt::<u32>("category_id", None)
            .push_opt("per_page", Some(15))
            .push_flag("is_available", Some(false));

        assert_eq!(params.to_query_string(), "page=2&per_page=15&is_available=0");
    }

    #[test]
    fn encodes_and_parses_search_text() {
        let mut params = QueryParams::new();
        params.push("search", "choco cake & more");
        let encoded = params.to_query_string();
        assert_eq!(encoded, "search=choco+cake+%26+more");

        let parsed = QueryParams::parse(&format!("?{encoded}"));
        assert_eq!(parsed.get("search"), Some("choco cake & more"));
    }
}
