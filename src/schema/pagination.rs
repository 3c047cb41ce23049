use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the paginator's `links` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

/// Server-side paging state. Never authoritative on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    #[serde(default, deserialize_with = "links_or_empty")]
    pub links: Vec<PageLink>,
}

impl PaginationMeta {
    /// Meta for an unpaginated response holding `len` rows
    pub fn single_page(len: usize) -> Self {
        Self {
            current_page: 1,
            per_page: len as u32,
            total: len as u64,
            last_page: 1,
            links: Vec::new(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// `links` is an array inside `meta` but an object at the top level of some
/// responses; only the array form is kept.
fn links_or_empty<'de, D>(deserializer: D) -> Result<Vec<PageLink>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A page of rows plus the paging state that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
