use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product category as returned by `/categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true", deserialize_with = "super::flag")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The `{id, name}` fragment the backend embeds inside products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
    pub name: String,
}

fn default_true() -> bool {
    true
}

/// Body of `POST /categories` and `PUT /categories/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub is_active: bool,
}
