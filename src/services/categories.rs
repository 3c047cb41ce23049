use serde_json::Value;

use super::CategoryListParams;
use crate::{
    envelope::{decode_entity, decode_list, decode_page},
    errors::ApiResult,
    http::{HttpClient, QueryParams},
    schema::{Category, CategoryPayload, Page, check_payload},
};

const RESOURCE: &str = "category";
const LIST_KEYS: &[&str] = &["categories"];
const ENTITY_KEYS: &[&str] = &["category"];

/// `/categories`
#[derive(Clone)]
pub struct CategoryService {
    http: HttpClient,
}

impl CategoryService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: &CategoryListParams) -> ApiResult<Page<Category>> {
        let body = self.http.get("/categories", params.to_query()).await?;
        decode_page(RESOURCE, &body, LIST_KEYS)
    }

    /// Every category, unpaginated; feeds the product form's category picker
    pub async fn list_all(&self) -> ApiResult<Vec<Category>> {
        let body = self.http.get("/categories", QueryParams::new()).await?;
        decode_list(RESOURCE, &body, LIST_KEYS)
    }

    pub async fn get(&self, id: u64) -> ApiResult<Category> {
        let body = self.http.get(&format!("/categories/{id}"), QueryParams::new()).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn create(&self, payload: &CategoryPayload) -> ApiResult<Category> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.post("/categories", payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn update(&self, id: u64, payload: &CategoryPayload) -> ApiResult<Category> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.put(&format!("/categories/{id}"), payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        let _: Value = self.http.delete(&format!("/categories/{id}")).await?;
        Ok(())
    }
}
