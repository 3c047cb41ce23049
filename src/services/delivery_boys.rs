use serde_json::{Value, json};

use super::DeliveryBoyListParams;
use crate::{
    envelope::{decode_entity, decode_page},
    errors::ApiResult,
    http::{HttpClient, QueryParams},
    schema::{DeliveryBoy, DeliveryBoyPayload, Page, check_payload},
};

const RESOURCE: &str = "delivery boy";
const LIST_KEYS: &[&str] = &["delivery_boys"];
const ENTITY_KEYS: &[&str] = &["delivery_boy"];

/// `/delivery-boys`
#[derive(Clone)]
pub struct DeliveryBoyService {
    http: HttpClient,
}

impl DeliveryBoyService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: &DeliveryBoyListParams) -> ApiResult<Page<DeliveryBoy>> {
        let body = self.http.get("/delivery-boys", params.to_query()).await?;
        decode_page(RESOURCE, &body, LIST_KEYS)
    }

    pub async fn get(&self, id: u64) -> ApiResult<DeliveryBoy> {
        let body = self
            .http
            .get(&format!("/delivery-boys/{id}"), QueryParams::new())
            .await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn update(&self, id: u64, payload: &DeliveryBoyPayload) -> ApiResult<DeliveryBoy> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.put(&format!("/delivery-boys/{id}"), payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn set_active(&self, id: u64, is_active: bool) -> ApiResult<()> {
        let _: Value = self
            .http
            .patch(&format!("/delivery-boys/{id}"), &json!({ "is_active": is_active }))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        let _: Value = self.http.delete(&format!("/delivery-boys/{id}")).await?;
        Ok(())
    }
}
