use serde_json::{Value, json};

use super::AdminUserListParams;
use crate::{
    envelope::{decode_entity, decode_page},
    errors::{ApiError, ApiResult},
    http::{HttpClient, QueryParams},
    schema::{AdminUser, AdminUserPayload, LocationAssignment, Page, check_payload},
};

const RESOURCE: &str = "admin user";
const LIST_KEYS: &[&str] = &["users", "admin_users"];
const ENTITY_KEYS: &[&str] = &["user", "admin_user"];

/// `/users`
#[derive(Clone)]
pub struct AdminUserService {
    http: HttpClient,
}

impl AdminUserService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: &AdminUserListParams) -> ApiResult<Page<AdminUser>> {
        let body = self.http.get("/users", params.to_query()).await?;
        decode_page(RESOURCE, &body, LIST_KEYS)
    }

    pub async fn get(&self, id: u64) -> ApiResult<AdminUser> {
        let body = self.http.get(&format!("/users/{id}"), QueryParams::new()).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    /// Creating a user always needs a password
    pub async fn create(&self, payload: &AdminUserPayload) -> ApiResult<AdminUser> {
        if payload.password.is_none() {
            return Err(ApiError::InvalidPayload { resource: RESOURCE });
        }
        check_payload(RESOURCE, payload)?;
        let body = self.http.post("/users", payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    /// Full update. A `None` password leaves the stored password unchanged.
    pub async fn update(&self, id: u64, payload: &AdminUserPayload) -> ApiResult<AdminUser> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.put(&format!("/users/{id}"), payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn set_active(&self, id: u64, is_active: bool) -> ApiResult<()> {
        let _: Value = self
            .http
            .patch(&format!("/users/{id}"), &json!({ "is_active": is_active }))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        let _: Value = self.http.delete(&format!("/users/{id}")).await?;
        Ok(())
    }

    pub async fn assign_locations(&self, id: u64, assignment: &LocationAssignment) -> ApiResult<()> {
        check_payload(RESOURCE, assignment)?;
        let _: Value = self
            .http
            .post(&format!("/users/{id}/locations"), assignment)
            .await?;
        Ok(())
    }
}
