use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};

use super::ProductListParams;
use crate::{
    envelope::{decode_entity, decode_list, decode_page},
    errors::{ApiError, ApiResult},
    http::{HttpClient, MultipartPart, QueryParams},
    schema::{
        ImageOrderPayload, ImageUpload, Page, Product, ProductImage, ProductPayload,
        check_payload,
    },
};

const RESOURCE: &str = "product";
const IMAGE_RESOURCE: &str = "product image";
const LIST_KEYS: &[&str] = &["products"];
const ENTITY_KEYS: &[&str] = &["product"];
const IMAGE_LIST_KEYS: &[&str] = &["images", "product_images"];

/// A spreadsheet produced by the product export endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// `products-export-<YYYY-MM-DD>.xlsx`
pub fn export_filename(date: NaiveDate) -> String {
    format!("products-export-{}.xlsx", date.format("%Y-%m-%d"))
}

/// `/products` and the gallery endpoints under it
#[derive(Clone)]
pub struct ProductService {
    http: HttpClient,
}

impl ProductService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list_paginated(&self, params: &ProductListParams) -> ApiResult<Page<Product>> {
        let body = self.http.get("/products", params.to_query()).await?;
        decode_page(RESOURCE, &body, LIST_KEYS)
    }

    pub async fn get(&self, id: u64) -> ApiResult<Product> {
        let body = self.http.get(&format!("/products/{id}"), QueryParams::new()).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn create(&self, payload: &ProductPayload) -> ApiResult<Product> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.post("/products", payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn update(&self, id: u64, payload: &ProductPayload) -> ApiResult<Product> {
        check_payload(RESOURCE, payload)?;
        let body = self.http.put(&format!("/products/{id}"), payload).await?;
        decode_entity(RESOURCE, &body, ENTITY_KEYS)
    }

    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        let _: Value = self.http.delete(&format!("/products/{id}")).await?;
        Ok(())
    }

    pub async fn list_images(&self, product_id: u64) -> ApiResult<Vec<ProductImage>> {
        let body = self
            .http
            .get(&format!("/products/{product_id}/images"), QueryParams::new())
            .await?;
        decode_list(IMAGE_RESOURCE, &body, IMAGE_LIST_KEYS)
    }

    /// Upload one or more images. `primary_index` designates which of the
    /// uploaded files becomes the product's primary image.
    pub async fn upload_images(
        &self,
        product_id: u64,
        uploads: Vec<ImageUpload>,
        primary_index: Option<usize>,
    ) -> ApiResult<Vec<ProductImage>> {
        let invalid = ApiError::InvalidPayload {
            resource: IMAGE_RESOURCE,
        };
        if uploads.is_empty()
            || primary_index.is_some_and(|index| index >= uploads.len())
            || uploads
                .iter()
                .any(|u| u.bytes.is_empty() || !u.content_type.starts_with("image/"))
        {
            return Err(invalid);
        }

        let mut parts: Vec<MultipartPart> = uploads
            .into_iter()
            .map(|upload| MultipartPart::File {
                name: "images[]".to_string(),
                filename: upload.filename,
                content_type: upload.content_type,
                bytes: upload.bytes,
            })
            .collect();
        if let Some(index) = primary_index {
            parts.push(MultipartPart::text("primary_index", index));
        }

        let body = self
            .http
            .post_multipart(&format!("/products/{product_id}/images"), parts)
            .await?;
        decode_list(IMAGE_RESOURCE, &body, IMAGE_LIST_KEYS)
    }

    pub async fn delete_image(&self, product_id: u64, image_id: u64) -> ApiResult<()> {
        let _: Value = self
            .http
            .delete(&format!("/products/{product_id}/images/{image_id}"))
            .await?;
        Ok(())
    }

    pub async fn set_primary_image(&self, product_id: u64, image_id: u64) -> ApiResult<()> {
        let _: Value = self
            .http
            .patch(
                &format!("/products/{product_id}/images/{image_id}/primary"),
                &json!({}),
            )
            .await?;
        Ok(())
    }

    pub async fn reorder_images(&self, product_id: u64, order: &ImageOrderPayload) -> ApiResult<()> {
        check_payload(IMAGE_RESOURCE, order)?;
        let _: Value = self
            .http
            .put(&format!("/products/{product_id}/images/order"), order)
            .await?;
        Ok(())
    }

    /// Download the product catalogue as a spreadsheet
    pub async fn export_xlsx(&self, params: &ProductListParams) -> ApiResult<ExportFile> {
        let query = params.export_query();
        let bytes = self.http.download("/products-export/xlsx", query).await?;
        Ok(ExportFile {
            filename: export_filename(Utc::now().date_naive()),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(export_filename(date), "products-export-2026-10-17.xlsx");
    }
}
