use super::{ListState, ModalState};
use crate::{
    errors::ApiResult,
    forms::ProductForm,
    http::QueryParams,
    queries::{AdminApi, ImageUploadRequest, ProductListQuery},
    schema::{ImageOrderPayload, ImageUpload, Page, Product, ProductImage},
    services::{ExportFile, ProductListParams},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub category_id: Option<u64>,
    pub is_available: Option<bool>,
}

/// State of the products page.
///
/// Paging, filters and the committed search are mirrored into the URL query
/// string so the view can be bookmarked and survives a reload.
#[derive(Clone)]
pub struct ProductsController {
    api: AdminApi,
    pub list: ListState<ProductFilters>,
    pub modal: ModalState<ProductForm>,
}

impl ProductsController {
    pub fn new(api: AdminApi, per_page: u32) -> Self {
        Self {
            api,
            list: ListState::new(per_page),
            modal: ModalState::new(),
        }
    }

    pub fn params(&self) -> ProductListParams {
        let filters = self.list.filters();
        ProductListParams {
            list: self.list.list_params(),
            category_id: filters.category_id,
            is_available: filters.is_available,
        }
    }

    pub fn query(&self) -> ProductListQuery {
        self.api.product_list(self.params())
    }

    pub async fn load(&self) -> ApiResult<Page<Product>> {
        self.api.client().fetch_query(&self.query()).await
    }

    /// Query string for the current view. Defaults are left out, so the
    /// first page with no search or filters is `""`.
    pub fn url_query(&self) -> String {
        let mut query = QueryParams::new();
        if self.list.page() != 1 {
            query.push("page", self.list.page());
        }
        if self.list.per_page() != self.list.default_per_page() {
            query.push("per_page", self.list.per_page());
        }
        query.push("search", self.list.search().committed());
        let filters = self.list.filters();
        query
            .push_opt("category_id", filters.category_id)
            .push_flag("is_available", filters.is_available);
        query.to_query_string()
    }

    /// Restore the view from a query string, e.g. on reload or back navigation.
    ///
    /// Unknown keys and unparseable values fall back to defaults.
    pub fn restore_from_url(&mut self, raw: &str) {
        let query = QueryParams::parse(raw.trim_start_matches('?'));
        let number = |key: &str| query.get(key).and_then(|v| v.parse::<u32>().ok());

        let filters = ProductFilters {
            category_id: query.get("category_id").and_then(|v| v.parse().ok()),
            is_available: query.get("is_available").and_then(parse_flag),
        };
        self.list.restore(
            number("page").unwrap_or(1),
            number("per_page").unwrap_or(self.list.default_per_page()),
            query.get("search").unwrap_or_default(),
            filters,
        );
    }

    pub async fn submit(&mut self) -> ApiResult<Product> {
        let create = self.api.create_product();
        let update = self.api.update_product();
        self.modal.submit(self.api.client(), &create, &update).await
    }

    pub async fn confirm_delete(&mut self) -> ApiResult<()> {
        let delete = self.api.delete_product();
        self.modal.confirm_delete(self.api.client(), &delete).await
    }

    /// Add files to a product's gallery; `primary_index` picks the new primary image
    pub async fn upload_images(
        &self,
        product_id: u64,
        uploads: Vec<ImageUpload>,
        primary_index: Option<usize>,
    ) -> ApiResult<Vec<ProductImage>> {
        let request = ImageUploadRequest {
            product_id,
            uploads,
            primary_index,
        };
        self.api
            .client()
            .mutate(&self.api.upload_product_images(), request)
            .await
    }

    pub async fn delete_image(&self, product_id: u64, image_id: u64) -> ApiResult<()> {
        self.api
            .client()
            .mutate(&self.api.delete_product_image(), (product_id, image_id))
            .await
    }

    pub async fn set_primary_image(&self, product_id: u64, image_id: u64) -> ApiResult<()> {
        self.api
            .client()
            .mutate(&self.api.set_primary_product_image(), (product_id, image_id))
            .await
    }

    pub async fn reorder_images(&self, product_id: u64, image_ids: Vec<u64>) -> ApiResult<()> {
        self.api
            .client()
            .mutate(
                &self.api.reorder_product_images(),
                (product_id, ImageOrderPayload { image_ids }),
            )
            .await
    }

    /// Export what the page currently shows, ignoring paging
    pub async fn export(&self) -> ApiResult<ExportFile> {
        self.api
            .client()
            .mutate(&self.api.export_products(), self.params())
            .await
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
