use std::future::Future;

use super::{AdminApi, keys};
use crate::{
    errors::ApiResult,
    query::{Mutation, Query, QueryKey, QueryOptions},
    schema::{ImageOrderPayload, ImageUpload, Page, Product, ProductImage, ProductPayload},
    services::{ExportFile, ProductListParams, ProductService},
};

/// One page of `GET /products`
#[derive(Clone)]
pub struct ProductListQuery {
    service: ProductService,
    params: ProductListParams,
}

impl ProductListQuery {
    pub fn params(&self) -> &ProductListParams {
        &self.params
    }
}

impl PartialEq for ProductListQuery {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Query for ProductListQuery {
    type Output = Page<Product>;

    fn key(&self) -> QueryKey {
        keys::products()
            .with("list")
            .with(self.params.to_query().to_query_string())
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let params = self.params.clone();
        async move { service.list_paginated(&params).await }
    }

    fn options(&self) -> QueryOptions {
        QueryOptions::cached_list()
    }

    fn error_message(&self) -> &'static str {
        "Failed to load products"
    }
}

#[derive(Clone)]
pub struct ProductQuery {
    service: ProductService,
    id: u64,
}

impl PartialEq for ProductQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Query for ProductQuery {
    type Output = Product;

    fn key(&self) -> QueryKey {
        keys::detail(keys::products(), self.id)
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let id = self.id;
        async move { service.get(id).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load product"
    }
}

/// A product's gallery
#[derive(Clone)]
pub struct ProductImagesQuery {
    service: ProductService,
    product_id: u64,
}

impl PartialEq for ProductImagesQuery {
    fn eq(&self, other: &Self) -> bool {
        self.product_id == other.product_id
    }
}

impl Query for ProductImagesQuery {
    type Output = Vec<ProductImage>;

    fn key(&self) -> QueryKey {
        keys::products().with("images").with(self.product_id)
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let product_id = self.product_id;
        async move { service.list_images(product_id).await }
    }

    // one retry: galleries load alongside the edit form, not as a page view
    fn options(&self) -> QueryOptions {
        QueryOptions::new().with_retry(1)
    }

    fn error_message(&self) -> &'static str {
        "Failed to load product images"
    }
}

#[derive(Clone)]
pub struct CreateProduct {
    service: ProductService,
}

impl Mutation for CreateProduct {
    type Input = ProductPayload;
    type Output = Product;

    fn mutate(&self, input: ProductPayload) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn invalidates(&self, _input: &ProductPayload) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Product created successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to create product"
    }
}

/// Input is `(id, payload)`
#[derive(Clone)]
pub struct UpdateProduct {
    service: ProductService,
}

impl Mutation for UpdateProduct {
    type Input = (u64, ProductPayload);
    type Output = Product;

    fn mutate(
        &self,
        (id, payload): (u64, ProductPayload),
    ) -> impl Future<Output = ApiResult<Product>> + Send {
        let service = self.service.clone();
        async move { service.update(id, &payload).await }
    }

    fn invalidates(&self, _input: &(u64, ProductPayload)) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Product updated successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update product"
    }
}

#[derive(Clone)]
pub struct DeleteProduct {
    service: ProductService,
}

impl Mutation for DeleteProduct {
    type Input = u64;
    type Output = ();

    fn mutate(&self, id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn invalidates(&self, _id: &u64) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Product deleted successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to delete product"
    }
}

/// Files to add to a product's gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUploadRequest {
    pub product_id: u64,
    pub uploads: Vec<ImageUpload>,
    /// Index into `uploads` of the file that becomes the primary image
    pub primary_index: Option<usize>,
}

#[derive(Clone)]
pub struct UploadProductImages {
    service: ProductService,
}

impl Mutation for UploadProductImages {
    type Input = ImageUploadRequest;
    type Output = Vec<ProductImage>;

    fn mutate(
        &self,
        request: ImageUploadRequest,
    ) -> impl Future<Output = ApiResult<Vec<ProductImage>>> + Send {
        let service = self.service.clone();
        async move {
            service
                .upload_images(request.product_id, request.uploads, request.primary_index)
                .await
        }
    }

    // list rows show the primary image
    fn invalidates(&self, _request: &ImageUploadRequest) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Images uploaded successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to upload images"
    }
}

/// Input is `(product_id, image_id)`
#[derive(Clone)]
pub struct DeleteProductImage {
    service: ProductService,
}

impl Mutation for DeleteProductImage {
    type Input = (u64, u64);
    type Output = ();

    fn mutate(
        &self,
        (product_id, image_id): (u64, u64),
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete_image(product_id, image_id).await }
    }

    fn invalidates(&self, _input: &(u64, u64)) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Image deleted successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to delete image"
    }
}

/// Input is `(product_id, image_id)`
#[derive(Clone)]
pub struct SetPrimaryProductImage {
    service: ProductService,
}

impl Mutation for SetPrimaryProductImage {
    type Input = (u64, u64);
    type Output = ();

    fn mutate(
        &self,
        (product_id, image_id): (u64, u64),
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.set_primary_image(product_id, image_id).await }
    }

    fn invalidates(&self, _input: &(u64, u64)) -> Vec<QueryKey> {
        vec![keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Primary image updated"
    }

    fn error_message(&self) -> &'static str {
        "Failed to set primary image"
    }
}

/// Input is `(product_id, order)`
#[derive(Clone)]
pub struct ReorderProductImages {
    service: ProductService,
}

impl Mutation for ReorderProductImages {
    type Input = (u64, ImageOrderPayload);
    type Output = ();

    fn mutate(
        &self,
        (product_id, order): (u64, ImageOrderPayload),
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.reorder_images(product_id, &order).await }
    }

    fn invalidates(&self, (product_id, _): &(u64, ImageOrderPayload)) -> Vec<QueryKey> {
        vec![
            keys::products().with("images").with(product_id),
            keys::detail(keys::products(), *product_id),
        ]
    }

    fn success_message(&self) -> &'static str {
        "Image order updated"
    }

    fn error_message(&self) -> &'static str {
        "Failed to reorder images"
    }
}

/// Spreadsheet export of the products matching the given filters
#[derive(Clone)]
pub struct ExportProducts {
    service: ProductService,
}

impl Mutation for ExportProducts {
    type Input = ProductListParams;
    type Output = ExportFile;

    fn mutate(
        &self,
        params: ProductListParams,
    ) -> impl Future<Output = ApiResult<ExportFile>> + Send {
        let service = self.service.clone();
        async move { service.export_xlsx(&params).await }
    }

    fn invalidates(&self, _params: &ProductListParams) -> Vec<QueryKey> {
        Vec::new()
    }

    fn success_message(&self) -> &'static str {
        "Products exported successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to export products"
    }
}

impl AdminApi {
    pub fn product_list(&self, params: ProductListParams) -> ProductListQuery {
        ProductListQuery {
            service: self.products.clone(),
            params,
        }
    }

    pub fn product(&self, id: u64) -> ProductQuery {
        ProductQuery {
            service: self.products.clone(),
            id,
        }
    }

    pub fn product_images(&self, product_id: u64) -> ProductImagesQuery {
        ProductImagesQuery {
            service: self.products.clone(),
            product_id,
        }
    }

    pub fn create_product(&self) -> CreateProduct {
        CreateProduct {
            service: self.products.clone(),
        }
    }

    pub fn update_product(&self) -> UpdateProduct {
        UpdateProduct {
            service: self.products.clone(),
        }
    }

    pub fn delete_product(&self) -> DeleteProduct {
        DeleteProduct {
            service: self.products.clone(),
        }
    }

    pub fn upload_product_images(&self) -> UploadProductImages {
        UploadProductImages {
            service: self.products.clone(),
        }
    }

    pub fn delete_product_image(&self) -> DeleteProductImage {
        DeleteProductImage {
            service: self.products.clone(),
        }
    }

    pub fn set_primary_product_image(&self) -> SetPrimaryProductImage {
        SetPrimaryProductImage {
            service: self.products.clone(),
        }
    }

    pub fn reorder_product_images(&self) -> ReorderProductImages {
        ReorderProductImages {
            service: self.products.clone(),
        }
    }

    pub fn export_products(&self) -> ExportProducts {
        ExportProducts {
            service: self.products.clone(),
        }
    }
}
