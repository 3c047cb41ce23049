//! # Resource queries and mutations
//!
//! The concrete [`Query`](crate::query::Query) and [`Mutation`](crate::query::Mutation)
//! definitions for each resource, bundled behind [`AdminApi`].
//!
//! Every key starts with its resource family (see [`keys`]), so a write can make
//! all of a family's lists and details stale with one prefix.

mod admin_users;
mod categories;
mod delivery_boys;
mod products;

pub use admin_users::{
    AdminUserListQuery, AdminUserQuery, AssignLocations, CreateAdminUser, DeleteAdminUser,
    SetAdminUserActive, UpdateAdminUser,
};
pub use categories::{
    AllCategoriesQuery, CategoryListQuery, CategoryQuery, CreateCategory, DeleteCategory,
    UpdateCategory,
};
pub use delivery_boys::{
    CreateDeliveryBoy, DeleteDeliveryBoy, DeliveryBoyListQuery, DeliveryBoyQuery,
    SetDeliveryBoyActive, UpdateDeliveryBoy,
};
pub use products::{
    CreateProduct, DeleteProduct, DeleteProductImage, ExportProducts, ImageUploadRequest,
    ProductImagesQuery, ProductListQuery, ProductQuery, ReorderProductImages,
    SetPrimaryProductImage, UpdateProduct, UploadProductImages,
};

use std::sync::Arc;

use crate::{
    config::ClientConfig,
    errors::ApiResult,
    http::{HttpClient, TokenProvider},
    query::{Notifier, QueryClient, QueryClientConfig},
    services::{AdminUserService, CategoryService, DeliveryBoyService, ProductService},
};

/// Cache key families
pub mod keys {
    use crate::query::QueryKey;

    pub const CATEGORIES: &str = "categories";
    pub const PRODUCTS: &str = "products";
    pub const ADMIN_USERS: &str = "adminUsers";
    pub const DELIVERY_BOYS: &str = "deliveryBoys";

    pub fn categories() -> QueryKey {
        QueryKey::new(CATEGORIES)
    }

    pub fn products() -> QueryKey {
        QueryKey::new(PRODUCTS)
    }

    pub fn admin_users() -> QueryKey {
        QueryKey::new(ADMIN_USERS)
    }

    pub fn delivery_boys() -> QueryKey {
        QueryKey::new(DELIVERY_BOYS)
    }

    /// `[family, "detail", id]`
    pub fn detail(family: QueryKey, id: u64) -> QueryKey {
        family.with("detail").with(id)
    }
}

/// Every resource service plus the query client that caches their reads
#[derive(Clone)]
pub struct AdminApi {
    categories: CategoryService,
    products: ProductService,
    admin_users: AdminUserService,
    delivery_boys: DeliveryBoyService,
    client: QueryClient,
}

impl AdminApi {
    pub fn new(http: HttpClient, client: QueryClient) -> Self {
        Self {
            categories: CategoryService::new(http.clone()),
            products: ProductService::new(http.clone()),
            admin_users: AdminUserService::new(http.clone()),
            delivery_boys: DeliveryBoyService::new(http),
            client,
        }
    }

    /// Wire a reqwest-backed client and a fresh query cache
    pub fn from_config(
        config: ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        notifier: Arc<dyn Notifier>,
        query_config: QueryClientConfig,
    ) -> ApiResult<Self> {
        let http = HttpClient::from_config(config, tokens)?;
        Ok(Self::new(http, QueryClient::with_config(notifier, query_config)))
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }

    pub fn admin_users(&self) -> &AdminUserService {
        &self.admin_users
    }

    pub fn delivery_boys(&self) -> &DeliveryBoyService {
        &self.delivery_boys
    }
}

impl PartialEq for AdminApi {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
    }
}
