//! # Resource services
//!
//! One service per backend resource. Services translate list/create/update/delete
//! intents into HTTP calls, validate outbound payloads before anything is sent and
//! decode inbound bodies through [`crate::envelope`].

mod admin_users;
mod categories;
mod delivery_boys;
mod products;

pub use admin_users::AdminUserService;
pub use categories::CategoryService;
pub use delivery_boys::DeliveryBoyService;
pub use products::{ExportFile, ProductService, export_filename};

use chrono::NaiveDate;

use crate::{http::QueryParams, schema::Role};

/// Paging and free-text search shared by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn write(&self, query: &mut QueryParams) {
        query
            .push_opt("page", self.page)
            .push_opt("per_page", self.per_page)
            .push_opt("search", self.search.as_deref());
    }
}

/// Filters for `GET /categories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategoryListParams {
    pub list: ListParams,
    pub is_active: Option<bool>,
}

impl CategoryListParams {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        self.list.write(&mut query);
        query.push_flag("is_active", self.is_active);
        query
    }
}

/// Filters for `GET /products`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductListParams {
    pub list: ListParams,
    pub category_id: Option<u64>,
    pub is_available: Option<bool>,
}

impl ProductListParams {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        self.list.write(&mut query);
        self.write_filters(&mut query);
        query
    }

    /// Search and filters without paging, for the spreadsheet export
    pub fn export_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.push_opt("search", self.list.search.as_deref());
        self.write_filters(&mut query);
        query
    }

    fn write_filters(&self, query: &mut QueryParams) {
        query
            .push_opt("category_id", self.category_id)
            .push_flag("is_available", self.is_available);
    }
}

/// Filters for `GET /users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AdminUserListParams {
    pub list: ListParams,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl AdminUserListParams {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        self.list.write(&mut query);
        query
            .push_opt("role", self.role)
            .push_flag("is_active", self.is_active);
        query
    }
}

/// Filters for `GET /delivery-boys`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeliveryBoyListParams {
    pub list: ListParams,
    pub is_active: Option<bool>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DeliveryBoyListParams {
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        self.list.write(&mut query);
        query
            .push_flag("is_active", self.is_active)
            .push_opt("from", self.from.map(|d| d.format("%Y-%m-%d")))
            .push_opt("to", self.to.map(|d| d.format("%Y-%m-%d")));
        query
    }
}
