#![doc = include_str!("../README.md")]

// Core modules
pub mod config;
pub mod envelope;
pub mod errors;
pub mod http;
mod log_utils;
pub mod schema;
pub mod services;
pub mod types;

// Caching and reactive layer
pub mod query;
pub mod queries;
pub mod hooks;

// Page state
pub mod controllers;
pub mod forms;

// Re-export commonly used items at crate root for convenience
pub use config::ClientConfig;
pub use queries::AdminApi;
pub use query::QueryClient;

pub mod prelude {
    //! The prelude exports the types and hooks most pages need.

    // Configuration and transport
    pub use crate::config::ClientConfig;
    pub use crate::http::{HttpClient, ReqwestTransport, SharedToken, TokenProvider, Transport};

    // Errors
    pub use crate::errors::{ApiError, ApiResult};

    // Resources and their parameters
    pub use crate::schema::{
        AdminUser, AdminUserPayload, Category, CategoryPayload, DeliveryBoy, DeliveryBoyPayload,
        Entity, GstSlab, ImageUpload, Location, LocationAssignment, Page, PaginationMeta,
        Product, ProductImage, ProductPayload, Role,
    };
    pub use crate::services::{
        AdminUserListParams, CategoryListParams, DeliveryBoyListParams, ListParams,
        ProductListParams,
    };

    // The query layer
    pub use crate::queries::{AdminApi, keys};
    pub use crate::query::{
        AsyncState, LogNotifier, Mutation, MutationState, Notifier, Query, QueryClient,
        QueryClientConfig, QueryKey, QueryOptions, QueryState, Toast, ToastKind, ToastQueue,
    };

    // Hooks
    pub use crate::hooks::{
        UseMutation, use_admin_api, use_invalidate_query, use_mutation, use_provide_admin_api,
        use_provide_query_client, use_query, use_query_client,
    };

    // Forms and page controllers
    pub use crate::controllers::{
        AdminUsersController, CategoriesController, DeliveryBoysController, Instant, Modal,
        ProductsController,
    };
    pub use crate::forms::{
        AdminUserForm, CategoryForm, DeliveryBoyForm, EntityForm, FormMode, ProductForm,
    };
}
