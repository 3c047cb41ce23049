use std::future::Future;

use super::{AdminApi, keys};
use crate::{
    errors::ApiResult,
    query::{Mutation, Query, QueryKey, QueryOptions},
    schema::{Category, CategoryPayload, Page},
    services::{CategoryListParams, CategoryService},
};

/// One page of `GET /categories`
#[derive(Clone)]
pub struct CategoryListQuery {
    service: CategoryService,
    params: CategoryListParams,
}

impl PartialEq for CategoryListQuery {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Query for CategoryListQuery {
    type Output = Page<Category>;

    fn key(&self) -> QueryKey {
        keys::categories()
            .with("list")
            .with(self.params.to_query().to_query_string())
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let params = self.params.clone();
        async move { service.list(&params).await }
    }

    fn options(&self) -> QueryOptions {
        QueryOptions::cached_list()
    }

    fn error_message(&self) -> &'static str {
        "Failed to load categories"
    }
}

/// Every category, for pickers
#[derive(Clone)]
pub struct AllCategoriesQuery {
    service: CategoryService,
}

impl PartialEq for AllCategoriesQuery {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Query for AllCategoriesQuery {
    type Output = Vec<Category>;

    fn key(&self) -> QueryKey {
        keys::categories().with("all")
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        async move { service.list_all().await }
    }

    fn options(&self) -> QueryOptions {
        QueryOptions::cached_list()
    }

    fn error_message(&self) -> &'static str {
        "Failed to load categories"
    }
}

#[derive(Clone)]
pub struct CategoryQuery {
    service: CategoryService,
    id: u64,
}

impl PartialEq for CategoryQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Query for CategoryQuery {
    type Output = Category;

    fn key(&self) -> QueryKey {
        keys::detail(keys::categories(), self.id)
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let id = self.id;
        async move { service.get(id).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load category"
    }
}

#[derive(Clone)]
pub struct CreateCategory {
    service: CategoryService,
}

impl Mutation for CreateCategory {
    type Input = CategoryPayload;
    type Output = Category;

    fn mutate(&self, input: CategoryPayload) -> impl Future<Output = ApiResult<Category>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn invalidates(&self, _input: &CategoryPayload) -> Vec<QueryKey> {
        vec![keys::categories()]
    }

    fn success_message(&self) -> &'static str {
        "Category created successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to create category"
    }
}

/// Input is `(id, payload)`
#[derive(Clone)]
pub struct UpdateCategory {
    service: CategoryService,
}

impl Mutation for UpdateCategory {
    type Input = (u64, CategoryPayload);
    type Output = Category;

    fn mutate(
        &self,
        (id, payload): (u64, CategoryPayload),
    ) -> impl Future<Output = ApiResult<Category>> + Send {
        let service = self.service.clone();
        async move { service.update(id, &payload).await }
    }

    // product rows embed the category name
    fn invalidates(&self, _input: &(u64, CategoryPayload)) -> Vec<QueryKey> {
        vec![keys::categories(), keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Category updated successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update category"
    }
}

#[derive(Clone)]
pub struct DeleteCategory {
    service: CategoryService,
}

impl Mutation for DeleteCategory {
    type Input = u64;
    type Output = ();

    fn mutate(&self, id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn invalidates(&self, _id: &u64) -> Vec<QueryKey> {
        vec![keys::categories(), keys::products()]
    }

    fn success_message(&self) -> &'static str {
        "Category deleted successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to delete category"
    }
}

impl AdminApi {
    pub fn category_list(&self, params: CategoryListParams) -> CategoryListQuery {
        CategoryListQuery {
            service: self.categories.clone(),
            params,
        }
    }

    pub fn all_categories(&self) -> AllCategoriesQuery {
        AllCategoriesQuery {
            service: self.categories.clone(),
        }
    }

    pub fn category(&self, id: u64) -> CategoryQuery {
        CategoryQuery {
            service: self.categories.clone(),
            id,
        }
    }

    pub fn create_category(&self) -> CreateCategory {
        CreateCategory {
            service: self.categories.clone(),
        }
    }

    pub fn update_category(&self) -> UpdateCategory {
        UpdateCategory {
            service: self.categories.clone(),
        }
    }

    pub fn delete_category(&self) -> DeleteCategory {
        DeleteCategory {
            service: self.categories.clone(),
        }
    }
}
