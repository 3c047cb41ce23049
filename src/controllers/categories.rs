use super::{ListState, ModalState};
use crate::{
    errors::ApiResult,
    forms::CategoryForm,
    queries::{AdminApi, CategoryListQuery},
    schema::{Category, Page},
    services::CategoryListParams,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilters {
    pub is_active: Option<bool>,
}

/// State of the categories page
#[derive(Clone)]
pub struct CategoriesController {
    api: AdminApi,
    pub list: ListState<CategoryFilters>,
    pub modal: ModalState<CategoryForm>,
}

impl CategoriesController {
    pub fn new(api: AdminApi, per_page: u32) -> Self {
        Self {
            api,
            list: ListState::new(per_page),
            modal: ModalState::new(),
        }
    }

    pub fn params(&self) -> CategoryListParams {
        CategoryListParams {
            list: self.list.list_params(),
            is_active: self.list.filters().is_active,
        }
    }

    /// The read the page renders
    pub fn query(&self) -> CategoryListQuery {
        self.api.category_list(self.params())
    }

    pub async fn load(&self) -> ApiResult<Page<Category>> {
        self.api.client().fetch_query(&self.query()).await
    }

    pub async fn submit(&mut self) -> ApiResult<Category> {
        let create = self.api.create_category();
        let update = self.api.update_category();
        self.modal.submit(self.api.client(), &create, &update).await
    }

    pub async fn confirm_delete(&mut self) -> ApiResult<()> {
        let delete = self.api.delete_category();
        self.modal.confirm_delete(self.api.client(), &delete).await
    }
}
