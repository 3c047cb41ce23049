use chrono::NaiveDate;

use super::{ListState, ModalState};
use crate::{
    errors::ApiResult,
    forms::DeliveryBoyForm,
    queries::{AdminApi, DeliveryBoyListQuery},
    schema::{DeliveryBoy, Page},
    services::DeliveryBoyListParams,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryBoyFilters {
    pub is_active: Option<bool>,
    /// Joined on or after
    pub from: Option<NaiveDate>,
    /// Joined on or before
    pub to: Option<NaiveDate>,
}

/// State of the delivery staff page
#[derive(Clone)]
pub struct DeliveryBoysController {
    api: AdminApi,
    pub list: ListState<DeliveryBoyFilters>,
    pub modal: ModalState<DeliveryBoyForm>,
}

impl DeliveryBoysController {
    pub fn new(api: AdminApi, per_page: u32) -> Self {
        Self {
            api,
            list: ListState::new(per_page),
            modal: ModalState::new(),
        }
    }

    pub fn params(&self) -> DeliveryBoyListParams {
        let filters = self.list.filters();
        DeliveryBoyListParams {
            list: self.list.list_params(),
            is_active: filters.is_active,
            from: filters.from,
            to: filters.to,
        }
    }

    pub fn query(&self) -> DeliveryBoyListQuery {
        self.api.delivery_boy_list(self.params())
    }

    pub async fn load(&self) -> ApiResult<Page<DeliveryBoy>> {
        self.api.client().fetch_query(&self.query()).await
    }

    /// Set the date range; a reversed range is swapped
    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        let (from, to) = match (from, to) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            range => range,
        };
        self.list.update_filters(|filters| {
            filters.from = from;
            filters.to = to;
        })
    }

    pub async fn submit(&mut self) -> ApiResult<DeliveryBoy> {
        let create = self.api.create_delivery_boy();
        let update = self.api.update_delivery_boy();
        self.modal.submit(self.api.client(), &create, &update).await
    }

    pub async fn confirm_delete(&mut self) -> ApiResult<()> {
        let delete = self.api.delete_delivery_boy();
        self.modal.confirm_delete(self.api.client(), &delete).await
    }

    pub async fn toggle_active(&self, delivery_boy: &DeliveryBoy) -> ApiResult<()> {
        let is_active = !delivery_boy.is_active.unwrap_or(true);
        self.api
            .client()
            .mutate(&self.api.set_delivery_boy_active(), (delivery_boy.id, is_active))
            .await
    }
}
