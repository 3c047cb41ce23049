use std::future::Future;

use super::{AdminApi, keys};
use crate::{
    errors::ApiResult,
    query::{Mutation, Query, QueryKey},
    schema::{AdminUserPayload, DeliveryBoy, DeliveryBoyPayload, Page, Role},
    services::{AdminUserService, DeliveryBoyListParams, DeliveryBoyService},
};

fn user_families() -> Vec<QueryKey> {
    vec![keys::delivery_boys(), keys::admin_users()]
}

#[derive(Clone)]
pub struct DeliveryBoyListQuery {
    service: DeliveryBoyService,
    params: DeliveryBoyListParams,
}

impl PartialEq for DeliveryBoyListQuery {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Query for DeliveryBoyListQuery {
    type Output = Page<DeliveryBoy>;

    fn key(&self) -> QueryKey {
        keys::delivery_boys()
            .with("list")
            .with(self.params.to_query().to_query_string())
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let params = self.params.clone();
        async move { service.list(&params).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load delivery boys"
    }
}

#[derive(Clone)]
pub struct DeliveryBoyQuery {
    service: DeliveryBoyService,
    id: u64,
}

impl PartialEq for DeliveryBoyQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Query for DeliveryBoyQuery {
    type Output = DeliveryBoy;

    fn key(&self) -> QueryKey {
        keys::detail(keys::delivery_boys(), self.id)
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let id = self.id;
        async move { service.get(id).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load delivery boy"
    }
}

/// Delivery staff are created as users holding only the delivery role
#[derive(Clone)]
pub struct CreateDeliveryBoy {
    service: AdminUserService,
}

impl Mutation for CreateDeliveryBoy {
    type Input = DeliveryBoyPayload;
    type Output = DeliveryBoy;

    fn mutate(
        &self,
        input: DeliveryBoyPayload,
    ) -> impl Future<Output = ApiResult<DeliveryBoy>> + Send {
        let service = self.service.clone();
        let payload = AdminUserPayload {
            name: input.name,
            email: input.email,
            password: input.password,
            roles: vec![Role::DeliveryBoy],
            phone: input.phone,
            address: input.address,
            is_active: Some(true),
        };
        async move { service.create(&payload).await.map(DeliveryBoy::from) }
    }

    fn invalidates(&self, _input: &DeliveryBoyPayload) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Delivery boy created successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to create delivery boy"
    }
}

/// Input is `(id, payload)`
#[derive(Clone)]
pub struct UpdateDeliveryBoy {
    service: DeliveryBoyService,
}

impl Mutation for UpdateDeliveryBoy {
    type Input = (u64, DeliveryBoyPayload);
    type Output = DeliveryBoy;

    fn mutate(
        &self,
        (id, payload): (u64, DeliveryBoyPayload),
    ) -> impl Future<Output = ApiResult<DeliveryBoy>> + Send {
        let service = self.service.clone();
        async move { service.update(id, &payload).await }
    }

    fn invalidates(&self, _input: &(u64, DeliveryBoyPayload)) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Delivery boy updated successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update delivery boy"
    }
}

/// Input is `(id, is_active)`
#[derive(Clone)]
pub struct SetDeliveryBoyActive {
    service: DeliveryBoyService,
}

impl Mutation for SetDeliveryBoyActive {
    type Input = (u64, bool);
    type Output = ();

    fn mutate(&self, (id, is_active): (u64, bool)) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.set_active(id, is_active).await }
    }

    fn invalidates(&self, _input: &(u64, bool)) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Delivery boy status updated"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update delivery boy status"
    }
}

#[derive(Clone)]
pub struct DeleteDeliveryBoy {
    service: DeliveryBoyService,
}

impl Mutation for DeleteDeliveryBoy {
    type Input = u64;
    type Output = ();

    fn mutate(&self, id: u64) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.delete(id).await }
    }

    fn invalidates(&self, _id: &u64) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Delivery boy deleted successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to delete delivery boy"
    }
}

impl AdminApi {
    pub fn delivery_boy_list(&self, params: DeliveryBoyListParams) -> DeliveryBoyListQuery {
        DeliveryBoyListQuery {
            service: self.delivery_boys.clone(),
            params,
        }
    }

    pub fn delivery_boy(&self, id: u64) -> DeliveryBoyQuery {
        DeliveryBoyQuery {
            service: self.delivery_boys.clone(),
            id,
        }
    }

    pub fn create_delivery_boy(&self) -> CreateDeliveryBoy {
        CreateDeliveryBoy {
            service: self.admin_users.clone(),
        }
    }

    pub fn update_delivery_boy(&self) -> UpdateDeliveryBoy {
        UpdateDeliveryBoy {
            service: self.delivery_boys.clone(),
        }
    }

    pub fn set_delivery_boy_active(&self) -> SetDeliveryBoyActive {
        SetDeliveryBoyActive {
            service: self.delivery_boys.clone(),
        }
    }

    pub fn delete_delivery_boy(&self) -> DeleteDeliveryBoy {
        DeleteDeliveryBoy {
            service: self.delivery_boys.clone(),
        }
    }
}
