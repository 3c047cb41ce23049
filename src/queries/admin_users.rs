use std::future::Future;

use super::{AdminApi, keys};
use crate::{
    errors::ApiResult,
    query::{Mutation, Query, QueryKey},
    schema::{AdminUser, AdminUserPayload, LocationAssignment, Page},
    services::{AdminUserListParams, AdminUserService},
};

/// A user can hold the delivery role, so user writes touch both families
fn user_families() -> Vec<QueryKey> {
    vec![keys::admin_users(), keys::delivery_boys()]
}

#[derive(Clone)]
pub struct AdminUserListQuery {
    service: AdminUserService,
    params: AdminUserListParams,
}

impl PartialEq for AdminUserListQuery {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Query for AdminUserListQuery {
    type Output = Page<AdminUser>;

    fn key(&self) -> QueryKey {
        keys::admin_users()
            .with("list")
            .with(self.params.to_query().to_query_string())
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let params = self.params.clone();
        async move { service.list(&params).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load admin users"
    }
}

#[derive(Clone)]
pub struct AdminUserQuery {
    service: AdminUserService,
    id: u64,
}

impl PartialEq for AdminUserQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Query for AdminUserQuery {
    type Output = AdminUser;

    fn key(&self) -> QueryKey {
        keys::detail(keys::admin_users(), self.id)
    }

    fn fetch(&self) -> impl Future<Output = ApiResult<Self::Output>> + Send + 'static {
        let service = self.service.clone();
        let id = self.id;
        async move { service.get(id).await }
    }

    fn error_message(&self) -> &'static str {
        "Failed to load admin user"
    }
}

#[derive(Clone)]
pub struct CreateAdminUser {
    service: AdminUserService,
}

impl Mutation for CreateAdminUser {
    type Input = AdminUserPayload;
    type Output = AdminUser;

    fn mutate(&self, input: AdminUserPayload) -> impl Future<Output = ApiResult<AdminUser>> + Send {
        let service = self.service.clone();
        async move { service.create(&input).await }
    }

    fn invalidates(&self, _input: &AdminUserPayload) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Admin user created successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to create admin user"
    }
}

/// Input is `(id, payload)`
#[derive(Clone)]
pub struct UpdateAdminUser {
    service: AdminUserService,
}

impl Mutation for UpdateAdminUser {
    type Input = (u64, AdminUserPayload);
    type Output = AdminUser;

    fn mutate(
        &self,
        (id, payload): (u64, AdminUserPayload),
    ) -> impl Future<Output = ApiResult<AdminUser>> + Send {
        let service = self.service.clone();
        async move { service.update(id, &payload).await }
    }

    fn invalidates(&self, _input: &(u64, AdminUserPayload)) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Admin user updated successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update admin user"
    }
}

/// Input is `(id, is_active)`
#[derive(Clone)]
pub struct SetAdminUserActive {
    service: AdminUserService,
}

impl Mutation for SetAdminUserActive {
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
        "Admin user status updated"
    }

    fn error_message(&self) -> &'static str {
        "Failed to update admin user status"
    }
}

#[derive(Clone)]
pub struct DeleteAdminUser {
    service: AdminUserService,
}

impl Mutation for DeleteAdminUser {
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
        "Admin user deleted successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to delete admin user"
    }
}

/// Input is `(user_id, assignment)`
#[derive(Clone)]
pub struct AssignLocations {
    service: AdminUserService,
}

impl Mutation for AssignLocations {
    type Input = (u64, LocationAssignment);
    type Output = ();

    fn mutate(
        &self,
        (id, assignment): (u64, LocationAssignment),
    ) -> impl Future<Output = ApiResult<()>> + Send {
        let service = self.service.clone();
        async move { service.assign_locations(id, &assignment).await }
    }

    fn invalidates(&self, _input: &(u64, LocationAssignment)) -> Vec<QueryKey> {
        user_families()
    }

    fn success_message(&self) -> &'static str {
        "Locations assigned successfully"
    }

    fn error_message(&self) -> &'static str {
        "Failed to assign locations"
    }
}

impl AdminApi {
    pub fn admin_user_list(&self, params: AdminUserListParams) -> AdminUserListQuery {
        AdminUserListQuery {
            service: self.admin_users.clone(),
            params,
        }
    }

    pub fn admin_user(&self, id: u64) -> AdminUserQuery {
        AdminUserQuery {
            service: self.admin_users.clone(),
            id,
        }
    }

    pub fn create_admin_user(&self) -> CreateAdminUser {
        CreateAdminUser {
            service: self.admin_users.clone(),
        }
    }

    pub fn update_admin_user(&self) -> UpdateAdminUser {
        UpdateAdminUser {
            service: self.admin_users.clone(),
        }
    }

    pub fn set_admin_user_active(&self) -> SetAdminUserActive {
        SetAdminUserActive {
            service: self.admin_users.clone(),
        }
    }

    pub fn delete_admin_user(&self) -> DeleteAdminUser {
        DeleteAdminUser {
            service: self.admin_users.clone(),
        }
    }

    pub fn assign_locations(&self) -> AssignLocations {
        AssignLocations {
            service: self.admin_users.clone(),
        }
    }
}
