use super::{ListState, Modal, ModalState};
use crate::{
    errors::{ApiError, ApiResult},
    forms::AdminUserForm,
    queries::{AdminApi, AdminUserListQuery},
    schema::{AdminUser, LocationAssignment, Page, Role},
    services::AdminUserListParams,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUserFilters {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

/// State of the admin users page
#[derive(Clone)]
pub struct AdminUsersController {
    api: AdminApi,
    pub list: ListState<AdminUserFilters>,
    pub modal: ModalState<AdminUserForm>,
    assignment: LocationAssignment,
}

impl AdminUsersController {
    pub fn new(api: AdminApi, per_page: u32) -> Self {
        Self {
            api,
            list: ListState::new(per_page),
            modal: ModalState::new(),
            assignment: empty_assignment(),
        }
    }

    pub fn params(&self) -> AdminUserListParams {
        let filters = self.list.filters();
        AdminUserListParams {
            list: self.list.list_params(),
            role: filters.role,
            is_active: filters.is_active,
        }
    }

    pub fn query(&self) -> AdminUserListQuery {
        self.api.admin_user_list(self.params())
    }

    pub async fn load(&self) -> ApiResult<Page<AdminUser>> {
        self.api.client().fetch_query(&self.query()).await
    }

    pub async fn submit(&mut self) -> ApiResult<AdminUser> {
        let create = self.api.create_admin_user();
        let update = self.api.update_admin_user();
        self.modal.submit(self.api.client(), &create, &update).await
    }

    pub async fn confirm_delete(&mut self) -> ApiResult<()> {
        let delete = self.api.delete_admin_user();
        self.modal.confirm_delete(self.api.client(), &delete).await
    }

    /// Flip the user's active flag. An unknown flag counts as active.
    pub async fn toggle_active(&self, user: &AdminUser) -> ApiResult<()> {
        let is_active = !user.is_active.unwrap_or(true);
        self.api
            .client()
            .mutate(&self.api.set_admin_user_active(), (user.id, is_active))
            .await
    }

    /// Open the location dialog seeded with the user's current locations
    pub fn open_assign(&mut self, user: &AdminUser) {
        self.modal.open_assign(user);
        self.assignment = LocationAssignment {
            location_ids: user.locations.iter().map(|l| l.id).collect(),
            primary_location_id: user.primary_location().map(|l| l.id),
        };
    }

    pub fn assignment(&self) -> &LocationAssignment {
        &self.assignment
    }

    /// Add or remove a location. Removing the primary clears it.
    pub fn toggle_location(&mut self, location_id: u64) {
        let ids = &mut self.assignment.location_ids;
        if let Some(index) = ids.iter().position(|id| *id == location_id) {
            ids.remove(index);
            if self.assignment.primary_location_id == Some(location_id) {
                self.assignment.primary_location_id = None;
            }
        } else {
            ids.push(location_id);
        }
    }

    /// Make `location_id` the single primary, assigning it if needed
    pub fn set_primary_location(&mut self, location_id: u64) {
        if !self.assignment.location_ids.contains(&location_id) {
            self.assignment.location_ids.push(location_id);
        }
        self.assignment.primary_location_id = Some(location_id);
    }

    pub async fn submit_assignment(&mut self) -> ApiResult<()> {
        let Modal::Assign { id } = *self.modal.modal() else {
            return Err(ApiError::Validation("No user selected".to_string()));
        };
        self.api
            .client()
            .mutate(&self.api.assign_locations(), (id, self.assignment.clone()))
            .await?;
        self.modal.close();
        self.assignment = empty_assignment();
        Ok(())
    }
}

fn empty_assignment() -> LocationAssignment {
    LocationAssignment {
        location_ids: Vec::new(),
        primary_location_id: None,
    }
}
