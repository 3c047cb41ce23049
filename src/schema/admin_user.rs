use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Dashboard role. A user holds one or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DeliveryBoy,
    StoreOwner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::DeliveryBoy, Role::StoreOwner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DeliveryBoy => "delivery_boy",
            Role::StoreOwner => "store_owner",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A store location a user can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "super::flag")]
    pub is_primary: bool,
}

/// An admin-panel user as returned by `/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// `None` when the backend did not report the flag
    #[serde(default, deserialize_with = "super::opt_flag")]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn primary_location(&self) -> Option<&Location> {
        self.locations.iter().find(|location| location.is_primary)
    }
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// `password` is omitted from the JSON when `None`, which the backend reads as
/// "keep the current password".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdminUserPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub roles: Vec<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of `POST /users/{id}/locations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_primary_location"))]
pub struct LocationAssignment {
    pub location_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_location_id: Option<u64>,
}

fn validate_primary_location(assignment: &LocationAssignment) -> Result<(), ValidationError> {
    match assignment.primary_location_id {
        Some(primary) if !assignment.location_ids.contains(&primary) => {
            let mut error = ValidationError::new("primary_location_id");
            error.message = Some("Primary location must be one of the assigned locations".into());
            Err(error)
        }
        _ => Ok(()),
    }
}
