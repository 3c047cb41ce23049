use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{AdminUser, Location};

/// A delivery person as returned by `/delivery-boys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryBoy {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "super::opt_flag")]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Delivery staff are users; a freshly created user record is shown as one
impl From<AdminUser> for DeliveryBoy {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            is_active: user.is_active,
            locations: user.locations,
            created_at: user.created_at,
        }
    }
}

/// Body of `PUT /delivery-boys/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeliveryBoyPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
