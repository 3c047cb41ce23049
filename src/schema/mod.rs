//! Wire models for the admin API.
//!
//! Inbound entities are lenient about number encodings (the backend serializes
//! money as decimal strings and flags as `0`/`1`); outbound payloads are strict
//! and carry `validator` rules that services check before anything is sent.

mod admin_user;
mod category;
mod delivery_boy;
mod pagination;
mod product;

pub use admin_user::{AdminUser, AdminUserPayload, Location, LocationAssignment, Role};
pub use category::{Category, CategoryPayload, CategorySummary};
pub use delivery_boy::{DeliveryBoy, DeliveryBoyPayload};
pub use pagination::{Page, PageLink, PaginationMeta};
pub use product::{
    GstSlab, ImageOrderPayload, ImageUpload, Product, ProductImage, ProductPayload,
};

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::errors::{ApiError, ApiResult};

/// A backend record with an id and a display name
pub trait Entity {
    fn id(&self) -> u64;
    /// Shown in confirmations, e.g. "Delete Sourdough?"
    fn label(&self) -> &str;
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {
        $(impl Entity for $ty {
            fn id(&self) -> u64 {
                self.id
            }

            fn label(&self) -> &str {
                &self.name
            }
        })*
    };
}

impl_entity!(Category, Product, AdminUser, DeliveryBoy);

/// Validates an outbound payload, mapping any rule failure to `Invalid <resource> payload`.
pub fn check_payload<P: Validate>(resource: &'static str, payload: &P) -> ApiResult<()> {
    payload.validate().map_err(|errors| {
        crate::warn_log!("[PAYLOAD] rejected {} payload: {}", resource, errors);
        ApiError::InvalidPayload { resource }
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Money fields arrive as `"12.50"` or `12.5`
pub(crate) fn money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(deserializer)? {
        Loose::Number(n) => Ok(n),
        Loose::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal {s:?}"))),
        Loose::Bool(_) => Err(serde::de::Error::custom("expected a decimal, got a boolean")),
    }
}

pub(crate) fn opt_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Number(n)) => Ok(Some(n)),
        Some(Loose::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Loose::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal {s:?}"))),
        Some(Loose::Bool(_)) => Err(serde::de::Error::custom("expected a decimal, got a boolean")),
    }
}

fn loose_to_bool<E: serde::de::Error>(value: Loose) -> Result<bool, E> {
    match value {
        Loose::Bool(b) => Ok(b),
        Loose::Number(n) => Ok(n != 0.0),
        Loose::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(E::custom(format!("invalid flag {other:?}"))),
        },
    }
}

/// Flags arrive as `true`, `1` or `"1"`
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    loose_to_bool(Loose::deserialize(deserializer)?)
}

/// Tri-state flag: `null`/absent stays unknown
pub(crate) fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Loose>::deserialize(deserializer)?
        .map(loose_to_bool)
        .transpose()
}

/// Integer fields that sometimes arrive quoted
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = money(deserializer)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {value}"
        )));
    }
    Ok(value as u32)
}
