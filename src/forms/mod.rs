//! # Create/edit forms
//!
//! Each form holds what the operator typed, seeds itself from an entity for
//! editing, and turns itself into an outbound payload. Validation runs before
//! anything is sent; the first failing field, in the form's fixed field order,
//! becomes the toast the operator sees.

mod admin_user;
mod category;
mod product;

pub use admin_user::{AdminUserForm, DeliveryBoyForm};
pub use category::CategoryForm;
pub use product::ProductForm;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::{
    errors::{ApiError, ApiResult},
    query::{Notifier, Toast},
};

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMode {
    Create,
    Edit,
}

/// A form bound to one resource
pub trait EntityForm: Default + Clone + PartialEq {
    /// The record an edit form starts from
    type Entity;
    /// What the form submits
    type Payload;

    /// Seed an edit form with the entity's current values
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Validate and build the payload, or return the first field error's message
    fn to_payload(&self, mode: FormMode) -> Result<Self::Payload, String>;
}

/// Build `form`'s payload; on failure toast the message and return
/// [`ApiError::Validation`] without sending anything.
pub fn prepare<F: EntityForm>(
    form: &F,
    mode: FormMode,
    notifier: &impl Notifier,
) -> ApiResult<F::Payload> {
    form.to_payload(mode).map_err(|message| {
        crate::debug_log!("[FORM] rejected: {}", message);
        notifier.notify(Toast::error(message.clone()));
        ApiError::Validation(message)
    })
}

/// Message of the first error recorded for `field`. Struct-level rules are
/// recorded under `__all__`.
pub(crate) fn field_error(errors: &ValidationErrors, field: &str) -> Option<String> {
    match errors.errors().get(field)? {
        ValidationErrorsKind::Field(list) => list.first().map(message_of),
        _ => None,
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| format!("Invalid value ({})", error.code))
}

/// `None` for blank input, the trimmed text otherwise
pub(crate) fn optional_text(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
