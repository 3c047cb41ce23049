//! Which dialog a list page shows, and the form behind it.

use crate::{
    errors::{ApiError, ApiResult},
    forms::{EntityForm, FormMode, prepare},
    query::{Mutation, QueryClient},
    schema::Entity,
};

/// The dialog currently open on a list page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Create,
    Edit {
        id: u64,
    },
    ConfirmDelete {
        id: u64,
        label: String,
    },
    /// Location assignment for a user
    Assign {
        id: u64,
    },
}

/// Dialog state plus the create/edit form it owns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalState<F> {
    modal: Modal,
    form: F,
}

impl<F: EntityForm> ModalState<F> {
    pub fn new() -> Self {
        Self {
            modal: Modal::Closed,
            form: F::default(),
        }
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_open(&self) -> bool {
        self.modal != Modal::Closed
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Open the create dialog with a blank form
    pub fn open_create(&mut self) {
        self.modal = Modal::Create;
        self.form = F::default();
    }

    /// Open the edit dialog seeded with `entity`'s current values
    pub fn open_edit(&mut self, entity: &F::Entity)
    where
        F::Entity: Entity,
    {
        self.modal = Modal::Edit { id: entity.id() };
        self.form = F::from_entity(entity);
    }

    /// Ask for delete confirmation
    pub fn request_delete(&mut self, entity: &impl Entity) {
        self.modal = Modal::ConfirmDelete {
            id: entity.id(),
            label: entity.label().to_string(),
        };
    }

    pub fn open_assign(&mut self, entity: &impl Entity) {
        self.modal = Modal::Assign { id: entity.id() };
    }

    /// Close whatever is open and drop the form
    pub fn close(&mut self) {
        self.modal = Modal::Closed;
        self.form = F::default();
    }

    /// The id awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<u64> {
        match self.modal {
            Modal::ConfirmDelete { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Submit the open create or edit form.
    ///
    /// Validation failures are toasted and nothing is sent. The dialog closes
    /// only when the write succeeds.
    pub async fn submit<C, U>(
        &mut self,
        client: &QueryClient,
        create: &C,
        update: &U,
    ) -> ApiResult<C::Output>
    where
        C: Mutation<Input = F::Payload>,
        U: Mutation<Input = (u64, F::Payload), Output = C::Output>,
    {
        let result = match self.modal {
            Modal::Create => {
                let payload = prepare(&self.form, FormMode::Create, client)?;
                client.mutate(create, payload).await
            }
            Modal::Edit { id } => {
                let payload = prepare(&self.form, FormMode::Edit, client)?;
                client.mutate(update, (id, payload)).await
            }
            _ => return Err(ApiError::Validation("No form is open".to_string())),
        };
        if result.is_ok() {
            self.close();
        }
        result
    }

    /// Run the delete the operator confirmed.
    ///
    /// On success the dialog closes and the pending selection is cleared; on
    /// failure both stay so the operator can retry or cancel.
    pub async fn confirm_delete<D>(&mut self, client: &QueryClient, delete: &D) -> ApiResult<()>
    where
        D: Mutation<Input = u64, Output = ()>,
    {
        let Some(id) = self.pending_delete() else {
            return Err(ApiError::Validation("Nothing selected for deletion".to_string()));
        };
        client.mutate(delete, id).await?;
        self.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forms::CategoryForm, schema::Category};

    fn category() -> Category {
        Category {
            id: 4,
            name: "Breads".into(),
            description: Some("Daily bakes".into()),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn edit_seeds_and_create_resets() {
        let mut state = ModalState::<CategoryForm>::new();
        state.open_edit(&category());
        assert_eq!(state.modal(), &Modal::Edit { id: 4 });
        assert_eq!(state.form().name, "Breads");

        state.open_create();
        assert_eq!(state.modal(), &Modal::Create);
        assert_eq!(state.form(), &CategoryForm::default());
    }

    #[test]
    fn delete_request_tracks_selection() {
        let mut state = ModalState::<CategoryForm>::new();
        state.request_delete(&category());
        assert_eq!(state.pending_delete(), Some(4));
        state.close();
        assert_eq!(state.pending_delete(), None);
        assert!(!state.is_open());
    }
}
