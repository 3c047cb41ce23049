use validator::Validate;

use super::{EntityForm, FormMode, field_error, optional_text};
use crate::schema::{Category, CategoryPayload};

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
    pub is_active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
        }
    }
}

impl EntityForm for CategoryForm {
    type Entity = Category;
    type Payload = CategoryPayload;

    fn from_entity(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            is_active: category.is_active,
        }
    }

    fn to_payload(&self, _mode: FormMode) -> Result<CategoryPayload, String> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        };
        if let Err(errors) = trimmed.validate() {
            let message = ["name", "description"]
                .into_iter()
                .find_map(|field| field_error(&errors, field))
                .unwrap_or_else(|| errors.to_string());
            return Err(message);
        }

        Ok(CategoryPayload {
            name: trimmed.name,
            description: optional_text(&self.description),
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let form = CategoryForm {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Category name is required");
    }

    #[test]
    fn edit_seeds_from_entity() {
        let category = Category {
            id: 2,
            name: "Cakes".into(),
            description: None,
            is_active: false,
            created_at: None,
            updated_at: None,
        };
        let form = CategoryForm::from_entity(&category);
        assert_eq!(form.name, "Cakes");
        assert!(!form.is_active);

        let payload = form.to_payload(FormMode::Edit).unwrap();
        assert_eq!(payload.description, None);
    }
}
