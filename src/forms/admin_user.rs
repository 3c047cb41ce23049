use validator::Validate;

use super::{EntityForm, FormMode, field_error, optional_text};
use crate::schema::{AdminUser, AdminUserPayload, DeliveryBoy, DeliveryBoyPayload, Role};

const MIN_PASSWORD_LEN: usize = 6;

/// Password rule shared by user forms.
///
/// Required on create. On edit an empty field means "keep the current
/// password" and is left out of the payload; anything else is sent verbatim.
fn check_password(password: &str, mode: FormMode) -> Result<Option<String>, String> {
    match (mode, password.is_empty()) {
        (FormMode::Create, true) => Err("Password is required".to_string()),
        (FormMode::Edit, true) => Ok(None),
        (_, false) if password.chars().count() < MIN_PASSWORD_LEN => Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )),
        (_, false) => Ok(Some(password.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct AdminUserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "Select at least one role"))]
    pub roles: Vec<Role>,
    pub phone: String,
    pub address: String,
    pub is_active: bool,
}

impl Default for AdminUserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            roles: vec![Role::Admin],
            phone: String::new(),
            address: String::new(),
            is_active: true,
        }
    }
}

impl AdminUserForm {
    pub fn toggle_role(&mut self, role: Role) {
        if let Some(index) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(index);
        } else {
            self.roles.push(role);
        }
    }
}

impl EntityForm for AdminUserForm {
    type Entity = AdminUser;
    type Payload = AdminUserPayload;

    fn from_entity(user: &AdminUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            roles: user.roles.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            is_active: user.is_active.unwrap_or(true),
        }
    }

    fn to_payload(&self, mode: FormMode) -> Result<AdminUserPayload, String> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        let errors = trimmed.validate().err();
        let failed = |field: &str| errors.as_ref().and_then(|e| field_error(e, field));

        if let Some(message) = failed("name").or_else(|| failed("email")) {
            return Err(message);
        }
        let password = check_password(&self.password, mode)?;
        if let Some(message) = failed("roles") {
            return Err(message);
        }

        Ok(AdminUserPayload {
            name: trimmed.name,
            email: trimmed.email,
            password,
            roles: self.roles.clone(),
            phone: optional_text(&self.phone),
            address: optional_text(&self.address),
            is_active: Some(self.is_active),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct DeliveryBoyForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

impl EntityForm for DeliveryBoyForm {
    type Entity = DeliveryBoy;
    type Payload = DeliveryBoyPayload;

    fn from_entity(delivery_boy: &DeliveryBoy) -> Self {
        Self {
            name: delivery_boy.name.clone(),
            email: delivery_boy.email.clone(),
            password: String::new(),
            phone: delivery_boy.phone.clone().unwrap_or_default(),
            address: delivery_boy.address.clone().unwrap_or_default(),
        }
    }

    fn to_payload(&self, mode: FormMode) -> Result<DeliveryBoyPayload, String> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        if let Err(errors) = trimmed.validate()
            && let Some(message) = field_error(&errors, "name").or_else(|| field_error(&errors, "email"))
        {
            return Err(message);
        }
        let password = check_password(&self.password, mode)?;

        Ok(DeliveryBoyPayload {
            name: trimmed.name,
            email: trimmed.email,
            password,
            phone: optional_text(&self.phone),
            address: optional_text(&self.address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AdminUser {
        AdminUser {
            id: 7,
            name: "Asha".into(),
            email: "asha@bakery.test".into(),
            roles: vec![Role::StoreOwner],
            phone: Some("98450".into()),
            address: None,
            is_active: Some(true),
            locations: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn edit_with_empty_password_strips_it() {
        let form = AdminUserForm::from_entity(&user());
        let payload = form.to_payload(FormMode::Edit).unwrap();
        assert_eq!(payload.password, None);
        assert!(serde_json::to_value(&payload).unwrap().get("password").is_none());
    }

    #[test]
    fn edit_with_password_sends_it_verbatim() {
        let form = AdminUserForm {
            password: " s3cret pass".into(),
            ..AdminUserForm::from_entity(&user())
        };
        let payload = form.to_payload(FormMode::Edit).unwrap();
        assert_eq!(payload.password.as_deref(), Some(" s3cret pass"));
    }

    #[test]
    fn create_requires_password() {
        let form = AdminUserForm {
            password: String::new(),
            ..AdminUserForm::from_entity(&user())
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Password is required");

        let form = AdminUserForm {
            password: "abc".into(),
            ..form
        };
        assert_eq!(
            form.to_payload(FormMode::Create).unwrap_err(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn email_checked_before_password() {
        let form = AdminUserForm {
            email: "not-an-email".into(),
            ..Default::default()
        };
        let form = AdminUserForm {
            name: "Ravi".into(),
            ..form
        };
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Enter a valid email address");
    }

    #[test]
    fn roles_cannot_be_empty() {
        let mut form = AdminUserForm {
            password: "secret1".into(),
            ..AdminUserForm::from_entity(&user())
        };
        form.toggle_role(Role::StoreOwner);
        assert_eq!(form.to_payload(FormMode::Create).unwrap_err(), "Select at least one role");
    }

    #[test]
    fn delivery_boy_edit_strips_empty_password() {
        let form = DeliveryBoyForm {
            name: "Ravi".into(),
            email: "ravi@bakery.test".into(),
            ..Default::default()
        };
        assert_eq!(form.to_payload(FormMode::Edit).unwrap().password, None);
        assert!(form.to_payload(FormMode::Create).is_err());
    }
}
