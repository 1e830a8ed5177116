//! Login form

use super::FormError;
use crate::client::LoginRequest;

pub const ALL_FIELDS_REQUIRED: FormError = FormError("All fields required");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields must be non-empty; no format checks happen client-side
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ALL_FIELDS_REQUIRED);
        }
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_rejected() {
        assert_eq!(LoginForm::default().validate(), Err(ALL_FIELDS_REQUIRED));
        assert_eq!(
            LoginForm::new("a@b.io", "").validate(),
            Err(ALL_FIELDS_REQUIRED)
        );
        assert_eq!(
            LoginForm::new("", "hunter22").validate(),
            Err(ALL_FIELDS_REQUIRED)
        );
    }

    #[test]
    fn test_filled_form_builds_request() {
        let request = LoginForm::new("op@vectorvault.io", "s3cret").validate().unwrap();
        assert_eq!(request.email, "op@vectorvault.io");
        assert_eq!(request.password, "s3cret");
    }

    #[test]
    fn test_message_text() {
        assert_eq!(ALL_FIELDS_REQUIRED.to_string(), "All fields required");
    }
}
