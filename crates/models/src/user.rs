use crate::validation::{ValidationError, check_email, check_username};
use serde::Deserialize;

/// Sign-up form: credentials plus the password confirmation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl SignUp {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_username(&self.username)?;
        check_email("email", &self.email)?;

        if self.password1.is_empty() {
            return Err(ValidationError::Required { field: "password1" });
        }
        if self.password1 != self.password2 {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(())
    }
}
