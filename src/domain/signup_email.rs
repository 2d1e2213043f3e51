use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupEmail(String);

impl SignupEmail {
    /// Returns an instance of `SignupEmail` if the input is a non-empty,
    /// syntactically valid email address.
    /// The error message is suitable for display next to the form field.
    pub fn parse(email: String) -> Result<SignupEmail, String> {
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        if !validator::validate_email(&email) {
            return Err("Invalid email".to_string());
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
