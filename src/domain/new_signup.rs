use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::linkedin_url::LinkedinUrl;
use super::signup_email::SignupEmail;

/// Raw early-access signup submission, as transmitted over the wire.
/// Every field is optional at this stage; acceptance is decided by the
/// conversion into [`NewSignup`].
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewSignup {
    pub email: SignupEmail,
    pub name: Option<String>,
    pub role: Option<String>,
    pub linkedin: Option<LinkedinUrl>,
}

/// Field name to ordered list of human-readable messages. Serializes as the
/// `{"email": ["Email is required"]}` object returned to the client.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: String) {
        self.0.entry(field).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<SignupForm> for NewSignup {
    type Error = ValidationErrors;

    /// The validation schema. Pure and side-effect free, so the same rules
    /// can back both interactive feedback and the server-side trust
    /// boundary; the outcome depends on nothing but the submitted fields.
    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::default();

        let email = SignupEmail::parse(form.email.unwrap_or_default())
            .map_err(|message| errors.push("email", message))
            .ok();
        // An empty optional field counts as absent, not as a value to check.
        let linkedin = match non_empty(form.linkedin) {
            Some(raw) => LinkedinUrl::parse(raw)
                .map_err(|message| errors.push("linkedin", message))
                .ok(),
            None => None,
        };

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                email,
                name: non_empty(form.name),
                role: non_empty(form.role),
                linkedin,
            }),
            _ => Err(errors),
        }
    }
}

impl NewSignup {
    /// The schemaless document persisted per signup. Absent optional fields
    /// are omitted rather than written as empty strings.
    pub fn to_document(&self) -> serde_json::Value {
        let mut document = serde_json::Map::new();
        document.insert("email".into(), json!(self.email.as_ref()));
        if let Some(name) = &self.name {
            document.insert("name".into(), json!(name));
        }
        if let Some(role) = &self.role {
            document.insert("role".into(), json!(role));
        }
        if let Some(linkedin) = &self.linkedin {
            document.insert("linkedin".into(), json!(linkedin.as_ref()));
        }
        serde_json::Value::Object(document)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
