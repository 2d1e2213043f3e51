use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};

use crate::configuration::ServiceAccount;

use super::{DocumentStore, StoreError};

/// Firestore v1 REST client. Documents are written with
/// `POST {base_url}/projects/{project_id}/databases/(default)/documents/{collection}`;
/// the store assigns the document id and returns it as the last segment of
/// the resource name.
pub struct FirestoreStore {
    http_client: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: Secret<String>,
}

impl FirestoreStore {
    pub fn new(
        base_url: String,
        service_account: ServiceAccount,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            project_id: service_account.project_id,
            access_token: service_account.access_token,
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn create(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let url = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url, self.project_id, collection
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&json!({ "fields": firestore_fields(&document) }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Rejected(format!(
                "{} responded with {}",
                collection,
                response.status()
            )));
        }

        let created: CreatedDocument = response.json().await?;
        Ok(document_id(&created.name))
    }
}

#[derive(serde::Deserialize)]
struct CreatedDocument {
    name: String,
}

/// Last segment of a Firestore resource name,
/// e.g. `projects/p/databases/(default)/documents/users/8FnLxg` -> `8FnLxg`.
fn document_id(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

/// Encode a plain JSON document as Firestore typed values.
fn firestore_fields(document: &Value) -> Value {
    match document {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), firestore_value(value)))
                .collect(),
        ),
        other => json!({ "value": firestore_value(other) }),
    }
}

fn firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        // Firestore transports 64-bit integers as strings.
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            json!({ "integerValue": number.to_string() })
        }
        Value::Number(number) => json!({ "doubleValue": number }),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(firestore_value).collect::<Vec<_>>() }
        }),
        Value::Object(_) => json!({ "mapValue": { "fields": firestore_fields(value) } }),
    }
}
