use std::fmt::Debug;

use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{post, web, HttpResponse, ResponseError};
use serde_json::json;

use crate::domain::{NewSignup, SignupForm, ValidationErrors};
use crate::routes::error_chain_fmt;
use crate::store::{DocumentStore, StoreError};

/// Collection that holds one document per accepted signup.
const USERS_COLLECTION: &str = "users";

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error("Invalid signup data")]
    Validation(ValidationErrors),
    #[error("Failed to create user")]
    Persistence(#[from] StoreError),
}

impl Debug for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SignupError {
    fn status_code(&self) -> StatusCode {
        match self {
            SignupError::Validation(_) => StatusCode::BAD_REQUEST,
            SignupError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Field-scoped messages for the form to display inline.
            SignupError::Validation(errors) => {
                HttpResponse::BadRequest().json(json!({ "errors": errors }))
            }
            // Infrastructure faults get no field attribution.
            SignupError::Persistence(_) => {
                HttpResponse::InternalServerError().json(json!({ "error": "Failed to create user" }))
            }
        }
    }
}

#[tracing::instrument(
    name = "Registering an early-access signup",
    skip(form, store),
    fields(signup_email = tracing::field::Empty)
)]
#[post("/signup")]
pub async fn signup(
    form: web::Form<SignupForm>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, SignupError> {
    // Server-side re-validation: the client runs the same rules, but only
    // this pass is authoritative.
    let new_signup: NewSignup = form.0.try_into().map_err(SignupError::Validation)?;
    tracing::Span::current().record(
        "signup_email",
        &tracing::field::display(new_signup.email.as_ref()),
    );

    store_signup(store.get_ref(), &new_signup).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, "/thank-you"))
        .finish())
}

#[tracing::instrument(name = "Saving signup in the document store", skip(store, new_signup))]
pub async fn store_signup(
    store: &dyn DocumentStore,
    new_signup: &NewSignup,
) -> Result<String, StoreError> {
    store
        .create(USERS_COLLECTION, new_signup.to_document())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create signup document: {:?}", e);
            e
        })
}
