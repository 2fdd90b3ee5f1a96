use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::errors::PasswordError;
use crate::domain::identity::errors::UsernameError;
use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::IdentityRecord;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::Username;
use crate::inbound::http::router::AppState;

/// Shape hint for rejected credential bodies. Field values are never echoed.
pub const CREDENTIALS_SHAPE: &str =
    "Request body must be a JSON object with string fields `username` and `password`";

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) =
        payload.map_err(|_| ApiError::UnprocessableEntity(CREDENTIALS_SHAPE.to_string()))?;

    state
        .identity_service
        .register(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::CREATED, record.into()))
}

/// HTTP request body for register and login (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequestBody {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ParseCredentialsRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl CredentialsRequestBody {
    pub(crate) fn try_into_credentials(
        self,
    ) -> Result<Credentials, ParseCredentialsRequestError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(Credentials::new(username, password))
    }
}

impl From<ParseCredentialsRequestError> for ApiError {
    fn from(err: ParseCredentialsRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
}

impl From<&IdentityRecord> for RegisterResponseData {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            username: record.username.as_str().to_string(),
        }
    }
}
