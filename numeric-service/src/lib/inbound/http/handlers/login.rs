use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::register::CredentialsRequestBody;
use super::register::CREDENTIALS_SHAPE;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IssuedToken;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) =
        payload.map_err(|_| ApiError::UnprocessableEntity(CREDENTIALS_SHAPE.to_string()))?;

    // A username or password that could never have been registered is just wrong
    let credentials = body
        .try_into_credentials()
        .map_err(|_| ApiError::from(IdentityError::InvalidCredentials))?;

    state
        .identity_service
        .login(credentials)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<IssuedToken> for LoginResponseData {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
        }
    }
}
