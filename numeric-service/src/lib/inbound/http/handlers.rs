use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::identity::errors::AuthorizationError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::numeric::errors::NumericError;

pub mod average;
pub mod binary_search;
pub mod bubble_sort;
pub mod filter_even;
pub mod health;
pub mod login;
pub mod max_value;
pub mod register;
pub mod sum_elements;

/// Single message for every authorization gate rejection.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid authentication credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { detail: message })).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::DuplicateUser(_) => ApiError::Conflict(err.to_string()),
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::InvalidUsername(_) | IdentityError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            IdentityError::Hashing(_)
            | IdentityError::TokenIssuance(_)
            | IdentityError::Storage(_)
            | IdentityError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Storage(msg) => ApiError::InternalServerError(msg),
            // Which stage failed stays in the logs
            _ => ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()),
        }
    }
}

impl From<NumericError> for ApiError {
    fn from(err: NumericError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// JSON body shared by the single-sequence numeric endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NumbersRequestBody {
    pub numbers: Vec<i64>,
}
