use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::NumbersRequestBody;
use crate::domain::identity::models::AuthenticatedSubject;
use crate::domain::numeric::operations;

pub async fn max_value(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<NumbersRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<MaxValueResponseData>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Finding maximum"
    );

    operations::max(&body.numbers)
        .map_err(ApiError::from)
        .map(|max| ApiSuccess::new(StatusCode::OK, MaxValueResponseData { max }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxValueResponseData {
    pub max: i64,
}
