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

pub async fn sum_elements(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<NumbersRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SumElementsResponseData>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Summing numbers"
    );

    operations::sum(&body.numbers)
        .map_err(ApiError::from)
        .map(|sum| ApiSuccess::new(StatusCode::OK, SumElementsResponseData { sum }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SumElementsResponseData {
    pub sum: i64,
}
