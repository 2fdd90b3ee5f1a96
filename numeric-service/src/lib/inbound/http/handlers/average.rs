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

pub async fn average(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<NumbersRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AverageResponseData>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Averaging numbers"
    );

    operations::average(&body.numbers)
        .map_err(ApiError::from)
        .map(|average| ApiSuccess::new(StatusCode::OK, AverageResponseData { average }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageResponseData {
    pub average: f64,
}
