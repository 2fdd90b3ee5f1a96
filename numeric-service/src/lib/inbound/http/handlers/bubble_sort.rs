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

pub async fn bubble_sort(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<NumbersRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<BubbleSortResponseData>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Sorting numbers"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        BubbleSortResponseData {
            numbers: operations::sort(body.numbers),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BubbleSortResponseData {
    pub numbers: Vec<i64>,
}
