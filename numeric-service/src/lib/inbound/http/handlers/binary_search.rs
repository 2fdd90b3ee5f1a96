use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::AuthenticatedSubject;
use crate::domain::numeric::models::SearchOutcome;
use crate::domain::numeric::operations;

/// `numbers` must be sorted ascending; this is not re-verified.
pub async fn binary_search(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<BinarySearchRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SearchOutcome>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Binary search"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        operations::binary_search(&body.numbers, body.target),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinarySearchRequestBody {
    pub numbers: Vec<i64>,
    pub target: i64,
}
