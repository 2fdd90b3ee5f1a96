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

pub async fn filter_even(
    Extension(subject): Extension<AuthenticatedSubject>,
    payload: Result<Json<NumbersRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<FilterEvenResponseData>, ApiError> {
    let Json(body) = payload?;
    tracing::debug!(
        subject = %subject.username(),
        count = body.numbers.len(),
        "Filtering even numbers"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        FilterEvenResponseData {
            even_numbers: operations::filter_even(&body.numbers),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEvenResponseData {
    pub even_numbers: Vec<i64>,
}
