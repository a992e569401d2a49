use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use service::people::domain::Person;

use crate::{errors::ApiError, state::AppState};

/// Only `application/json` bodies are read as a payload; anything else counts
/// as an empty object.
fn json_payload<'a>(headers: &HeaderMap, body: &'a Bytes) -> &'a [u8] {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if is_json { &body[..] } else { &[] }
}

#[utoipa::path(
    get, path = "/people", tag = "people",
    responses(
        (status = 200, description = "All people", body = [crate::openapi::PersonDoc]),
        (status = 400, description = "Request Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.people.list().await?))
}

#[utoipa::path(
    post, path = "/people", tag = "people",
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PersonDoc),
        (status = 400, description = "Request Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(state.people.create(json_payload(&headers, &body)).await?))
}

#[utoipa::path(
    get, path = "/people/{id}", tag = "people",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 200, description = "The person, or null when absent", body = crate::openapi::PersonDoc),
        (status = 400, description = "Request Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Person>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.people.get(&id).await?))
}

#[utoipa::path(
    put, path = "/people/{id}", tag = "people",
    params(("id" = String, Path, description = "Person ID")),
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 200, description = "Updated person, or null when absent", body = crate::openapi::PersonDoc),
        (status = 400, description = "Request Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Option<Person>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.people.replace(&id, json_payload(&headers, &body)).await?))
}

/// Answers 204 and still attaches the deleted record as JSON; the HTTP
/// connection layer drops a 204 payload on the wire.
#[utoipa::path(
    delete, path = "/people/{id}", tag = "people",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 204, description = "Deleted person, or null when absent", body = crate::openapi::PersonDoc),
        (status = 400, description = "Request Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let deleted = state.people.delete(&id).await?;
    Ok((StatusCode::NO_CONTENT, Json(deleted)).into_response())
}
