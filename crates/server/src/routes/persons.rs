use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use common::types::OpResult;
use serde_json::Value;
use service::{CreatePersonInput, UpdatePersonInput};
use tracing::info;

use crate::errors::JsonApiError;
use crate::links::{BaseUrl, PublicPerson};
use crate::openapi::{CreatePersonRequest, UpdatePersonRequest};
use crate::state::ServerState;

/// Numeric `{id}` path segment. Anything that is not an unsigned integer is
/// answered with 404, as if no route matched.
#[derive(Debug, Clone, Copy)]
pub struct PersonId(pub u64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PersonId {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<u64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| PersonId(id))
            .map_err(|e| JsonApiError::not_found(e.body_text()))
    }
}

// Read regardless of Content-Type; an empty or unparsable body is a bad request.
fn parse_body(body: &Bytes) -> Result<Value, JsonApiError> {
    if body.is_empty() {
        return Err(JsonApiError::bad_request("request body is required"));
    }
    serde_json::from_slice(body).map_err(|e| JsonApiError::bad_request(format!("invalid JSON body: {e}")))
}

#[utoipa::path(
    get, path = "/persons", tag = "persons",
    responses((status = 200, description = "All persons", body = [PublicPerson]))
)]
pub async fn list_persons(State(state): State<ServerState>, base: BaseUrl) -> Json<Vec<PublicPerson>> {
    let persons = state.persons.list().await;
    info!(event = "persons_listed", count = persons.len(), "list persons");
    Json(persons.iter().map(|p| PublicPerson::from_person(p, &base)).collect())
}

#[utoipa::path(
    get, path = "/persons/{id}", tag = "persons",
    params(("id" = u64, Path, description = "Person id")),
    responses(
        (status = 200, description = "OK", body = PublicPerson),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_person(
    State(state): State<ServerState>,
    base: BaseUrl,
    PersonId(id): PersonId,
) -> Result<Json<PublicPerson>, JsonApiError> {
    let person = state.persons.get(id).await?;
    Ok(Json(PublicPerson::from_person(&person, &base)))
}

#[utoipa::path(
    post, path = "/persons", tag = "persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Created", body = PublicPerson),
        (status = 400, description = "Bad Request")
    )
)]
pub async fn create_person(
    State(state): State<ServerState>,
    base: BaseUrl,
    body: Bytes,
) -> Result<(StatusCode, Json<PublicPerson>), JsonApiError> {
    let input = CreatePersonInput::from_json(parse_body(&body)?)?;
    let person = state.persons.create(input).await?;
    Ok((StatusCode::CREATED, Json(PublicPerson::from_person(&person, &base))))
}

#[utoipa::path(
    put, path = "/persons/{id}", tag = "persons",
    params(("id" = u64, Path, description = "Person id")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Updated", body = PublicPerson),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_person(
    State(state): State<ServerState>,
    base: BaseUrl,
    PersonId(id): PersonId,
    body: Bytes,
) -> Result<Json<PublicPerson>, JsonApiError> {
    // Unknown ids are reported before the body is looked at.
    state.persons.get(id).await?;
    let input = UpdatePersonInput::from_json(parse_body(&body)?)?;
    let person = state.persons.update(id, input).await?;
    Ok(Json(PublicPerson::from_person(&person, &base)))
}

#[utoipa::path(
    delete, path = "/persons/{id}", tag = "persons",
    params(("id" = u64, Path, description = "Person id")),
    responses((status = 200, description = "Deleted, or nothing to delete"))
)]
pub async fn delete_person(
    State(state): State<ServerState>,
    PersonId(id): PersonId,
) -> Result<Json<OpResult>, JsonApiError> {
    state.persons.delete(id).await?;
    Ok(Json(OpResult::ok()))
}
