//! User endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::validate_username;
use crate::domain::{User, UserCandidate, UserId};

/// Base path of the user resource; created users are located below it
pub const USERS_PATH: &str = "/api/users";

/// Query for looking a user up by username
#[derive(Debug, Clone, Deserialize)]
pub struct FindUserQuery {
    pub username: Option<String>,
}

fn user_location(id: &UserId) -> String {
    format!("{}/{}", USERS_PATH, id)
}

/// Ids accepted on PUT must be UUID shaped, the form minted on POST
fn parse_insert_id(id: &str) -> Result<UserId, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| {
        ApiError::bad_request(format!("'{}' is not a valid user ID", id)).with_param("id")
    })?;

    Ok(UserId::new(id)?)
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %id, "Getting user");

    let user_id = UserId::new(&id)?;

    let user = state
        .user_service
        .get_user_by_id(&user_id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(user))
}

/// GET /api/users/ without an id
pub async fn missing_user_id() -> ApiError {
    ApiError::bad_request("User ID cannot be empty").with_param("id")
}

/// GET /api/users?username=
pub async fn find_user(
    State(state): State<AppState>,
    Query(query): Query<FindUserQuery>,
) -> Result<Json<User>, ApiError> {
    let username = query.username.ok_or_else(|| {
        ApiError::bad_request("Query parameter 'username' is required").with_param("username")
    })?;

    debug!(username = %username, "Finding user by username");

    validate_username(&username)
        .map_err(|violation| ApiError::bad_request(violation.message).with_param("username"))?;

    let user = state
        .user_service
        .find_by_username(&username)
        .await
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", username)))?;

    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(candidate): Json<UserCandidate>,
) -> Result<impl IntoResponse, ApiError> {
    debug!(username = ?candidate.username, "Creating user");

    let id = state.user_service.create(&candidate).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, user_location(&id))]))
}

/// PUT /api/users/:id
pub async fn insert_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<UserCandidate>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %id, username = ?candidate.username, "Inserting user");

    let user_id = parse_insert_id(&id)?;

    state.user_service.insert(&user_id, &candidate).await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_location() {
        let id = UserId::new("777").unwrap();
        assert_eq!(user_location(&id), "/api/users/777");
    }

    #[test]
    fn test_parse_insert_id_accepts_uuid() {
        let id = parse_insert_id("2884a717-5a17-49fa-84cc-d4321207c7f9").unwrap();
        assert_eq!(id.as_str(), "2884a717-5a17-49fa-84cc-d4321207c7f9");
    }

    #[test]
    fn test_parse_insert_id_rejects_other_strings() {
        let err = parse_insert_id("444").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param.as_deref(), Some("id"));
    }
}
