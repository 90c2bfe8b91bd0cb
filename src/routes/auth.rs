//! Login and signup endpoints.
//!
//! Passwords are bcrypt-hashed before they reach the store and the hash
//! never serializes back out, so every response here is already safe to
//! hand to the client. Login deliberately reports the same message for an
//! unknown username and a wrong password.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::{ApiError, ApiResult, AppState, NewUser, User};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State((store, _)): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    // ---
    let Json(credentials) =
        payload.map_err(|_| ApiError::Validation("Username and password are required"))?;
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::Validation("Username and password are required"));
    }

    let user = store
        .get_user_by_username(&credentials.username)
        .await
        .ok_or(ApiError::InvalidCredentials)?;

    let password_matches = bcrypt::verify(&credentials.password, &user.password_hash)
        .map_err(|e| ApiError::internal("Login failed", e))?;
    if !password_matches {
        return Err(ApiError::InvalidCredentials);
    }

    tracing::info!(username = %user.username, "Login succeeded");
    Ok(Json(user))
}

async fn signup(
    State((store, config)): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<Json<User>> {
    // ---
    let Json(new_user) = payload.map_err(|_| ApiError::Validation("Invalid user data"))?;

    if store
        .get_user_by_username(&new_user.username)
        .await
        .is_some()
    {
        return Err(ApiError::Conflict("Username already exists"));
    }

    let password_hash = bcrypt::hash(&new_user.password, config.bcrypt_cost)
        .map_err(|e| ApiError::internal("Failed to create user", e))?;

    let user = store.create_user(new_user, password_hash).await;
    tracing::info!(username = %user.username, "Account created");
    Ok(Json(user))
}
