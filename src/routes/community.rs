//! Community forum endpoints: posts and their comment threads.
//!
//! Posts list newest first for the feed; comments list oldest first so a
//! thread reads top to bottom.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::{
    ApiError, ApiResult, AppState, CommunityPost, NewCommunityPost, NewPostComment, PostComment,
};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/community-posts", post(create_post))
        .route("/api/community-posts", get(list_posts))
        .route("/api/post-comments", post(create_comment))
        .route("/api/post-comments", get(list_comments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadQuery {
    post_id: Option<String>,
}

async fn create_post(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewCommunityPost>, JsonRejection>,
) -> ApiResult<Json<CommunityPost>> {
    // ---
    let Json(new_post) = payload.map_err(|_| ApiError::Validation("Invalid community post data"))?;
    Ok(Json(store.create_community_post(new_post).await))
}

async fn list_posts(State((store, _)): State<AppState>) -> ApiResult<Json<Vec<CommunityPost>>> {
    // ---
    Ok(Json(store.get_community_posts().await))
}

async fn create_comment(
    State((store, _)): State<AppState>,
    payload: Result<Json<NewPostComment>, JsonRejection>,
) -> ApiResult<Json<PostComment>> {
    // ---
    let Json(new_comment) =
        payload.map_err(|_| ApiError::Validation("Invalid post comment data"))?;
    Ok(Json(store.create_post_comment(new_comment).await))
}

async fn list_comments(
    Query(params): Query<ThreadQuery>,
    State((store, _)): State<AppState>,
) -> ApiResult<Json<Vec<PostComment>>> {
    // ---
    let post_id = params
        .post_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::Validation("Post ID is required"))?;
    Ok(Json(store.get_post_comments(post_id).await))
}
