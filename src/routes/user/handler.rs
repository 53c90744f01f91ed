use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    AppState,
    cache::SessionAccount,
    database::StoreError,
    database::models::admin::Scope,
    database::models::user::{UserParticulars, UserUpdates},
    services,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{
    CreateSubscriptionRequest, GetUserByPlatformQuery, ListUsersQuery, UserCountResponse,
};

#[axum::debug_handler]
pub async fn create_user(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Json(req): Json<UserParticulars>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::create_new_user(&state.pool, req).await {
        Ok(user) => (StatusCode::CREATED, success_to_api_response(user)),
        Err(e) => {
            tracing::error!("Unable to create user: {}", e);
            (
                StatusCode::BAD_REQUEST,
                error_to_api_response(error_codes::INTERNAL_ERROR, "创建用户失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_list_of_users(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_list_of_users(&state.pool, query.order).await {
        Ok(users) => (StatusCode::OK, success_to_api_response(users)),
        Err(e) => {
            tracing::error!("Unable to get list of users: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_number_of_users(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_number_of_users(&state.pool).await {
        Ok(count) => (
            StatusCode::OK,
            success_to_api_response(UserCountResponse { count }),
        ),
        Err(e) => {
            tracing::error!("Unable to count users: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_user_by_platform(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Query(query): Query<GetUserByPlatformQuery>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_user_by_platform(&state.pool, &query.platform_type, &query.platform_id)
        .await
    {
        Ok(Some(user)) => (StatusCode::OK, success_to_api_response(user)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "用户不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!(
                "Unable to get user by platform {}/{}: {}",
                query.platform_type,
                query.platform_id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_user_by_id(&state.pool, user_id).await {
        Ok(Some(user)) => (StatusCode::OK, success_to_api_response(user)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "用户不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!("Unable to get user {}: {}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn update_user(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UserUpdates>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::update_user(&state.pool, user_id, req).await {
        Ok(user) => (StatusCode::OK, success_to_api_response(user)),
        Err(StoreError::UserNotFound) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "用户不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!("Unable to update user {}: {}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn create_subscription(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Users) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::create_subscription(&state.pool, req.subscribe_from, req.subscribe_to)
        .await
    {
        Ok(subscription) => (StatusCode::CREATED, success_to_api_response(subscription)),
        Err(StoreError::UserNotFound) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "用户不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!(
                "Unable to create subscription from {} to {}: {}",
                req.subscribe_from,
                req.subscribe_to,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}
