use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    AppState,
    cache::SessionAccount,
    database::StoreError,
    database::models::admin::Scope,
    services,
    utils::{error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{CreateViewRequest, ViewerCountResponse};

#[axum::debug_handler]
pub async fn create_view(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
    Json(req): Json<CreateViewRequest>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Streams) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::create_view(&state.pool, req.user_id, stream_id).await {
        Ok(view) => (StatusCode::CREATED, success_to_api_response(view)),
        // 缺失用户与缺失直播返回可区分的提示
        Err(StoreError::UserNotFound) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "用户不存在".to_string()),
        ),
        Err(StoreError::StreamNotFound) => (
            StatusCode::NOT_FOUND,
            error_to_api_response(error_codes::NOT_FOUND, "直播不存在".to_string()),
        ),
        Err(e) => {
            tracing::error!("Unable to create view: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_list_of_users_viewing_stream(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Streams) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_list_of_users_viewing_stream(&state.pool, stream_id).await {
        Ok(users) => (StatusCode::OK, success_to_api_response(users)),
        Err(e) => {
            tracing::error!("Unable to get viewers of stream {}: {}", stream_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn get_total_number_of_users_viewed_stream(
    Extension(account): Extension<SessionAccount>,
    State(state): State<AppState>,
    Path(stream_id): Path<Uuid>,
) -> impl IntoResponse {
    if !account.has_scope(Scope::Streams) {
        return (
            StatusCode::FORBIDDEN,
            error_to_api_response(error_codes::PERMISSION_DENIED, "权限不足".to_string()),
        );
    }

    match services::user::get_total_number_of_users_viewed_stream(&state.pool, stream_id).await {
        Ok(count) => (
            StatusCode::OK,
            success_to_api_response(ViewerCountResponse { count }),
        ),
        Err(e) => {
            tracing::error!("Unable to count viewers of stream {}: {}", stream_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}
