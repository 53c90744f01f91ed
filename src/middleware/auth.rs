use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use uuid::Uuid;

use crate::{
    AppState,
    cache::SessionStore,
    utils::{error_codes, error_to_api_response},
};

/// 认证中间件
/// 读取签名的会话Cookie，从缓存加载会话账户并注入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(&state.config.session_cookie_name) else {
        return unauthorized();
    };

    let Ok(user_id) = cookie.value().parse::<Uuid>() else {
        return unauthorized();
    };

    let account = match state.redis.get_account(user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return unauthorized(),
        Err(e) => {
            tracing::error!("Failed to read session cache: {}", e);
            return unauthorized();
        }
    };

    request.extensions_mut().insert(account);
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        error_to_api_response::<()>(error_codes::AUTH_FAILED, "未授权访问".to_string()),
    )
        .into_response()
}
