use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use livehub_backend::{
    AppState,
    config::Config,
    middleware::{auth_middleware, log_errors},
    routes, services,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置数据库连接池
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    // 运行数据库迁移
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // 设置 Redis 客户端（会话缓存）
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");

    // 会话Cookie签名密钥，SESSION_SECRET至少32字节
    let cookie_key = Key::derive_from(config.session_secret.as_bytes());

    // 设置应用状态
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        redis: Arc::new(redis_client),
        cookie_key,
    };

    // 确保root管理员存在，首次启动时创建并输出生成的密码
    if let Err(e) = services::admin::ensure_root_admin(&pool, &state.config).await {
        tracing::error!("Failed to bootstrap root admin: {}", e);
    }

    // 公开路由：登录与注销
    let public_routes = Router::new()
        .route("/admins/login", post(routes::admin::handler::login))
        .route("/admins/logout", get(routes::admin::handler::logout));

    // 受保护路由：需要已认证的会话，权限范围在各个handler中检查
    let protected_routes = Router::new()
        .route(
            "/admins",
            get(routes::admin::handler::get_list_of_admins)
                .post(routes::admin::handler::create_admin),
        )
        .route(
            "/users",
            get(routes::user::handler::get_list_of_users).post(routes::user::handler::create_user),
        )
        .route("/users/count", get(routes::user::handler::get_number_of_users))
        .route(
            "/users/by-platform",
            get(routes::user::handler::get_user_by_platform),
        )
        .route(
            "/users/{user_id}",
            get(routes::user::handler::get_user_by_id).put(routes::user::handler::update_user),
        )
        .route(
            "/subscriptions",
            post(routes::user::handler::create_subscription),
        )
        .route(
            "/streams/{stream_id}/views",
            post(routes::stream::handler::create_view),
        )
        .route(
            "/streams/{stream_id}/viewers",
            get(routes::stream::handler::get_list_of_users_viewing_stream),
        )
        .route(
            "/streams/{stream_id}/viewers/count",
            get(routes::stream::handler::get_total_number_of_users_viewed_stream),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // 创建基础路由
    let router = Router::new().nest(
        &config.api_base_uri.clone(),
        Router::new().merge(public_routes).merge(protected_routes),
    );

    // 添加日志中间件
    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        let cors = tower_http::cors::CorsLayer::permissive();
        router.layer(cors)
    };

    // 添加应用状态
    let app = router.with_state(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
