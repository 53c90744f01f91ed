use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    /// 会话Cookie签名密钥，长度至少32字节
    pub session_secret: String,
    pub session_cookie_name: String,
    pub root_admin_username: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            session_secret: env::var("SESSION_SECRET")?,
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "livehub_sid".into()),
            root_admin_username: env::var("ROOT_ADMIN_USERNAME")
                .unwrap_or_else(|_| "root".into()),
        })
    }
}
