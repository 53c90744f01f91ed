// 数据库模块
// 包含数据库实体定义和存储库操作

pub mod models;
pub mod repositories;

use std::fmt;

use serde::Deserialize;

// 重新导出常用类型，方便其他模块使用
pub use models::admin::{Admin, AdminEntity, Scope};
pub use models::user::{User, UserEntity};
pub use repositories::admin::AdminRepository;
pub use repositories::user::UserRepository;

/// 列表查询的排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 存储层错误，带明确的错误类别标签
/// 调用方根据类别来决定HTTP状态，不需要猜测底层错误类型
#[derive(Debug)]
pub enum StoreError {
    /// 引用的用户不存在
    UserNotFound,
    /// 引用的直播不存在
    StreamNotFound,
    /// 持久化的权限串无法解析
    InvalidPermissions(String),
    /// 密码散列计算失败
    PasswordHash(String),
    /// 底层数据库错误
    Database(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UserNotFound => write!(f, "User not found"),
            StoreError::StreamNotFound => write!(f, "Stream not found"),
            StoreError::InvalidPermissions(raw) => {
                write!(f, "invalid permissions encoding: {}", raw)
            }
            StoreError::PasswordHash(e) => write!(f, "password hashing error: {}", e),
            StoreError::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(e: bcrypt::BcryptError) -> Self {
        StoreError::PasswordHash(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_defaults_to_asc() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }

    #[test]
    fn sort_order_deserializes_lowercase() {
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(order, SortOrder::Desc);
    }

    #[test]
    fn password_hash_failure_keeps_its_own_kind() {
        // 散列失败不能伪装成数据库错误
        let err = StoreError::PasswordHash("cost out of range".into());
        assert_eq!(err.to_string(), "password hashing error: cost out of range");
        assert!(!matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn not_found_kinds_have_distinct_messages() {
        // 缺失用户和缺失直播必须能从错误信息中区分
        assert_eq!(StoreError::UserNotFound.to_string(), "User not found");
        assert_eq!(StoreError::StreamNotFound.to_string(), "Stream not found");
        assert_ne!(
            StoreError::UserNotFound.to_string(),
            StoreError::StreamNotFound.to_string()
        );
    }
}
