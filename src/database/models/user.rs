use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 用户数据库实体
/// 用户身份按 (platform_type, platform_id) 唯一
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub user_id: Uuid,
    pub platform_type: String,
    pub platform_id: String,
    pub username: String,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 用户的普通值投影，对外响应使用的格式化形式
/// 不携带存储内部的元数据字段
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub user_id: Uuid,
    pub platform_type: String,
    pub platform_id: String,
    pub username: String,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        User {
            user_id: entity.user_id,
            platform_type: entity.platform_type,
            platform_id: entity.platform_id,
            username: entity.username,
            alias: entity.alias,
            email: entity.email,
            description: entity.description,
            created_at: entity.created_at,
        }
    }
}

/// 创建用户的基本资料
#[derive(Debug, Clone, Deserialize)]
pub struct UserParticulars {
    pub platform_type: String,
    pub platform_id: String,
    pub username: String,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

/// 更新用户的部分资料，None表示保持原值
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdates {
    pub username: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> UserEntity {
        UserEntity {
            user_id: Uuid::new_v4(),
            platform_type: "facebook".into(),
            platform_id: "1234567890".into(),
            username: "alice@example.com".into(),
            alias: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn formatted_user_carries_exactly_the_public_fields() {
        let user = User::from(entity());
        let json = serde_json::to_value(&user).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "alias",
                "created_at",
                "description",
                "email",
                "platform_id",
                "platform_type",
                "user_id",
                "username",
            ]
        );
    }

    #[test]
    fn projection_keeps_platform_identity() {
        let entity = entity();
        let user = User::from(entity.clone());
        assert_eq!(user.user_id, entity.user_id);
        assert_eq!(user.platform_type, entity.platform_type);
        assert_eq!(user.platform_id, entity.platform_id);
    }
}
