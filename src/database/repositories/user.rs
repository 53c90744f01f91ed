use sqlx::PgPool;
use uuid::Uuid;

use crate::database::SortOrder;
use crate::database::models::user::{UserEntity, UserParticulars, UserUpdates};

const USER_COLUMNS: &str = "user_id, platform_type, platform_id, username, \
                            alias, email, description, created_at, updated_at";

/// 用户存储库实现
pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        pool: &PgPool,
        particulars: &UserParticulars,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (platform_type, platform_id, username, alias, email, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, platform_type, platform_id, username,
                      alias, email, description, created_at, updated_at
            "#,
        )
        .bind(&particulars.platform_type)
        .bind(&particulars.platform_id)
        .bind(&particulars.username)
        .bind(particulars.alias.as_deref())
        .bind(particulars.email.as_deref())
        .bind(particulars.description.as_deref())
        .fetch_one(pool)
        .await
    }

    /// 根据平台身份查找用户
    pub async fn find_by_platform(
        pool: &PgPool,
        platform_type: &str,
        platform_id: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT user_id, platform_type, platform_id, username,
                   alias, email, description, created_at, updated_at
            FROM users
            WHERE platform_type = $1 AND platform_id = $2
            "#,
        )
        .bind(platform_type)
        .bind(platform_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT user_id, platform_type, platform_id, username,
                   alias, email, description, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// 按用户名排序列出所有用户
    pub async fn list(pool: &PgPool, order: SortOrder) -> Result<Vec<UserEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY username {}",
            USER_COLUMNS,
            order.as_sql()
        );
        sqlx::query_as::<_, UserEntity>(&sql).fetch_all(pool).await
    }

    /// 部分更新用户资料，返回None表示用户不存在
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        updates: &UserUpdates,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                alias = COALESCE($3, alias),
                email = COALESCE($4, email),
                description = COALESCE($5, description),
                updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, platform_type, platform_id, username,
                      alias, email, description, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(updates.username.as_deref())
        .bind(updates.alias.as_deref())
        .bind(updates.email.as_deref())
        .bind(updates.description.as_deref())
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
