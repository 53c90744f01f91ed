use sqlx::PgPool;

use crate::database::SortOrder;
use crate::database::models::admin::AdminEntity;

/// 管理员存储库实现
pub struct AdminRepository;

impl AdminRepository {
    /// 创建管理员，permissions为已编码的权限串
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        permissions: &str,
    ) -> Result<AdminEntity, sqlx::Error> {
        sqlx::query_as::<_, AdminEntity>(
            r#"
            INSERT INTO admins (username, password_hash, permissions)
            VALUES ($1, $2, $3)
            RETURNING user_id, username, password_hash, permissions, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(permissions)
        .fetch_one(pool)
        .await
    }

    /// 根据用户名查找管理员
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AdminEntity>, sqlx::Error> {
        sqlx::query_as::<_, AdminEntity>(
            r#"
            SELECT user_id, username, password_hash, permissions, created_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// 按用户名排序列出所有管理员
    pub async fn list(pool: &PgPool, order: SortOrder) -> Result<Vec<AdminEntity>, sqlx::Error> {
        let sql = format!(
            "SELECT user_id, username, password_hash, permissions, created_at \
             FROM admins ORDER BY username {}",
            order.as_sql()
        );
        sqlx::query_as::<_, AdminEntity>(&sql).fetch_all(pool).await
    }
}
