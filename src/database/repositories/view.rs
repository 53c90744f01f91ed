use sqlx::PgPool;
use uuid::Uuid;

use crate::database::StoreError;
use crate::database::models::user::UserEntity;
use crate::database::models::view::View;
use crate::database::repositories::user::UserRepository;

/// 观看记录存储库实现
pub struct ViewRepository;

impl ViewRepository {
    /// 创建观看记录
    /// 先显式检查外键目标，返回带类别的错误，而不是让调用方猜测约束冲突
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        stream_id: Uuid,
    ) -> Result<View, StoreError> {
        if !UserRepository::exists(pool, user_id).await? {
            return Err(StoreError::UserNotFound);
        }

        let stream_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM streams WHERE stream_id = $1)",
        )
        .bind(stream_id)
        .fetch_one(pool)
        .await?;
        if !stream_exists {
            return Err(StoreError::StreamNotFound);
        }

        let view = sqlx::query_as::<_, View>(
            r#"
            INSERT INTO views (user_id, stream_id)
            VALUES ($1, $2)
            RETURNING view_id, user_id, stream_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(stream_id)
        .fetch_one(pool)
        .await?;

        Ok(view)
    }

    /// 列出正在观看某直播的用户，只取用户列，不带连接产物
    pub async fn list_viewers(
        pool: &PgPool,
        stream_id: Uuid,
    ) -> Result<Vec<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT DISTINCT ON (u.user_id)
                   u.user_id, u.platform_type, u.platform_id, u.username,
                   u.alias, u.email, u.description, u.created_at, u.updated_at
            FROM users u
            JOIN views v ON v.user_id = u.user_id
            WHERE v.stream_id = $1
            ORDER BY u.user_id
            "#,
        )
        .bind(stream_id)
        .fetch_all(pool)
        .await
    }

    /// 统计观看过某直播的用户总数
    pub async fn count_viewers(pool: &PgPool, stream_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM views WHERE stream_id = $1",
        )
        .bind(stream_id)
        .fetch_one(pool)
        .await
    }
}
