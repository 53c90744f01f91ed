use sqlx::PgPool;
use uuid::Uuid;

use crate::database::StoreError;
use crate::database::models::subscription::Subscription;
use crate::database::repositories::user::UserRepository;

/// 订阅存储库实现
pub struct SubscriptionRepository;

impl SubscriptionRepository {
    /// 创建订阅边，两端用户都必须存在
    pub async fn create(
        pool: &PgPool,
        subscriber_id: Uuid,
        subscribed_to_id: Uuid,
    ) -> Result<Subscription, StoreError> {
        if !UserRepository::exists(pool, subscriber_id).await?
            || !UserRepository::exists(pool, subscribed_to_id).await?
        {
            return Err(StoreError::UserNotFound);
        }

        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (subscriber_id, subscribed_to_id)
            VALUES ($1, $2)
            RETURNING subscription_id, subscriber_id, subscribed_to_id, created_at
            "#,
        )
        .bind(subscriber_id)
        .bind(subscribed_to_id)
        .fetch_one(pool)
        .await?;

        Ok(subscription)
    }
}
