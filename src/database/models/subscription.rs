use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// 订阅关系：subscriber_id 指向 subscribed_to_id 的有向边
/// 唯一性与自订阅约束由存储层负责
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subscription {
    pub subscription_id: Uuid,
    pub subscriber_id: Uuid,
    pub subscribed_to_id: Uuid,
    pub created_at: DateTime<Utc>,
}
