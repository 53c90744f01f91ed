use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// 观看记录：用户观看某个直播时创建
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct View {
    pub view_id: Uuid,
    pub user_id: Uuid,
    pub stream_id: Uuid,
    pub created_at: DateTime<Utc>,
}
