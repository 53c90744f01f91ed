use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 创建观看记录请求
#[derive(Debug, Deserialize)]
pub struct CreateViewRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ViewerCountResponse {
    pub count: i64,
}
