use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::SortOrder;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub order: SortOrder,
}

/// 按平台身份查找用户的查询参数
#[derive(Debug, Deserialize)]
pub struct GetUserByPlatformQuery {
    pub platform_type: String,
    pub platform_id: String,
}

#[derive(Debug, Serialize)]
pub struct UserCountResponse {
    pub count: i64,
}

/// 创建订阅请求：subscribe_from 订阅 subscribe_to
#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub subscribe_from: Uuid,
    pub subscribe_to: Uuid,
}
