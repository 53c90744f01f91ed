use std::sync::Arc;

use redis::{AsyncCommands, Client as RedisClient};
use uuid::Uuid;

use crate::cache::keys::admin_session_key;
use crate::cache::models::session::SessionAccount;

/// 会话存储操作
/// 生产环境由Redis客户端实现，测试可用内存实现替换
pub trait SessionStore {
    /// 写入会话账户
    /// 不设置过期时间，会话在注销时显式删除
    fn cache_account(
        &self,
        account: &SessionAccount,
    ) -> impl Future<Output = Result<(), redis::RedisError>> + Send;

    /// 获取会话账户
    fn get_account(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<SessionAccount>, redis::RedisError>> + Send;

    /// 删除会话账户
    fn remove_account(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<(), redis::RedisError>> + Send;
}

impl SessionStore for Arc<RedisClient> {
    async fn cache_account(&self, account: &SessionAccount) -> Result<(), redis::RedisError> {
        let mut conn = self.get_multiplexed_async_connection().await?;

        let key = admin_session_key(account.user_id);
        let json = serde_json::to_string(account).map_err(|e| {
            redis::RedisError::from((redis::ErrorKind::IoError, "序列化错误", e.to_string()))
        })?;

        let _: () = conn.set(key, json).await?;

        Ok(())
    }

    async fn get_account(&self, user_id: Uuid) -> Result<Option<SessionAccount>, redis::RedisError> {
        let mut conn = self.get_multiplexed_async_connection().await?;

        let key = admin_session_key(user_id);
        let result: Option<String> = conn.get(key).await?;

        match result {
            Some(json) => {
                let account = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::IoError,
                        "反序列化错误",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    async fn remove_account(&self, user_id: Uuid) -> Result<(), redis::RedisError> {
        let mut conn = self.get_multiplexed_async_connection().await?;

        let key = admin_session_key(user_id);
        let _: () = conn.del(key).await?;

        Ok(())
    }
}
