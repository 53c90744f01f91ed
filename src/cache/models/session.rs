use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::admin::Scope;

/// 会话账户缓存数据模型
/// 登录成功时写入，认证中间件在每个请求上读取，注销时删除
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionAccount {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String,
    /// 解开后的权限数组
    pub scope: Vec<Scope>,
    pub created_at: i64, // Unix timestamp
}

impl SessionAccount {
    pub fn new(user_id: Uuid, username: String, password_hash: String, scope: Vec<Scope>) -> Self {
        SessionAccount {
            user_id,
            username,
            password_hash,
            scope,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scope.contains(&scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> SessionAccount {
        SessionAccount::new(
            Uuid::new_v4(),
            "alice".into(),
            "$2b$10$abcdefghijklmnopqrstuv".into(),
            vec![Scope::Metrics, Scope::Default],
        )
    }

    #[test]
    fn scope_membership() {
        let account = account();
        assert!(account.has_scope(Scope::Metrics));
        assert!(account.has_scope(Scope::Default));
        assert!(!account.has_scope(Scope::Admins));
    }

    #[test]
    fn serde_round_trip() {
        let account = account();
        let json = serde_json::to_string(&account).unwrap();
        let restored: SessionAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.user_id, account.user_id);
        assert_eq!(restored.scope, account.scope);
        assert_eq!(restored.password_hash, account.password_hash);
    }

    #[test]
    fn scope_serializes_as_string_array() {
        let json = serde_json::to_value(&account()).unwrap();
        assert_eq!(json["scope"][0], "METRICS");
        assert_eq!(json["scope"][1], "DEFAULT");
    }
}
