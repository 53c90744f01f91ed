use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::SortOrder;
use crate::database::models::admin::{AdminEntity, Scope};

/// 账户请求载荷，登录与创建管理员共用同一份校验规则
#[derive(Debug, Deserialize)]
pub struct AccountRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<Scope>,
}

/// 管理员账户响应
/// 密码字段回写为请求中的明文（绝不返回散列），权限为数组形式
#[derive(Debug, Serialize)]
pub struct AdminAccountResponse {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
    pub permissions: Vec<Scope>,
    pub created_at: DateTime<Utc>,
}

impl AdminAccountResponse {
    pub fn from_entity(
        entity: AdminEntity,
        plaintext_password: String,
        permissions: Vec<Scope>,
    ) -> Self {
        AdminAccountResponse {
            user_id: entity.user_id,
            username: entity.username,
            password: plaintext_password,
            permissions,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListAdminsQuery {
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_request_permissions_default_to_empty() {
        let req: AccountRequest =
            serde_json::from_str(r#"{"username":"u","password":"p"}"#).unwrap();
        assert!(req.permissions.is_empty());
    }

    #[test]
    fn account_request_accepts_known_permissions_only() {
        let req: AccountRequest = serde_json::from_str(
            r#"{"username":"u","password":"p","permissions":["METRICS","ADMINS"]}"#,
        )
        .unwrap();
        assert_eq!(req.permissions, vec![Scope::Metrics, Scope::Admins]);

        let bad = serde_json::from_str::<AccountRequest>(
            r#"{"username":"u","password":"p","permissions":["BOGUS"]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn response_carries_plaintext_password_never_the_hash() {
        let entity = AdminEntity {
            user_id: Uuid::new_v4(),
            username: "u".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            permissions: "METRICS;DEFAULT".into(),
            created_at: Utc::now(),
        };
        let response = AdminAccountResponse::from_entity(
            entity,
            "p".into(),
            vec![Scope::Metrics, Scope::Default],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["password"], "p");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["permissions"][0], "METRICS");
        assert_eq!(json["permissions"][1], "DEFAULT");
    }
}
