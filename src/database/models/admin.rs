use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 权限范围，闭合枚举
/// 名称中不会出现权限串的分隔符，这是编码格式唯一依赖的约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Default,
    Metrics,
    Streams,
    Users,
    Admins,
    Settings,
}

/// 权限串分隔符
pub const PERMISSION_SEPARATOR: char = ';';

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Default => "DEFAULT",
            Scope::Metrics => "METRICS",
            Scope::Streams => "STREAMS",
            Scope::Users => "USERS",
            Scope::Admins => "ADMINS",
            Scope::Settings => "SETTINGS",
        }
    }

    /// root管理员拥有的全部权限
    pub fn all() -> Vec<Scope> {
        vec![
            Scope::Metrics,
            Scope::Streams,
            Scope::Users,
            Scope::Admins,
            Scope::Settings,
            Scope::Default,
        ]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的权限名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScope(pub String);

impl fmt::Display for UnknownScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scope: {}", self.0)
    }
}

impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(Scope::Default),
            "METRICS" => Ok(Scope::Metrics),
            "STREAMS" => Ok(Scope::Streams),
            "USERS" => Ok(Scope::Users),
            "ADMINS" => Ok(Scope::Admins),
            "SETTINGS" => Ok(Scope::Settings),
            other => Err(UnknownScope(other.to_string())),
        }
    }
}

/// 把权限序列编码成持久化用的分隔字符串
pub fn wrap_permissions(permissions: &[Scope]) -> String {
    permissions
        .iter()
        .map(|scope| scope.as_str())
        .collect::<Vec<_>>()
        .join(&PERMISSION_SEPARATOR.to_string())
}

/// 把持久化的权限串解码回权限序列
pub fn unwrap_permissions(raw: &str) -> Result<Vec<Scope>, UnknownScope> {
    raw.split(PERMISSION_SEPARATOR).map(Scope::from_str).collect()
}

/// 管理员数据库实体
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String,
    /// 分隔字符串形式的权限
    pub permissions: String,
    pub created_at: DateTime<Utc>,
}

/// 管理员的普通值投影，权限解开为数组，不携带密码散列
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    pub user_id: Uuid,
    pub username: String,
    pub permissions: Vec<Scope>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AdminEntity> for Admin {
    type Error = UnknownScope;

    fn try_from(entity: AdminEntity) -> Result<Self, Self::Error> {
        let permissions = unwrap_permissions(&entity.permissions)?;
        Ok(Admin {
            user_id: entity.user_id,
            username: entity.username,
            permissions,
            created_at: entity.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_joins_with_separator() {
        let encoded = wrap_permissions(&[Scope::Metrics, Scope::Default]);
        assert_eq!(encoded, "METRICS;DEFAULT");
    }

    #[test]
    fn wrap_unwrap_round_trip() {
        let permissions = vec![Scope::Metrics, Scope::Streams, Scope::Admins, Scope::Default];
        let decoded = unwrap_permissions(&wrap_permissions(&permissions)).unwrap();
        assert_eq!(decoded, permissions);
    }

    #[test]
    fn unwrap_rejects_unknown_scope() {
        let err = unwrap_permissions("METRICS;BOGUS").unwrap_err();
        assert_eq!(err, UnknownScope("BOGUS".to_string()));
    }

    #[test]
    fn unwrap_rejects_empty_string() {
        // 每个管理员至少持有DEFAULT权限，空权限串视为数据损坏
        assert!(unwrap_permissions("").is_err());
    }

    #[test]
    fn scope_serde_uses_screaming_case() {
        assert_eq!(serde_json::to_string(&Scope::Default).unwrap(), "\"DEFAULT\"");
        let scope: Scope = serde_json::from_str("\"METRICS\"").unwrap();
        assert_eq!(scope, Scope::Metrics);
    }

    #[test]
    fn scope_names_never_contain_separator() {
        for scope in Scope::all() {
            assert!(!scope.as_str().contains(PERMISSION_SEPARATOR));
        }
    }

    #[test]
    fn admin_projection_hides_password_hash() {
        let entity = AdminEntity {
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            permissions: "METRICS;DEFAULT".into(),
            created_at: Utc::now(),
        };
        let admin = Admin::try_from(entity).unwrap();
        assert_eq!(admin.permissions, vec![Scope::Metrics, Scope::Default]);

        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["permissions"][0], "METRICS");
    }
}
