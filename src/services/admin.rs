use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{SessionAccount, SessionStore};
use crate::config::Config;
use crate::database::models::admin::{
    unwrap_permissions, wrap_permissions, Admin, AdminEntity, Scope, UnknownScope,
};
use crate::database::repositories::admin::AdminRepository;
use crate::database::{SortOrder, StoreError};
use crate::services::ServiceResult;
use crate::utils::{hash_password, random_password, verify_password};

/// 校验管理员凭据
/// 用户名不存在和密码不匹配都返回 Ok(None)，不区分失败原因
pub async fn authenticate_admin(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> ServiceResult<Option<AdminEntity>> {
    let Some(admin) = AdminRepository::find_by_username(pool, username).await? else {
        return Ok(None);
    };

    match verify_password(password, &admin.password_hash) {
        Ok(true) => Ok(Some(admin)),
        Ok(false) => Ok(None),
        Err(e) => {
            tracing::error!("Failed to verify password for admin {}: {}", username, e);
            Ok(None)
        }
    }
}

/// 认证通过后建立会话：解开权限并写入会话缓存
/// 认证失败（None）时不触碰缓存；缓存写入失败只记录日志，不阻塞登录
pub async fn open_session<S: SessionStore>(
    store: &S,
    admin: Option<&AdminEntity>,
) -> Result<Option<SessionAccount>, UnknownScope> {
    let Some(admin) = admin else {
        return Ok(None);
    };

    let permissions = unwrap_permissions(&admin.permissions)?;
    let account = SessionAccount::new(
        admin.user_id,
        admin.username.clone(),
        admin.password_hash.clone(),
        permissions,
    );

    if let Err(e) = store.cache_account(&account).await {
        tracing::error!("Failed to cache session for admin {}: {}", account.username, e);
    }

    Ok(Some(account))
}

/// 注销时删除缓存里的会话，和登录保持对称
pub async fn close_session<S: SessionStore>(store: &S, user_id: Uuid) {
    if let Err(e) = store.remove_account(user_id).await {
        tracing::error!("Failed to remove session from cache: {}", e);
    }
}

/// 创建管理员，permissions为已编码的权限串
pub async fn create_new_admin(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    permissions: &str,
) -> ServiceResult<AdminEntity> {
    tracing::debug!("Creating new admin: {}", username);

    Ok(AdminRepository::create(pool, username, password_hash, permissions).await?)
}

/// 获取管理员列表，权限解开为数组形式
pub async fn get_list_of_admins(pool: &PgPool, order: SortOrder) -> ServiceResult<Vec<Admin>> {
    tracing::debug!("Getting list of admins, order: {:?}", order);

    let entities = AdminRepository::list(pool, order).await?;
    entities
        .into_iter()
        .map(|entity| {
            Admin::try_from(entity).map_err(|e| {
                tracing::error!("Corrupt admin permissions in storage: {}", e);
                StoreError::InvalidPermissions(e.0)
            })
        })
        .collect()
}

/// 启动时保证root管理员存在
/// 首次创建时生成随机密码并在日志中输出一次
pub async fn ensure_root_admin(pool: &PgPool, config: &Config) -> ServiceResult<()> {
    if AdminRepository::find_by_username(pool, &config.root_admin_username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password = random_password(20);
    let password_hash = hash_password(&password)?;
    let permissions = wrap_permissions(&Scope::all());

    let admin =
        AdminRepository::create(pool, &config.root_admin_username, &password_hash, &permissions)
            .await?;

    tracing::warn!(
        "Created root admin '{}' with generated password: {}",
        admin.username,
        password
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    /// 内存会话存储，记录每次写入与删除
    #[derive(Default)]
    struct MemorySessionStore {
        entries: Mutex<HashMap<Uuid, SessionAccount>>,
        writes: Mutex<u32>,
    }

    impl SessionStore for MemorySessionStore {
        async fn cache_account(&self, account: &SessionAccount) -> Result<(), redis::RedisError> {
            *self.writes.lock().unwrap() += 1;
            self.entries
                .lock()
                .unwrap()
                .insert(account.user_id, account.clone());
            Ok(())
        }

        async fn get_account(
            &self,
            user_id: Uuid,
        ) -> Result<Option<SessionAccount>, redis::RedisError> {
            Ok(self.entries.lock().unwrap().get(&user_id).cloned())
        }

        async fn remove_account(&self, user_id: Uuid) -> Result<(), redis::RedisError> {
            self.entries.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    /// 写入永远失败的会话存储
    struct BrokenSessionStore;

    impl SessionStore for BrokenSessionStore {
        async fn cache_account(&self, _account: &SessionAccount) -> Result<(), redis::RedisError> {
            Err(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "连接失败",
            )))
        }

        async fn get_account(
            &self,
            _user_id: Uuid,
        ) -> Result<Option<SessionAccount>, redis::RedisError> {
            Ok(None)
        }

        async fn remove_account(&self, _user_id: Uuid) -> Result<(), redis::RedisError> {
            Ok(())
        }
    }

    fn admin_entity() -> AdminEntity {
        AdminEntity {
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            permissions: "METRICS;DEFAULT".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn login_caches_session_and_logout_removes_it() {
        let store = MemorySessionStore::default();
        let admin = admin_entity();

        let account = open_session(&store, Some(&admin)).await.unwrap().unwrap();
        assert_eq!(account.user_id, admin.user_id);
        assert_eq!(account.scope, vec![Scope::Metrics, Scope::Default]);
        assert!(store.get_account(admin.user_id).await.unwrap().is_some());

        close_session(&store, admin.user_id).await;
        assert!(store.get_account(admin.user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_authentication_never_touches_session_cache() {
        let store = MemorySessionStore::default();

        let account = open_session(&store, None).await.unwrap();
        assert!(account.is_none());
        assert_eq!(*store.writes.lock().unwrap(), 0);
        assert!(store.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cache_write_failure_does_not_block_login() {
        let admin = admin_entity();

        let account = open_session(&BrokenSessionStore, Some(&admin)).await.unwrap();
        assert!(account.is_some());
    }

    #[tokio::test]
    async fn corrupt_permissions_abort_session() {
        let store = MemorySessionStore::default();
        let mut admin = admin_entity();
        admin.permissions = "METRICS;BOGUS".into();

        assert!(open_session(&store, Some(&admin)).await.is_err());
        assert_eq!(*store.writes.lock().unwrap(), 0);
    }
}
