use uuid::Uuid;

/// 管理员会话缓存键前缀
const ADMIN_SESSION_PREFIX: &str = "session:admin:";

/// 生成管理员会话缓存键
pub fn admin_session_key(user_id: Uuid) -> String {
    format!("{}{}", ADMIN_SESSION_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefixed_with_user_id() {
        let user_id = Uuid::new_v4();
        let key = admin_session_key(user_id);
        assert_eq!(key, format!("session:admin:{}", user_id));
    }
}
