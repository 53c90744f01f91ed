// 业务服务层
// 无状态地把存储结果翻译成普通值投影，并做统一的错误分类

pub mod admin;
pub mod user;

use crate::database::StoreError;

/// 服务层统一结果类型
/// 查询类操作用 Ok(None) 表示未找到；变更类操作用带类别的错误表示失败原因
pub type ServiceResult<T> = Result<T, StoreError>;
