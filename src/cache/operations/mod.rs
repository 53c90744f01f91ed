/// 缓存操作
/// 提供缓存操作的功能实现

pub mod session;

// 重新导出常用操作
pub use session::SessionStore;
