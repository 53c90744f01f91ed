// 存储库操作实现

pub mod admin;
pub mod subscription;
pub mod user;
pub mod view;
