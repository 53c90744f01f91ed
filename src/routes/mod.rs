// 路由模块，按领域划分

pub mod admin;
pub mod stream;
pub mod user;
