// 数据库实体定义

pub mod admin;
pub mod subscription;
pub mod user;
pub mod view;
