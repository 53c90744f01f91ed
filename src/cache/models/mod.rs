// 缓存数据模型

pub mod session;
