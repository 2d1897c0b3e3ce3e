//! 接口请求/返回对象
//!
//! 所有对象都使用 camelCase 序列化，与前端共享的类型定义保持一致。

pub mod bom;
pub mod bullets;
pub mod common;
pub mod err;
pub mod projects;
pub mod risks;
pub mod teams;
pub mod users;
pub mod work_packages;
