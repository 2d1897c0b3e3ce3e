//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - WBS 编号解析
//! - 用户角色层级
//! - 软删除生命周期
//! - 程序配置

pub mod models;

// 重新导出常用类型
pub use models::{
    AppConfig, DatabaseConfig, Lifecycle, MaterialStatus, ParseEnumError, Role, Theme, WbsElementStatus, WbsError, WbsNumber,
    WorkPackageStage,
};
