pub mod config;
#[macro_use]
pub mod enums;
pub mod lifecycle;
pub mod role;
pub mod wbs;

// 重新导出具体的类型
pub use config::{AppConfig, DatabaseConfig};
pub use enums::{MaterialStatus, ParseEnumError, Theme, WbsElementStatus, WorkPackageStage};
pub use lifecycle::Lifecycle;
pub use role::Role;
pub use wbs::{WbsError, WbsNumber};
