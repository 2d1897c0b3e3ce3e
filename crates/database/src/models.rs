//! 数据库模型模块
//!
//! 这里定义仓库层读写使用的记录结构体，与具体数据库无关。
//! 软删除统一使用 [`shared_lib::Lifecycle`] 表示。

pub mod bom;
pub mod change_request;
pub mod project;
pub mod risk;
pub mod team;
pub mod user;
pub mod work_package;

// 重新导出具体的模型
pub use bom::{
    AssemblyRecord, ManufacturerRecord, MaterialChanges, MaterialRecord, MaterialTypeRecord, NewAssembly, NewMaterial,
};
pub use change_request::ChangeRequestRecord;
pub use project::{
    BulletChanges, BulletCheck, BulletKind, DescriptionBulletRecord, LinkChanges, LinkRecord, LinkTypeRecord,
    NewLink, NewProject, ProjectChanges, ProjectRecord, ProjectSummaryRecord, WbsElementRecord,
};
pub use risk::{NewRisk, ResolutionChange, RiskRecord, RiskResolution, RiskUpdate};
pub use team::{NewTeam, TeamMembership, TeamRecord};
pub use user::{UserRecord, UserSettingsRecord, UserSettingsUpdate};
pub use work_package::WorkPackageRecord;
