//! 服务层模块
//!
//! 包含业务逻辑的服务层实现。服务只依赖 [`database::Repositories`] 中的仓库 trait，
//! 权限校验、软删除判断、业务规则都在这一层完成。

pub mod bom;
pub mod change_request;
pub mod description_bullet;
mod lookup;
pub mod permissions;
pub mod project;
pub mod risk;
pub mod team;
pub mod user;
pub mod work_package;

pub use bom::BomService;
pub use description_bullet::DescriptionBulletService;
pub use project::ProjectService;
pub use risk::RiskService;
pub use team::TeamService;
pub use user::UserService;
pub use work_package::WorkPackageService;
