//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层，每个仓库对应一个 PostgreSQL 实现，
//! 并通过 [`Repositories`] 统一注入到服务层。

pub mod bom;
pub mod change_request;
pub mod project;
mod rows;
pub mod risk;
pub mod team;
pub mod traits;
pub mod user;
pub mod work_package;

// 重新导出具体的类型
pub use bom::BomRepository;
pub use change_request::ChangeRequestRepository;
pub use project::ProjectRepository;
pub use risk::RiskRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
pub use work_package::WorkPackageRepository;

use crate::DatabasePool;
use std::sync::Arc;
use traits::{
    BomRepositoryTrait, ChangeRequestRepositoryTrait, ProjectRepositoryTrait, RiskRepositoryTrait,
    TeamRepositoryTrait, UserRepositoryTrait, WorkPackageRepositoryTrait,
};

/// 全部仓库的集合
///
/// 克隆只会增加引用计数，可以放心放进 axum 的 `State` 中。
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepositoryTrait>,
    pub teams: Arc<dyn TeamRepositoryTrait>,
    pub projects: Arc<dyn ProjectRepositoryTrait>,
    pub work_packages: Arc<dyn WorkPackageRepositoryTrait>,
    pub risks: Arc<dyn RiskRepositoryTrait>,
    pub bom: Arc<dyn BomRepositoryTrait>,
    pub change_requests: Arc<dyn ChangeRequestRepositoryTrait>,
}

impl Repositories {
    /// 使用 PostgreSQL 连接池创建全部仓库
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            teams: Arc::new(TeamRepository::new(pool.clone())),
            projects: Arc::new(ProjectRepository::new(pool.clone())),
            work_packages: Arc::new(WorkPackageRepository::new(pool.clone())),
            risks: Arc::new(RiskRepository::new(pool.clone())),
            bom: Arc::new(BomRepository::new(pool.clone())),
            change_requests: Arc::new(ChangeRequestRepository::new(pool)),
        }
    }

    /// 使用同一个实现了全部仓库 trait 的存储创建仓库集合
    ///
    /// 主要用于测试中的内存实现。
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepositoryTrait
            + TeamRepositoryTrait
            + ProjectRepositoryTrait
            + WorkPackageRepositoryTrait
            + RiskRepositoryTrait
            + BomRepositoryTrait
            + ChangeRequestRepositoryTrait,
    {
        Self {
            users: store.clone(),
            teams: store.clone(),
            projects: store.clone(),
            work_packages: store.clone(),
            risks: store.clone(),
            bom: store.clone(),
            change_requests: store,
        }
    }
}
