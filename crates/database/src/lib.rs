//! 数据库操作模块
//!
//! 这个模块提供了数据库连接、迁移，以及各个实体的仓库接口和 PostgreSQL 实现

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, DatabasePool};
pub use error::DatabaseError;
pub use repositories::traits::{
    BomRepositoryTrait, ChangeRequestRepositoryTrait, ProjectRepositoryTrait, RiskRepositoryTrait,
    TeamRepositoryTrait, UserRepositoryTrait, WorkPackageRepositoryTrait,
};
pub use repositories::Repositories;

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
