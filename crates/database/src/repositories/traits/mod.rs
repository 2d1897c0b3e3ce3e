//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口，服务层只依赖这些 trait，不直接依赖 `sqlx`。
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! #[async_trait::async_trait]
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send + Sync`：仓库实例会在多个请求（多个线程）之间共享
//! - `'static`：仓库实例存放在 [`crate::Repositories`] 中，随程序整个生命周期存活
//!
//! 与泛型参数相比，这里使用 `Arc<dyn XxxRepositoryTrait>` 的方式注入：
//!
//! ```rust,ignore
//! // 1. 生产环境使用 PostgreSQL 实现
//! let repositories = Repositories::postgres(pool);
//!
//! // 2. 测试时使用内存实现，一个结构体实现全部 trait 即可
//! let repositories = Repositories::from_store(Arc::new(MemoryStore::default()));
//! ```
//!
//! 这样 axum 的 handler 不需要携带一长串泛型参数，测试替换实现也很方便。
//!
//! ### 约定 ✅
//!
//! 1. **查询返回 `Option`**：不存在时返回 `Ok(None)`，由服务层决定返回 404 还是其他错误
//! 2. **软删除记录也会返回**：按 ID/WBS 查询单条记录时不过滤已删除数据，列表查询只返回未删除数据
//! 3. **写操作返回最新记录**：方便服务层直接转换为返回值
//! 4. **统一错误类型**：全部使用 `DatabaseResult<T>`

pub mod bom;
pub mod change_request;
pub mod project;
pub mod risk;
pub mod team;
pub mod user;
pub mod work_package;

// 重新导出
pub use bom::BomRepositoryTrait;
pub use change_request::ChangeRequestRepositoryTrait;
pub use project::ProjectRepositoryTrait;
pub use risk::RiskRepositoryTrait;
pub use team::TeamRepositoryTrait;
pub use user::UserRepositoryTrait;
pub use work_package::WorkPackageRepositoryTrait;
