//! 项目仓库 trait 定义
//!
//! 定义项目数据库操作的抽象接口

use crate::models::project::{
    DescriptionBulletRecord, LinkTypeRecord, NewProject, ProjectChanges, ProjectRecord,
};
use crate::DatabaseResult;
use chrono::{DateTime, Utc};
use shared_lib::WbsNumber;

/// 项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 项目查询（按 WBS 编号或项目 ID）
/// - 项目创建、编辑、软删除
/// - 项目团队、收藏
/// - 链接类型、描述条目
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 查询所有未删除的项目
    async fn find_projects(&self) -> DatabaseResult<Vec<ProjectRecord>>;

    /// 根据 WBS 编号获取项目信息
    ///
    /// 已软删除的项目也会返回，由调用方根据 `lifecycle` 判断。
    ///
    /// # 参数
    /// - `wbs_num`: 项目 WBS 编号（工作包号为 0）
    async fn get_project_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<ProjectRecord>>;

    /// 根据 ID 获取项目信息，规则同 [`Self::get_project_by_wbs`]
    async fn get_project_by_id(&self, project_id: i32) -> DatabaseResult<Option<ProjectRecord>>;

    /// 指定车号下当前最大的项目号，没有项目时返回 0
    ///
    /// 已删除的项目同样占用项目号。
    async fn highest_project_number(&self, car_number: i32) -> DatabaseResult<i32>;

    /// 创建新项目
    ///
    /// # 返回值
    /// 返回新项目的 WBS 编号
    async fn create_project(&self, project: NewProject) -> DatabaseResult<WbsNumber>;

    /// 编辑项目
    ///
    /// # 参数
    /// - `project_id`: 项目 ID
    /// - `changes`: 已经计算好的变更内容
    ///
    /// # 返回值
    /// 返回更新后的项目信息
    async fn update_project(&self, project_id: i32, changes: ProjectChanges) -> DatabaseResult<ProjectRecord>;

    /// 为项目添加负责团队，已存在时不做任何事
    async fn add_project_team(&self, project_id: i32, team_id: &str) -> DatabaseResult<()>;

    /// 软删除项目，同时软删除其下所有未删除的工作包
    ///
    /// # 返回值
    /// 返回被删除的项目信息
    async fn soft_delete_project(&self, project_id: i32, deleted_by: i32) -> DatabaseResult<ProjectRecord>;

    /// 设置用户是否收藏该项目
    async fn set_project_favorite(&self, project_id: i32, user_id: i32, favorite: bool) -> DatabaseResult<()>;

    /// 查询全部链接类型
    async fn find_link_types(&self) -> DatabaseResult<Vec<LinkTypeRecord>>;

    /// 根据 ID 获取描述条目
    async fn get_description_bullet(&self, bullet_id: i32) -> DatabaseResult<Option<DescriptionBulletRecord>>;

    /// 设置或清除描述条目的勾选信息
    ///
    /// # 参数
    /// - `checked`: `Some((用户ID, 时间))` 表示勾选，`None` 表示取消勾选
    async fn set_description_bullet_check(
        &self,
        bullet_id: i32,
        checked: Option<(i32, DateTime<Utc>)>,
    ) -> DatabaseResult<DescriptionBulletRecord>;
}
