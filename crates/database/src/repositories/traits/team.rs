//! 团队仓库 trait 定义

use crate::models::team::{NewTeam, TeamRecord};
use crate::DatabaseResult;

/// 团队仓库trait定义
///
/// 团队成员、组长的设置都是整体替换（set），而不是增量修改。
#[async_trait::async_trait]
pub trait TeamRepositoryTrait: Send + Sync + 'static {
    /// 查询全部团队
    async fn find_teams(&self) -> DatabaseResult<Vec<TeamRecord>>;

    /// 根据 ID 获取团队信息
    async fn get_team_by_id(&self, team_id: &str) -> DatabaseResult<Option<TeamRecord>>;

    /// 查询指定用户参与的所有团队（负责人、组长或成员）
    async fn find_teams_with_user(&self, user_id: i32) -> DatabaseResult<Vec<TeamRecord>>;

    /// 创建团队
    async fn create_team(&self, team: NewTeam) -> DatabaseResult<TeamRecord>;

    /// 替换团队成员
    ///
    /// # 参数
    /// - `team_id`: 团队 ID
    /// - `user_ids`: 新的成员列表
    ///
    /// # 返回值
    /// 返回更新后的团队信息
    async fn set_team_members(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord>;

    /// 替换团队组长
    async fn set_team_leads(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord>;

    /// 设置团队负责人
    async fn set_team_head(&self, team_id: &str, user_id: i32) -> DatabaseResult<TeamRecord>;

    /// 更新团队描述
    async fn update_team_description(&self, team_id: &str, description: &str) -> DatabaseResult<TeamRecord>;

    /// 删除团队
    async fn delete_team(&self, team_id: &str) -> DatabaseResult<()>;
}
