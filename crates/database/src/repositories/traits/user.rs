//! 用户仓库 trait 定义

use crate::models::user::{UserRecord, UserSettingsRecord, UserSettingsUpdate};
use crate::DatabaseResult;
use shared_lib::Role;

/// 用户仓库trait定义
#[async_trait::async_trait]
pub trait UserRepositoryTrait: Send + Sync + 'static {
    /// 查询全部用户
    async fn find_users(&self) -> DatabaseResult<Vec<UserRecord>>;

    /// 根据 ID 获取用户信息，不存在时返回 `None`
    async fn get_user_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>>;

    /// 批量获取用户信息
    ///
    /// # 返回值
    /// 只返回数据库中存在的用户，调用方可以据此找出不存在的ID
    async fn get_users_by_ids(&self, user_ids: &[i32]) -> DatabaseResult<Vec<UserRecord>>;

    /// 更新用户角色
    async fn update_user_role(&self, user_id: i32, role: Role) -> DatabaseResult<UserRecord>;

    /// 获取用户设置，不存在时写入默认设置并返回
    async fn get_or_create_user_settings(&self, user_id: i32) -> DatabaseResult<UserSettingsRecord>;

    /// 写入（新建或覆盖）用户设置
    async fn upsert_user_settings(&self, user_id: i32, update: UserSettingsUpdate) -> DatabaseResult<UserSettingsRecord>;

    /// 用户收藏的项目ID
    async fn find_favorite_project_ids(&self, user_id: i32) -> DatabaseResult<Vec<i32>>;
}
