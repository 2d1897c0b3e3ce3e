//! 用户服务

use crate::models::err::{AppError, AppResult};
use crate::services::lookup;
use database::models::{ProjectRecord, UserRecord, UserSettingsRecord, UserSettingsUpdate};
use database::Repositories;
use shared_lib::Role;
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    repositories: Repositories,
}

impl UserService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// 全部用户，按名字排序
    pub async fn get_all_users(&self) -> AppResult<Vec<UserRecord>> {
        let mut users = self.repositories.users.find_users().await?;
        users.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        Ok(users)
    }

    pub async fn get_single_user(&self, user_id: i32) -> AppResult<UserRecord> {
        lookup::user(&self.repositories, user_id).await
    }

    /// 修改用户角色
    ///
    /// 不能把别人提升到比自己更高的角色，也不能修改角色不低于自己的用户。
    pub async fn update_user_role(&self, target_id: i32, actor: &UserRecord, role: Role) -> AppResult<UserRecord> {
        let target = lookup::user(&self.repositories, target_id).await?;

        if role > actor.role {
            return Err(AppError::access_denied("Cannot promote user to a higher role than yourself"));
        }
        if target.role >= actor.role {
            return Err(AppError::access_denied(
                "Cannot change the role of a user with an equal or higher role than you",
            ));
        }

        let updated = self.repositories.users.update_user_role(target_id, role).await?;
        info!("✅ 用户 {} 把用户 {} 的角色修改为 {}", actor.user_id, target_id, role);
        Ok(updated)
    }

    /// 用户设置，不存在时写入默认设置
    pub async fn get_user_settings(&self, user_id: i32) -> AppResult<UserSettingsRecord> {
        lookup::user(&self.repositories, user_id).await?;
        Ok(self.repositories.users.get_or_create_user_settings(user_id).await?)
    }

    /// 更新设置，只能修改自己的设置
    pub async fn update_user_settings(
        &self,
        user: &UserRecord,
        target_id: i32,
        update: UserSettingsUpdate,
    ) -> AppResult<UserSettingsRecord> {
        if user.user_id != target_id {
            return Err(AppError::access_denied("You can only update your own settings!"));
        }
        lookup::user(&self.repositories, target_id).await?;

        Ok(self.repositories.users.upsert_user_settings(target_id, update).await?)
    }

    /// 用户收藏的未删除项目
    pub async fn get_user_favorite_projects(&self, user_id: i32) -> AppResult<Vec<ProjectRecord>> {
        lookup::user(&self.repositories, user_id).await?;

        let project_ids = self.repositories.users.find_favorite_project_ids(user_id).await?;

        let mut projects = Vec::with_capacity(project_ids.len());
        for project_id in project_ids {
            if let Some(project) = self.repositories.projects.get_project_by_id(project_id).await? {
                if project.wbs_element.lifecycle.is_active() {
                    projects.push(project);
                }
            }
        }
        Ok(projects)
    }
}
