//! 团队服务
//!
//! 一个团队有一个负责人（head），若干组长（leads）和成员（members），三者互不重叠。
//! 一个团队的负责人不能同时是其他团队的组长或成员，在分配时检查。

use crate::models::err::{AppError, AppResult};
use crate::services::lookup;
use crate::services::permissions::ensure_admin;
use database::models::{NewTeam, TeamRecord, UserRecord};
use database::Repositories;
use tracing::{info, warn};

#[derive(Clone)]
pub struct TeamService {
    repositories: Repositories,
}

impl TeamService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn get_all_teams(&self) -> AppResult<Vec<TeamRecord>> {
        Ok(self.repositories.teams.find_teams().await?)
    }

    pub async fn get_single_team(&self, team_id: &str) -> AppResult<TeamRecord> {
        lookup::team(&self.repositories, team_id).await
    }

    /// 替换团队成员
    pub async fn set_team_members(&self, user: &UserRecord, team_id: &str, user_ids: &[i32]) -> AppResult<TeamRecord> {
        let team = lookup::team(&self.repositories, team_id).await?;

        if !user.role.is_admin() && !team.is_head(user.user_id) {
            return Err(AppError::access_denied(
                "you must be an admin or the team head to update the members!",
            ));
        }

        let members = self.existing_users(user_ids).await?;

        if members.iter().any(|member| team.is_head(member.user_id)) {
            return Err(AppError::bad_request("A member cannot be the head of the team!"));
        }
        if members.iter().any(|member| team.is_lead(member.user_id)) {
            return Err(AppError::bad_request("A member cannot be a lead of the team!"));
        }
        if self.any_heads_other_team(&team, &members).await? {
            return Err(AppError::bad_request("A member cannot be the head of another team!"));
        }

        let ids: Vec<i32> = members.iter().map(|member| member.user_id).collect();
        Ok(self.repositories.teams.set_team_members(team_id, &ids).await?)
    }

    /// 替换团队组长
    pub async fn set_team_leads(&self, user: &UserRecord, team_id: &str, user_ids: &[i32]) -> AppResult<TeamRecord> {
        let team = lookup::team(&self.repositories, team_id).await?;

        if !user.role.is_admin() && !team.is_head(user.user_id) {
            return Err(AppError::bad_request(
                "Access Denied: You must be an admin or the head to update the lead!",
            ));
        }

        let leads = self.existing_users(user_ids).await?;

        if leads.iter().any(|lead| team.is_member(lead.user_id)) {
            return Err(AppError::bad_request("A lead cannot be a member of the team!"));
        }
        if leads.iter().any(|lead| team.is_head(lead.user_id)) {
            return Err(AppError::bad_request("A lead cannot be the head of the team!"));
        }
        if self.any_heads_other_team(&team, &leads).await? {
            return Err(AppError::bad_request("A lead cannot be the head of another team!"));
        }

        let ids: Vec<i32> = leads.iter().map(|lead| lead.user_id).collect();
        Ok(self.repositories.teams.set_team_leads(team_id, &ids).await?)
    }

    /// 设置团队负责人
    pub async fn set_team_head(&self, user: &UserRecord, team_id: &str, head_id: i32) -> AppResult<TeamRecord> {
        if !user.role.is_head() {
            return Err(AppError::access_denied("You must be at least a head to change the head of a team!"));
        }

        let team = lookup::team(&self.repositories, team_id).await?;
        self.validate_new_head(head_id, Some(&team.team_id)).await?;

        let updated = self.repositories.teams.set_team_head(team_id, head_id).await?;
        info!("✅ 团队 {} 的负责人变更为 {}", team_id, head_id);
        Ok(updated)
    }

    /// 修改团队描述
    pub async fn edit_description(&self, user: &UserRecord, team_id: &str, description: &str) -> AppResult<TeamRecord> {
        let team = lookup::team(&self.repositories, team_id).await?;

        if !user.role.is_admin() && !team.is_head(user.user_id) {
            return Err(AppError::access_denied(
                "you must be an admin or the team head to update the members!",
            ));
        }

        Ok(self
            .repositories
            .teams
            .update_team_description(team_id, description)
            .await?)
    }

    /// 创建团队，只有管理员可以操作
    pub async fn create_team(
        &self,
        user: &UserRecord,
        team_name: &str,
        head_id: i32,
        slack_id: &str,
        description: &str,
    ) -> AppResult<TeamRecord> {
        ensure_admin(user, "create a team")?;

        self.validate_new_head(head_id, None).await?;

        let team = self
            .repositories
            .teams
            .create_team(NewTeam {
                team_name: team_name.to_string(),
                head_id,
                slack_id: slack_id.to_string(),
                description: description.to_string(),
            })
            .await?;

        info!("✅ 用户 {} 创建了团队 {}", user.user_id, team.team_id);
        Ok(team)
    }

    /// 删除团队，只有管理员可以操作
    pub async fn delete_team(&self, user: &UserRecord, team_id: &str) -> AppResult<()> {
        ensure_admin(user, "delete a team")?;

        lookup::team(&self.repositories, team_id).await?;
        self.repositories.teams.delete_team(team_id).await?;

        info!("🗑️ 用户 {} 删除了团队 {}", user.user_id, team_id);
        Ok(())
    }

    /// 新负责人必须存在、至少为 HEAD，且不在其他团队中担任任何角色
    ///
    /// `current_team` 为 `None` 表示正在创建新团队。
    async fn validate_new_head(&self, head_id: i32, current_team: Option<&str>) -> AppResult<UserRecord> {
        let head = lookup::user(&self.repositories, head_id).await?;

        if !head.role.is_head() {
            return Err(AppError::access_denied("The team head must be at least a head"));
        }

        let other_teams: Vec<TeamRecord> = self
            .repositories
            .teams
            .find_teams_with_user(head_id)
            .await?
            .into_iter()
            .filter(|other| Some(other.team_id.as_str()) != current_team)
            .collect();

        if other_teams
            .iter()
            .any(|other| other.is_head(head_id) || other.is_lead(head_id))
        {
            warn!("⚠️ 用户 {} 已经是其他团队的负责人或组长", head_id);
            return Err(AppError::access_denied(
                "The new team head must not be a head or lead of another team",
            ));
        }
        if !other_teams.is_empty() {
            warn!("⚠️ 用户 {} 已经是其他团队的成员", head_id);
            return Err(AppError::access_denied(
                "The new team head must not be a member of another team",
            ));
        }

        Ok(head)
    }

    /// 候选人中是否有人是其他团队的负责人
    async fn any_heads_other_team(&self, team: &TeamRecord, candidates: &[UserRecord]) -> AppResult<bool> {
        let teams = self.repositories.teams.find_teams().await?;
        Ok(candidates.iter().any(|candidate| {
            teams
                .iter()
                .any(|other| other.team_id != team.team_id && other.is_head(candidate.user_id))
        }))
    }

    /// 查询用户，任何一个ID不存在时返回 404，错误信息中只列出不存在的ID
    async fn existing_users(&self, user_ids: &[i32]) -> AppResult<Vec<UserRecord>> {
        let mut unique_ids = Vec::with_capacity(user_ids.len());
        for id in user_ids {
            if !unique_ids.contains(id) {
                unique_ids.push(*id);
            }
        }

        let users = self.repositories.users.get_users_by_ids(&unique_ids).await?;

        let missing: Vec<String> = unique_ids
            .iter()
            .filter(|id| !users.iter().any(|user| user.user_id == **id))
            .map(|id| id.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::http(
                axum::http::StatusCode::NOT_FOUND,
                format!("User(s) with the following ids not found: {}", missing.join(", ")),
            ));
        }

        Ok(users)
    }
}
