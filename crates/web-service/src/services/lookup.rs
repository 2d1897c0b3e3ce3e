//! 多个服务共用的查询
//!
//! 不存在时返回 404，已软删除时返回 [`AppError::Deleted`]。

use crate::models::err::{AppError, AppResult};
use database::models::{ProjectRecord, TeamRecord, UserRecord};
use database::Repositories;
use shared_lib::WbsNumber;

/// 按 WBS 编号获取未删除的项目
pub async fn active_project_by_wbs(repositories: &Repositories, wbs_num: WbsNumber) -> AppResult<ProjectRecord> {
    wbs_num.ensure_project()?;

    let project = repositories
        .projects
        .get_project_by_wbs(wbs_num)
        .await?
        .ok_or_else(|| AppError::not_found("Project", wbs_num))?;

    if project.wbs_element.lifecycle.is_deleted() {
        return Err(AppError::deleted("Project", wbs_num));
    }
    Ok(project)
}

/// 按项目 ID 获取未删除的项目
pub async fn active_project_by_id(repositories: &Repositories, project_id: i32) -> AppResult<ProjectRecord> {
    let project = repositories
        .projects
        .get_project_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;

    if project.wbs_element.lifecycle.is_deleted() {
        return Err(AppError::deleted("Project", project_id));
    }
    Ok(project)
}

pub async fn user(repositories: &Repositories, user_id: i32) -> AppResult<UserRecord> {
    repositories
        .users
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", user_id))
}

pub async fn team(repositories: &Repositories, team_id: &str) -> AppResult<TeamRecord> {
    repositories
        .teams
        .get_team_by_id(team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team", team_id))
}
