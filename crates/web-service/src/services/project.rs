//! 项目服务
//!
//! 提供项目相关的业务逻辑操作：查询、创建、编辑、删除、设置团队、收藏

use crate::models::err::{AppError, AppResult};
use crate::models::projects::{BulletInput, LinkInput, ProjectCreateRequest, ProjectEditRequest};
use crate::services::change_request::validate_change_request_accepted;
use crate::services::lookup;
use crate::services::permissions::{ensure_admin, ensure_not_guest};
use database::models::{
    BulletChanges, BulletKind, DescriptionBulletRecord, LinkChanges, LinkRecord, LinkTypeRecord, NewLink,
    NewProject, ProjectChanges, ProjectRecord, UserRecord,
};
use database::Repositories;
use shared_lib::WbsNumber;
use std::collections::HashSet;
use tracing::{info, warn};

/// 新建描述条目时使用的占位ID
pub const NEW_BULLET_ID: i32 = -1;

#[derive(Clone)]
pub struct ProjectService {
    repositories: Repositories,
}

impl ProjectService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// 查询所有未删除的项目
    pub async fn get_all_projects(&self) -> AppResult<Vec<ProjectRecord>> {
        Ok(self.repositories.projects.find_projects().await?)
    }

    /// 查询单个项目
    pub async fn get_single_project(&self, wbs_num: WbsNumber) -> AppResult<ProjectRecord> {
        lookup::active_project_by_wbs(&self.repositories, wbs_num).await
    }

    /// 创建项目
    ///
    /// # 返回值
    /// 新项目的 WBS 编号，项目号为该车号下当前最大项目号加一
    pub async fn create_project(&self, user: &UserRecord, request: ProjectCreateRequest) -> AppResult<WbsNumber> {
        ensure_not_guest(user, "create projects")?;

        validate_change_request_accepted(&self.repositories, request.cr_id).await?;

        let mut team_ids = Vec::with_capacity(request.team_ids.len());
        for team_id in request.team_ids {
            if team_ids.contains(&team_id) {
                continue;
            }
            lookup::team(&self.repositories, &team_id).await?;
            team_ids.push(team_id);
        }

        let highest = self
            .repositories
            .projects
            .highest_project_number(request.car_number)
            .await?;

        let wbs_num = self
            .repositories
            .projects
            .create_project(NewProject {
                car_number: request.car_number,
                project_number: highest + 1,
                name: request.name,
                summary: request.summary,
                team_ids,
                created_by: user.user_id,
            })
            .await?;

        info!("✅ 用户 {} 创建了项目 {}", user.user_id, wbs_num);
        Ok(wbs_num)
    }

    /// 编辑项目
    ///
    /// 描述条目和链接都是整体提交，这里和数据库中的现状对比后只写入差异部分。
    pub async fn edit_project(&self, user: &UserRecord, request: ProjectEditRequest) -> AppResult<ProjectRecord> {
        ensure_not_guest(user, "edit projects")?;

        let project = lookup::active_project_by_id(&self.repositories, request.project_id).await?;

        validate_change_request_accepted(&self.repositories, request.cr_id).await?;

        for user_id in [request.project_lead_id, request.project_manager_id].into_iter().flatten() {
            lookup::user(&self.repositories, user_id).await?;
        }

        let bullets = vec![
            diff_bullets(BulletKind::Goal, &project.goals, &request.goals)?,
            diff_bullets(BulletKind::Feature, &project.features, &request.features)?,
            diff_bullets(BulletKind::OtherConstraint, &project.other_constraints, &request.other_constraints)?,
        ];

        let link_types = self.repositories.projects.find_link_types().await?;
        if let Some(missing) = request
            .links
            .iter()
            .find(|link| !link_types.iter().any(|t| t.name == link.link_type_name))
        {
            return Err(AppError::not_found("Link Type", &missing.link_type_name));
        }
        let links = diff_links(&project.links, &request.links);

        let changes = ProjectChanges {
            name: request.name,
            budget: request.budget,
            summary: request.summary,
            rules: request.rules,
            project_lead_id: request.project_lead_id,
            project_manager_id: request.project_manager_id,
            bullets,
            links,
            edited_by: user.user_id,
        };

        let updated = self.repositories.projects.update_project(project.project_id, changes).await?;
        info!("✅ 用户 {} 编辑了项目 {}", user.user_id, updated.wbs_num());
        Ok(updated)
    }

    /// 为项目指定负责团队
    pub async fn set_project_team(&self, user: &UserRecord, wbs_num: WbsNumber, team_id: &str) -> AppResult<()> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;
        let team = lookup::team(&self.repositories, team_id).await?;

        if !user.role.is_admin() && !team.is_head(user.user_id) {
            return Err(AppError::AccessDeniedAdminOnly("set project teams"));
        }

        self.repositories
            .projects
            .add_project_team(project.project_id, &team.team_id)
            .await?;
        Ok(())
    }

    /// 软删除项目及其下所有工作包
    pub async fn delete_project(&self, user: &UserRecord, wbs_num: WbsNumber) -> AppResult<ProjectRecord> {
        ensure_admin(user, "delete projects")?;

        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;

        let deleted = self
            .repositories
            .projects
            .soft_delete_project(project.project_id, user.user_id)
            .await?;

        info!(
            "🗑️ 用户 {} 删除了项目 {}（连带 {} 个工作包）",
            user.user_id,
            wbs_num,
            project.work_packages.len()
        );
        Ok(deleted)
    }

    /// 收藏/取消收藏项目
    pub async fn toggle_favorite(&self, wbs_num: WbsNumber, user: &UserRecord) -> AppResult<ProjectRecord> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;

        let favorite = !project.is_favorited_by(user.user_id);
        self.repositories
            .projects
            .set_project_favorite(project.project_id, user.user_id, favorite)
            .await?;

        lookup::active_project_by_wbs(&self.repositories, wbs_num).await
    }

    pub async fn get_all_link_types(&self) -> AppResult<Vec<LinkTypeRecord>> {
        Ok(self.repositories.projects.find_link_types().await?)
    }
}

/// 计算某一种描述条目的变更
///
/// - `id == -1` 的条目新建
/// - 已存在的条目内容变化时更新
/// - 提交列表中没有的已有条目软删除
/// - 未知的ID直接拒绝
pub fn diff_bullets(
    kind: BulletKind,
    existing: &[DescriptionBulletRecord],
    submitted: &[BulletInput],
) -> AppResult<BulletChanges> {
    let mut changes = BulletChanges {
        kind,
        create: vec![],
        update: vec![],
        delete: vec![],
    };
    let mut kept = HashSet::new();

    for input in submitted {
        if input.id == NEW_BULLET_ID {
            changes.create.push(input.detail.clone());
            continue;
        }

        let Some(bullet) = existing.iter().find(|bullet| bullet.id == input.id) else {
            warn!("⚠️ 描述条目 {} 不属于当前项目", input.id);
            return Err(AppError::bad_request(format!(
                "Description bullet with id: {} does not belong to this project!",
                input.id
            )));
        };

        kept.insert(bullet.id);
        if bullet.detail != input.detail {
            changes.update.push((bullet.id, input.detail.clone()));
        }
    }

    changes.delete = existing
        .iter()
        .map(|bullet| bullet.id)
        .filter(|id| !kept.contains(id))
        .collect();

    Ok(changes)
}

/// 按（链接类型，地址）计算链接的变更
pub fn diff_links(existing: &[LinkRecord], submitted: &[LinkInput]) -> LinkChanges {
    let submitted_keys: HashSet<(&str, &str)> = submitted
        .iter()
        .map(|link| (link.link_type_name.as_str(), link.url.as_str()))
        .collect();
    let existing_keys: HashSet<(&str, &str)> = existing
        .iter()
        .map(|link| (link.link_type.name.as_str(), link.url.as_str()))
        .collect();

    let mut create: Vec<NewLink> = Vec::new();
    for link in submitted {
        let key = (link.link_type_name.as_str(), link.url.as_str());
        let new_link = NewLink {
            link_type_name: link.link_type_name.clone(),
            url: link.url.clone(),
        };
        if !existing_keys.contains(&key) && !create.contains(&new_link) {
            create.push(new_link);
        }
    }

    let delete = existing
        .iter()
        .filter(|link| !submitted_keys.contains(&(link.link_type.name.as_str(), link.url.as_str())))
        .map(|link| link.link_id.clone())
        .collect();

    LinkChanges { create, delete }
}
