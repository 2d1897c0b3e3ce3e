//! 风险服务
//!
//! 风险只有三种状态：未解决、已解决、已删除。
//! 解决人和解决时间总是同时写入、同时清除。

use crate::models::err::{AppError, AppResult};
use crate::services::lookup;
use crate::services::permissions::{ensure_not_guest, has_risk_permissions};
use chrono::Utc;
use database::models::{NewRisk, ProjectRecord, ResolutionChange, RiskRecord, RiskUpdate, UserRecord};
use database::Repositories;
use tracing::{info, warn};

#[derive(Clone)]
pub struct RiskService {
    repositories: Repositories,
}

impl RiskService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// 项目下所有未删除的风险
    pub async fn get_risks_for_project(&self, project_id: i32) -> AppResult<Vec<RiskRecord>> {
        if self.repositories.projects.get_project_by_id(project_id).await?.is_none() {
            return Err(AppError::not_found("Project", project_id));
        }

        Ok(self.repositories.risks.find_risks_for_project(project_id).await?)
    }

    /// 创建风险
    ///
    /// # 返回值
    /// 新风险的ID
    pub async fn create_risk(&self, user: &UserRecord, project_id: i32, detail: &str) -> AppResult<String> {
        ensure_not_guest(user, "create risks")?;

        let project = lookup::active_project_by_id(&self.repositories, project_id).await?;

        let risk = self
            .repositories
            .risks
            .create_risk(NewRisk {
                project_id: project.project_id,
                detail: detail.to_string(),
                created_by: user.user_id,
            })
            .await?;

        info!("✅ 用户 {} 在项目 {} 下创建了风险 {}", user.user_id, project.wbs_num(), risk.id);
        Ok(risk.id)
    }

    /// 编辑风险描述和解决状态
    pub async fn edit_risk(&self, user: &UserRecord, risk_id: &str, detail: &str, resolved: bool) -> AppResult<RiskRecord> {
        let (risk, project) = self.active_risk(risk_id).await?;

        if !has_risk_permissions(user, &project) {
            warn!("⚠️ 用户 {} 没有编辑风险 {} 的权限", user.user_id, risk_id);
            return Err(AppError::access_denied("You do not have the permissions to edit this risk!"));
        }

        let update = RiskUpdate {
            detail: detail.to_string(),
            resolution: resolution_change(&risk, resolved, user.user_id),
        };

        Ok(self.repositories.risks.update_risk(risk_id, update).await?)
    }

    /// 软删除风险，创建者本人或有风险权限的用户可以操作
    pub async fn delete_risk(&self, user: &UserRecord, risk_id: &str) -> AppResult<RiskRecord> {
        let (risk, project) = self.active_risk(risk_id).await?;

        let is_creator = risk.created_by.user_id == user.user_id;
        if !is_creator && !has_risk_permissions(user, &project) {
            return Err(AppError::access_denied("You do not have the permissions to delete this risk!"));
        }

        let deleted = self.repositories.risks.soft_delete_risk(risk_id, user.user_id).await?;
        info!("🗑️ 用户 {} 删除了风险 {}", user.user_id, risk_id);
        Ok(deleted)
    }

    /// 风险和所属项目都必须存在且未删除
    async fn active_risk(&self, risk_id: &str) -> AppResult<(RiskRecord, ProjectRecord)> {
        let risk = self
            .repositories
            .risks
            .get_risk_by_id(risk_id)
            .await?
            .ok_or_else(|| AppError::not_found("Risk", risk_id))?;

        if risk.lifecycle.is_deleted() {
            return Err(AppError::deleted("Risk", risk_id));
        }

        let project = lookup::active_project_by_id(&self.repositories, risk.project.project_id).await?;
        Ok((risk, project))
    }
}

/// 根据目标解决状态计算需要写入的变化
fn resolution_change(risk: &RiskRecord, resolved: bool, user_id: i32) -> ResolutionChange {
    match (risk.is_resolved(), resolved) {
        (false, true) => ResolutionChange::Resolve {
            by: user_id,
            at: Utc::now(),
        },
        (true, false) => ResolutionChange::Clear,
        _ => ResolutionChange::Keep,
    }
}
