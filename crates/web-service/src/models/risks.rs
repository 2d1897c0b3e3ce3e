//! 风险相关的请求/返回对象

use crate::models::projects::ProjectPreviewView;
use crate::models::users::UserView;
use chrono::{DateTime, Utc};
use database::models::RiskRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 风险
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskView {
    pub id: String,

    pub project: ProjectPreviewView,

    #[schema(example = "Supplier may not deliver the cells in time")]
    pub detail: String,

    pub date_created: DateTime<Utc>,

    pub created_by: UserView,

    pub is_resolved: bool,

    /// 仅在已解决时存在
    pub resolved_by: Option<UserView>,

    /// 仅在已解决时存在
    pub resolved_at: Option<DateTime<Utc>>,

    pub date_deleted: Option<DateTime<Utc>>,
}

impl From<&RiskRecord> for RiskView {
    fn from(risk: &RiskRecord) -> Self {
        Self {
            id: risk.id.clone(),
            project: ProjectPreviewView::from(&risk.project),
            detail: risk.detail.clone(),
            date_created: risk.date_created,
            created_by: UserView::from(&risk.created_by),
            is_resolved: risk.is_resolved(),
            resolved_by: risk.resolution.as_ref().map(|r| UserView::from(&r.resolved_by)),
            resolved_at: risk.resolution.as_ref().map(|r| r.resolved_at),
            date_deleted: risk.lifecycle.date_deleted(),
        }
    }
}

/// 创建风险
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskCreateRequest {
    #[schema(example = 1)]
    #[validate(range(min = 0))]
    pub project_id: i32,

    #[validate(length(min = 1))]
    pub detail: String,
}

/// 编辑风险
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskEditRequest {
    #[validate(length(min = 1))]
    pub id: String,

    #[validate(length(min = 1))]
    pub detail: String,

    /// 目标解决状态
    pub resolved: bool,
}

/// 删除风险
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskDeleteRequest {
    #[validate(length(min = 1))]
    pub risk_id: String,
}
