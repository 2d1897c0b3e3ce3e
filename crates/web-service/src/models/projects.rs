//! 项目相关的请求/返回对象

use crate::models::bullets::{bullet_views, DescriptionBulletView};
use crate::models::users::UserView;
use crate::models::work_packages::{end_date, WorkPackageView};
use chrono::{DateTime, NaiveDate, Utc};
use database::models::{LinkRecord, LinkTypeRecord, ProjectRecord, ProjectSummaryRecord, TeamMembership};
use serde::{Deserialize, Serialize};
use shared_lib::{WbsElementStatus, WbsNumber};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 项目摘要
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPreviewView {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Impact Attenuator")]
    pub name: String,

    pub wbs_num: WbsNumber,

    pub status: WbsElementStatus,
}

impl From<&ProjectSummaryRecord> for ProjectPreviewView {
    fn from(project: &ProjectSummaryRecord) -> Self {
        Self {
            id: project.project_id,
            name: project.name.clone(),
            wbs_num: project.wbs_num,
            status: project.status,
        }
    }
}

/// 团队摘要
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPreviewView {
    pub team_id: String,

    #[schema(example = "Mechanical")]
    pub team_name: String,
}

impl From<&TeamMembership> for TeamPreviewView {
    fn from(team: &TeamMembership) -> Self {
        Self {
            team_id: team.team_id.clone(),
            team_name: team.team_name.clone(),
        }
    }
}

/// 链接类型
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypeView {
    #[schema(example = "Confluence")]
    pub name: String,

    pub date_created: DateTime<Utc>,

    pub creator: UserView,

    /// 编辑项目时是否必须提供该类型的链接
    pub required: bool,

    #[schema(example = "description")]
    pub icon_name: String,
}

impl From<&LinkTypeRecord> for LinkTypeView {
    fn from(link_type: &LinkTypeRecord) -> Self {
        Self {
            name: link_type.name.clone(),
            date_created: link_type.date_created,
            creator: UserView::from(&link_type.creator),
            required: link_type.required,
            icon_name: link_type.icon_name.clone(),
        }
    }
}

/// 链接
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub link_id: String,

    pub link_type: LinkTypeView,

    pub date_created: DateTime<Utc>,

    pub creator: UserView,

    #[schema(example = "https://confluence.example.com/x/abc")]
    pub url: String,
}

impl From<&LinkRecord> for LinkView {
    fn from(link: &LinkRecord) -> Self {
        Self {
            link_id: link.link_id.clone(),
            link_type: LinkTypeView::from(&link.link_type),
            date_created: link.date_created,
            creator: UserView::from(&link.creator),
            url: link.url.clone(),
        }
    }
}

/// 项目完整信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[schema(example = 1)]
    pub id: i32,

    pub wbs_num: WbsNumber,

    pub date_created: DateTime<Utc>,

    #[schema(example = "Impact Attenuator")]
    pub name: String,

    pub status: WbsElementStatus,

    pub project_lead: Option<UserView>,

    pub project_manager: Option<UserView>,

    pub date_deleted: Option<DateTime<Utc>>,

    pub summary: String,

    /// 预算，单位：美元
    pub budget: i32,

    pub rules: Vec<String>,

    pub links: Vec<LinkView>,

    pub goals: Vec<DescriptionBulletView>,

    pub features: Vec<DescriptionBulletView>,

    pub other_constraints: Vec<DescriptionBulletView>,

    pub work_packages: Vec<WorkPackageView>,

    pub teams: Vec<TeamPreviewView>,

    /// 收藏了该项目的用户ID
    pub favorited_by: Vec<i32>,

    /// 最早的工作包开始日期，没有工作包时为空
    pub start_date: Option<NaiveDate>,

    /// 最晚的工作包结束日期，没有工作包时为空
    pub end_date: Option<NaiveDate>,

    /// 项目跨度（周）
    pub duration: i32,
}

impl ProjectView {
    pub fn new(project: &ProjectRecord, today: NaiveDate) -> Self {
        let element = &project.wbs_element;
        let start_date = project.work_packages.iter().map(|wp| wp.start_date).min();
        let end_date = project
            .work_packages
            .iter()
            .map(|wp| end_date(wp.start_date, wp.duration))
            .max();
        let duration = match (start_date, end_date) {
            (Some(start), Some(end)) => ((end - start).num_days() / 7) as i32,
            _ => 0,
        };

        Self {
            id: project.project_id,
            wbs_num: element.wbs_num,
            date_created: element.date_created,
            name: element.name.clone(),
            status: element.status,
            project_lead: element.project_lead.as_ref().map(UserView::from),
            project_manager: element.project_manager.as_ref().map(UserView::from),
            date_deleted: element.lifecycle.date_deleted(),
            summary: project.summary.clone(),
            budget: project.budget,
            rules: project.rules.clone(),
            links: project.links.iter().map(LinkView::from).collect(),
            goals: bullet_views(&project.goals),
            features: bullet_views(&project.features),
            other_constraints: bullet_views(&project.other_constraints),
            work_packages: project
                .work_packages
                .iter()
                .map(|wp| WorkPackageView::new(wp, today))
                .collect(),
            teams: project.teams.iter().map(TeamPreviewView::from).collect(),
            favorited_by: project.favorited_by.clone(),
            start_date,
            end_date,
            duration,
        }
    }
}

/// 列表中的每一项都不能是空字符串
fn non_empty_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(ValidationError::new("non_empty_items"));
    }
    Ok(())
}

/// 创建项目
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateRequest {
    /// 已审核通过的变更申请ID
    #[schema(example = 1)]
    #[validate(range(min = 0))]
    pub cr_id: i32,

    #[schema(example = 2)]
    #[validate(range(min = 0))]
    pub car_number: i32,

    #[schema(example = "Impact Attenuator")]
    #[validate(length(min = 1))]
    pub name: String,

    #[schema(example = "Design and build the impact attenuator")]
    #[validate(length(min = 1))]
    pub summary: String,

    /// 负责团队ID
    #[serde(default)]
    #[validate(custom(function = "non_empty_items"))]
    pub team_ids: Vec<String>,
}

/// 编辑项目时提交的描述条目
///
/// `id` 为 `-1` 表示新建
#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulletInput {
    #[schema(example = -1)]
    #[validate(range(min = -1))]
    pub id: i32,

    #[schema(example = "Decrease weight by 5 lbs")]
    #[validate(length(min = 1))]
    pub detail: String,
}

/// 编辑项目时提交的链接
#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkInput {
    #[schema(example = "Confluence")]
    #[validate(length(min = 1))]
    pub link_type_name: String,

    #[schema(example = "https://confluence.example.com/x/abc")]
    #[validate(length(min = 1))]
    pub url: String,
}

/// 编辑项目
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEditRequest {
    #[schema(example = 1)]
    #[validate(range(min = 0))]
    pub project_id: i32,

    #[schema(example = 1)]
    #[validate(range(min = 0))]
    pub cr_id: i32,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = 0))]
    pub budget: i32,

    #[validate(length(min = 1))]
    pub summary: String,

    #[validate(custom(function = "non_empty_items"))]
    pub rules: Vec<String>,

    #[validate(nested)]
    pub goals: Vec<BulletInput>,

    #[validate(nested)]
    pub features: Vec<BulletInput>,

    #[validate(nested)]
    pub other_constraints: Vec<BulletInput>,

    #[validate(nested)]
    pub links: Vec<LinkInput>,

    #[validate(range(min = 0))]
    pub project_lead_id: Option<i32>,

    #[validate(range(min = 0))]
    pub project_manager_id: Option<i32>,
}

/// 设置项目负责团队
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectTeamRequest {
    #[validate(length(min = 1))]
    pub team_id: String,
}
