//! 项目数据库模型
//!
//! 定义项目、WBS 元素、描述条目和链接相关的结构体

use crate::models::team::TeamMembership;
use crate::models::user::UserRecord;
use crate::models::work_package::WorkPackageRecord;
use chrono::{DateTime, Utc};
use shared_lib::{Lifecycle, WbsElementStatus, WbsNumber};

/// WBS 元素，项目和工作包的公共部分
#[derive(Debug, Clone)]
pub struct WbsElementRecord {
    pub wbs_element_id: i32,
    pub date_created: DateTime<Utc>,
    pub wbs_num: WbsNumber,
    pub name: String,
    pub status: WbsElementStatus,
    pub project_lead: Option<UserRecord>,
    pub project_manager: Option<UserRecord>,
    pub lifecycle: Lifecycle,
}

/// 项目摘要，用于团队、风险等记录中引用项目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummaryRecord {
    pub project_id: i32,
    pub wbs_num: WbsNumber,
    pub name: String,
    pub status: WbsElementStatus,
}

/// 描述条目的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulletKind {
    Goal,
    Feature,
    OtherConstraint,
    ExpectedActivity,
    Deliverable,
}

impl BulletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulletKind::Goal => "GOAL",
            BulletKind::Feature => "FEATURE",
            BulletKind::OtherConstraint => "OTHER_CONSTRAINT",
            BulletKind::ExpectedActivity => "EXPECTED_ACTIVITY",
            BulletKind::Deliverable => "DELIVERABLE",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "GOAL" => Some(BulletKind::Goal),
            "FEATURE" => Some(BulletKind::Feature),
            "OTHER_CONSTRAINT" => Some(BulletKind::OtherConstraint),
            "EXPECTED_ACTIVITY" => Some(BulletKind::ExpectedActivity),
            "DELIVERABLE" => Some(BulletKind::Deliverable),
            _ => None,
        }
    }
}

/// 描述条目被勾选的信息
#[derive(Debug, Clone)]
pub struct BulletCheck {
    pub user: UserRecord,
    pub at: DateTime<Utc>,
}

/// 描述条目（目标/功能/约束/预期活动/交付物）
#[derive(Debug, Clone)]
pub struct DescriptionBulletRecord {
    pub id: i32,
    pub wbs_element_id: i32,
    pub kind: BulletKind,
    pub detail: String,
    pub date_added: DateTime<Utc>,
    pub checked: Option<BulletCheck>,
    pub lifecycle: Lifecycle,
}

/// 链接类型
#[derive(Debug, Clone)]
pub struct LinkTypeRecord {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator: UserRecord,
    pub required: bool,
    pub icon_name: String,
}

/// 链接
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub link_id: String,
    pub link_type: LinkTypeRecord,
    pub date_created: DateTime<Utc>,
    pub creator: UserRecord,
    pub url: String,
}

/// 项目完整信息
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub project_id: i32,
    pub wbs_element: WbsElementRecord,
    pub summary: String,
    pub budget: i32,
    pub rules: Vec<String>,
    pub goals: Vec<DescriptionBulletRecord>,
    pub features: Vec<DescriptionBulletRecord>,
    pub other_constraints: Vec<DescriptionBulletRecord>,
    pub links: Vec<LinkRecord>,
    /// 未删除的工作包
    pub work_packages: Vec<WorkPackageRecord>,
    pub teams: Vec<TeamMembership>,
    /// 收藏了该项目的用户ID
    pub favorited_by: Vec<i32>,
}

impl ProjectRecord {
    pub fn wbs_num(&self) -> WbsNumber {
        self.wbs_element.wbs_num
    }

    pub fn summary(&self) -> ProjectSummaryRecord {
        ProjectSummaryRecord {
            project_id: self.project_id,
            wbs_num: self.wbs_element.wbs_num,
            name: self.wbs_element.name.clone(),
            status: self.wbs_element.status,
        }
    }

    pub fn is_favorited_by(&self, user_id: i32) -> bool {
        self.favorited_by.contains(&user_id)
    }

    /// 用户是否在项目的任意一个团队中
    pub fn has_team_user(&self, user_id: i32) -> bool {
        self.teams.iter().any(|team| team.has_user(user_id))
    }

    /// 用户是否为项目负责人或项目经理
    pub fn is_lead_or_manager(&self, user_id: i32) -> bool {
        let element = &self.wbs_element;
        [&element.project_lead, &element.project_manager]
            .into_iter()
            .flatten()
            .any(|user| user.user_id == user_id)
    }

    /// 指定种类的描述条目
    pub fn bullets(&self, kind: BulletKind) -> &[DescriptionBulletRecord] {
        match kind {
            BulletKind::Goal => &self.goals,
            BulletKind::Feature => &self.features,
            BulletKind::OtherConstraint => &self.other_constraints,
            BulletKind::ExpectedActivity | BulletKind::Deliverable => &[],
        }
    }
}

/// 项目创建参数
#[derive(Debug, Clone)]
pub struct NewProject {
    pub car_number: i32,
    pub project_number: i32,
    pub name: String,
    pub summary: String,
    pub team_ids: Vec<String>,
    pub created_by: i32,
}

/// 某一种描述条目的变更计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletChanges {
    pub kind: BulletKind,
    pub create: Vec<String>,
    pub update: Vec<(i32, String)>,
    pub delete: Vec<i32>,
}

/// 新建链接参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub link_type_name: String,
    pub url: String,
}

/// 链接变更计划
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkChanges {
    pub create: Vec<NewLink>,
    pub delete: Vec<String>,
}

/// 项目编辑参数
///
/// 描述条目和链接的差异由服务层计算好，仓库层只负责落库。
#[derive(Debug, Clone)]
pub struct ProjectChanges {
    pub name: String,
    pub budget: i32,
    pub summary: String,
    pub rules: Vec<String>,
    pub project_lead_id: Option<i32>,
    pub project_manager_id: Option<i32>,
    pub bullets: Vec<BulletChanges>,
    pub links: LinkChanges,
    pub edited_by: i32,
}
