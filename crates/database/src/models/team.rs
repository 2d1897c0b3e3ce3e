//! 团队数据库模型

use crate::models::project::ProjectSummaryRecord;
use crate::models::user::UserRecord;

/// 团队信息
#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub team_id: String,
    pub team_name: String,
    pub slack_id: String,
    pub description: String,
    pub head: UserRecord,
    pub leads: Vec<UserRecord>,
    pub members: Vec<UserRecord>,
    /// 团队负责的项目（仅包含未删除的项目）
    pub projects: Vec<ProjectSummaryRecord>,
}

impl TeamRecord {
    pub fn is_head(&self, user_id: i32) -> bool {
        self.head.user_id == user_id
    }

    pub fn is_lead(&self, user_id: i32) -> bool {
        self.leads.iter().any(|lead| lead.user_id == user_id)
    }

    pub fn is_member(&self, user_id: i32) -> bool {
        self.members.iter().any(|member| member.user_id == user_id)
    }

    /// 团队成员关系摘要
    pub fn membership(&self) -> TeamMembership {
        TeamMembership {
            team_id: self.team_id.clone(),
            team_name: self.team_name.clone(),
            head_id: self.head.user_id,
            lead_ids: self.leads.iter().map(|u| u.user_id).collect(),
            member_ids: self.members.iter().map(|u| u.user_id).collect(),
        }
    }
}

/// 团队成员关系摘要
///
/// 项目记录中只需要判断某个用户是否在团队里，不需要完整的用户信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMembership {
    pub team_id: String,
    pub team_name: String,
    pub head_id: i32,
    pub lead_ids: Vec<i32>,
    pub member_ids: Vec<i32>,
}

impl TeamMembership {
    /// 用户是否为该团队的负责人、组长或成员
    pub fn has_user(&self, user_id: i32) -> bool {
        self.head_id == user_id || self.lead_ids.contains(&user_id) || self.member_ids.contains(&user_id)
    }
}

/// 团队创建参数
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub head_id: i32,
    pub slack_id: String,
    pub description: String,
}
