//! 团队相关的请求/返回对象

use crate::models::projects::ProjectPreviewView;
use crate::models::users::UserView;
use database::models::TeamRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 团队完整信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub team_id: String,

    #[schema(example = "Mechanical")]
    pub team_name: String,

    pub slack_id: String,

    pub description: String,

    pub head: UserView,

    pub leads: Vec<UserView>,

    pub members: Vec<UserView>,

    /// 团队负责的未删除项目
    pub projects: Vec<ProjectPreviewView>,
}

impl From<&TeamRecord> for TeamView {
    fn from(team: &TeamRecord) -> Self {
        Self {
            team_id: team.team_id.clone(),
            team_name: team.team_name.clone(),
            slack_id: team.slack_id.clone(),
            description: team.description.clone(),
            head: UserView::from(&team.head),
            leads: team.leads.iter().map(UserView::from).collect(),
            members: team.members.iter().map(UserView::from).collect(),
            projects: team.projects.iter().map(ProjectPreviewView::from).collect(),
        }
    }
}

/// 创建团队
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeamCreateRequest {
    #[schema(example = "Mechanical")]
    #[validate(length(min = 1))]
    pub team_name: String,

    #[validate(range(min = 0))]
    pub head_id: i32,

    #[serde(default)]
    pub slack_id: String,

    #[serde(default)]
    pub description: String,
}

/// 替换团队成员/组长
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetTeamUsersRequest {
    pub user_ids: Vec<i32>,
}

/// 设置团队负责人
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetTeamHeadRequest {
    #[validate(range(min = 0))]
    pub user_id: i32,
}

/// 修改团队描述
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditTeamDescriptionRequest {
    pub new_description: String,
}
