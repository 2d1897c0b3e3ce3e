//! 团队相关接口

use crate::auth::CurrentUser;
use crate::models::common::Message;
use crate::models::err::{AppError, ErrorBody};
use crate::models::teams::{
    EditTeamDescriptionRequest, SetTeamHeadRequest, SetTeamUsersRequest, TeamCreateRequest, TeamView,
};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

#[utoipa::path(get,
    path = "/teams",
    tag = "teams",
    responses(
        (status = 200, description = "All teams", body = Vec<TeamView>)
    ),
)]
pub async fn get_all_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TeamView>>, AppError> {
    debug!("🔍 查询所有团队");

    let teams = state.teams.get_all_teams().await?;
    Ok(Json(teams.iter().map(TeamView::from).collect()))
}

#[utoipa::path(get,
    path = "/teams/{teamId}",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    responses(
        (status = 200, description = "Team detail", body = TeamView),
        (status = 404, description = "Team not found", body = ErrorBody)
    ),
)]
pub async fn get_single_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamView>, AppError> {
    debug!("🔍 查询团队 {}", team_id);

    let team = state.teams.get_single_team(&team_id).await?;
    Ok(Json(TeamView::from(&team)))
}

/// 创建团队
///
/// 只有管理员可以创建团队，负责人需要满足与 `set-head` 相同的规则
#[utoipa::path(post,
    path = "/teams/create",
    tag = "teams",
    request_body = TeamCreateRequest,
    responses(
        (status = 200, description = "Created team", body = TeamView),
        (status = 403, description = "Only admins can create a team", body = ErrorBody)
    ),
)]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<TeamCreateRequest>,
) -> Result<Json<TeamView>, AppError> {
    debug!("🆕 创建团队 {:#?}", request);

    request.validate()?;

    let team = state
        .teams
        .create_team(
            &user,
            &request.team_name,
            request.head_id,
            &request.slack_id,
            &request.description,
        )
        .await?;
    Ok(Json(TeamView::from(&team)))
}

/// 替换团队成员
#[utoipa::path(post,
    path = "/teams/{teamId}/set-members",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    request_body = SetTeamUsersRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamView),
        (status = 404, description = "Team or users not found", body = ErrorBody)
    ),
)]
pub async fn set_team_members(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
    Json(request): Json<SetTeamUsersRequest>,
) -> Result<Json<TeamView>, AppError> {
    debug!("👥 设置团队 {} 成员 {:?}", team_id, request.user_ids);

    let team = state.teams.set_team_members(&user, &team_id, &request.user_ids).await?;
    Ok(Json(TeamView::from(&team)))
}

/// 替换团队组长
#[utoipa::path(post,
    path = "/teams/{teamId}/set-leads",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    request_body = SetTeamUsersRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamView)
    ),
)]
pub async fn set_team_leads(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
    Json(request): Json<SetTeamUsersRequest>,
) -> Result<Json<TeamView>, AppError> {
    debug!("👥 设置团队 {} 组长 {:?}", team_id, request.user_ids);

    let team = state.teams.set_team_leads(&user, &team_id, &request.user_ids).await?;
    Ok(Json(TeamView::from(&team)))
}

/// 设置团队负责人
#[utoipa::path(post,
    path = "/teams/{teamId}/set-head",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    request_body = SetTeamHeadRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamView),
        (status = 403, description = "Head does not qualify", body = ErrorBody)
    ),
)]
pub async fn set_team_head(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
    Json(request): Json<SetTeamHeadRequest>,
) -> Result<Json<TeamView>, AppError> {
    debug!("👑 设置团队 {} 负责人 {}", team_id, request.user_id);

    request.validate()?;

    let team = state.teams.set_team_head(&user, &team_id, request.user_id).await?;
    Ok(Json(TeamView::from(&team)))
}

#[utoipa::path(post,
    path = "/teams/{teamId}/edit-description",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    request_body = EditTeamDescriptionRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamView)
    ),
)]
pub async fn edit_team_description(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
    Json(request): Json<EditTeamDescriptionRequest>,
) -> Result<Json<TeamView>, AppError> {
    debug!("✏️ 修改团队 {} 描述", team_id);

    let team = state
        .teams
        .edit_description(&user, &team_id, &request.new_description)
        .await?;
    Ok(Json(TeamView::from(&team)))
}

/// 删除团队
#[utoipa::path(delete,
    path = "/teams/{teamId}/delete",
    tag = "teams",
    params(("teamId" = String, Path, description = "团队ID")),
    responses(
        (status = 200, description = "Team deleted", body = Message),
        (status = 403, description = "Only admins can delete a team", body = ErrorBody)
    ),
)]
pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(team_id): Path<String>,
) -> Result<Json<Message>, AppError> {
    debug!("🗑️ 删除团队 {}", team_id);

    state.teams.delete_team(&user, &team_id).await?;
    Ok(Json(Message::new(format!("Team {team_id} successfully deleted."))))
}
