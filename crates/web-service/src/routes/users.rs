//! 用户相关接口

use crate::auth::CurrentUser;
use crate::models::err::{AppError, ErrorBody};
use crate::models::projects::ProjectView;
use crate::models::users::{UpdateUserRoleRequest, UserSettingsRequest, UserSettingsView, UserView};
use crate::routes::today;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use database::models::UserSettingsUpdate;
use std::sync::Arc;
use tracing::debug;

/// 查询所有用户，按名字排序
#[utoipa::path(get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserView>)
    ),
)]
pub async fn get_all_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserView>>, AppError> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[utoipa::path(get,
    path = "/users/{userId}",
    tag = "users",
    params(("userId" = i32, Path, description = "用户ID", example = 1)),
    responses(
        (status = 200, description = "User detail", body = UserView),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
)]
pub async fn get_single_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserView>, AppError> {
    debug!("🔍 查询用户 {}", user_id);

    let user = state.users.get_single_user(user_id).await?;
    Ok(Json(user.into()))
}

/// 查询用户设置
///
/// 用户还没有设置时会写入默认设置（深色主题，空的 Slack ID）
#[utoipa::path(get,
    path = "/users/{userId}/settings",
    tag = "users",
    params(("userId" = i32, Path, description = "用户ID", example = 1)),
    responses(
        (status = 200, description = "User settings", body = UserSettingsView)
    ),
)]
pub async fn get_user_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserSettingsView>, AppError> {
    debug!("🔍 查询用户 {} 的设置", user_id);

    let settings = state.users.get_user_settings(user_id).await?;
    Ok(Json(settings.into()))
}

/// 更新用户设置，只能修改自己的设置
#[utoipa::path(post,
    path = "/users/{userId}/settings",
    tag = "users",
    params(("userId" = i32, Path, description = "用户ID", example = 1)),
    request_body = UserSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = UserSettingsView)
    ),
)]
pub async fn update_user_settings(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i32>,
    Json(request): Json<UserSettingsRequest>,
) -> Result<Json<UserSettingsView>, AppError> {
    debug!("✏️ 更新用户 {} 的设置 {:#?}", user_id, request);

    let update = UserSettingsUpdate {
        default_theme: request.default_theme,
        slack_id: request.slack_id,
    };
    let settings = state.users.update_user_settings(&user, user_id, update).await?;
    Ok(Json(settings.into()))
}

/// 修改用户角色
#[utoipa::path(post,
    path = "/users/{userId}/change-role",
    tag = "users",
    params(("userId" = i32, Path, description = "用户ID", example = 1)),
    request_body = UpdateUserRoleRequest,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 403, description = "Role change not allowed", body = ErrorBody)
    ),
)]
pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i32>,
    Json(request): Json<UpdateUserRoleRequest>,
) -> Result<Json<UserView>, AppError> {
    debug!("👑 用户 {} 修改用户 {} 的角色为 {}", user.user_id, user_id, request.role);

    let updated = state.users.update_user_role(user_id, &user, request.role).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(get,
    path = "/users/{userId}/favorite-projects",
    tag = "users",
    params(("userId" = i32, Path, description = "用户ID", example = 1)),
    responses(
        (status = 200, description = "Favorite projects of the user", body = Vec<ProjectView>)
    ),
)]
pub async fn get_user_favorite_projects(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<ProjectView>>, AppError> {
    debug!("⭐ 查询用户 {} 收藏的项目", user_id);

    let today = today();
    let projects = state.users.get_user_favorite_projects(user_id).await?;
    Ok(Json(projects.iter().map(|p| ProjectView::new(p, today)).collect()))
}
