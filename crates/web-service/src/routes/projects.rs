//! 项目相关接口
//!

use crate::auth::CurrentUser;
use crate::models::bom::{AssemblyView, MaterialView, ProjectBomView};
use crate::models::common::Message;
use crate::models::err::{AppError, ErrorBody};
use crate::models::projects::{
    LinkTypeView, ProjectCreateRequest, ProjectEditRequest, ProjectView, SetProjectTeamRequest,
};
use crate::routes::today;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use shared_lib::WbsNumber;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// 查询所有项目
///
/// 返回所有未删除的项目，已删除的项目只能通过 WBS 编号单独查询（会返回400）。
///
/// ## 返回值
///
/// 返回值的类型是 [`Result<Json<Vec<ProjectView>>, AppError>`]：
///
/// 1. [`Json`] 会对内部类型进行json序列化
/// 2. [`ProjectView`] 中的开始/结束日期、工作包进度等字段是按当天日期实时计算的
/// 3. [`AppError`] 会根据错误类型转换为相应的http状态码
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All active projects", body = Vec<ProjectView>)
    ),
)]
pub async fn get_all_projects(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProjectView>>, AppError> {
    debug!("🔍 查询所有项目");

    let today = today();
    let projects = state.projects.get_all_projects().await?;

    Ok(Json(projects.iter().map(|p| ProjectView::new(p, today)).collect()))
}

/// 查询所有链接类型
#[utoipa::path(get,
    path = "/projects/link-types",
    tag = "projects",
    responses(
        (status = 200, description = "All link types", body = Vec<LinkTypeView>)
    ),
)]
pub async fn get_all_link_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LinkTypeView>>, AppError> {
    debug!("🔍 查询所有链接类型");

    let link_types = state.projects.get_all_link_types().await?;
    Ok(Json(link_types.iter().map(LinkTypeView::from).collect()))
}

/// 查询指定项目信息
///
/// `wbsNum` 必须是项目编号（工作包号为0），否则返回400
#[utoipa::path(get,
    path = "/projects/{wbsNum}",
    tag = "projects",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    responses(
        (status = 200, description = "Project detail", body = ProjectView),
        (status = 400, description = "Invalid or deleted project", body = ErrorBody),
        (status = 404, description = "Project not found", body = ErrorBody)
    ),
)]
pub async fn get_single_project(
    State(state): State<Arc<AppState>>,
    Path(wbs_num): Path<String>,
) -> Result<Json<ProjectView>, AppError> {
    debug!("🔍 查询项目 {}", wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let project = state.projects.get_single_project(wbs_num).await?;

    Ok(Json(ProjectView::new(&project, today())))
}

/// 创建项目
///
/// 根据已审核通过的变更申请创建项目，返回新项目的 WBS 编号（`a.b.c` 格式字符串）
#[utoipa::path(post,
    path = "/projects/create",
    tag = "projects",
    request_body = ProjectCreateRequest,
    responses(
        (status = 200, description = "WBS number of the new project", body = String),
        (status = 403, description = "Guests cannot create projects", body = ErrorBody)
    ),
)]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<ProjectCreateRequest>,
) -> Result<Json<String>, AppError> {
    debug!("🆕 创建项目 {:#?}", request);

    request.validate()?;

    let wbs_num = state.projects.create_project(&user, request).await?;
    Ok(Json(wbs_num.to_string()))
}

/// 编辑项目
#[utoipa::path(post,
    path = "/projects/edit",
    tag = "projects",
    request_body = ProjectEditRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectView)
    ),
)]
pub async fn edit_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<ProjectEditRequest>,
) -> Result<Json<ProjectView>, AppError> {
    debug!("✏️ 编辑项目 {:#?}", request);

    request.validate()?;

    let project = state.projects.edit_project(&user, request).await?;
    Ok(Json(ProjectView::new(&project, today())))
}

/// 为项目指定负责团队
#[utoipa::path(post,
    path = "/projects/{wbsNum}/set-team",
    tag = "projects",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    request_body = SetProjectTeamRequest,
    responses(
        (status = 200, description = "Team assigned", body = Message)
    ),
)]
pub async fn set_project_team(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
    Json(request): Json<SetProjectTeamRequest>,
) -> Result<Json<Message>, AppError> {
    debug!("👥 项目 {} 指定团队 {}", wbs_num, request.team_id);

    request.validate()?;
    let wbs_num = WbsNumber::parse(&wbs_num)?;

    state.projects.set_project_team(&user, wbs_num, &request.team_id).await?;

    Ok(Json(Message::new(format!(
        "Project {} successfully assigned to team {}.",
        wbs_num, request.team_id
    ))))
}

/// 删除项目
///
/// 软删除，项目下的所有工作包会一起被删除
#[utoipa::path(delete,
    path = "/projects/{wbsNum}/delete",
    tag = "projects",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    responses(
        (status = 200, description = "Deleted project", body = ProjectView),
        (status = 403, description = "Only admins can delete projects", body = ErrorBody)
    ),
)]
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
) -> Result<Json<ProjectView>, AppError> {
    debug!("🗑️ 删除项目 {}", wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let project = state.projects.delete_project(&user, wbs_num).await?;

    Ok(Json(ProjectView::new(&project, today())))
}

/// 收藏/取消收藏项目
#[utoipa::path(post,
    path = "/projects/{wbsNum}/favorite",
    tag = "projects",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    responses(
        (status = 200, description = "Updated project", body = ProjectView)
    ),
)]
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
) -> Result<Json<ProjectView>, AppError> {
    debug!("⭐ 用户 {} 切换收藏项目 {}", user.user_id, wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let project = state.projects.toggle_favorite(wbs_num, &user).await?;

    Ok(Json(ProjectView::new(&project, today())))
}

/// 查询项目的物料清单
#[utoipa::path(get,
    path = "/projects/{wbsNum}/bom",
    tag = "bom",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    responses(
        (status = 200, description = "Assemblies and materials of the project", body = ProjectBomView)
    ),
)]
pub async fn get_project_bom(
    State(state): State<Arc<AppState>>,
    Path(wbs_num): Path<String>,
) -> Result<Json<ProjectBomView>, AppError> {
    debug!("🔍 查询项目 {} 的物料清单", wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let (assemblies, materials) = state.bom.get_project_bom(wbs_num).await?;

    Ok(Json(ProjectBomView {
        assemblies: assemblies.into_iter().map(AssemblyView::from).collect(),
        materials: materials.into_iter().map(MaterialView::from).collect(),
    }))
}
