//! 工作包相关接口

use crate::auth::CurrentUser;
use crate::models::err::{AppError, ErrorBody};
use crate::models::work_packages::WorkPackageView;
use crate::routes::today;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use shared_lib::WbsNumber;
use std::sync::Arc;
use tracing::debug;

/// 查询所有未删除的工作包
///
/// 进度、预期进度、时间线状态都按当天日期计算
#[utoipa::path(get,
    path = "/work-packages",
    tag = "work-packages",
    responses(
        (status = 200, description = "All active work packages", body = Vec<WorkPackageView>)
    ),
)]
pub async fn get_all_work_packages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WorkPackageView>>, AppError> {
    debug!("🔍 查询所有工作包");

    let today = today();
    let work_packages = state.work_packages.get_all_work_packages().await?;

    Ok(Json(work_packages.iter().map(|wp| WorkPackageView::new(wp, today)).collect()))
}

#[utoipa::path(get,
    path = "/work-packages/{wbsNum}",
    tag = "work-packages",
    params(("wbsNum" = String, Path, description = "工作包 WBS 编号", example = "1.1.1")),
    responses(
        (status = 200, description = "Work package detail", body = WorkPackageView),
        (status = 404, description = "Work package not found", body = ErrorBody)
    ),
)]
pub async fn get_single_work_package(
    State(state): State<Arc<AppState>>,
    Path(wbs_num): Path<String>,
) -> Result<Json<WorkPackageView>, AppError> {
    debug!("🔍 查询工作包 {}", wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let work_package = state.work_packages.get_single_work_package(wbs_num).await?;

    Ok(Json(WorkPackageView::new(&work_package, today())))
}

/// 删除工作包（软删除）
#[utoipa::path(delete,
    path = "/work-packages/{wbsNum}/delete",
    tag = "work-packages",
    params(("wbsNum" = String, Path, description = "工作包 WBS 编号", example = "1.1.1")),
    responses(
        (status = 200, description = "Deleted work package", body = WorkPackageView),
        (status = 403, description = "Only admins can delete work packages", body = ErrorBody)
    ),
)]
pub async fn delete_work_package(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
) -> Result<Json<WorkPackageView>, AppError> {
    debug!("🗑️ 删除工作包 {}", wbs_num);

    let wbs_num = WbsNumber::parse(&wbs_num)?;
    let work_package = state.work_packages.delete_work_package(&user, wbs_num).await?;

    Ok(Json(WorkPackageView::new(&work_package, today())))
}
