//! 风险相关接口

use crate::auth::CurrentUser;
use crate::models::err::{AppError, ErrorBody};
use crate::models::risks::{RiskCreateRequest, RiskDeleteRequest, RiskEditRequest, RiskView};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// 查询项目下的风险
#[utoipa::path(get,
    path = "/risks/{projectId}",
    tag = "risks",
    params(("projectId" = i32, Path, description = "项目ID", example = 1)),
    responses(
        (status = 200, description = "Active risks of the project", body = Vec<RiskView>),
        (status = 404, description = "Project not found", body = ErrorBody)
    ),
)]
pub async fn get_risks_for_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<RiskView>>, AppError> {
    debug!("🔍 查询项目 {} 的风险", project_id);

    let risks = state.risks.get_risks_for_project(project_id).await?;
    Ok(Json(risks.iter().map(RiskView::from).collect()))
}

/// 创建风险
///
/// 返回新风险的ID
#[utoipa::path(post,
    path = "/risks/create",
    tag = "risks",
    request_body = RiskCreateRequest,
    responses(
        (status = 200, description = "Id of the new risk", body = String),
        (status = 403, description = "Guests cannot create risks", body = ErrorBody)
    ),
)]
pub async fn create_risk(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RiskCreateRequest>,
) -> Result<Json<String>, AppError> {
    debug!("🆕 创建风险 {:#?}", request);

    request.validate()?;

    let risk_id = state.risks.create_risk(&user, request.project_id, &request.detail).await?;
    Ok(Json(risk_id))
}

/// 编辑风险
///
/// `resolved` 与当前状态不同时会写入或清除解决人/解决时间
#[utoipa::path(post,
    path = "/risks/edit",
    tag = "risks",
    request_body = RiskEditRequest,
    responses(
        (status = 200, description = "Updated risk", body = RiskView)
    ),
)]
pub async fn edit_risk(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RiskEditRequest>,
) -> Result<Json<RiskView>, AppError> {
    debug!("✏️ 编辑风险 {:#?}", request);

    request.validate()?;

    let risk = state
        .risks
        .edit_risk(&user, &request.id, &request.detail, request.resolved)
        .await?;
    Ok(Json(RiskView::from(&risk)))
}

#[utoipa::path(post,
    path = "/risks/delete",
    tag = "risks",
    request_body = RiskDeleteRequest,
    responses(
        (status = 200, description = "Deleted risk", body = RiskView),
        (status = 400, description = "Risk already deleted", body = ErrorBody)
    ),
)]
pub async fn delete_risk(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<RiskDeleteRequest>,
) -> Result<Json<RiskView>, AppError> {
    debug!("🗑️ 删除风险 {}", request.risk_id);

    request.validate()?;

    let risk = state.risks.delete_risk(&user, &request.risk_id).await?;
    Ok(Json(RiskView::from(&risk)))
}
