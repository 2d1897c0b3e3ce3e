//! 描述条目相关接口

use crate::auth::CurrentUser;
use crate::models::bullets::{CheckBulletRequest, DescriptionBulletView};
use crate::models::err::{AppError, ErrorBody};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// 勾选/取消勾选描述条目
///
/// 未勾选的条目会被当前用户勾选，已勾选的条目会被取消勾选
#[utoipa::path(post,
    path = "/description-bullets/check",
    tag = "description-bullets",
    request_body = CheckBulletRequest,
    responses(
        (status = 200, description = "Updated bullet", body = DescriptionBulletView),
        (status = 404, description = "Bullet not found", body = ErrorBody)
    ),
)]
pub async fn check_description_bullet(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CheckBulletRequest>,
) -> Result<Json<DescriptionBulletView>, AppError> {
    debug!("☑️ 用户 {} 勾选描述条目 {}", user.user_id, request.description_bullet_id);

    request.validate()?;

    let bullet = state
        .bullets
        .check_description_bullet(&user, request.description_bullet_id)
        .await?;
    Ok(Json(DescriptionBulletView::from(&bullet)))
}
