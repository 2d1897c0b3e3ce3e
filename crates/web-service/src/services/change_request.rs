//! 变更申请校验
//!
//! 创建、编辑项目之前必须引用一个已经审核通过的变更申请。

use crate::models::err::{AppError, AppResult};
use database::models::ChangeRequestRecord;
use database::Repositories;
use tracing::warn;

/// 校验变更申请已审核通过
pub async fn validate_change_request_accepted(
    repositories: &Repositories,
    cr_id: i32,
) -> AppResult<ChangeRequestRecord> {
    let change_request = repositories
        .change_requests
        .get_change_request_by_id(cr_id)
        .await?
        .ok_or_else(|| AppError::not_found("Change Request", cr_id))?;

    check_accepted(change_request)
}

fn check_accepted(change_request: ChangeRequestRecord) -> AppResult<ChangeRequestRecord> {
    if change_request.lifecycle.is_deleted() {
        return Err(AppError::deleted("Change Request", change_request.cr_id));
    }

    if !change_request.is_reviewed() {
        warn!("⚠️ 变更申请 {} 尚未审核", change_request.cr_id);
        return Err(AppError::bad_request("Cannot implement an unreviewed change request"));
    }

    if change_request.accepted != Some(true) {
        return Err(AppError::bad_request("Cannot implement a denied change request"));
    }

    Ok(change_request)
}
