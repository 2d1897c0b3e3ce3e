//! 变更申请仓库

use crate::models::change_request::ChangeRequestRecord;
use crate::repositories::traits::ChangeRequestRepositoryTrait;
use crate::DatabaseResult;
use chrono::{DateTime, Utc};
use shared_lib::Lifecycle;
use sqlx::PgPool;
use tracing::debug;

/// 变更申请仓库结构体
#[derive(Debug, Clone)]
pub struct ChangeRequestRepository {
    pool: PgPool,
}

impl ChangeRequestRepository {
    /// 创建新的变更申请仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ChangeRequestRow {
    cr_id: i32,
    submitter_id: i32,
    date_submitted: DateTime<Utc>,
    reviewer_id: Option<i32>,
    date_reviewed: Option<DateTime<Utc>>,
    accepted: Option<bool>,
    date_deleted: Option<DateTime<Utc>>,
    deleted_by_user_id: Option<i32>,
}

#[async_trait::async_trait]
impl ChangeRequestRepositoryTrait for ChangeRequestRepository {
    async fn get_change_request_by_id(&self, cr_id: i32) -> DatabaseResult<Option<ChangeRequestRecord>> {
        debug!("🔍 根据 ID 获取变更申请: {}", cr_id);

        let row = sqlx::query_as::<_, ChangeRequestRow>(
            r#"
            SELECT cr_id, submitter_id, date_submitted, reviewer_id, date_reviewed, accepted,
                   date_deleted, deleted_by_user_id
            FROM change_requests
            WHERE cr_id = $1
            "#,
        )
        .bind(cr_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ChangeRequestRecord {
            cr_id: row.cr_id,
            submitter_id: row.submitter_id,
            date_submitted: row.date_submitted,
            reviewer_id: row.reviewer_id,
            date_reviewed: row.date_reviewed,
            accepted: row.accepted,
            lifecycle: Lifecycle::from_columns(row.date_deleted, row.deleted_by_user_id),
        }))
    }
}
