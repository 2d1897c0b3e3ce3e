//! 变更申请数据库模型

use chrono::{DateTime, Utc};
use shared_lib::Lifecycle;

/// 变更申请
///
/// 这里只关心审核结果，审核流程本身不在本服务中处理。
#[derive(Debug, Clone)]
pub struct ChangeRequestRecord {
    pub cr_id: i32,
    pub submitter_id: i32,
    pub date_submitted: DateTime<Utc>,
    pub reviewer_id: Option<i32>,
    pub date_reviewed: Option<DateTime<Utc>>,
    /// 审核前为 `None`
    pub accepted: Option<bool>,
    pub lifecycle: Lifecycle,
}

impl ChangeRequestRecord {
    pub fn is_reviewed(&self) -> bool {
        self.date_reviewed.is_some() && self.accepted.is_some()
    }
}
