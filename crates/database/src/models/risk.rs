//! 风险数据库模型

use crate::models::project::ProjectSummaryRecord;
use crate::models::user::UserRecord;
use chrono::{DateTime, Utc};
use shared_lib::Lifecycle;

/// 风险的解决信息
///
/// 解决人和解决时间总是成对出现，所以放在同一个结构体里。
#[derive(Debug, Clone)]
pub struct RiskResolution {
    pub resolved_by: UserRecord,
    pub resolved_at: DateTime<Utc>,
}

/// 风险信息
#[derive(Debug, Clone)]
pub struct RiskRecord {
    pub id: String,
    pub project: ProjectSummaryRecord,
    pub detail: String,
    pub date_created: DateTime<Utc>,
    pub created_by: UserRecord,
    pub resolution: Option<RiskResolution>,
    pub lifecycle: Lifecycle,
}

impl RiskRecord {
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

/// 风险创建参数
#[derive(Debug, Clone)]
pub struct NewRisk {
    pub project_id: i32,
    pub detail: String,
    pub created_by: i32,
}

/// 解决状态的变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionChange {
    /// 解决状态不变，只修改描述
    Keep,
    /// 未解决 -> 已解决
    Resolve { by: i32, at: DateTime<Utc> },
    /// 已解决 -> 未解决
    Clear,
}

/// 风险更新参数
#[derive(Debug, Clone)]
pub struct RiskUpdate {
    pub detail: String,
    pub resolution: ResolutionChange,
}
