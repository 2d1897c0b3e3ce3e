//! 工作包数据库模型

use crate::models::project::{DescriptionBulletRecord, WbsElementRecord};
use chrono::NaiveDate;
use shared_lib::{WbsNumber, WorkPackageStage};

/// 工作包完整信息
#[derive(Debug, Clone)]
pub struct WorkPackageRecord {
    pub work_package_id: i32,
    pub wbs_element: WbsElementRecord,
    pub project_id: i32,
    pub project_name: String,
    pub order_in_project: i32,
    pub start_date: NaiveDate,
    /// 持续周数
    pub duration: i32,
    pub stage: Option<WorkPackageStage>,
    pub blocked_by: Vec<WbsNumber>,
    pub expected_activities: Vec<DescriptionBulletRecord>,
    pub deliverables: Vec<DescriptionBulletRecord>,
}
