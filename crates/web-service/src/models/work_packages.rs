//! 工作包相关的返回对象和进度计算
//!
//! 进度相关字段都是读取时实时计算的，数据库中不存储。

use crate::models::bullets::{bullet_views, DescriptionBulletView};
use crate::models::users::UserView;
use chrono::{DateTime, Days, NaiveDate, Utc};
use database::models::{DescriptionBulletRecord, WorkPackageRecord};
use serde::{Deserialize, Serialize};
use shared_lib::{WbsElementStatus, WbsNumber, WorkPackageStage};
use utoipa::ToSchema;

/// 工作包进度与计划进度的对比
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineStatus {
    Ahead,
    OnTrack,
    Behind,
    VeryBehind,
}

impl TimelineStatus {
    /// 根据 `实际进度 - 计划进度` 的差值判断
    pub fn from_progress(progress: i32, expected_progress: i32) -> Self {
        match progress - expected_progress {
            diff if diff >= 10 => TimelineStatus::Ahead,
            diff if diff >= -10 => TimelineStatus::OnTrack,
            diff if diff >= -30 => TimelineStatus::Behind,
            _ => TimelineStatus::VeryBehind,
        }
    }
}

/// 结束日期 = 开始日期 + 持续周数
pub fn end_date(start_date: NaiveDate, duration_weeks: i32) -> NaiveDate {
    let days = 7 * u64::from(duration_weeks.max(0).unsigned_abs());
    start_date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// 已勾选条目占比（百分比，四舍五入），没有条目时为 0
pub fn progress<'a>(bullets: impl IntoIterator<Item = &'a DescriptionBulletRecord>) -> i32 {
    let (checked, total) = bullets
        .into_iter()
        .filter(|bullet| bullet.lifecycle.is_active())
        .fold((0u32, 0u32), |(checked, total), bullet| {
            (checked + u32::from(bullet.checked.is_some()), total + 1)
        });

    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(checked) / f64::from(total)).round() as i32
}

/// 按时间推算的计划进度（百分比，0~100）
pub fn expected_progress(start_date: NaiveDate, duration_weeks: i32, today: NaiveDate) -> i32 {
    if duration_weeks <= 0 {
        return 0;
    }
    if today > end_date(start_date, duration_weeks) {
        return 100;
    }

    let elapsed_days = (today - start_date).num_days() as f64;
    let total_days = 7.0 * f64::from(duration_weeks);
    ((100.0 * elapsed_days / total_days).round() as i32).clamp(0, 100)
}

/// 工作包
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackageView {
    #[schema(example = 5)]
    pub id: i32,

    pub wbs_num: WbsNumber,

    pub date_created: DateTime<Utc>,

    #[schema(example = "Bodywork Concept of Design")]
    pub name: String,

    pub status: WbsElementStatus,

    pub project_lead: Option<UserView>,

    pub project_manager: Option<UserView>,

    pub date_deleted: Option<DateTime<Utc>>,

    pub order_in_project: i32,

    /// 实际进度（百分比）
    pub progress: i32,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// 持续周数
    pub duration: i32,

    /// 计划进度（百分比）
    pub expected_progress: i32,

    pub timeline_status: TimelineStatus,

    pub blocked_by: Vec<WbsNumber>,

    pub expected_activities: Vec<DescriptionBulletView>,

    pub deliverables: Vec<DescriptionBulletView>,

    #[schema(example = "Impact Attenuator")]
    pub project_name: String,

    pub stage: Option<WorkPackageStage>,
}

impl WorkPackageView {
    /// 以 `today` 为基准计算进度字段
    pub fn new(work_package: &WorkPackageRecord, today: NaiveDate) -> Self {
        let element = &work_package.wbs_element;
        let progress = progress(
            work_package
                .expected_activities
                .iter()
                .chain(work_package.deliverables.iter()),
        );
        let expected_progress = expected_progress(work_package.start_date, work_package.duration, today);

        Self {
            id: work_package.work_package_id,
            wbs_num: element.wbs_num,
            date_created: element.date_created,
            name: element.name.clone(),
            status: element.status,
            project_lead: element.project_lead.as_ref().map(UserView::from),
            project_manager: element.project_manager.as_ref().map(UserView::from),
            date_deleted: element.lifecycle.date_deleted(),
            order_in_project: work_package.order_in_project,
            progress,
            start_date: work_package.start_date,
            end_date: end_date(work_package.start_date, work_package.duration),
            duration: work_package.duration,
            expected_progress,
            timeline_status: TimelineStatus::from_progress(progress, expected_progress),
            blocked_by: work_package.blocked_by.clone(),
            expected_activities: bullet_views(&work_package.expected_activities),
            deliverables: bullet_views(&work_package.deliverables),
            project_name: work_package.project_name.clone(),
            stage: work_package.stage,
        }
    }
}
