//! 工作包仓库
//!
//! 负责工作包的查询和软删除，项目仓库也通过这里加载项目下的工作包

use crate::models::project::BulletKind;
use crate::models::work_package::WorkPackageRecord;
use crate::repositories::rows::{fetch_bullets, load_wbs_element, wbs_columns, WbsElementRow};
use crate::repositories::traits::WorkPackageRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::NaiveDate;
use shared_lib::{WbsNumber, WorkPackageStage};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

/// 工作包查询语句，`w` 为工作包自身的 WBS 元素，`pw` 为所属项目的 WBS 元素
macro_rules! work_package_select {
    () => {
        concat!(
            "SELECT wp.work_package_id, wp.project_id, wp.order_in_project, wp.start_date, wp.duration, wp.stage, \
             pw.name AS project_name, ",
            wbs_columns!(),
            " FROM work_packages wp \
             JOIN wbs_elements w ON w.wbs_element_id = wp.wbs_element_id \
             JOIN projects p ON p.project_id = wp.project_id \
             JOIN wbs_elements pw ON pw.wbs_element_id = p.wbs_element_id"
        )
    };
}

/// 工作包仓库结构体
#[derive(Debug, Clone)]
pub struct WorkPackageRepository {
    pool: PgPool,
}

impl WorkPackageRepository {
    /// 创建新的工作包仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn get_work_package_by_id(&self, work_package_id: i32) -> DatabaseResult<Option<WorkPackageRecord>> {
        let row = sqlx::query_as::<_, WorkPackageRow>(concat!(work_package_select!(), " WHERE wp.work_package_id = $1"))
            .bind(work_package_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(load_work_packages(&self.pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WorkPackageRow {
    work_package_id: i32,
    project_id: i32,
    order_in_project: i32,
    start_date: NaiveDate,
    duration: i32,
    stage: Option<String>,
    project_name: String,
    #[sqlx(flatten)]
    wbs: WbsElementRow,
}

#[derive(Debug, sqlx::FromRow)]
struct BlockedByRow {
    work_package_id: i32,
    car_number: i32,
    project_number: i32,
    work_package_number: i32,
}

/// 组装完整的工作包记录（前置依赖、预期活动、交付物）
pub(crate) async fn load_work_packages(pool: &PgPool, rows: Vec<WorkPackageRow>) -> DatabaseResult<Vec<WorkPackageRecord>> {
    let ids: Vec<i32> = rows.iter().map(|row| row.work_package_id).collect();
    let blocked_rows = sqlx::query_as::<_, BlockedByRow>(
        r#"
        SELECT work_package_id, car_number, project_number, work_package_number
        FROM work_package_blocked_by
        WHERE work_package_id = ANY($1)
        ORDER BY car_number, project_number, work_package_number
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut blocked_by: HashMap<i32, Vec<WbsNumber>> = HashMap::new();
    for row in blocked_rows {
        blocked_by
            .entry(row.work_package_id)
            .or_default()
            .push(WbsNumber::new(row.car_number, row.project_number, row.work_package_number));
    }

    let mut work_packages = Vec::with_capacity(rows.len());
    for row in rows {
        let bullets = fetch_bullets(pool, row.wbs.wbs_element_id).await?;
        let (expected_activities, deliverables): (Vec<_>, Vec<_>) = bullets
            .into_iter()
            .filter(|bullet| matches!(bullet.kind, BulletKind::ExpectedActivity | BulletKind::Deliverable))
            .partition(|bullet| bullet.kind == BulletKind::ExpectedActivity);

        work_packages.push(WorkPackageRecord {
            work_package_id: row.work_package_id,
            wbs_element: load_wbs_element(pool, row.wbs).await?,
            project_id: row.project_id,
            project_name: row.project_name,
            order_in_project: row.order_in_project,
            start_date: row.start_date,
            duration: row.duration,
            stage: row.stage.map(|stage| stage.parse::<WorkPackageStage>()).transpose()?,
            blocked_by: blocked_by.remove(&row.work_package_id).unwrap_or_default(),
            expected_activities,
            deliverables,
        });
    }

    Ok(work_packages)
}

/// 查询项目下所有未删除的工作包
pub(crate) async fn fetch_project_work_packages(pool: &PgPool, project_id: i32) -> DatabaseResult<Vec<WorkPackageRecord>> {
    let rows = sqlx::query_as::<_, WorkPackageRow>(concat!(
        work_package_select!(),
        " WHERE wp.project_id = $1 AND w.date_deleted IS NULL ORDER BY wp.order_in_project, w.work_package_number"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    load_work_packages(pool, rows).await
}

#[async_trait::async_trait]
impl WorkPackageRepositoryTrait for WorkPackageRepository {
    async fn find_work_packages(&self) -> DatabaseResult<Vec<WorkPackageRecord>> {
        debug!("🔍 查询全部工作包");

        let rows = sqlx::query_as::<_, WorkPackageRow>(concat!(
            work_package_select!(),
            " WHERE w.date_deleted IS NULL AND pw.date_deleted IS NULL \
              ORDER BY w.car_number, w.project_number, w.work_package_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        let work_packages = load_work_packages(&self.pool, rows).await?;
        debug!("✅ 查询完成 - 找到 {} 个工作包", work_packages.len());
        Ok(work_packages)
    }

    async fn get_work_package_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<WorkPackageRecord>> {
        debug!("🔍 根据 WBS 编号获取工作包: {}", wbs_num);

        let row = sqlx::query_as::<_, WorkPackageRow>(concat!(
            work_package_select!(),
            " WHERE w.car_number = $1 AND w.project_number = $2 AND w.work_package_number = $3"
        ))
        .bind(wbs_num.car_number)
        .bind(wbs_num.project_number)
        .bind(wbs_num.work_package_number)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(load_work_packages(&self.pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn soft_delete_work_package(&self, work_package_id: i32, deleted_by: i32) -> DatabaseResult<WorkPackageRecord> {
        debug!("🗑️ 软删除工作包: {}", work_package_id);

        let mut tx = self.pool.begin().await?;

        let wbs_element_id = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE wbs_elements w
            SET date_deleted = now(), deleted_by_user_id = $2
            FROM work_packages wp
            WHERE wp.wbs_element_id = w.wbs_element_id AND wp.work_package_id = $1
            RETURNING w.wbs_element_id
            "#,
        )
        .bind(work_package_id)
        .bind(deleted_by)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("work package {work_package_id}")))?;

        sqlx::query("UPDATE description_bullets SET date_deleted = now() WHERE wbs_element_id = $1 AND date_deleted IS NULL")
            .bind(wbs_element_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("✅ 工作包删除成功");
        self.get_work_package_by_id(work_package_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("work package {work_package_id}")))
    }
}
