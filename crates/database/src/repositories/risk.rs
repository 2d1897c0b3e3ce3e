//! 风险仓库
//!
//! 负责风险的查询、创建、编辑和软删除

use crate::models::project::ProjectSummaryRecord;
use crate::models::risk::{NewRisk, ResolutionChange, RiskRecord, RiskResolution, RiskUpdate};
use crate::repositories::rows::{fetch_users, require_user, ProjectSummaryRow};
use crate::repositories::traits::RiskRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use shared_lib::Lifecycle;
use sqlx::PgPool;
use tracing::debug;

/// 风险查询语句，同时带出所属项目的摘要
macro_rules! risk_select {
    () => {
        r#"
        SELECT r.id, r.detail, r.date_created, r.created_by_user_id, r.resolved_at, r.resolved_by_user_id,
               r.date_deleted, r.deleted_by_user_id,
               p.project_id, w.car_number, w.project_number, w.work_package_number, w.name, w.status
        FROM risks r
        JOIN projects p ON p.project_id = r.project_id
        JOIN wbs_elements w ON w.wbs_element_id = p.wbs_element_id
        "#
    };
}

/// 风险仓库结构体
#[derive(Debug, Clone)]
pub struct RiskRepository {
    pool: PgPool,
}

impl RiskRepository {
    /// 创建新的风险仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_risks(&self, rows: Vec<RiskRow>) -> DatabaseResult<Vec<RiskRecord>> {
        let user_ids: Vec<i32> = rows
            .iter()
            .flat_map(|row| std::iter::once(row.created_by_user_id).chain(row.resolved_by_user_id))
            .collect();
        let users = fetch_users(&self.pool, &user_ids).await?;

        rows.into_iter()
            .map(|row| {
                let resolution = match (row.resolved_by_user_id, row.resolved_at) {
                    (Some(user_id), Some(resolved_at)) => Some(RiskResolution {
                        resolved_by: require_user(&users, user_id)?,
                        resolved_at,
                    }),
                    _ => None,
                };

                Ok(RiskRecord {
                    id: row.id,
                    project: ProjectSummaryRecord::try_from(row.project)?,
                    detail: row.detail,
                    date_created: row.date_created,
                    created_by: require_user(&users, row.created_by_user_id)?,
                    resolution,
                    lifecycle: Lifecycle::from_columns(row.date_deleted, row.deleted_by_user_id),
                })
            })
            .collect()
    }

    async fn require_risk(&self, risk_id: &str) -> DatabaseResult<RiskRecord> {
        self.get_risk_by_id(risk_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("risk {risk_id}")))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RiskRow {
    id: String,
    detail: String,
    date_created: DateTime<Utc>,
    created_by_user_id: i32,
    resolved_at: Option<DateTime<Utc>>,
    resolved_by_user_id: Option<i32>,
    date_deleted: Option<DateTime<Utc>>,
    deleted_by_user_id: Option<i32>,
    #[sqlx(flatten)]
    project: ProjectSummaryRow,
}

#[async_trait::async_trait]
impl RiskRepositoryTrait for RiskRepository {
    async fn find_risks_for_project(&self, project_id: i32) -> DatabaseResult<Vec<RiskRecord>> {
        debug!("🔍 查询项目 {} 的风险", project_id);

        let rows = sqlx::query_as::<_, RiskRow>(concat!(
            risk_select!(),
            " WHERE r.project_id = $1 AND r.date_deleted IS NULL ORDER BY r.date_created"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        self.load_risks(rows).await
    }

    async fn get_risk_by_id(&self, risk_id: &str) -> DatabaseResult<Option<RiskRecord>> {
        debug!("🔍 根据 ID 获取风险: {}", risk_id);

        let row = sqlx::query_as::<_, RiskRow>(concat!(risk_select!(), " WHERE r.id = $1"))
            .bind(risk_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.load_risks(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create_risk(&self, risk: NewRisk) -> DatabaseResult<RiskRecord> {
        debug!("📝 创建风险: {:#?}", risk);

        let risk_id = sqlx::query_scalar::<_, String>(
            "INSERT INTO risks (project_id, detail, created_by_user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(risk.project_id)
        .bind(&risk.detail)
        .bind(risk.created_by)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 风险创建成功: {}", risk_id);
        self.require_risk(&risk_id).await
    }

    async fn update_risk(&self, risk_id: &str, update: RiskUpdate) -> DatabaseResult<RiskRecord> {
        debug!("🔄 更新风险 {}: {:?}", risk_id, update);

        let result = match update.resolution {
            ResolutionChange::Keep => {
                sqlx::query("UPDATE risks SET detail = $2 WHERE id = $1")
                    .bind(risk_id)
                    .bind(&update.detail)
                    .execute(&self.pool)
                    .await?
            }
            ResolutionChange::Resolve { by, at } => {
                sqlx::query(
                    r#"
                    UPDATE risks
                    SET detail = $2, is_resolved = TRUE, resolved_by_user_id = $3, resolved_at = $4
                    WHERE id = $1
                    "#,
                )
                .bind(risk_id)
                .bind(&update.detail)
                .bind(by)
                .bind(at)
                .execute(&self.pool)
                .await?
            }
            ResolutionChange::Clear => {
                sqlx::query(
                    r#"
                    UPDATE risks
                    SET detail = $2, is_resolved = FALSE, resolved_by_user_id = NULL, resolved_at = NULL
                    WHERE id = $1
                    "#,
                )
                .bind(risk_id)
                .bind(&update.detail)
                .execute(&self.pool)
                .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("risk {risk_id}")));
        }

        debug!("✅ 风险更新成功");
        self.require_risk(risk_id).await
    }

    async fn soft_delete_risk(&self, risk_id: &str, deleted_by: i32) -> DatabaseResult<RiskRecord> {
        debug!("🗑️ 软删除风险: {}", risk_id);

        let result = sqlx::query("UPDATE risks SET date_deleted = now(), deleted_by_user_id = $2 WHERE id = $1")
            .bind(risk_id)
            .bind(deleted_by)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("risk {risk_id}")));
        }

        debug!("✅ 风险删除成功");
        self.require_risk(risk_id).await
    }
}
