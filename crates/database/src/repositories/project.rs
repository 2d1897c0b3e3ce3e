//! 项目仓库
//!
//! 负责项目、项目团队、收藏、链接类型和描述条目的数据库操作

use crate::models::project::{
    BulletKind, DescriptionBulletRecord, LinkTypeRecord, NewProject, ProjectChanges, ProjectRecord,
};
use crate::repositories::rows::{
    bullet_columns, bullet_from_row, fetch_bullets, fetch_links, fetch_team_memberships, fetch_users,
    link_type_from_row, load_wbs_element, wbs_columns, BulletRow, LinkTypeRow, WbsElementRow,
};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::repositories::work_package::fetch_project_work_packages;
use crate::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use shared_lib::WbsNumber;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

/// 项目查询语句，`w` 为项目的 WBS 元素
macro_rules! project_select {
    () => {
        concat!(
            "SELECT p.project_id, p.summary, p.budget, p.rules, ",
            wbs_columns!(),
            " FROM projects p JOIN wbs_elements w ON w.wbs_element_id = p.wbs_element_id"
        )
    };
}

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 组装完整的项目记录
    ///
    /// 依次加载 WBS 元素、描述条目、链接、工作包、负责团队和收藏用户。
    async fn load_project(&self, row: ProjectRow) -> DatabaseResult<ProjectRecord> {
        let wbs_element_id = row.wbs.wbs_element_id;
        let wbs_element = load_wbs_element(&self.pool, row.wbs).await?;

        let (mut goals, mut features, mut other_constraints) = (Vec::new(), Vec::new(), Vec::new());
        for bullet in fetch_bullets(&self.pool, wbs_element_id).await? {
            match bullet.kind {
                BulletKind::Goal => goals.push(bullet),
                BulletKind::Feature => features.push(bullet),
                BulletKind::OtherConstraint => other_constraints.push(bullet),
                BulletKind::ExpectedActivity | BulletKind::Deliverable => {}
            }
        }

        let favorited_by = sqlx::query_scalar::<_, i32>(
            "SELECT user_id FROM favorite_projects WHERE project_id = $1 ORDER BY user_id",
        )
        .bind(row.project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ProjectRecord {
            project_id: row.project_id,
            wbs_element,
            summary: row.summary,
            budget: row.budget,
            rules: row.rules,
            goals,
            features,
            other_constraints,
            links: fetch_links(&self.pool, wbs_element_id).await?,
            work_packages: fetch_project_work_packages(&self.pool, row.project_id).await?,
            teams: fetch_team_memberships(&self.pool, row.project_id).await?,
            favorited_by,
        })
    }

    async fn require_project(&self, project_id: i32) -> DatabaseResult<ProjectRecord> {
        self.get_project_by_id(project_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("project {project_id}")))
    }

    /// 查询项目对应的 WBS 元素 ID
    async fn project_wbs_element_id(tx: &mut Transaction<'_, Postgres>, project_id: i32) -> DatabaseResult<i32> {
        sqlx::query_scalar::<_, i32>("SELECT wbs_element_id FROM projects WHERE project_id = $1")
            .bind(project_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("project {project_id}")))
    }

    async fn get_description_bullet_by_id(&self, bullet_id: i32) -> DatabaseResult<Option<DescriptionBulletRecord>> {
        let row = sqlx::query_as::<_, BulletRow>(concat!(
            "SELECT ",
            bullet_columns!(),
            " FROM description_bullets WHERE description_bullet_id = $1"
        ))
        .bind(bullet_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let users = fetch_users(&self.pool, &row.user_checked_id.into_iter().collect::<Vec<_>>()).await?;
        bullet_from_row(row, &users).map(Some)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    project_id: i32,
    summary: String,
    budget: i32,
    rules: Vec<String>,
    #[sqlx(flatten)]
    wbs: WbsElementRow,
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn find_projects(&self) -> DatabaseResult<Vec<ProjectRecord>> {
        debug!("🔍 查询全部项目");

        let rows = sqlx::query_as::<_, ProjectRow>(concat!(
            project_select!(),
            " WHERE w.date_deleted IS NULL ORDER BY w.car_number, w.project_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            projects.push(self.load_project(row).await?);
        }

        debug!("✅ 查询完成 - 找到 {} 个项目", projects.len());
        Ok(projects)
    }

    async fn get_project_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<ProjectRecord>> {
        debug!("🔍 根据 WBS 编号获取项目: {}", wbs_num);

        let row = sqlx::query_as::<_, ProjectRow>(concat!(
            project_select!(),
            " WHERE w.car_number = $1 AND w.project_number = $2 AND w.work_package_number = $3"
        ))
        .bind(wbs_num.car_number)
        .bind(wbs_num.project_number)
        .bind(wbs_num.work_package_number)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => self.load_project(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn get_project_by_id(&self, project_id: i32) -> DatabaseResult<Option<ProjectRecord>> {
        debug!("🔍 根据 ID 获取项目: {}", project_id);

        let row = sqlx::query_as::<_, ProjectRow>(concat!(project_select!(), " WHERE p.project_id = $1"))
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => self.load_project(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn highest_project_number(&self, car_number: i32) -> DatabaseResult<i32> {
        let highest = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT COALESCE(MAX(project_number), 0)
            FROM wbs_elements
            WHERE car_number = $1 AND work_package_number = 0
            "#,
        )
        .bind(car_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(highest)
    }

    async fn create_project(&self, project: NewProject) -> DatabaseResult<WbsNumber> {
        debug!("📝 创建项目: {:#?}", project);

        let wbs_num = WbsNumber::new(project.car_number, project.project_number, 0);
        let mut tx = self.pool.begin().await?;

        let wbs_element_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO wbs_elements (car_number, project_number, work_package_number, name)
            VALUES ($1, $2, 0, $3)
            RETURNING wbs_element_id
            "#,
        )
        .bind(wbs_num.car_number)
        .bind(wbs_num.project_number)
        .bind(&project.name)
        .fetch_one(&mut *tx)
        .await?;

        let project_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO projects (wbs_element_id, summary) VALUES ($1, $2) RETURNING project_id",
        )
        .bind(wbs_element_id)
        .bind(&project.summary)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO project_teams (project_id, team_id) SELECT $1, UNNEST($2::TEXT[])")
            .bind(project_id)
            .bind(&project.team_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("✅ 项目创建成功: {}", wbs_num);
        Ok(wbs_num)
    }

    async fn update_project(&self, project_id: i32, changes: ProjectChanges) -> DatabaseResult<ProjectRecord> {
        debug!("🔄 更新项目 {} 信息: {:#?}", project_id, changes);

        let mut tx = self.pool.begin().await?;
        let wbs_element_id = Self::project_wbs_element_id(&mut tx, project_id).await?;

        sqlx::query(
            "UPDATE wbs_elements SET name = $2, project_lead_id = $3, project_manager_id = $4 WHERE wbs_element_id = $1",
        )
        .bind(wbs_element_id)
        .bind(&changes.name)
        .bind(changes.project_lead_id)
        .bind(changes.project_manager_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE projects SET budget = $2, summary = $3, rules = $4 WHERE project_id = $1")
            .bind(project_id)
            .bind(changes.budget)
            .bind(&changes.summary)
            .bind(&changes.rules)
            .execute(&mut *tx)
            .await?;

        for bullets in &changes.bullets {
            sqlx::query(
                r#"
                INSERT INTO description_bullets (wbs_element_id, kind, detail)
                SELECT $1, $2, UNNEST($3::TEXT[])
                "#,
            )
            .bind(wbs_element_id)
            .bind(bullets.kind.as_str())
            .bind(&bullets.create)
            .execute(&mut *tx)
            .await?;

            for (bullet_id, detail) in &bullets.update {
                sqlx::query("UPDATE description_bullets SET detail = $2 WHERE description_bullet_id = $1")
                    .bind(bullet_id)
                    .bind(detail)
                    .execute(&mut *tx)
                    .await?;
            }

            sqlx::query("UPDATE description_bullets SET date_deleted = now() WHERE description_bullet_id = ANY($1)")
                .bind(&bullets.delete)
                .execute(&mut *tx)
                .await?;
        }

        for link in &changes.links.create {
            sqlx::query(
                "INSERT INTO links (link_type_name, wbs_element_id, url, creator_id) VALUES ($1, $2, $3, $4)",
            )
            .bind(&link.link_type_name)
            .bind(wbs_element_id)
            .bind(&link.url)
            .bind(changes.edited_by)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE links SET date_deleted = now() WHERE link_id = ANY($1)")
            .bind(&changes.links.delete)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("✅ 项目更新成功");
        self.require_project(project_id).await
    }

    async fn add_project_team(&self, project_id: i32, team_id: &str) -> DatabaseResult<()> {
        debug!("🔄 项目 {} 添加负责团队 {}", project_id, team_id);

        sqlx::query("INSERT INTO project_teams (project_id, team_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(project_id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn soft_delete_project(&self, project_id: i32, deleted_by: i32) -> DatabaseResult<ProjectRecord> {
        debug!("🗑️ 软删除项目: {}", project_id);

        // 项目和其下所有工作包的 WBS 元素在同一个事务里标记删除
        let mut tx = self.pool.begin().await?;
        let wbs_element_id = Self::project_wbs_element_id(&mut tx, project_id).await?;

        let work_package_elements = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE wbs_elements w
            SET date_deleted = now(), deleted_by_user_id = $2
            FROM work_packages wp
            WHERE wp.wbs_element_id = w.wbs_element_id AND wp.project_id = $1 AND w.date_deleted IS NULL
            RETURNING w.wbs_element_id
            "#,
        )
        .bind(project_id)
        .bind(deleted_by)
        .fetch_all(&mut *tx)
        .await?;

        sqlx::query("UPDATE wbs_elements SET date_deleted = now(), deleted_by_user_id = $2 WHERE wbs_element_id = $1")
            .bind(wbs_element_id)
            .bind(deleted_by)
            .execute(&mut *tx)
            .await?;

        let mut element_ids = work_package_elements;
        element_ids.push(wbs_element_id);

        sqlx::query(
            "UPDATE description_bullets SET date_deleted = now() WHERE wbs_element_id = ANY($1) AND date_deleted IS NULL",
        )
        .bind(&element_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE links SET date_deleted = now() WHERE wbs_element_id = ANY($1) AND date_deleted IS NULL")
            .bind(&element_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("✅ 项目删除成功，同时删除了 {} 个工作包", element_ids.len() - 1);
        self.require_project(project_id).await
    }

    async fn set_project_favorite(&self, project_id: i32, user_id: i32, favorite: bool) -> DatabaseResult<()> {
        let sql = if favorite {
            "INSERT INTO favorite_projects (project_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        } else {
            "DELETE FROM favorite_projects WHERE project_id = $1 AND user_id = $2"
        };

        sqlx::query(sql).bind(project_id).bind(user_id).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_link_types(&self) -> DatabaseResult<Vec<LinkTypeRecord>> {
        let rows = sqlx::query_as::<_, LinkTypeRow>(
            "SELECT name, date_created, creator_id, required, icon_name FROM link_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let user_ids: Vec<i32> = rows.iter().map(|row| row.creator_id).collect();
        let users = fetch_users(&self.pool, &user_ids).await?;

        rows.into_iter().map(|row| link_type_from_row(row, &users)).collect()
    }

    async fn get_description_bullet(&self, bullet_id: i32) -> DatabaseResult<Option<DescriptionBulletRecord>> {
        debug!("🔍 根据 ID 获取描述条目: {}", bullet_id);
        self.get_description_bullet_by_id(bullet_id).await
    }

    async fn set_description_bullet_check(
        &self,
        bullet_id: i32,
        checked: Option<(i32, DateTime<Utc>)>,
    ) -> DatabaseResult<DescriptionBulletRecord> {
        debug!("🔄 更新描述条目 {} 的勾选状态: {:?}", bullet_id, checked);

        let (user_id, at) = checked.unzip();
        sqlx::query(
            "UPDATE description_bullets SET user_checked_id = $2, date_time_checked = $3 WHERE description_bullet_id = $1",
        )
        .bind(bullet_id)
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        self.get_description_bullet_by_id(bullet_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("description bullet {bullet_id}")))
    }
}
