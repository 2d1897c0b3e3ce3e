//! 团队仓库
//!
//! 负责团队、团队成员、组长和负责人的数据库操作

use crate::models::project::ProjectSummaryRecord;
use crate::models::team::{NewTeam, TeamRecord};
use crate::repositories::rows::{fetch_users, require_user, ProjectSummaryRow};
use crate::repositories::traits::TeamRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;

/// 团队查询语句，WHERE 条件由调用方拼接
macro_rules! team_select {
    () => {
        r#"
        SELECT t.team_id, t.team_name, t.slack_id, t.description, t.head_id,
               ARRAY(SELECT l.user_id FROM team_leads l WHERE l.team_id = t.team_id ORDER BY l.user_id) AS lead_ids,
               ARRAY(SELECT m.user_id FROM team_members m WHERE m.team_id = t.team_id ORDER BY m.user_id) AS member_ids
        FROM teams t
        "#
    };
}

/// 团队仓库结构体
#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    /// 创建新的团队仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 加载团队用户和负责的项目，组装完整的团队记录
    async fn load_teams(&self, rows: Vec<TeamRow>) -> DatabaseResult<Vec<TeamRecord>> {
        let user_ids: Vec<i32> = rows
            .iter()
            .flat_map(|row| std::iter::once(row.head_id).chain(row.lead_ids.iter().copied()).chain(row.member_ids.iter().copied()))
            .collect();
        let users = fetch_users(&self.pool, &user_ids).await?;

        let team_ids: Vec<String> = rows.iter().map(|row| row.team_id.clone()).collect();
        let mut projects = self.find_team_projects(&team_ids).await?;

        rows.into_iter()
            .map(|row| {
                Ok(TeamRecord {
                    head: require_user(&users, row.head_id)?,
                    leads: row.lead_ids.iter().map(|id| require_user(&users, *id)).collect::<DatabaseResult<_>>()?,
                    members: row.member_ids.iter().map(|id| require_user(&users, *id)).collect::<DatabaseResult<_>>()?,
                    projects: projects.remove(&row.team_id).unwrap_or_default(),
                    team_id: row.team_id,
                    team_name: row.team_name,
                    slack_id: row.slack_id,
                    description: row.description,
                })
            })
            .collect()
    }

    /// 查询团队负责的未删除项目，按团队分组
    async fn find_team_projects(&self, team_ids: &[String]) -> DatabaseResult<HashMap<String, Vec<ProjectSummaryRecord>>> {
        let rows = sqlx::query_as::<_, TeamProjectRow>(
            r#"
            SELECT pt.team_id, p.project_id, w.car_number, w.project_number, w.work_package_number, w.name, w.status
            FROM project_teams pt
            JOIN projects p ON p.project_id = pt.project_id
            JOIN wbs_elements w ON w.wbs_element_id = p.wbs_element_id
            WHERE pt.team_id = ANY($1) AND w.date_deleted IS NULL
            ORDER BY w.car_number, w.project_number
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<ProjectSummaryRecord>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.team_id)
                .or_default()
                .push(ProjectSummaryRecord::try_from(row.project)?);
        }
        Ok(grouped)
    }

    async fn require_team(&self, team_id: &str) -> DatabaseResult<TeamRecord> {
        self.get_team_by_id(team_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("team {team_id}")))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    team_id: String,
    team_name: String,
    slack_id: String,
    description: String,
    head_id: i32,
    lead_ids: Vec<i32>,
    member_ids: Vec<i32>,
}

#[derive(Debug, sqlx::FromRow)]
struct TeamProjectRow {
    team_id: String,
    #[sqlx(flatten)]
    project: ProjectSummaryRow,
}

/// 团队成员和组长的关联表
#[derive(Debug, Clone, Copy)]
enum MembershipTable {
    Members,
    Leads,
}

impl MembershipTable {
    fn delete_sql(self) -> &'static str {
        match self {
            MembershipTable::Members => "DELETE FROM team_members WHERE team_id = $1",
            MembershipTable::Leads => "DELETE FROM team_leads WHERE team_id = $1",
        }
    }

    fn insert_sql(self) -> &'static str {
        match self {
            MembershipTable::Members => {
                "INSERT INTO team_members (team_id, user_id) SELECT $1, UNNEST($2::INTEGER[]) ON CONFLICT DO NOTHING"
            }
            MembershipTable::Leads => {
                "INSERT INTO team_leads (team_id, user_id) SELECT $1, UNNEST($2::INTEGER[]) ON CONFLICT DO NOTHING"
            }
        }
    }
}

impl TeamRepository {
    /// 在一个事务里整体替换成员或组长
    async fn replace_membership(&self, table: MembershipTable, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(table.delete_sql()).bind(team_id).execute(&mut *tx).await?;
        sqlx::query(table.insert_sql())
            .bind(team_id)
            .bind(user_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        self.require_team(team_id).await
    }
}

#[async_trait::async_trait]
impl TeamRepositoryTrait for TeamRepository {
    async fn find_teams(&self) -> DatabaseResult<Vec<TeamRecord>> {
        debug!("🔍 查询全部团队");

        let rows = sqlx::query_as::<_, TeamRow>(concat!(team_select!(), " ORDER BY t.team_name"))
            .fetch_all(&self.pool)
            .await?;

        self.load_teams(rows).await
    }

    async fn get_team_by_id(&self, team_id: &str) -> DatabaseResult<Option<TeamRecord>> {
        debug!("🔍 根据 ID 获取团队: {}", team_id);

        let row = sqlx::query_as::<_, TeamRow>(concat!(team_select!(), " WHERE t.team_id = $1"))
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.load_teams(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_teams_with_user(&self, user_id: i32) -> DatabaseResult<Vec<TeamRecord>> {
        debug!("🔍 查询用户 {} 参与的团队", user_id);

        let rows = sqlx::query_as::<_, TeamRow>(concat!(
            team_select!(),
            " WHERE t.head_id = $1",
            " OR EXISTS (SELECT 1 FROM team_leads l WHERE l.team_id = t.team_id AND l.user_id = $1)",
            " OR EXISTS (SELECT 1 FROM team_members m WHERE m.team_id = t.team_id AND m.user_id = $1)",
            " ORDER BY t.team_name"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        self.load_teams(rows).await
    }

    async fn create_team(&self, team: NewTeam) -> DatabaseResult<TeamRecord> {
        debug!("📝 创建团队: {:#?}", team);

        let team_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO teams (team_name, head_id, slack_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING team_id
            "#,
        )
        .bind(&team.team_name)
        .bind(team.head_id)
        .bind(&team.slack_id)
        .bind(&team.description)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 团队创建成功: {}", team_id);
        self.require_team(&team_id).await
    }

    async fn set_team_members(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord> {
        debug!("🔄 替换团队 {} 的成员: {:?}", team_id, user_ids);
        self.replace_membership(MembershipTable::Members, team_id, user_ids).await
    }

    async fn set_team_leads(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord> {
        debug!("🔄 替换团队 {} 的组长: {:?}", team_id, user_ids);
        self.replace_membership(MembershipTable::Leads, team_id, user_ids).await
    }

    async fn set_team_head(&self, team_id: &str, user_id: i32) -> DatabaseResult<TeamRecord> {
        debug!("🔄 设置团队 {} 的负责人: {}", team_id, user_id);

        sqlx::query("UPDATE teams SET head_id = $2 WHERE team_id = $1")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        self.require_team(team_id).await
    }

    async fn update_team_description(&self, team_id: &str, description: &str) -> DatabaseResult<TeamRecord> {
        sqlx::query("UPDATE teams SET description = $2 WHERE team_id = $1")
            .bind(team_id)
            .bind(description)
            .execute(&self.pool)
            .await?;

        self.require_team(team_id).await
    }

    async fn delete_team(&self, team_id: &str) -> DatabaseResult<()> {
        debug!("🗑️ 删除团队: {}", team_id);

        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("team {team_id}")));
        }

        debug!("✅ 团队删除成功");
        Ok(())
    }
}
