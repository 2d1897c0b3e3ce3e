//! 用户仓库
//!
//! 负责用户、用户设置和收藏项目的数据库操作

use crate::models::user::{UserRecord, UserSettingsRecord, UserSettingsUpdate};
use crate::repositories::rows::{user_columns, UserRow};
use crate::repositories::traits::UserRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use shared_lib::Role;
use sqlx::PgPool;
use tracing::debug;

/// 用户仓库结构体
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// 创建新的用户仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserSettingsRow {
    id: i32,
    user_id: i32,
    default_theme: String,
    slack_id: String,
}

impl TryFrom<UserSettingsRow> for UserSettingsRecord {
    type Error = DatabaseError;

    fn try_from(row: UserSettingsRow) -> Result<Self, Self::Error> {
        Ok(UserSettingsRecord {
            id: row.id,
            user_id: row.user_id,
            default_theme: row.default_theme.parse()?,
            slack_id: row.slack_id,
        })
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_users(&self) -> DatabaseResult<Vec<UserRecord>> {
        debug!("🔍 查询全部用户");

        let rows = sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users ORDER BY user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn get_user_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>> {
        debug!("🔍 根据 ID 获取用户: {}", user_id);

        let row = sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn get_users_by_ids(&self, user_ids: &[i32]) -> DatabaseResult<Vec<UserRecord>> {
        debug!("🔍 批量获取用户: {:?}", user_ids);

        let rows = sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE user_id = ANY($1) ORDER BY user_id"
        ))
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    async fn update_user_role(&self, user_id: i32, role: Role) -> DatabaseResult<UserRecord> {
        debug!("🔄 更新用户 {} 的角色为 {}", user_id, role);

        let row = sqlx::query_as::<_, UserRow>(concat!(
            "UPDATE users SET role = $2 WHERE user_id = $1 RETURNING ",
            user_columns!()
        ))
        .bind(user_id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("user {user_id}")))?;

        debug!("✅ 用户角色更新成功");
        UserRecord::try_from(row)
    }

    async fn get_or_create_user_settings(&self, user_id: i32) -> DatabaseResult<UserSettingsRecord> {
        debug!("🔍 获取用户 {} 的设置", user_id);

        // ON CONFLICT 时做一次空更新，保证 RETURNING 总能返回一行
        let row = sqlx::query_as::<_, UserSettingsRow>(
            r#"
            INSERT INTO user_settings (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, default_theme, slack_id
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        UserSettingsRecord::try_from(row)
    }

    async fn upsert_user_settings(&self, user_id: i32, update: UserSettingsUpdate) -> DatabaseResult<UserSettingsRecord> {
        debug!("📝 写入用户 {} 的设置: {:?}", user_id, update);

        let row = sqlx::query_as::<_, UserSettingsRow>(
            r#"
            INSERT INTO user_settings (user_id, default_theme, slack_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET default_theme = EXCLUDED.default_theme,
                    slack_id      = EXCLUDED.slack_id
            RETURNING id, user_id, default_theme, slack_id
            "#,
        )
        .bind(user_id)
        .bind(update.default_theme.as_str())
        .bind(&update.slack_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 用户设置写入成功");
        UserSettingsRecord::try_from(row)
    }

    async fn find_favorite_project_ids(&self, user_id: i32) -> DatabaseResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT f.project_id
            FROM favorite_projects f
            JOIN projects p ON p.project_id = f.project_id
            JOIN wbs_elements w ON w.wbs_element_id = p.wbs_element_id
            WHERE f.user_id = $1 AND w.date_deleted IS NULL
            ORDER BY f.project_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
