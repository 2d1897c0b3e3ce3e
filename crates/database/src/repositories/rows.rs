//! 数据库行结构体和公共加载函数
//!
//! 多个仓库都需要加载用户、WBS 元素、描述条目和链接，这里统一实现，
//! 避免每个仓库各写一遍 SQL。

use crate::models::project::{
    BulletCheck, BulletKind, DescriptionBulletRecord, LinkRecord, LinkTypeRecord, ProjectSummaryRecord,
    WbsElementRecord,
};
use crate::models::team::TeamMembership;
use crate::models::user::UserRecord;
use crate::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use shared_lib::{Lifecycle, WbsNumber};
use sqlx::PgPool;
use std::collections::HashMap;

/// 用户表查询列
macro_rules! user_columns {
    () => {
        "user_id, first_name, last_name, email, email_id, role"
    };
}

/// WBS 元素查询列，要求表别名为 `w`
macro_rules! wbs_columns {
    () => {
        "w.wbs_element_id, w.date_created, w.car_number, w.project_number, w.work_package_number, w.name, \
         w.status, w.project_lead_id, w.project_manager_id, w.date_deleted, w.deleted_by_user_id"
    };
}

/// 描述条目查询列
macro_rules! bullet_columns {
    () => {
        "description_bullet_id, wbs_element_id, kind, detail, date_added, user_checked_id, date_time_checked, \
         date_deleted"
    };
}

pub(crate) use {bullet_columns, user_columns, wbs_columns};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_id: Option<String>,
    pub role: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            email_id: row.email_id,
            role: row.role.parse()?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WbsElementRow {
    pub wbs_element_id: i32,
    pub date_created: DateTime<Utc>,
    pub car_number: i32,
    pub project_number: i32,
    pub work_package_number: i32,
    pub name: String,
    pub status: String,
    pub project_lead_id: Option<i32>,
    pub project_manager_id: Option<i32>,
    pub date_deleted: Option<DateTime<Utc>>,
    pub deleted_by_user_id: Option<i32>,
}

impl WbsElementRow {
    pub fn wbs_num(&self) -> WbsNumber {
        WbsNumber::new(self.car_number, self.project_number, self.work_package_number)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct BulletRow {
    pub description_bullet_id: i32,
    pub wbs_element_id: i32,
    pub kind: String,
    pub detail: String,
    pub date_added: DateTime<Utc>,
    pub user_checked_id: Option<i32>,
    pub date_time_checked: Option<DateTime<Utc>>,
    pub date_deleted: Option<DateTime<Utc>>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkTypeRow {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator_id: i32,
    pub required: bool,
    pub icon_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    link_id: String,
    url: String,
    link_date_created: DateTime<Utc>,
    link_creator_id: i32,
    #[sqlx(flatten)]
    link_type: LinkTypeRow,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProjectSummaryRow {
    pub project_id: i32,
    pub car_number: i32,
    pub project_number: i32,
    pub work_package_number: i32,
    pub name: String,
    pub status: String,
}

impl TryFrom<ProjectSummaryRow> for ProjectSummaryRecord {
    type Error = DatabaseError;

    fn try_from(row: ProjectSummaryRow) -> Result<Self, Self::Error> {
        Ok(ProjectSummaryRecord {
            project_id: row.project_id,
            wbs_num: WbsNumber::new(row.car_number, row.project_number, row.work_package_number),
            name: row.name,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeamMembershipRow {
    team_id: String,
    team_name: String,
    head_id: i32,
    lead_ids: Vec<i32>,
    member_ids: Vec<i32>,
}

/// 批量加载用户，返回 `user_id -> 用户` 的映射
pub(crate) async fn fetch_users(pool: &PgPool, user_ids: &[i32]) -> DatabaseResult<HashMap<i32, UserRecord>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, UserRow>(concat!(
        "SELECT ",
        user_columns!(),
        " FROM users WHERE user_id = ANY($1)"
    ))
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| UserRecord::try_from(row).map(|user| (user.user_id, user)))
        .collect()
}

/// 从映射中取出必然存在的用户（外键保证）
pub(crate) fn require_user(users: &HashMap<i32, UserRecord>, user_id: i32) -> DatabaseResult<UserRecord> {
    users
        .get(&user_id)
        .cloned()
        .ok_or_else(|| DatabaseError::not_found(format!("user {user_id}")))
}

/// 由行数据组装 WBS 元素，同时加载负责人和项目经理
pub(crate) async fn load_wbs_element(pool: &PgPool, row: WbsElementRow) -> DatabaseResult<WbsElementRecord> {
    let user_ids: Vec<i32> = [row.project_lead_id, row.project_manager_id].into_iter().flatten().collect();
    let users = fetch_users(pool, &user_ids).await?;

    Ok(WbsElementRecord {
        wbs_element_id: row.wbs_element_id,
        date_created: row.date_created,
        wbs_num: row.wbs_num(),
        name: row.name,
        status: row.status.parse()?,
        project_lead: row.project_lead_id.and_then(|id| users.get(&id).cloned()),
        project_manager: row.project_manager_id.and_then(|id| users.get(&id).cloned()),
        lifecycle: Lifecycle::from_columns(row.date_deleted, row.deleted_by_user_id),
    })
}

/// 将描述条目行转换为记录
pub(crate) fn bullet_from_row(
    row: BulletRow,
    users: &HashMap<i32, UserRecord>,
) -> DatabaseResult<DescriptionBulletRecord> {
    let kind = BulletKind::from_db(&row.kind)
        .ok_or_else(|| DatabaseError::not_found(format!("description bullet kind {}", row.kind)))?;

    let checked = match (row.user_checked_id, row.date_time_checked) {
        (Some(user_id), Some(at)) => Some(BulletCheck {
            user: require_user(users, user_id)?,
            at,
        }),
        _ => None,
    };

    Ok(DescriptionBulletRecord {
        id: row.description_bullet_id,
        wbs_element_id: row.wbs_element_id,
        kind,
        detail: row.detail,
        date_added: row.date_added,
        checked,
        lifecycle: Lifecycle::from_columns(row.date_deleted, None),
    })
}

/// 加载 WBS 元素下所有未删除的描述条目
pub(crate) async fn fetch_bullets(pool: &PgPool, wbs_element_id: i32) -> DatabaseResult<Vec<DescriptionBulletRecord>> {
    let rows = sqlx::query_as::<_, BulletRow>(concat!(
        "SELECT ",
        bullet_columns!(),
        " FROM description_bullets WHERE wbs_element_id = $1 AND date_deleted IS NULL \
          ORDER BY description_bullet_id"
    ))
    .bind(wbs_element_id)
    .fetch_all(pool)
    .await?;

    let user_ids: Vec<i32> = rows.iter().filter_map(|row| row.user_checked_id).collect();
    let users = fetch_users(pool, &user_ids).await?;

    rows.into_iter().map(|row| bullet_from_row(row, &users)).collect()
}

/// 将链接类型行转换为记录
pub(crate) fn link_type_from_row(row: LinkTypeRow, users: &HashMap<i32, UserRecord>) -> DatabaseResult<LinkTypeRecord> {
    Ok(LinkTypeRecord {
        creator: require_user(users, row.creator_id)?,
        name: row.name,
        date_created: row.date_created,
        required: row.required,
        icon_name: row.icon_name,
    })
}

/// 加载 WBS 元素下所有未删除的链接
pub(crate) async fn fetch_links(pool: &PgPool, wbs_element_id: i32) -> DatabaseResult<Vec<LinkRecord>> {
    let rows = sqlx::query_as::<_, LinkRow>(
        r#"
        SELECT l.link_id, l.url, l.date_created AS link_date_created, l.creator_id AS link_creator_id,
               t.name, t.date_created, t.creator_id, t.required, t.icon_name
        FROM links l
        JOIN link_types t ON t.name = l.link_type_name
        WHERE l.wbs_element_id = $1 AND l.date_deleted IS NULL
        ORDER BY l.date_created
        "#,
    )
    .bind(wbs_element_id)
    .fetch_all(pool)
    .await?;

    let user_ids: Vec<i32> = rows
        .iter()
        .flat_map(|row| [row.link_creator_id, row.link_type.creator_id])
        .collect();
    let users = fetch_users(pool, &user_ids).await?;

    rows.into_iter()
        .map(|row| {
            Ok(LinkRecord {
                creator: require_user(&users, row.link_creator_id)?,
                link_type: link_type_from_row(row.link_type, &users)?,
                link_id: row.link_id,
                date_created: row.link_date_created,
                url: row.url,
            })
        })
        .collect()
}

/// 加载项目的负责团队及其成员关系
pub(crate) async fn fetch_team_memberships(pool: &PgPool, project_id: i32) -> DatabaseResult<Vec<TeamMembership>> {
    let rows = sqlx::query_as::<_, TeamMembershipRow>(
        r#"
        SELECT t.team_id, t.team_name, t.head_id,
               ARRAY(SELECT l.user_id FROM team_leads l WHERE l.team_id = t.team_id ORDER BY l.user_id) AS lead_ids,
               ARRAY(SELECT m.user_id FROM team_members m WHERE m.team_id = t.team_id ORDER BY m.user_id) AS member_ids
        FROM teams t
        JOIN project_teams pt ON pt.team_id = t.team_id
        WHERE pt.project_id = $1
        ORDER BY t.team_name
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| TeamMembership {
            team_id: row.team_id,
            team_name: row.team_name,
            head_id: row.head_id,
            lead_ids: row.lead_ids,
            member_ids: row.member_ids,
        })
        .collect())
}
