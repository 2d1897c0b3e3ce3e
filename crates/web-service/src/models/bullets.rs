//! 描述条目相关的请求/返回对象

use crate::models::users::UserView;
use chrono::{DateTime, Utc};
use database::models::DescriptionBulletRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 描述条目
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionBulletView {
    #[schema(example = 12)]
    pub id: i32,

    #[schema(example = "Decrease weight by 5 lbs")]
    pub detail: String,

    pub date_added: DateTime<Utc>,

    pub date_deleted: Option<DateTime<Utc>>,

    /// 勾选该条目的用户，未勾选时为空
    pub user_checked: Option<UserView>,

    pub date_time_checked: Option<DateTime<Utc>>,
}

impl From<&DescriptionBulletRecord> for DescriptionBulletView {
    fn from(bullet: &DescriptionBulletRecord) -> Self {
        Self {
            id: bullet.id,
            detail: bullet.detail.clone(),
            date_added: bullet.date_added,
            date_deleted: bullet.lifecycle.date_deleted(),
            user_checked: bullet.checked.as_ref().map(|check| UserView::from(&check.user)),
            date_time_checked: bullet.checked.as_ref().map(|check| check.at),
        }
    }
}

pub(crate) fn bullet_views(bullets: &[DescriptionBulletRecord]) -> Vec<DescriptionBulletView> {
    bullets.iter().map(DescriptionBulletView::from).collect()
}

/// 勾选/取消勾选描述条目
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckBulletRequest {
    #[schema(example = 12)]
    #[validate(range(min = 0))]
    pub description_bullet_id: i32,
}
