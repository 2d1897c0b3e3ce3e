//! 描述条目服务

use crate::models::err::{AppError, AppResult};
use crate::services::permissions::ensure_not_guest;
use chrono::Utc;
use database::models::{DescriptionBulletRecord, UserRecord};
use database::Repositories;

#[derive(Clone)]
pub struct DescriptionBulletService {
    repositories: Repositories,
}

impl DescriptionBulletService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// 勾选/取消勾选描述条目
    pub async fn check_description_bullet(
        &self,
        user: &UserRecord,
        bullet_id: i32,
    ) -> AppResult<DescriptionBulletRecord> {
        ensure_not_guest(user, "check description bullets")?;

        let bullet = self
            .repositories
            .projects
            .get_description_bullet(bullet_id)
            .await?
            .ok_or_else(|| AppError::not_found("Description Bullet", bullet_id))?;

        if bullet.lifecycle.is_deleted() {
            return Err(AppError::deleted("Description Bullet", bullet_id));
        }

        let checked = match bullet.checked {
            Some(_) => None,
            None => Some((user.user_id, Utc::now())),
        };

        Ok(self
            .repositories
            .projects
            .set_description_bullet_check(bullet_id, checked)
            .await?)
    }
}
