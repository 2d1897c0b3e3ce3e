//! 工作包服务

use crate::models::err::{AppError, AppResult};
use crate::services::permissions::ensure_admin;
use database::models::{UserRecord, WorkPackageRecord};
use database::Repositories;
use shared_lib::WbsNumber;
use tracing::info;

#[derive(Clone)]
pub struct WorkPackageService {
    repositories: Repositories,
}

impl WorkPackageService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// 所有未删除的工作包
    pub async fn get_all_work_packages(&self) -> AppResult<Vec<WorkPackageRecord>> {
        Ok(self.repositories.work_packages.find_work_packages().await?)
    }

    pub async fn get_single_work_package(&self, wbs_num: WbsNumber) -> AppResult<WorkPackageRecord> {
        self.active_work_package(wbs_num).await
    }

    /// 软删除工作包，只有管理员可以操作
    pub async fn delete_work_package(&self, user: &UserRecord, wbs_num: WbsNumber) -> AppResult<WorkPackageRecord> {
        ensure_admin(user, "delete work packages")?;

        let work_package = self.active_work_package(wbs_num).await?;
        let deleted = self
            .repositories
            .work_packages
            .soft_delete_work_package(work_package.work_package_id, user.user_id)
            .await?;

        info!("🗑️ 用户 {} 删除了工作包 {}", user.user_id, wbs_num);
        Ok(deleted)
    }

    async fn active_work_package(&self, wbs_num: WbsNumber) -> AppResult<WorkPackageRecord> {
        wbs_num.ensure_work_package()?;

        let work_package = self
            .repositories
            .work_packages
            .get_work_package_by_wbs(wbs_num)
            .await?
            .ok_or_else(|| AppError::not_found("Work Package", wbs_num))?;

        if work_package.wbs_element.lifecycle.is_deleted() {
            return Err(AppError::deleted("Work Package", wbs_num));
        }
        Ok(work_package)
    }
}
