//! 工作包仓库 trait 定义

use crate::models::work_package::WorkPackageRecord;
use crate::DatabaseResult;
use shared_lib::WbsNumber;

#[async_trait::async_trait]
pub trait WorkPackageRepositoryTrait: Send + Sync + 'static {
    /// 查询所有未删除的工作包（所属项目也未删除）
    async fn find_work_packages(&self) -> DatabaseResult<Vec<WorkPackageRecord>>;

    /// 根据 WBS 编号获取工作包，已软删除的也会返回
    async fn get_work_package_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<WorkPackageRecord>>;

    /// 软删除工作包
    async fn soft_delete_work_package(&self, work_package_id: i32, deleted_by: i32) -> DatabaseResult<WorkPackageRecord>;
}
