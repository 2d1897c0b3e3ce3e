//! 变更申请仓库 trait 定义

use crate::models::change_request::ChangeRequestRecord;
use crate::DatabaseResult;

#[async_trait::async_trait]
pub trait ChangeRequestRepositoryTrait: Send + Sync + 'static {
    /// 根据 ID 获取变更申请，已软删除的也会返回
    async fn get_change_request_by_id(&self, cr_id: i32) -> DatabaseResult<Option<ChangeRequestRecord>>;
}
