//! 风险仓库 trait 定义

use crate::models::risk::{NewRisk, RiskRecord, RiskUpdate};
use crate::DatabaseResult;

#[async_trait::async_trait]
pub trait RiskRepositoryTrait: Send + Sync + 'static {
    /// 查询项目下所有未删除的风险
    async fn find_risks_for_project(&self, project_id: i32) -> DatabaseResult<Vec<RiskRecord>>;

    /// 根据 ID 获取风险，已软删除的也会返回
    async fn get_risk_by_id(&self, risk_id: &str) -> DatabaseResult<Option<RiskRecord>>;

    /// 创建风险，新建的风险总是未解决状态
    async fn create_risk(&self, risk: NewRisk) -> DatabaseResult<RiskRecord>;

    /// 更新风险
    ///
    /// 描述和解决状态在同一条 UPDATE 语句中写入，不会出现只写了一半的情况。
    async fn update_risk(&self, risk_id: &str, update: RiskUpdate) -> DatabaseResult<RiskRecord>;

    /// 软删除风险
    async fn soft_delete_risk(&self, risk_id: &str, deleted_by: i32) -> DatabaseResult<RiskRecord>;
}
