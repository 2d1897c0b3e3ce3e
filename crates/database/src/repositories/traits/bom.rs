//! 物料清单仓库 trait 定义

use crate::models::bom::{
    AssemblyRecord, ManufacturerRecord, MaterialChanges, MaterialRecord, MaterialTypeRecord, NewAssembly, NewMaterial,
};
use crate::DatabaseResult;

/// 物料清单仓库trait定义
///
/// 制造商、物料类型、装配体的名称都是唯一的，按名称精确匹配（区分大小写）。
#[async_trait::async_trait]
pub trait BomRepositoryTrait: Send + Sync + 'static {
    async fn find_manufacturers(&self) -> DatabaseResult<Vec<ManufacturerRecord>>;

    async fn get_manufacturer(&self, name: &str) -> DatabaseResult<Option<ManufacturerRecord>>;

    async fn create_manufacturer(&self, name: &str, creator_id: i32) -> DatabaseResult<ManufacturerRecord>;

    async fn find_material_types(&self) -> DatabaseResult<Vec<MaterialTypeRecord>>;

    async fn get_material_type(&self, name: &str) -> DatabaseResult<Option<MaterialTypeRecord>>;

    async fn create_material_type(&self, name: &str, creator_id: i32) -> DatabaseResult<MaterialTypeRecord>;

    /// 删除物料类型（物理删除）
    async fn delete_material_type(&self, name: &str) -> DatabaseResult<MaterialTypeRecord>;

    /// 统计使用该物料类型的物料数量
    async fn count_materials_of_type(&self, name: &str) -> DatabaseResult<i64>;

    async fn get_assembly_by_name(&self, name: &str) -> DatabaseResult<Option<AssemblyRecord>>;

    async fn get_assembly_by_id(&self, assembly_id: &str) -> DatabaseResult<Option<AssemblyRecord>>;

    async fn create_assembly(&self, assembly: NewAssembly) -> DatabaseResult<AssemblyRecord>;

    /// 查询项目下的装配体
    async fn find_assemblies(&self, wbs_element_id: i32) -> DatabaseResult<Vec<AssemblyRecord>>;

    /// 查询项目下的物料
    async fn find_materials(&self, wbs_element_id: i32) -> DatabaseResult<Vec<MaterialRecord>>;

    async fn get_material_by_id(&self, material_id: &str) -> DatabaseResult<Option<MaterialRecord>>;

    async fn create_material(&self, material: NewMaterial) -> DatabaseResult<MaterialRecord>;

    /// 修改物料，返回修改后的记录
    async fn update_material(&self, material_id: &str, changes: MaterialChanges) -> DatabaseResult<MaterialRecord>;
}
