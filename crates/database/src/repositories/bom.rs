//! 物料清单仓库
//!
//! 负责制造商、物料类型、装配体和物料的数据库操作

use crate::models::bom::{
    AssemblyRecord, ManufacturerRecord, MaterialChanges, MaterialRecord, MaterialTypeRecord, NewAssembly, NewMaterial,
};
use crate::repositories::traits::BomRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

const ASSEMBLY_COLUMNS: &str = "assembly_id, name, wbs_element_id, pdm_file_name, creator_id, date_created";

macro_rules! material_columns {
    () => {
        "material_id, name, wbs_element_id, assembly_id, status, material_type_name, manufacturer_name, \
         manufacturer_part_number, pdm_file_name, quantity, unit_name, price, subtotal, link_url, notes, \
         creator_id, date_created"
    };
}

/// 物料清单仓库结构体
#[derive(Debug, Clone)]
pub struct BomRepository {
    pool: PgPool,
}

impl BomRepository {
    /// 创建新的物料清单仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_assembly(&self, column: AssemblyKey, value: &str) -> DatabaseResult<Option<AssemblyRecord>> {
        let sql = format!("SELECT {ASSEMBLY_COLUMNS} FROM assemblies WHERE {} = $1", column.as_str());
        let row = sqlx::query_as::<_, AssemblyRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AssemblyRecord::from))
    }
}

/// 装配体的唯一键
#[derive(Debug, Clone, Copy)]
enum AssemblyKey {
    Id,
    Name,
}

impl AssemblyKey {
    fn as_str(self) -> &'static str {
        match self {
            AssemblyKey::Id => "assembly_id",
            AssemblyKey::Name => "name",
        }
    }
}

/// 制造商和物料类型的表结构相同
#[derive(Debug, sqlx::FromRow)]
struct NamedRow {
    name: String,
    date_created: DateTime<Utc>,
    creator_id: i32,
}

impl From<NamedRow> for ManufacturerRecord {
    fn from(row: NamedRow) -> Self {
        ManufacturerRecord {
            name: row.name,
            date_created: row.date_created,
            creator_id: row.creator_id,
        }
    }
}

impl From<NamedRow> for MaterialTypeRecord {
    fn from(row: NamedRow) -> Self {
        MaterialTypeRecord {
            name: row.name,
            date_created: row.date_created,
            creator_id: row.creator_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssemblyRow {
    assembly_id: String,
    name: String,
    wbs_element_id: i32,
    pdm_file_name: Option<String>,
    creator_id: i32,
    date_created: DateTime<Utc>,
}

impl From<AssemblyRow> for AssemblyRecord {
    fn from(row: AssemblyRow) -> Self {
        AssemblyRecord {
            assembly_id: row.assembly_id,
            name: row.name,
            wbs_element_id: row.wbs_element_id,
            pdm_file_name: row.pdm_file_name,
            creator_id: row.creator_id,
            date_created: row.date_created,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MaterialRow {
    material_id: String,
    name: String,
    wbs_element_id: i32,
    assembly_id: Option<String>,
    status: String,
    material_type_name: String,
    manufacturer_name: String,
    manufacturer_part_number: String,
    pdm_file_name: Option<String>,
    quantity: i32,
    unit_name: String,
    price: i32,
    subtotal: i32,
    link_url: String,
    notes: String,
    creator_id: i32,
    date_created: DateTime<Utc>,
}

impl TryFrom<MaterialRow> for MaterialRecord {
    type Error = DatabaseError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        Ok(MaterialRecord {
            material_id: row.material_id,
            name: row.name,
            wbs_element_id: row.wbs_element_id,
            assembly_id: row.assembly_id,
            status: row.status.parse()?,
            material_type_name: row.material_type_name,
            manufacturer_name: row.manufacturer_name,
            manufacturer_part_number: row.manufacturer_part_number,
            pdm_file_name: row.pdm_file_name,
            quantity: row.quantity,
            unit_name: row.unit_name,
            price: row.price,
            subtotal: row.subtotal,
            link_url: row.link_url,
            notes: row.notes,
            creator_id: row.creator_id,
            date_created: row.date_created,
        })
    }
}

#[async_trait::async_trait]
impl BomRepositoryTrait for BomRepository {
    async fn find_manufacturers(&self) -> DatabaseResult<Vec<ManufacturerRecord>> {
        let rows = sqlx::query_as::<_, NamedRow>("SELECT name, date_created, creator_id FROM manufacturers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ManufacturerRecord::from).collect())
    }

    async fn get_manufacturer(&self, name: &str) -> DatabaseResult<Option<ManufacturerRecord>> {
        let row = sqlx::query_as::<_, NamedRow>("SELECT name, date_created, creator_id FROM manufacturers WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ManufacturerRecord::from))
    }

    async fn create_manufacturer(&self, name: &str, creator_id: i32) -> DatabaseResult<ManufacturerRecord> {
        debug!("📝 创建制造商: {}", name);

        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO manufacturers (name, creator_id) VALUES ($1, $2) RETURNING name, date_created, creator_id",
        )
        .bind(name)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_material_types(&self) -> DatabaseResult<Vec<MaterialTypeRecord>> {
        let rows = sqlx::query_as::<_, NamedRow>("SELECT name, date_created, creator_id FROM material_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MaterialTypeRecord::from).collect())
    }

    async fn get_material_type(&self, name: &str) -> DatabaseResult<Option<MaterialTypeRecord>> {
        let row = sqlx::query_as::<_, NamedRow>("SELECT name, date_created, creator_id FROM material_types WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(MaterialTypeRecord::from))
    }

    async fn create_material_type(&self, name: &str, creator_id: i32) -> DatabaseResult<MaterialTypeRecord> {
        debug!("📝 创建物料类型: {}", name);

        let row = sqlx::query_as::<_, NamedRow>(
            "INSERT INTO material_types (name, creator_id) VALUES ($1, $2) RETURNING name, date_created, creator_id",
        )
        .bind(name)
        .bind(creator_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_material_type(&self, name: &str) -> DatabaseResult<MaterialTypeRecord> {
        debug!("🗑️ 删除物料类型: {}", name);

        let row = sqlx::query_as::<_, NamedRow>(
            "DELETE FROM material_types WHERE name = $1 RETURNING name, date_created, creator_id",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("material type {name}")))?;

        Ok(row.into())
    }

    async fn count_materials_of_type(&self, name: &str) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materials WHERE material_type_name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn get_assembly_by_name(&self, name: &str) -> DatabaseResult<Option<AssemblyRecord>> {
        self.find_assembly(AssemblyKey::Name, name).await
    }

    async fn get_assembly_by_id(&self, assembly_id: &str) -> DatabaseResult<Option<AssemblyRecord>> {
        self.find_assembly(AssemblyKey::Id, assembly_id).await
    }

    async fn create_assembly(&self, assembly: NewAssembly) -> DatabaseResult<AssemblyRecord> {
        debug!("📝 创建装配体: {:#?}", assembly);

        let sql = format!(
            "INSERT INTO assemblies (name, wbs_element_id, pdm_file_name, creator_id) VALUES ($1, $2, $3, $4) \
             RETURNING {ASSEMBLY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AssemblyRow>(&sql)
            .bind(&assembly.name)
            .bind(assembly.wbs_element_id)
            .bind(&assembly.pdm_file_name)
            .bind(assembly.creator_id)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 装配体创建成功: {}", row.assembly_id);
        Ok(row.into())
    }

    async fn find_assemblies(&self, wbs_element_id: i32) -> DatabaseResult<Vec<AssemblyRecord>> {
        let sql = format!("SELECT {ASSEMBLY_COLUMNS} FROM assemblies WHERE wbs_element_id = $1 ORDER BY name");
        let rows = sqlx::query_as::<_, AssemblyRow>(&sql)
            .bind(wbs_element_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(AssemblyRecord::from).collect())
    }

    async fn find_materials(&self, wbs_element_id: i32) -> DatabaseResult<Vec<MaterialRecord>> {
        let rows = sqlx::query_as::<_, MaterialRow>(concat!(
            "SELECT ",
            material_columns!(),
            " FROM materials WHERE wbs_element_id = $1 ORDER BY name"
        ))
        .bind(wbs_element_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MaterialRecord::try_from).collect()
    }

    async fn get_material_by_id(&self, material_id: &str) -> DatabaseResult<Option<MaterialRecord>> {
        let row = sqlx::query_as::<_, MaterialRow>(concat!(
            "SELECT ",
            material_columns!(),
            " FROM materials WHERE material_id = $1"
        ))
        .bind(material_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MaterialRecord::try_from).transpose()
    }

    async fn create_material(&self, material: NewMaterial) -> DatabaseResult<MaterialRecord> {
        debug!("📝 创建物料: {:#?}", material);

        let row = sqlx::query_as::<_, MaterialRow>(concat!(
            "INSERT INTO materials (name, wbs_element_id, assembly_id, status, material_type_name, manufacturer_name, \
             manufacturer_part_number, pdm_file_name, quantity, unit_name, price, subtotal, link_url, notes, creator_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING ",
            material_columns!()
        ))
        .bind(&material.name)
        .bind(material.wbs_element_id)
        .bind(&material.assembly_id)
        .bind(material.status.as_str())
        .bind(&material.material_type_name)
        .bind(&material.manufacturer_name)
        .bind(&material.manufacturer_part_number)
        .bind(&material.pdm_file_name)
        .bind(material.quantity)
        .bind(&material.unit_name)
        .bind(material.price)
        .bind(material.subtotal)
        .bind(&material.link_url)
        .bind(&material.notes)
        .bind(material.creator_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 物料创建成功: {}", row.material_id);
        MaterialRecord::try_from(row)
    }

    async fn update_material(&self, material_id: &str, changes: MaterialChanges) -> DatabaseResult<MaterialRecord> {
        debug!("🔄 修改物料 {}: {:#?}", material_id, changes);

        let row = sqlx::query_as::<_, MaterialRow>(concat!(
            "UPDATE materials SET name = $2, assembly_id = $3, status = $4, material_type_name = $5, \
             manufacturer_name = $6, manufacturer_part_number = $7, pdm_file_name = $8, quantity = $9, \
             unit_name = $10, price = $11, subtotal = $12, link_url = $13, notes = $14 \
             WHERE material_id = $1 RETURNING ",
            material_columns!()
        ))
        .bind(material_id)
        .bind(&changes.name)
        .bind(&changes.assembly_id)
        .bind(changes.status.as_str())
        .bind(&changes.material_type_name)
        .bind(&changes.manufacturer_name)
        .bind(&changes.manufacturer_part_number)
        .bind(&changes.pdm_file_name)
        .bind(changes.quantity)
        .bind(&changes.unit_name)
        .bind(changes.price)
        .bind(changes.subtotal)
        .bind(&changes.link_url)
        .bind(&changes.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("material {material_id}")))?;

        MaterialRecord::try_from(row)
    }
}
