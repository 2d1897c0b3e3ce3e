//! 物料清单（BOM）相关的请求/返回对象

use chrono::{DateTime, Utc};
use database::models::{AssemblyRecord, ManufacturerRecord, MaterialRecord, MaterialTypeRecord};
use serde::{Deserialize, Serialize};
use shared_lib::MaterialStatus;
use utoipa::ToSchema;
use validator::Validate;

/// 制造商
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerView {
    #[schema(example = "Digikey")]
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator_id: i32,
}

impl From<ManufacturerRecord> for ManufacturerView {
    fn from(record: ManufacturerRecord) -> Self {
        Self {
            name: record.name,
            date_created: record.date_created,
            creator_id: record.creator_id,
        }
    }
}

/// 物料类型
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTypeView {
    #[schema(example = "Resistor")]
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator_id: i32,
}

impl From<MaterialTypeRecord> for MaterialTypeView {
    fn from(record: MaterialTypeRecord) -> Self {
        Self {
            name: record.name,
            date_created: record.date_created,
            creator_id: record.creator_id,
        }
    }
}

/// 装配体
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyView {
    pub assembly_id: String,
    #[schema(example = "Front Wing")]
    pub name: String,
    pub pdm_file_name: Option<String>,
    pub creator_id: i32,
    pub date_created: DateTime<Utc>,
}

impl From<AssemblyRecord> for AssemblyView {
    fn from(record: AssemblyRecord) -> Self {
        Self {
            assembly_id: record.assembly_id,
            name: record.name,
            pdm_file_name: record.pdm_file_name,
            creator_id: record.creator_id,
            date_created: record.date_created,
        }
    }
}

/// 物料
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub material_id: String,
    pub name: String,
    pub assembly_id: Option<String>,
    pub status: MaterialStatus,
    pub material_type_name: String,
    pub manufacturer_name: String,
    pub manufacturer_part_number: String,
    pub pdm_file_name: Option<String>,
    pub quantity: i32,
    pub unit_name: String,
    /// 单价，单位：分
    pub price: i32,
    /// 小计，单位：分
    pub subtotal: i32,
    pub link_url: String,
    pub notes: String,
    pub creator_id: i32,
    pub date_created: DateTime<Utc>,
}

impl From<MaterialRecord> for MaterialView {
    fn from(record: MaterialRecord) -> Self {
        Self {
            material_id: record.material_id,
            name: record.name,
            assembly_id: record.assembly_id,
            status: record.status,
            material_type_name: record.material_type_name,
            manufacturer_name: record.manufacturer_name,
            manufacturer_part_number: record.manufacturer_part_number,
            pdm_file_name: record.pdm_file_name,
            quantity: record.quantity,
            unit_name: record.unit_name,
            price: record.price,
            subtotal: record.subtotal,
            link_url: record.link_url,
            notes: record.notes,
            creator_id: record.creator_id,
            date_created: record.date_created,
        }
    }
}

/// 项目的物料清单
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBomView {
    pub assemblies: Vec<AssemblyView>,
    pub materials: Vec<MaterialView>,
}

/// 按名称创建（制造商/物料类型）
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NameRequest {
    #[schema(example = "Digikey")]
    #[validate(length(min = 1))]
    pub name: String,
}

/// 创建装配体
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyCreateRequest {
    #[schema(example = "Front Wing")]
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub pdm_file_name: Option<String>,
}

/// 创建物料
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCreateRequest {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub assembly_id: Option<String>,

    pub status: MaterialStatus,

    #[validate(length(min = 1))]
    pub material_type_name: String,

    #[validate(length(min = 1))]
    pub manufacturer_name: String,

    #[validate(length(min = 1))]
    pub manufacturer_part_number: String,

    #[validate(length(min = 1))]
    pub pdm_file_name: Option<String>,

    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(length(min = 1))]
    pub unit_name: String,

    /// 单价，单位：分
    #[validate(range(min = 0))]
    pub price: i32,

    /// 小计，单位：分
    #[validate(range(min = 0))]
    pub subtotal: i32,

    #[validate(url)]
    pub link_url: String,

    #[serde(default)]
    pub notes: String,
}

/// 修改物料，字段与创建相同
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEditRequest {
    #[validate(length(min = 1))]
    pub material_id: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub material: MaterialCreateRequest,
}
