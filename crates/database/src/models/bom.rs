//! 物料清单（BOM）数据库模型

use chrono::{DateTime, Utc};
use shared_lib::MaterialStatus;

/// 制造商
#[derive(Debug, Clone)]
pub struct ManufacturerRecord {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator_id: i32,
}

/// 物料类型
#[derive(Debug, Clone)]
pub struct MaterialTypeRecord {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub creator_id: i32,
}

/// 装配体
#[derive(Debug, Clone)]
pub struct AssemblyRecord {
    pub assembly_id: String,
    pub name: String,
    pub wbs_element_id: i32,
    pub pdm_file_name: Option<String>,
    pub creator_id: i32,
    pub date_created: DateTime<Utc>,
}

/// 装配体创建参数
#[derive(Debug, Clone)]
pub struct NewAssembly {
    pub name: String,
    pub wbs_element_id: i32,
    pub pdm_file_name: Option<String>,
    pub creator_id: i32,
}

/// 物料
#[derive(Debug, Clone)]
pub struct MaterialRecord {
    pub material_id: String,
    pub name: String,
    pub wbs_element_id: i32,
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

/// 物料创建参数
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub name: String,
    pub wbs_element_id: i32,
    pub assembly_id: Option<String>,
    pub status: MaterialStatus,
    pub material_type_name: String,
    pub manufacturer_name: String,
    pub manufacturer_part_number: String,
    pub pdm_file_name: Option<String>,
    pub quantity: i32,
    pub unit_name: String,
    pub price: i32,
    pub subtotal: i32,
    pub link_url: String,
    pub notes: String,
    pub creator_id: i32,
}

/// 物料修改参数，所属项目和创建人不可修改
#[derive(Debug, Clone)]
pub struct MaterialChanges {
    pub name: String,
    pub assembly_id: Option<String>,
    pub status: MaterialStatus,
    pub material_type_name: String,
    pub manufacturer_name: String,
    pub manufacturer_part_number: String,
    pub pdm_file_name: Option<String>,
    pub quantity: i32,
    pub unit_name: String,
    pub price: i32,
    pub subtotal: i32,
    pub link_url: String,
    pub notes: String,
}
