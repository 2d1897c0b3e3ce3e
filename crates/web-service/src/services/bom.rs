//! 物料清单服务
//!
//! 制造商、物料类型是全局共享的，装配体和物料挂在项目下面。

use crate::models::bom::MaterialCreateRequest;
use crate::models::err::{AppError, AppResult};
use crate::services::lookup;
use crate::services::permissions::{ensure_not_guest, is_admin_or_on_project_team};
use database::models::{
    AssemblyRecord, ManufacturerRecord, MaterialChanges, MaterialRecord, MaterialTypeRecord, NewAssembly, NewMaterial,
    ProjectRecord, UserRecord,
};
use database::Repositories;
use shared_lib::WbsNumber;
use tracing::info;

#[derive(Clone)]
pub struct BomService {
    repositories: Repositories,
}

impl BomService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn get_all_manufacturers(&self) -> AppResult<Vec<ManufacturerRecord>> {
        Ok(self.repositories.bom.find_manufacturers().await?)
    }

    /// 创建制造商
    pub async fn create_manufacturer(&self, user: &UserRecord, name: &str) -> AppResult<ManufacturerRecord> {
        ensure_not_guest(user, "create manufacturers")?;

        if self.repositories.bom.get_manufacturer(name).await?.is_some() {
            return Err(AppError::bad_request(format!("{name} already exists as a manufacturer!")));
        }

        Ok(self.repositories.bom.create_manufacturer(name, user.user_id).await?)
    }

    pub async fn get_all_material_types(&self) -> AppResult<Vec<MaterialTypeRecord>> {
        Ok(self.repositories.bom.find_material_types().await?)
    }

    /// 创建物料类型，需要 LEADERSHIP 及以上
    pub async fn create_material_type(&self, name: &str, user: &UserRecord) -> AppResult<MaterialTypeRecord> {
        if !user.role.is_leadership() {
            return Err(AppError::access_denied("Only leadership or above can create a material type"));
        }

        if self.repositories.bom.get_material_type(name).await?.is_some() {
            return Err(AppError::bad_request(format!(
                "The following material type already exists: {name}"
            )));
        }

        Ok(self.repositories.bom.create_material_type(name, user.user_id).await?)
    }

    /// 删除物料类型，需要 HEAD 及以上
    pub async fn delete_material_type(&self, name: &str, user: &UserRecord) -> AppResult<MaterialTypeRecord> {
        if !user.role.is_head() {
            return Err(AppError::access_denied("Only an admin or head can delete a material type"));
        }

        if self.repositories.bom.get_material_type(name).await?.is_none() {
            return Err(AppError::not_found("Material Type", name));
        }

        // 仍被物料引用的类型不能删除
        let in_use = self.repositories.bom.count_materials_of_type(name).await?;
        if in_use > 0 {
            return Err(AppError::bad_request(format!(
                "Material type {name} is still used by {in_use} material(s)!"
            )));
        }

        let deleted = self.repositories.bom.delete_material_type(name).await?;
        info!("🗑️ 用户 {} 删除了物料类型 {}", user.user_id, name);
        Ok(deleted)
    }

    /// 在项目下创建装配体
    pub async fn create_assembly(
        &self,
        name: &str,
        user: &UserRecord,
        wbs_num: WbsNumber,
        pdm_file_name: Option<String>,
    ) -> AppResult<AssemblyRecord> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;

        if self.repositories.bom.get_assembly_by_name(name).await?.is_some() {
            return Err(AppError::bad_request(format!("{name} already exists as an assembly!")));
        }

        if !is_admin_or_on_project_team(user, &project) {
            return Err(AppError::access_denied(
                "Users must be admin, or assigned to the team to create assemblies",
            ));
        }

        let assembly = self
            .repositories
            .bom
            .create_assembly(NewAssembly {
                name: name.to_string(),
                wbs_element_id: project.wbs_element.wbs_element_id,
                pdm_file_name,
                creator_id: user.user_id,
            })
            .await?;
        Ok(assembly)
    }

    /// 在项目下创建物料
    pub async fn create_material(
        &self,
        user: &UserRecord,
        wbs_num: WbsNumber,
        request: MaterialCreateRequest,
    ) -> AppResult<MaterialRecord> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;

        if !is_admin_or_on_project_team(user, &project) {
            return Err(AppError::access_denied(
                "Users must be admin, or assigned to the team to create materials",
            ));
        }

        self.check_material(&project, wbs_num, &request, None).await?;

        let material = self
            .repositories
            .bom
            .create_material(NewMaterial {
                name: request.name,
                wbs_element_id: project.wbs_element.wbs_element_id,
                assembly_id: request.assembly_id,
                status: request.status,
                material_type_name: request.material_type_name,
                manufacturer_name: request.manufacturer_name,
                manufacturer_part_number: request.manufacturer_part_number,
                pdm_file_name: request.pdm_file_name,
                quantity: request.quantity,
                unit_name: request.unit_name,
                price: request.price,
                subtotal: request.subtotal,
                link_url: request.link_url,
                notes: request.notes,
                creator_id: user.user_id,
            })
            .await?;
        Ok(material)
    }

    /// 修改项目下的物料，校验规则与创建相同
    pub async fn edit_material(
        &self,
        user: &UserRecord,
        wbs_num: WbsNumber,
        material_id: &str,
        request: MaterialCreateRequest,
    ) -> AppResult<MaterialRecord> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;

        if !is_admin_or_on_project_team(user, &project) {
            return Err(AppError::access_denied(
                "Users must be admin, or assigned to the team to edit materials",
            ));
        }

        let material = self
            .repositories
            .bom
            .get_material_by_id(material_id)
            .await?
            .ok_or_else(|| AppError::not_found("Material", material_id))?;
        if material.wbs_element_id != project.wbs_element.wbs_element_id {
            return Err(AppError::bad_request(format!(
                "Material {} does not belong to project {}!",
                material.name, wbs_num
            )));
        }

        self.check_material(&project, wbs_num, &request, Some(material_id)).await?;

        let updated = self
            .repositories
            .bom
            .update_material(
                material_id,
                MaterialChanges {
                    name: request.name,
                    assembly_id: request.assembly_id,
                    status: request.status,
                    material_type_name: request.material_type_name,
                    manufacturer_name: request.manufacturer_name,
                    manufacturer_part_number: request.manufacturer_part_number,
                    pdm_file_name: request.pdm_file_name,
                    quantity: request.quantity,
                    unit_name: request.unit_name,
                    price: request.price,
                    subtotal: request.subtotal,
                    link_url: request.link_url,
                    notes: request.notes,
                },
            )
            .await?;

        info!("✅ 用户 {} 修改了物料 {}", user.user_id, material_id);
        Ok(updated)
    }

    /// 物料引用的类型、制造商、装配体必须存在，装配体必须属于同一项目，
    /// 物料名称在项目内唯一（修改时排除自身）
    async fn check_material(
        &self,
        project: &ProjectRecord,
        wbs_num: WbsNumber,
        request: &MaterialCreateRequest,
        current_material: Option<&str>,
    ) -> AppResult<()> {
        let bom = &self.repositories.bom;
        let wbs_element_id = project.wbs_element.wbs_element_id;

        if bom.get_material_type(&request.material_type_name).await?.is_none() {
            return Err(AppError::not_found("Material Type", &request.material_type_name));
        }
        if bom.get_manufacturer(&request.manufacturer_name).await?.is_none() {
            return Err(AppError::not_found("Manufacturer", &request.manufacturer_name));
        }
        if let Some(assembly_id) = &request.assembly_id {
            let assembly = bom
                .get_assembly_by_id(assembly_id)
                .await?
                .ok_or_else(|| AppError::not_found("Assembly", assembly_id))?;
            if assembly.wbs_element_id != wbs_element_id {
                return Err(AppError::bad_request(format!(
                    "Assembly {} does not belong to project {}!",
                    assembly.name, wbs_num
                )));
            }
        }

        let existing = bom.find_materials(wbs_element_id).await?;
        let duplicate = existing.iter().any(|material| {
            material.name == request.name && Some(material.material_id.as_str()) != current_material
        });
        if duplicate {
            return Err(AppError::bad_request(format!(
                "{} already exists as a material on this project!",
                request.name
            )));
        }

        Ok(())
    }

    /// 项目的装配体和物料
    pub async fn get_project_bom(
        &self,
        wbs_num: WbsNumber,
    ) -> AppResult<(Vec<AssemblyRecord>, Vec<MaterialRecord>)> {
        let project = lookup::active_project_by_wbs(&self.repositories, wbs_num).await?;
        let wbs_element_id = project.wbs_element.wbs_element_id;

        let assemblies = self.repositories.bom.find_assemblies(wbs_element_id).await?;
        let materials = self.repositories.bom.find_materials(wbs_element_id).await?;
        Ok((assemblies, materials))
    }
}
