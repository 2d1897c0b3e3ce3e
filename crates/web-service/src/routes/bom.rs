//! 物料清单相关接口

use crate::auth::CurrentUser;
use crate::models::bom::{
    AssemblyCreateRequest, AssemblyView, ManufacturerView, MaterialCreateRequest, MaterialEditRequest, MaterialTypeView,
    MaterialView, NameRequest,
};
use crate::models::err::{AppError, ErrorBody};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use shared_lib::WbsNumber;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

#[utoipa::path(get,
    path = "/projects/bom/manufacturers",
    tag = "bom",
    responses(
        (status = 200, description = "All manufacturers", body = Vec<ManufacturerView>)
    ),
)]
pub async fn get_all_manufacturers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ManufacturerView>>, AppError> {
    let manufacturers = state.bom.get_all_manufacturers().await?;
    Ok(Json(manufacturers.into_iter().map(ManufacturerView::from).collect()))
}

/// 创建制造商
#[utoipa::path(post,
    path = "/projects/bom/manufacturer/create",
    tag = "bom",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Created manufacturer", body = ManufacturerView),
        (status = 400, description = "Manufacturer already exists", body = ErrorBody)
    ),
)]
pub async fn create_manufacturer(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<NameRequest>,
) -> Result<Json<ManufacturerView>, AppError> {
    debug!("🆕 创建制造商 {}", request.name);

    request.validate()?;

    let manufacturer = state.bom.create_manufacturer(&user, &request.name).await?;
    Ok(Json(manufacturer.into()))
}

#[utoipa::path(get,
    path = "/projects/bom/material-types",
    tag = "bom",
    responses(
        (status = 200, description = "All material types", body = Vec<MaterialTypeView>)
    ),
)]
pub async fn get_all_material_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MaterialTypeView>>, AppError> {
    let material_types = state.bom.get_all_material_types().await?;
    Ok(Json(material_types.into_iter().map(MaterialTypeView::from).collect()))
}

/// 创建物料类型
///
/// 需要 LEADERSHIP 及以上角色
#[utoipa::path(post,
    path = "/projects/bom/material-type/create",
    tag = "bom",
    request_body = NameRequest,
    responses(
        (status = 200, description = "Created material type", body = MaterialTypeView),
        (status = 403, description = "Role below leadership", body = ErrorBody)
    ),
)]
pub async fn create_material_type(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<NameRequest>,
) -> Result<Json<MaterialTypeView>, AppError> {
    debug!("🆕 创建物料类型 {}", request.name);

    request.validate()?;

    let material_type = state.bom.create_material_type(&request.name, &user).await?;
    Ok(Json(material_type.into()))
}

/// 删除物料类型
#[utoipa::path(delete,
    path = "/projects/bom/material-type/{name}/delete",
    tag = "bom",
    params(("name" = String, Path, description = "物料类型名称")),
    responses(
        (status = 200, description = "Deleted material type", body = MaterialTypeView),
        (status = 404, description = "Material type not found", body = ErrorBody)
    ),
)]
pub async fn delete_material_type(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(name): Path<String>,
) -> Result<Json<MaterialTypeView>, AppError> {
    debug!("🗑️ 删除物料类型 {}", name);

    let material_type = state.bom.delete_material_type(&name, &user).await?;
    Ok(Json(material_type.into()))
}

/// 在项目下创建装配体
#[utoipa::path(post,
    path = "/projects/bom/assembly/{wbsNum}/create",
    tag = "bom",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    request_body = AssemblyCreateRequest,
    responses(
        (status = 200, description = "Created assembly", body = AssemblyView)
    ),
)]
pub async fn create_assembly(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
    Json(request): Json<AssemblyCreateRequest>,
) -> Result<Json<AssemblyView>, AppError> {
    debug!("🆕 项目 {} 创建装配体 {}", wbs_num, request.name);

    request.validate()?;
    let wbs_num = WbsNumber::parse(&wbs_num)?;

    let assembly = state
        .bom
        .create_assembly(&request.name, &user, wbs_num, request.pdm_file_name)
        .await?;
    Ok(Json(assembly.into()))
}

/// 在项目下创建物料
#[utoipa::path(post,
    path = "/projects/material/{wbsNum}/create",
    tag = "bom",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    request_body = MaterialCreateRequest,
    responses(
        (status = 200, description = "Created material", body = MaterialView)
    ),
)]
pub async fn create_material(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
    Json(request): Json<MaterialCreateRequest>,
) -> Result<Json<MaterialView>, AppError> {
    debug!("🆕 项目 {} 创建物料 {:#?}", wbs_num, request);

    request.validate()?;
    let wbs_num = WbsNumber::parse(&wbs_num)?;

    let material = state.bom.create_material(&user, wbs_num, request).await?;
    Ok(Json(material.into()))
}

/// 修改项目下的物料
#[utoipa::path(post,
    path = "/projects/bom/material/{wbsNum}/edit",
    tag = "bom",
    params(("wbsNum" = String, Path, description = "项目 WBS 编号", example = "1.1.0")),
    request_body = MaterialEditRequest,
    responses(
        (status = 200, description = "Edited material", body = MaterialView),
        (status = 404, description = "Material not found", body = ErrorBody)
    ),
)]
pub async fn edit_material(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(wbs_num): Path<String>,
    Json(request): Json<MaterialEditRequest>,
) -> Result<Json<MaterialView>, AppError> {
    debug!("✏️ 项目 {} 修改物料 {}", wbs_num, request.material_id);

    request.validate()?;
    let wbs_num = WbsNumber::parse(&wbs_num)?;

    let material = state
        .bom
        .edit_material(&user, wbs_num, &request.material_id, request.material)
        .await?;
    Ok(Json(material.into()))
}
