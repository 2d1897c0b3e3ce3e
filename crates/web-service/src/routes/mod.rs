//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::models::common::HealthStatus;
use crate::AppState;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod bom;
pub mod bullets;
pub mod projects;
pub mod risks;
pub mod teams;
pub mod users;
pub mod work_packages;

// `routes!` 需要同时看到 handler 和 `#[utoipa::path]` 生成的 `__path_xxx` 结构体
use bom::*;
use bullets::*;
use projects::*;
use risks::*;
use teams::*;
use users::*;
use work_packages::*;

/// 计算进度、时间线使用的“今天”
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 导出当前App的所有业务路由
///
/// ## 参数定义
/// - state: 共享数据，参考 [`AppState`] 定义。存放各个服务，服务内部持有仓库实例。
///
/// ## **❗️注意事项：**
///
/// [`routes!`] 宏里的多个 handler 会注册到同一个路径上，所以只有路径相同、方法不同的接口才能放在一起：
///
/// ```rust,ignore
/// .routes(routes!(get_user_settings, update_user_settings))
/// ```
///
/// 路径不同的接口需要拆开定义。
///
/// 带参数的路径（如 `/projects/{wbsNum}`）和同层级的静态路径（如 `/projects/link-types`）可以共存，
/// 静态路径优先匹配。
fn routers(state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        // 项目
        .routes(routes!(get_all_projects))
        .routes(routes!(get_all_link_types))
        .routes(routes!(get_single_project))
        .routes(routes!(create_project))
        .routes(routes!(edit_project))
        .routes(routes!(set_project_team))
        .routes(routes!(delete_project))
        .routes(routes!(toggle_favorite))
        .routes(routes!(get_project_bom))
        // 物料清单
        .routes(routes!(get_all_manufacturers))
        .routes(routes!(create_manufacturer))
        .routes(routes!(get_all_material_types))
        .routes(routes!(create_material_type))
        .routes(routes!(delete_material_type))
        .routes(routes!(create_assembly))
        .routes(routes!(create_material))
        .routes(routes!(edit_material))
        // 工作包
        .routes(routes!(get_all_work_packages))
        .routes(routes!(get_single_work_package))
        .routes(routes!(delete_work_package))
        // 风险
        .routes(routes!(get_risks_for_project))
        .routes(routes!(create_risk))
        .routes(routes!(edit_risk))
        .routes(routes!(delete_risk))
        // 团队
        .routes(routes!(get_all_teams))
        .routes(routes!(get_single_team))
        .routes(routes!(create_team))
        .routes(routes!(set_team_members))
        .routes(routes!(set_team_leads))
        .routes(routes!(set_team_head))
        .routes(routes!(edit_team_description))
        .routes(routes!(delete_team))
        // 用户
        .routes(routes!(get_all_users))
        .routes(routes!(get_single_user))
        .routes(routes!(get_user_settings, update_user_settings))
        .routes(routes!(update_user_role))
        .routes(routes!(get_user_favorite_projects))
        // 描述条目
        .routes(routes!(check_description_bullet))
        .with_state(state)
}

/// 健康检查
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由，业务接口统一挂在 `/api/v1` 下
/// - 使用Scalar作为最终在线文档格式
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: Arc<AppState>) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "projects", description = "项目查询、创建、编辑、删除、团队与收藏"),
            (name = "bom", description = "物料清单：制造商、物料类型、装配体、物料"),
            (name = "work-packages", description = "工作包查询与删除"),
            (name = "risks", description = "项目风险"),
            (name = "teams", description = "团队及其负责人、组长、成员"),
            (name = "users", description = "用户、角色与个人设置"),
            (name = "description-bullets", description = "描述条目勾选"),
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // 最终拿到的变量：
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health))
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router.merge(Scalar::with_url("/docs", api))
}
