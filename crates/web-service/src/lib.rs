//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::Result;
use database::Repositories;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;

pub mod auth;
pub mod models;
pub mod routes;
pub mod services;

use services::{
    BomService, DescriptionBulletService, ProjectService, RiskService, TeamService, UserService, WorkPackageService,
};

/// 应用共享状态
///
/// 所有服务共享同一组仓库实例，仓库内部持有连接池，clone 的代价很小。
pub struct AppState {
    pub repositories: Repositories,
    pub projects: ProjectService,
    pub bom: BomService,
    pub work_packages: WorkPackageService,
    pub risks: RiskService,
    pub teams: TeamService,
    pub users: UserService,
    pub bullets: DescriptionBulletService,
}

impl AppState {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            projects: ProjectService::new(repositories.clone()),
            bom: BomService::new(repositories.clone()),
            work_packages: WorkPackageService::new(repositories.clone()),
            risks: RiskService::new(repositories.clone()),
            teams: TeamService::new(repositories.clone()),
            users: UserService::new(repositories.clone()),
            bullets: DescriptionBulletService::new(repositories.clone()),
            repositories,
        }
    }
}

/// 启动 Web 服务
pub async fn start_web_service(
    repositories: Repositories,
    bind_addr: &str,
    mut shutdown_rx: Receiver<bool>,
) -> Result<()> {
    let shared_state = Arc::new(AppState::new(repositories));

    let router = routes::create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
