use color_eyre::eyre::Context;
use color_eyre::Result;
use database::{initialize_database, Repositories};
use shared_lib::AppConfig;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;

    tracing_subscriber::fmt().with_max_level(config.log_level).init();

    info!("🚀 启动 FinishLine 服务...");

    let pool = initialize_database(&config.database)
        .await
        .context("Initialize postgresql database")?;
    let repositories = Repositories::postgres(pool);

    // Ctrl-C 时通知所有服务优雅退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("❌ 监听退出信号失败: {e}");
            return;
        }
        info!("🛑 收到退出信号");
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(repositories, &config.bind_addr, shutdown_rx).await?;

    info!("👋 FinishLine 服务已退出");
    Ok(())
}
