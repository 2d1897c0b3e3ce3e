use crate::{DatabaseError, DatabaseResult};
use shared_lib::models::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// 数据库连接池
pub type DatabasePool = Pool<Postgres>;

/// 获取连接的超时时间
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// 空闲连接保留时间
const IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

/// 单个连接的最长存活时间
const MAX_LIFETIME: Duration = Duration::from_secs(3600 * 6);

/// 创建连接池并执行迁移，服务启动时调用一次
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<DatabasePool> {
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// 创建 PostgreSQL 连接池
///
/// 连接池内部是引用计数，clone 后可以在多个仓库之间共享。
pub async fn create_pool(config: &DatabaseConfig) -> DatabaseResult<DatabasePool> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect(&config.postgresql_conn_str)
        .await
        .map_err(|e| DatabaseError::connection(format!("连接PostgreSQL数据库失败: {e}")))?;

    info!(
        "🗄️ 数据库连接池创建成功 (min={}, max={})",
        config.min_connections, config.max_connections
    );
    Ok(pool)
}

/// 执行 `migrations/` 目录下的表结构迁移
pub async fn run_migrations(pool: &DatabasePool) -> DatabaseResult<()> {
    info!("🔄 开始执行 FinishLine 表结构迁移...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::migration(format!("数据库迁移失败: {e}")))?;

    info!("✅ 表结构迁移完成");
    Ok(())
}
