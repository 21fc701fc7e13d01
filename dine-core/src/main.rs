use dine_core::{Config, CoreState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env (不存在时忽略)
    dotenv::dotenv().ok();

    // 2. 加载配置 + 日志
    let config = Config::from_env();
    setup_environment(&config)?;

    tracing::info!("🍽️ Dine core starting...");

    // 3. 初始化运行时状态
    let state = CoreState::initialize(&config).await?;
    tracing::info!(
        database = %config.database_path,
        max_party_size = config.reservation.max_party_size,
        "Ready, press Ctrl+C to stop"
    );

    // 4. 等待退出信号
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    state.shutdown().await;

    Ok(())
}
