use voc_server::{Config, ServerState, api, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量和配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 日志 (生产环境写入 work_dir/logs)
    std::fs::create_dir_all(config.log_dir())?;
    let log_dir = config.log_dir();
    if config.is_production() {
        init_logger_with_file(Some(&config.log_level), log_dir.to_str());
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }

    tracing::info!("VOC Server starting...");

    // 3. 初始化服务器状态 (数据库 + 服务)
    let state = ServerState::initialize(&config).await;

    // 4. 启动 HTTP 服务器
    let app = api::build_app(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
