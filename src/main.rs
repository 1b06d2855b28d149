use anyhow::{anyhow, Context};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

use user_crud::{
    app,
    config::AppConfig,
    infrastructure::{lambda::strip_stage, logger::Logger, store},
    AppState, OperationTimeouts, UserService,
};

/// Lambda 运行时注入的环境变量
const LAMBDA_RUNTIME_ENV: &str = "AWS_LAMBDA_RUNTIME_API";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let lambda = std::env::var_os(LAMBDA_RUNTIME_ENV).is_some();

    let config = AppConfig::load().context("加载配置失败")?;
    Logger::init(&config.logging.level, lambda)?;

    info!("❄️ 冷启动，初始化存储连接");

    // 没有存储连接时不能处理任何请求
    let store = store::open(&config.store)
        .await
        .context("存储初始化失败，终止启动")?;

    let service = UserService::new(store, OperationTimeouts::from(&config.timeouts));
    let app = app::router(AppState::new(service));

    if lambda {
        info!("🚀 以 Lambda 模式运行");
        let handler = ServiceBuilder::new().map_request(strip_stage).service(app);
        lambda_http::run(handler)
            .await
            .map_err(|e| anyhow!("Lambda 运行时退出: {e}"))
    } else {
        let listener = TcpListener::bind(&config.http.bind_address)
            .await
            .with_context(|| format!("无法绑定到 {}", config.http.bind_address))?;

        info!("🚀 用户服务运行在 http://{}", config.http.bind_address);
        info!("📖 API 端点:");
        info!("   POST   /create/user      - 创建用户");
        info!("   GET    /get/users        - 获取所有用户");
        info!("   PUT    /update/user/:id  - 更新用户");
        info!("   DELETE /delete/user/:id  - 删除用户");

        axum::serve(listener, app).await.context("服务器运行失败")
    }
}
