use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use trek_backend::config::AppConfig;
use trek_backend::cors::build_cors_layer;
use trek_backend::features::excursion::{ExcursionStore, create_excursion_router};
use trek_backend::features::health::health_check;
use trek_backend::features::pages::{ContentClient, create_pages_router};
use trek_backend::openapi::ApiDoc;
use trek_backend::request_id::request_id_middleware;
use trek_backend::shutdown::ShutdownManager;
use trek_backend::state::AppState;

#[tokio::main]
async fn main() {
    // 先加载配置：日志级别/格式来自 logging 分节（subscriber 初始化前只能用 stderr）
    if let Err(e) = AppConfig::init_global() {
        eprintln!("配置加载失败: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::global();

    // RUST_LOG 优先，缺省时回落到 logging.level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.env_filter_directives()));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "compact" {
        subscriber.compact().init();
    } else {
        subscriber.init();
    }

    // 创建优雅退出管理器
    let shutdown_manager = ShutdownManager::new();

    // 启动信号处理器
    if let Err(e) = shutdown_manager.start_signal_handler().await {
        tracing::error!("信号处理器启动失败: {}", e);
        std::process::exit(1);
    }

    // Shared state
    let content_client = match ContentClient::new(&config.content) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Content client init failed: {}", e);
            std::process::exit(1);
        }
    };
    let app_state = AppState::new(ExcursionStore::in_memory(), content_client);

    // Routes
    let api_router = Router::<AppState>::new().merge(create_excursion_router());

    let mut app = Router::<AppState>::new()
        .route("/health", get(health_check))
        .merge(create_pages_router())
        .nest(&config.api.prefix, api_router)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // 全局 request_id 中间件（ProblemDetails 回填依赖它）
    app = app.layer(axum::middleware::from_fn(request_id_middleware));

    // CORS：按配置启用；allowed_methods 留空时使用含 PATCH 的完整方法集
    if let Some(cors_layer) = build_cors_layer(&config.cors) {
        tracing::info!("CORS 已启用");
        app = app.layer(cors_layer);
    }

    // 应用内响应压缩：对 HTML/JSON 等文本内容启用 gzip/brotli
    app = app.layer(CompressionLayer::new());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Bind address failed {}: {}", addr, e);
            std::process::exit(1);
        });

    tracing::info!("Server: http://{}", addr);
    tracing::info!("Docs: http://{}/docs", addr);
    tracing::info!("Health: http://{}/health", addr);
    tracing::info!("Excursion API: http://{}{}/excursions", addr, config.api.prefix);
    tracing::info!("Content source: {}", config.posts_endpoint());

    // 启动服务器并等待优雅退出信号
    let shutdown_config = &config.shutdown;
    let shutdown_timeout = shutdown_config.timeout_duration();

    let shutdown_signal = async move {
        let reason = shutdown_manager.wait_for_shutdown().await;
        tracing::info!("接收到退出信号: {:?}，开始优雅退出...", reason);

        match tokio::time::timeout(shutdown_timeout, async move {
            // 内存集合无需落盘，仅等待在途请求结束
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        })
        .await
        {
            Ok(_) => {
                tracing::info!("优雅退出完成");
            }
            Err(_) => {
                tracing::warn!("优雅退出超时，强制退出");
                if shutdown_config.force_quit {
                    tracing::info!("等待 {} 秒后强制退出", shutdown_config.force_delay_secs);
                    tokio::time::sleep(shutdown_config.force_delay_duration()).await;
                }
            }
        }
    };

    let graceful = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal.await;
        tracing::info!("开始优雅关闭HTTP服务器...");
    });

    if let Err(e) = graceful.await {
        tracing::error!("服务器运行错误: {}", e);
        std::process::exit(1);
    }

    tracing::info!("服务器已优雅关闭");
}
