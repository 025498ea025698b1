/// 统一错误处理模块
pub mod error;

/// 请求体提取器模块（Json 提取失败映射为 ProblemDetails）
pub mod extract;

/// 配置模块
pub mod config;

/// CORS 中间件构建模块
pub mod cors;

/// 请求 ID 中间件模块
pub mod request_id;

/// 功能聚合模块
pub mod features;

/// 应用状态聚合模块
pub mod state;

/// 优雅退出管理模块
pub mod shutdown;

/// HTTP Client 复用工具
pub mod http;

/// OpenAPI 文档聚合
pub mod openapi;

// 导出常用类型供外部使用
pub use config::AppConfig;
pub use error::AppError;
pub use shutdown::{ShutdownManager, ShutdownReason};
