pub mod client;
pub mod handler;
pub mod models;
pub mod sanitizer;

// 对外导出路由构建函数，便于 main.rs 引用
pub use client::ContentClient;
pub use handler::create_pages_router;
