/// 远足记录资源（内存 CRUD）
pub mod excursion;

/// 首页文章卡片渲染（上游内容源 + HTML 清洗）
pub mod pages;

/// 健康检查
pub mod health;
