use reqwest::Client;

use super::models::Post;
use crate::config::ContentConfig;
use crate::error::AppError;

/// 上游内容源客户端（WordPress 风格 REST API）。
///
/// 失败即封闭：任何网络/结构异常都会转成 AppError 冒泡，
/// 绝不把未清洗的上游内容直接交给页面。
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    base_url: String,
    posts_url: String,
    page_title: String,
    max_posts: usize,
}

impl ContentClient {
    pub fn new(cfg: &ContentConfig) -> Result<Self, AppError> {
        let client = crate::http::client_content(cfg.fetch_timeout_secs)
            .map_err(|e| AppError::Internal(format!("HTTP client 初始化失败: {e}")))?
            .clone();
        let base_url = cfg.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            posts_url: format!("{base_url}/posts"),
            base_url,
            page_title: cfg.page_title.clone(),
            max_posts: cfg.max_posts,
        })
    }

    /// 页面标题（来自配置）
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// 内容源基地址（页面上展示来源用）
    pub fn source_url(&self) -> &str {
        &self.base_url
    }

    /// 拉取文章列表。
    ///
    /// - 不可达/非 2xx → Upstream（502）
    /// - 超时 → Timeout（504）
    /// - 返回结构不符 → Upstream（502），不尝试部分解析
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        tracing::debug!(url = %self.posts_url, "fetching posts from content source");

        let resp = self.client.get(&self.posts_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "内容源返回非成功状态: {status}"
            )));
        }

        let mut posts: Vec<Post> = resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("内容源返回结构不符: {e}")))?;
        posts.truncate(self.max_posts);
        Ok(posts)
    }
}
