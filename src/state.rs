use std::sync::Arc;

use crate::features::excursion::ExcursionStore;
use crate::features::pages::ContentClient;

/// 聚合的应用共享状态。
///
/// 远足存储与内容客户端都是显式注入的（而非模块级单例），
/// 每个测试可以用独立实例构造自己的 Router。
#[derive(Clone)]
pub struct AppState {
    /// 远足记录内存存储
    pub excursions: ExcursionStore,
    /// 上游内容源客户端
    pub content: Arc<ContentClient>,
}

impl AppState {
    pub fn new(excursions: ExcursionStore, content: ContentClient) -> Self {
        Self {
            excursions,
            content: Arc::new(content),
        }
    }
}
