use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Excursion, ExcursionPatch, NewExcursion};
use crate::error::AppError;

/// 存储适配器：内存实现为 no-op，但每次写操作都必须调用 `persist`，
/// 与可持久化后端保持同一接口（后续可替换为落盘实现）。
pub trait StorageAdapter: Send + Sync {
    fn persist(&self, records: &[Excursion]) -> Result<(), AppError>;
}

/// 纯内存适配器：进程内有效，重启即丢弃。
#[derive(Debug, Default)]
pub struct MemoryAdapter;

impl StorageAdapter for MemoryAdapter {
    fn persist(&self, _records: &[Excursion]) -> Result<(), AppError> {
        // 内存后端无持久化动作，调用本身保证接口对齐
        Ok(())
    }
}

/// 远足记录内存存储。
///
/// 显式持有并通过 AppState 注入（而非模块级单例），保证测试隔离，
/// 也便于将来替换为持久化后端。集合放在异步 RwLock 后面：
/// 单次请求内的读写是内存安全的，跨请求不做事务与冲突检测（last-write-wins）。
#[derive(Clone)]
pub struct ExcursionStore {
    records: Arc<RwLock<Vec<Excursion>>>,
    adapter: Arc<dyn StorageAdapter>,
    seeded: Arc<AtomicBool>,
}

impl ExcursionStore {
    /// 基于内存适配器创建存储
    pub fn in_memory() -> Self {
        Self::with_adapter(Arc::new(MemoryAdapter))
    }

    /// 注入自定义适配器（测试/未来的持久化后端）
    pub fn with_adapter(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            adapter,
            seeded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 首次观察到空集合时播种一条默认记录（与上游原型一致）。
    ///
    /// 只播种一次：之后记录被全部删除时集合保持为空，不会复活。
    async fn ensure_seeded(&self) {
        if self.seeded.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut guard = self.records.write().await;
        if guard.is_empty() {
            guard.push(seed_record());
        }
    }

    /// 返回当前全部记录（快照）
    pub async fn list(&self) -> Vec<Excursion> {
        self.ensure_seeded().await;
        self.records.read().await.clone()
    }

    /// 按标识查找单条记录
    pub async fn get(&self, uuid: &str) -> Option<Excursion> {
        self.ensure_seeded().await;
        self.records
            .read()
            .await
            .iter()
            .find(|e| e.uuid == uuid)
            .cloned()
    }

    /// 追加一条新记录：忽略客户端标识，由服务端生成 UUID v4。
    pub async fn create(&self, body: NewExcursion) -> Result<Excursion, AppError> {
        self.ensure_seeded().await;
        let record = body.into_excursion(Uuid::new_v4().to_string());
        let mut guard = self.records.write().await;
        guard.push(record.clone());
        self.adapter.persist(&guard)?;
        Ok(record)
    }

    /// 整体替换指定记录（uuid 保持路径参数的值）。
    ///
    /// 标识无匹配时返回 None：不补插、不写入越界下标。
    pub async fn replace(&self, uuid: &str, body: NewExcursion) -> Result<Option<Excursion>, AppError> {
        self.ensure_seeded().await;
        let mut guard = self.records.write().await;
        let Some(slot) = guard.iter_mut().find(|e| e.uuid == uuid) else {
            return Ok(None);
        };
        *slot = body.into_excursion(uuid.to_string());
        let updated = slot.clone();
        self.adapter.persist(&guard)?;
        Ok(Some(updated))
    }

    /// 浅合并指定记录：仅覆盖 body 中出现的字段。
    pub async fn merge(&self, uuid: &str, patch: ExcursionPatch) -> Result<Option<Excursion>, AppError> {
        self.ensure_seeded().await;
        let mut guard = self.records.write().await;
        let Some(slot) = guard.iter_mut().find(|e| e.uuid == uuid) else {
            return Ok(None);
        };
        patch.apply_to(slot);
        let updated = slot.clone();
        self.adapter.persist(&guard)?;
        Ok(Some(updated))
    }

    /// 删除标识匹配的全部记录（实际最多一条），返回是否有记录被删除。
    pub async fn remove(&self, uuid: &str) -> Result<bool, AppError> {
        self.ensure_seeded().await;
        let mut guard = self.records.write().await;
        let before = guard.len();
        guard.retain(|e| e.uuid != uuid);
        let removed = guard.len() != before;
        self.adapter.persist(&guard)?;
        Ok(removed)
    }
}

/// 默认种子记录（字段值取自上游原型，文案原样保留）
fn seed_record() -> Excursion {
    Excursion {
        uuid: Uuid::new_v4().to_string(),
        name: "Mount Nowhere".to_string(),
        height: 2000.0,
        photo: "https://picsum.photos/id/15/1024/768.webp".to_string(),
        timing: 180.0,
        notes: "First, and succesful attempt! But I definetely need to buy better gear..."
            .to_string(),
    }
}
