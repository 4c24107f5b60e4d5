//! 密码条目存储
//!
//! 持有权威的内存列表，并在每次变更后整体回写到存储后端。
//! 每个变更操作先构建新列表、写入存储，成功后才替换内存状态，
//! 因此持久化失败时内存状态保持不变。

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;

use crate::model::record::{CredentialRecord, Draft, RecordId};

use super::error::{Result, StoreError};
use super::storage::KeyValueStorage;

pub struct RecordStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    records: Vec<CredentialRecord>,
}

impl RecordStore {
    /// 创建存储并从后端加载已有条目
    pub fn open(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Result<Self> {
        let mut store = Self {
            storage,
            key: key.into(),
            records: Vec::new(),
        };
        store.records = store.load()?;
        Ok(store)
    }

    /// 读取并解析持久化的列表
    ///
    /// - 键不存在：空列表
    /// - 后端读取失败：`StoreError::Persistence`
    /// - 内容无法解析：记录警告并视为空列表
    ///
    /// 重复的 id 只保留第一次出现的条目
    pub fn load(&self) -> Result<Vec<CredentialRecord>> {
        let bytes = self
            .storage
            .get(&self.key)
            .with_context(|| format!("从 {} 存储读取 {} 失败", self.storage.storage_type(), self.key))?;

        let Some(bytes) = bytes else {
            tracing::debug!("存储键 {} 不存在，使用空列表", self.key);
            return Ok(Vec::new());
        };

        let parsed: Vec<CredentialRecord> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("存储键 {} 的内容无法解析，视为空列表: {}", self.key, e);
                return Ok(Vec::new());
            }
        };

        let mut seen = HashSet::with_capacity(parsed.len());
        let records: Vec<CredentialRecord> = parsed
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.id.clone());
                if !fresh {
                    tracing::warn!("忽略重复的条目 id: {}", record.id);
                }
                fresh
            })
            .collect();

        tracing::debug!("已加载 {} 个条目", records.len());
        Ok(records)
    }

    /// 当前有序列表（插入顺序即显示顺序）
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// 按 id 查找条目
    pub fn find(&self, id: &RecordId) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// 保存新条目
    ///
    /// 任一字段为空时返回 `StoreError::Validation`，列表不变
    pub fn create(&mut self, draft: Draft) -> Result<&[CredentialRecord]> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation { missing });
        }

        let id = self.fresh_id();
        let mut updated = self.records.clone();
        updated.push(CredentialRecord::from_draft(draft, id));

        self.commit(updated)?;
        tracing::debug!("已创建条目，当前共 {} 个", self.records.len());
        Ok(&self.records)
    }

    /// 删除条目
    ///
    /// id 不存在时为空操作，但仍然回写
    pub fn remove(&mut self, id: &RecordId) -> Result<&[CredentialRecord]> {
        let updated: Vec<CredentialRecord> = self
            .records
            .iter()
            .filter(|r| &r.id != id)
            .cloned()
            .collect();

        if updated.len() == self.records.len() {
            tracing::debug!("删除的条目不存在: {}", id);
        }

        self.commit(updated)?;
        Ok(&self.records)
    }

    /// 取出条目用于编辑
    ///
    /// 从列表中移除该条目并回写，返回其字段值（不含 id）。
    /// id 不存在时返回 `None`，不写存储
    pub fn take_for_edit(&mut self, id: &RecordId) -> Result<Option<Draft>> {
        let Some(index) = self.records.iter().position(|r| &r.id == id) else {
            return Ok(None);
        };

        let mut updated = self.records.clone();
        let taken = updated.remove(index);

        self.commit(updated)?;
        tracing::debug!("已取出条目用于编辑: {}", id);
        Ok(Some(taken.into_draft()))
    }

    /// 序列化完整列表并覆盖存储
    fn persist(&self, records: &[CredentialRecord]) -> Result<()> {
        let json = serde_json::to_vec(records).context("序列化条目列表失败")?;
        self.storage
            .set(&self.key, &json)
            .with_context(|| format!("写入 {} 存储失败", self.storage.storage_type()))?;
        Ok(())
    }

    fn commit(&mut self, records: Vec<CredentialRecord>) -> Result<()> {
        self.persist(&records)?;
        self.records = records;
        Ok(())
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}
