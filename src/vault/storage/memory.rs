//! 内存键值存储实现
//!
//! 进程退出即丢失，用于测试和临时会话

use std::collections::HashMap;

use parking_lot::Mutex;

use super::traits::KeyValueStorage;

#[derive(Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.slots.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn storage_type(&self) -> &'static str {
        "memory"
    }
}
