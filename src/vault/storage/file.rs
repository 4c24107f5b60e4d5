//! 文件键值存储实现
//!
//! 每个键对应数据目录下的一个 `<key>.json` 文件

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::traits::KeyValueStorage;

/// 文件存储
pub struct FileStorage {
    /// 数据目录
    dir: PathBuf,
}

impl FileStorage {
    /// 创建文件存储实例
    ///
    /// 目录不必事先存在，首次写入时创建
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 获取数据目录
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 键到文件路径的映射
    ///
    /// 拒绝空键以及可能逃出数据目录的键
    fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            anyhow::bail!("非法的存储键: {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("读取存储文件失败: {:?}", path)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("创建数据目录失败: {:?}", self.dir))?;
        std::fs::write(&path, value)
            .with_context(|| format!("写入存储文件失败: {:?}", path))?;

        tracing::debug!("已写入存储文件: {:?} ({} 字节)", path, value.len());
        Ok(())
    }

    fn storage_type(&self) -> &'static str {
        "file"
    }
}
