//! 应用配置
//!
//! 从 JSON 文件加载，字段使用 camelCase，缺省字段取默认值

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// 数据目录下的 JSON 文件（默认）
    #[default]
    File,
    /// 进程内存，退出即丢失；命令行下仅作演练模式（dry run），不读写磁盘
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub storage_type: StorageType,

    /// 文件存储的数据目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// 保存密码列表的存储键
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_storage_key() -> String {
    "passwords".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_type: StorageType::default(),
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl Config {
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    ///
    /// 文件不存在时返回默认配置；内容无法解析时报错
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))?;
        Ok(config)
    }
}
