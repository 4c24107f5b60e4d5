//! 键值存储 trait 定义

/// 键值存储后端抽象
///
/// 每个键对应一个完整的字节块，写入总是整体覆盖。
/// 支持多种存储实现：文件、内存等
pub trait KeyValueStorage: Send + Sync {
    /// 读取键对应的值
    ///
    /// 键不存在时返回 `Ok(None)`，只有后端故障才返回错误
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// 写入键对应的值，覆盖已有内容
    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// 获取存储类型名称（用于日志）
    fn storage_type(&self) -> &'static str;
}
