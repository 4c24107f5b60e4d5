//! 键值存储抽象层
//!
//! 支持多种存储后端：
//! - 文件存储（默认）
//! - 内存存储（测试、临时会话）
//!
//! # 使用方式
//!
//! ```rust,ignore
//! // 文件存储
//! let storage = FileStorage::new("data");
//!
//! // 内存存储
//! let storage = MemoryStorage::new();
//! ```

mod file;
mod memory;
mod traits;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::KeyValueStorage;
