//! 密码条目存储核心

mod error;
pub mod storage;
mod store;

pub use error::StoreError;
pub use store::RecordStore;
