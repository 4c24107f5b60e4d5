//! 存储层错误类型

use thiserror::Error;

use crate::model::record::Field;

#[derive(Debug, Error)]
pub enum StoreError {
    /// 草稿有必填字段为空，没有任何条目被创建
    #[error("please fill all fields (missing: {})", join_fields(.missing))]
    Validation { missing: Vec<Field> },

    /// 存储后端读写或序列化失败，内存状态保持不变
    #[error("persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, StoreError>;
