//! 密码条目数据模型
//!
//! 持久化格式为扁平 JSON 对象：`site`、`username`、`password`、`id` 四个字符串字段，
//! 无版本号。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 密码条目的唯一标识
///
/// 对调用方不透明；新生成的 id 为 UUID v4 字符串，从存储加载的 id 接受任意字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// 生成新的随机 id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 草稿中的必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Site,
    Username,
    Password,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Site => "site",
            Field::Username => "username",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 尚未保存的表单值（没有 id）
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub site: String,
    pub username: String,
    pub password: String,
}

impl Draft {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// 返回所有为空的必填字段，按表单顺序排列
    ///
    /// 只检查是否为空，不做 trim，也不校验 URL 格式
    pub fn missing_fields(&self) -> Vec<Field> {
        [
            (Field::Site, &self.site),
            (Field::Username, &self.username),
            (Field::Password, &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Debug 输出永远不包含明文密码
impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 已保存的密码条目
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub site: String,
    pub username: String,
    pub password: String,
    pub id: RecordId,
}

impl CredentialRecord {
    /// 用草稿和新分配的 id 构建条目
    pub fn from_draft(draft: Draft, id: RecordId) -> Self {
        Self {
            site: draft.site,
            username: draft.username,
            password: draft.password,
            id,
        }
    }

    /// 拆出字段值作为可编辑草稿，丢弃原 id
    pub fn into_draft(self) -> Draft {
        Draft {
            site: self.site,
            username: self.username,
            password: self.password,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Site => &self.site,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
