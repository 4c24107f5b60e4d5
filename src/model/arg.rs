//! 命令行参数

use clap::{Parser, Subcommand};

use super::config::StorageType;
use super::record::Field;

#[derive(Parser, Debug)]
#[command(name = "securevault", version, about = "Your personal password manager")]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 数据目录（覆盖配置文件）
    #[arg(long)]
    pub data_dir: Option<String>,

    /// 存储后端（覆盖配置文件）；memory 为演练模式，每次调用都从空列表开始且不保留任何修改
    #[arg(long, value_enum)]
    pub storage: Option<StorageType>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 保存新密码
    Add {
        #[arg(long, default_value = "")]
        site: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },

    /// 列出所有已保存的密码
    List {
        /// 显示明文密码
        #[arg(long)]
        show_passwords: bool,
    },

    /// 输出单个字段的原始值，便于管道到剪贴板工具
    Get {
        id: String,
        #[arg(long, value_enum, default_value_t = CopyField::Password)]
        field: CopyField,
    },

    /// 编辑密码（保存后分配新 id）
    Edit {
        id: String,
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// 删除密码
    Delete {
        id: String,
        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CopyField {
    Site,
    Username,
    Password,
}

impl From<CopyField> for Field {
    fn from(value: CopyField) -> Self {
        match value {
            CopyField::Site => Field::Site,
            CopyField::Username => Field::Username,
            CopyField::Password => Field::Password,
        }
    }
}
