mod display;
mod model;
mod vault;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use model::arg::{Args, Command};
use model::config::{Config, StorageType};
use model::record::{Draft, Field, RecordId};
use vault::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use vault::{RecordStore, StoreError};

fn main() {
    // 解析命令行参数
    let args = Args::parse();

    // 初始化日志（输出到 stderr，避免污染 `get` 的管道输出）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 加载配置
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = Config::load(&config_path).unwrap_or_else(|e| {
        tracing::error!("加载配置失败: {:#}", e);
        std::process::exit(1);
    });

    // 命令行参数覆盖配置文件
    if let Some(storage) = args.storage {
        config.storage_type = storage;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    // 根据配置创建存储后端
    let storage: Arc<dyn KeyValueStorage> = match config.storage_type {
        StorageType::File => {
            let storage = FileStorage::new(&config.data_dir);
            tracing::debug!("使用文件存储后端: {:?}", storage.dir());
            Arc::new(storage)
        }
        StorageType::Memory => {
            tracing::warn!("演练模式：使用内存存储后端，从空列表开始，本次修改不会保留");
            Arc::new(MemoryStorage::new())
        }
    };

    let mut store = RecordStore::open(storage, &config.storage_key).unwrap_or_else(|e| {
        tracing::error!("加载密码列表失败: {}", e);
        std::process::exit(1);
    });

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    if let Err(e) = execute(&mut store, args.command, &mut stdout.lock(), &mut stdin.lock()) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn execute(
    store: &mut RecordStore,
    command: Command,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> anyhow::Result<()> {
    match command {
        Command::Add {
            site,
            username,
            password,
        } => {
            store.create(Draft::new(site, username, password))?;
            if let Some(record) = store.records().last() {
                writeln!(out, "Password saved successfully! id: {}", record.id)?;
            }
        }

        Command::List { show_passwords } => {
            write!(out, "{}", display::render_table(store.records(), show_passwords))?;
        }

        Command::Get { id, field } => {
            let id = RecordId::from(id);
            let Some(record) = store.find(&id) else {
                anyhow::bail!("未找到条目: {}", id);
            };
            writeln!(out, "{}", record.field(Field::from(field)))?;
        }

        Command::Edit {
            id,
            site,
            username,
            password,
        } => {
            let id = RecordId::from(id);
            let Some(record) = store.find(&id) else {
                anyhow::bail!("未找到条目: {}", id);
            };

            // 先在副本上套用修改并校验，避免取出后无法回存
            let mut draft = record.clone().into_draft();
            if let Some(site) = site {
                draft.site = site;
            }
            if let Some(username) = username {
                draft.username = username;
            }
            if let Some(password) = password {
                draft.password = password;
            }
            let missing = draft.missing_fields();
            if !missing.is_empty() {
                return Err(StoreError::Validation { missing }.into());
            }

            if store.take_for_edit(&id)?.is_some() {
                let (site, username) = (draft.site.clone(), draft.username.clone());
                store.create(draft).with_context(|| {
                    format!(
                        "原条目已删除但未能重新保存，请手动重新添加: site={} username={}",
                        site, username
                    )
                })?;
                if let Some(record) = store.records().last() {
                    writeln!(out, "Password updated! new id: {}", record.id)?;
                }
            }
        }

        Command::Delete { id, yes } => {
            let id = RecordId::from(id);
            if !yes && !confirm("Are you sure you want to delete this password?", out, input)? {
                writeln!(out, "Cancelled")?;
                return Ok(());
            }
            let before = store.records().len();
            let after = store.remove(&id)?.len();
            if after < before {
                writeln!(out, "Password deleted!")?;
            } else {
                tracing::warn!("未找到条目: {}", id);
            }
        }
    }
    Ok(())
}

/// 在终端询问 y/N
fn confirm(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> anyhow::Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("读取确认输入失败")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::arg::CopyField;

    const KEY: &str = "passwords";

    fn seeded() -> (Arc<MemoryStorage>, RecordStore, RecordId) {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = RecordStore::open(storage.clone(), KEY).unwrap();
        store.create(Draft::new("example.com", "octocat", "hunter2")).unwrap();
        store.create(Draft::new("b.com", "u2", "p2")).unwrap();
        let id = store.records()[0].id.clone();
        (storage, store, id)
    }

    fn run(store: &mut RecordStore, command: Command) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = execute(store, command, &mut out, &mut &b""[..]);
        (result, String::from_utf8(out).unwrap())
    }

    fn get(store: &mut RecordStore, id: &RecordId, field: CopyField) -> String {
        let (result, out) = run(
            store,
            Command::Get {
                id: id.to_string(),
                field,
            },
        );
        result.unwrap();
        out
    }

    /// 写入次数用完后开始失败的后端
    struct LimitedStorage {
        inner: MemoryStorage,
        writes_left: parking_lot::Mutex<usize>,
    }

    impl KeyValueStorage for LimitedStorage {
        fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
            let mut left = self.writes_left.lock();
            if *left == 0 {
                anyhow::bail!("quota exceeded");
            }
            *left -= 1;
            self.inner.set(key, value)
        }

        fn storage_type(&self) -> &'static str {
            "limited"
        }
    }

    #[test]
    fn test_get_prints_raw_fields() {
        let (_, mut store, id) = seeded();

        assert_eq!(get(&mut store, &id, CopyField::Site), "example.com\n");
        assert_eq!(get(&mut store, &id, CopyField::Username), "octocat\n");
        assert_eq!(get(&mut store, &id, CopyField::Password), "hunter2\n");
    }

    #[test]
    fn test_get_missing_id_is_error() {
        let (_, mut store, _) = seeded();

        let (result, out) = run(
            &mut store,
            Command::Get {
                id: "nope".to_string(),
                field: CopyField::Password,
            },
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_edit_with_empty_field_keeps_record() {
        let (storage, mut store, id) = seeded();
        let blob = storage.get(KEY).unwrap();

        let (result, _) = run(
            &mut store,
            Command::Edit {
                id: id.to_string(),
                site: Some(String::new()),
                username: None,
                password: None,
            },
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Validation { .. })
        ));
        assert!(store.find(&id).is_some());
        assert_eq!(storage.get(KEY).unwrap(), blob);
    }

    #[test]
    fn test_edit_assigns_new_id_and_moves_to_end() {
        let (_, mut store, id) = seeded();

        let (result, out) = run(
            &mut store,
            Command::Edit {
                id: id.to_string(),
                site: None,
                username: None,
                password: Some("new-pass".to_string()),
            },
        );
        result.unwrap();
        assert!(out.starts_with("Password updated!"));

        assert!(store.find(&id).is_none());
        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].site, "b.com");
        assert_eq!(records[1].site, "example.com");
        assert_eq!(records[1].username, "octocat");
        assert_eq!(records[1].password, "new-pass");
        assert_ne!(records[1].id, id);
    }

    #[test]
    fn test_edit_missing_id_is_error() {
        let (_, mut store, _) = seeded();

        let (result, _) = run(
            &mut store,
            Command::Edit {
                id: "nope".to_string(),
                site: Some("x".to_string()),
                username: None,
                password: None,
            },
        );
        assert!(result.is_err());
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn test_edit_resave_failure_names_dropped_record() {
        let storage = Arc::new(LimitedStorage {
            inner: MemoryStorage::new(),
            writes_left: parking_lot::Mutex::new(2),
        });
        let mut store = RecordStore::open(storage, KEY).unwrap();
        store.create(Draft::new("example.com", "octocat", "hunter2")).unwrap();
        let id = store.records()[0].id.clone();

        // 第二次写入（删除）成功，第三次（重新保存）失败
        let (result, _) = run(
            &mut store,
            Command::Edit {
                id: id.to_string(),
                site: None,
                username: None,
                password: Some("new-pass".to_string()),
            },
        );
        let err = result.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("site=example.com"));
        assert!(message.contains("username=octocat"));
        assert!(!message.contains("new-pass"));
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Persistence(_))
        ));
    }

    #[test]
    fn test_add_validation_error() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = RecordStore::open(storage, KEY).unwrap();

        let (result, out) = run(
            &mut store,
            Command::Add {
                site: String::new(),
                username: "u".to_string(),
                password: "p".to_string(),
            },
        );
        assert!(result.unwrap_err().to_string().contains("please fill all fields"));
        assert!(out.is_empty());
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_list_masks_passwords() {
        let (_, mut store, _) = seeded();

        let (result, out) = run(&mut store, Command::List { show_passwords: false });
        result.unwrap();
        assert!(out.contains("example.com"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_, mut store, id) = seeded();

        let mut out = Vec::new();
        let command = Command::Delete {
            id: id.to_string(),
            yes: false,
        };
        execute(&mut store, command, &mut out, &mut &b"n\n"[..]).unwrap();
        assert!(store.find(&id).is_some());

        let command = Command::Delete {
            id: id.to_string(),
            yes: false,
        };
        execute(&mut store, command, &mut out, &mut &b"y\n"[..]).unwrap();
        assert!(store.find(&id).is_none());
        assert!(String::from_utf8(out).unwrap().ends_with("Password deleted!\n"));
    }
}
