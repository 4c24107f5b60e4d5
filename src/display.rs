//! 列表渲染辅助函数

use crate::model::record::CredentialRecord;

/// 隐藏密码时显示的占位符
pub const PASSWORD_MASK: &str = "••••••••";

/// 站点显示名：去掉协议前缀，只保留第一个 `/` 之前的部分
pub fn site_label(site: &str) -> &str {
    let rest = site
        .strip_prefix("https://")
        .or_else(|| site.strip_prefix("http://"))
        .unwrap_or(site);
    rest.split('/').next().unwrap_or(rest)
}

pub fn mask_password(password: &str, reveal: bool) -> &str {
    if reveal { password } else { PASSWORD_MASK }
}

/// 将列表渲染为对齐的文本表格
pub fn render_table(records: &[CredentialRecord], reveal: bool) -> String {
    if records.is_empty() {
        return "No passwords saved yet\nAdd your first password to get started\n".to_string();
    }

    let rows: Vec<[&str; 4]> = records
        .iter()
        .map(|r| {
            [
                site_label(&r.site),
                r.username.as_str(),
                mask_password(&r.password, reveal),
                r.id.as_str(),
            ]
        })
        .collect();

    let header = ["Website", "Username", "Password", "Id"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

// format! 的宽度按 char 计数，和 chars().count() 保持一致
fn pad(cell: &str, width: usize) -> String {
    format!("{:<width$}", cell, width = width)
}
