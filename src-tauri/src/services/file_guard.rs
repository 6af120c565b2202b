//! # 文件写入守卫服务
//!
//! `~/.claude/settings.json` 归 Claude Code 所有，覆盖前先做一次临时备份：
//! 备份到系统 TEMP 目录（默认 `%TEMP%/claude-model-switcher-backups/`），
//! 供用户在切换出错时手动恢复。
//!
//! 备份文件命名：`<原始文件名>_<unix 时间戳（毫秒）>.bak`，同一毫秒内已有同名备份时
//! 追加序号：`<原始文件名>_<时间戳>_<n>.bak`，已有备份不会被覆盖。
//! 备份失败时不执行写入，避免在没有备份的情况下覆盖外部文件。

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, SwitcherError};
use crate::services::json_file;

/// 安全写入文件（统一入口）
///
/// 执行流程：
/// 1. 确保父目录存在
/// 2. 如果配置了备份目录且原文件存在，先复制一份备份
/// 3. 执行实际写入（整文件覆盖）
///
/// # 返回值
/// 创建了备份时返回备份文件路径
///
/// # 错误
/// 目录创建、备份或写入失败时返回 `WriteFailure`
pub async fn safe_write_file(
    file_path: &Path,
    content: &[u8],
    backup_dir: Option<&Path>,
) -> Result<Option<PathBuf>> {
    json_file::ensure_parent_dir(file_path).await?;

    let backup = match backup_dir {
        Some(dir) if file_path.exists() => Some(create_temp_backup(file_path, dir).await?),
        _ => None,
    };

    tokio::fs::write(file_path, content)
        .await
        .map_err(|e| SwitcherError::WriteFailure {
            path: file_path.to_path_buf(),
            source: e,
        })?;

    Ok(backup)
}

/// 获取当前 Unix 时间戳（毫秒）
fn unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// 选择一个尚不存在的备份路径
fn unique_backup_path(backup_dir: &Path, file_name: &str, stamp: u128) -> PathBuf {
    let first = backup_dir.join(format!("{}_{}.bak", file_name, stamp));
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| backup_dir.join(format!("{}_{}_{}.bak", file_name, stamp, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// 创建临时备份
async fn create_temp_backup(file_path: &Path, backup_dir: &Path) -> Result<PathBuf> {
    if !backup_dir.exists() {
        tokio::fs::create_dir_all(backup_dir)
            .await
            .map_err(|e| SwitcherError::WriteFailure {
                path: backup_dir.to_path_buf(),
                source: e,
            })?;
    }

    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let backup_path = unique_backup_path(backup_dir, file_name, unix_timestamp_millis());

    tokio::fs::copy(file_path, &backup_path)
        .await
        .map_err(|e| SwitcherError::WriteFailure {
            path: backup_path.clone(),
            source: e,
        })?;

    log::debug!("已备份 {} -> {}", file_path.display(), backup_path.display());
    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_backs_up_existing_file_before_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.json");
        let backups = dir.path().join("backups");
        tokio::fs::write(&target, "old").await.unwrap();

        let backup = safe_write_file(&target, b"new", Some(&backups))
            .await
            .unwrap()
            .expect("backup should be created");

        assert_eq!(tokio::fs::read_to_string(&target).await.unwrap(), "new");
        assert_eq!(tokio::fs::read_to_string(&backup).await.unwrap(), "old");
        assert!(backup.starts_with(&backups));
    }

    #[test]
    fn test_backup_name_gets_suffix_when_taken() {
        let dir = tempfile::tempdir().unwrap();
        let taken = dir.path().join("settings.json_123.bak");
        assert_eq!(unique_backup_path(dir.path(), "settings.json", 123), taken);

        std::fs::write(&taken, "a").unwrap();
        let second = unique_backup_path(dir.path(), "settings.json", 123);
        assert_eq!(second, dir.path().join("settings.json_123_1.bak"));

        std::fs::write(&second, "b").unwrap();
        assert_eq!(
            unique_backup_path(dir.path(), "settings.json", 123),
            dir.path().join("settings.json_123_2.bak")
        );
    }

    #[tokio::test]
    async fn test_rapid_overwrites_keep_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.json");
        let backups = dir.path().join("backups");
        tokio::fs::write(&target, "v0").await.unwrap();

        for i in 1..=5 {
            safe_write_file(&target, format!("v{}", i).as_bytes(), Some(&backups))
                .await
                .unwrap();
        }

        let mut contents = Vec::new();
        let mut entries = tokio::fs::read_dir(&backups).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            contents.push(tokio::fs::read_to_string(entry.path()).await.unwrap());
        }
        contents.sort();
        assert_eq!(contents, vec!["v0", "v1", "v2", "v3", "v4"]);
    }

    #[tokio::test]
    async fn test_no_backup_for_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sub").join("settings.json");
        let backups = dir.path().join("backups");

        let backup = safe_write_file(&target, b"{}", Some(&backups)).await.unwrap();

        assert!(backup.is_none());
        assert!(!backups.exists());
        assert_eq!(tokio::fs::read_to_string(&target).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_backup_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.json");
        tokio::fs::write(&target, "old").await.unwrap();

        let backup = safe_write_file(&target, b"new", None).await.unwrap();
        assert!(backup.is_none());
    }

    #[tokio::test]
    async fn test_write_into_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.json");
        tokio::fs::create_dir(&target).await.unwrap();

        let err = safe_write_file(&target, b"{}", None).await.unwrap_err();
        assert!(matches!(err, SwitcherError::WriteFailure { .. }));
    }
}
