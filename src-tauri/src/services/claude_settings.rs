//! # Claude 配置文件访问器
//!
//! 持有 `~/.claude/settings.json` 的内存副本，负责加载和写回。
//!
//! ## 加载规则
//! - 文件不存在：在内存中合成默认配置（不写盘），并返回 `FileNotFound` 通知调用方
//! - JSON 格式错误：内存副本置空（不保留上一次的旧值），返回 `Deserialization`
//! - 其他读取错误：内存副本置空，返回 `ReadFailure`
//!
//! ## 写回规则
//! 只有加载过（内存副本非空）才能写回，否则返回 `NotLoaded`。
//! 写入成功后重新读取文件，以磁盘上的内容为准。

use std::path::{Path, PathBuf};

use crate::error::{Result, SwitcherError};
use crate::models::settings::ClaudeSettings;
use crate::services::{file_guard, json_file};

pub struct ClaudeSettingsFile {
    path: PathBuf,
    backup_dir: Option<PathBuf>,
    current: Option<ClaudeSettings>,
}

impl ClaudeSettingsFile {
    pub fn new(path: PathBuf, backup_dir: Option<PathBuf>) -> Self {
        Self {
            path,
            backup_dir,
            current: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 当前内存中的配置；未加载或上次加载失败时为 None
    pub fn current(&self) -> Option<&ClaudeSettings> {
        self.current.as_ref()
    }

    /// 用新值整体替换内存副本（不写盘）
    pub fn replace(&mut self, settings: ClaudeSettings) {
        self.current = Some(settings);
    }

    /// 从磁盘加载配置
    pub async fn load(&mut self) -> Result<()> {
        match json_file::read_json::<ClaudeSettings>(&self.path).await {
            Ok(settings) => {
                self.current = Some(settings);
                Ok(())
            }
            Err(e @ SwitcherError::FileNotFound(_)) => {
                log::warn!(
                    "Claude 配置文件不存在，使用默认配置: {}",
                    self.path.display()
                );
                self.current = Some(ClaudeSettings::default());
                Err(e)
            }
            Err(e) => {
                self.current = None;
                Err(e)
            }
        }
    }

    /// 将内存副本写回磁盘，随后重新加载
    ///
    /// # 错误
    /// - 未加载：`NotLoaded`
    /// - 备份或写入失败：`WriteFailure`（内存副本保持不变）
    pub async fn save(&mut self) -> Result<()> {
        let settings = self.current.as_ref().ok_or(SwitcherError::NotLoaded)?;
        let content = json_file::to_sorted_pretty_json(settings)?;

        file_guard::safe_write_file(&self.path, content.as_bytes(), self.backup_dir.as_deref())
            .await?;

        self.load().await
    }

    /// 内存副本的格式化 JSON，供"查看原始配置"使用
    pub fn raw_json(&self) -> Option<String> {
        let settings = self.current.as_ref()?;
        json_file::to_sorted_pretty_json(settings).ok()
    }
}
