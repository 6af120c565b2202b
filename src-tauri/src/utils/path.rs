//! # 路径工具函数
//!
//! 提供与文件路径相关的工具函数，包括：
//! - 获取 Claude Code 数据目录路径（`~/.claude/`）
//! - 获取本应用自身配置目录路径（`~/.claude-model-switcher/`）
//! - 汇总两份配置文件和备份目录路径的 `SettingsPaths`

use std::path::{Path, PathBuf};

use crate::error::{Result, SwitcherError};

/// Claude Code 数据目录名
const CLAUDE_DIR: &str = ".claude";

/// 本应用配置目录名
const SWITCHER_DIR: &str = ".claude-model-switcher";

/// 两个目录下使用同一个文件名
const SETTINGS_FILE: &str = "settings.json";

/// 临时备份目录名（位于系统 TEMP 目录下）
const BACKUP_DIR: &str = "claude-model-switcher-backups";

/// 获取 Claude Code 数据目录的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回 `HomeDirUnavailable`。
///
/// # 示例
/// - Windows: `C:\Users\username\.claude`
/// - Linux/macOS: `/home/username/.claude`
pub fn get_claude_data_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(SwitcherError::HomeDirUnavailable)?;
    Ok(home.join(CLAUDE_DIR))
}

/// 获取本应用配置目录的绝对路径（`~/.claude-model-switcher/`）
///
/// 与 Claude Code 原生数据分离，避免对 Claude Code 的目录造成意外污染。
pub fn get_switcher_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(SwitcherError::HomeDirUnavailable)?;
    Ok(home.join(SWITCHER_DIR))
}

/// 应用用到的所有文件位置
///
/// 由调用方显式构造后传入 `SettingsService`，测试时可以指向临时目录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    /// `~/.claude/settings.json`
    pub claude_settings: PathBuf,
    /// `~/.claude-model-switcher/settings.json`
    pub app_settings: PathBuf,
    /// 覆盖 Claude 配置前的备份目录；为 None 时不做备份
    pub backup_dir: Option<PathBuf>,
}

impl SettingsPaths {
    /// 基于当前用户主目录的默认路径，备份放在系统 TEMP 目录
    pub fn from_home() -> Result<Self> {
        Ok(Self {
            claude_settings: get_claude_data_path()?.join(SETTINGS_FILE),
            app_settings: get_switcher_config_path()?.join(SETTINGS_FILE),
            backup_dir: Some(std::env::temp_dir().join(BACKUP_DIR)),
        })
    }

    /// 以任意目录作为"主目录"，备份目录也放在其下
    pub fn in_dir(root: &Path) -> Self {
        Self {
            claude_settings: root.join(CLAUDE_DIR).join(SETTINGS_FILE),
            app_settings: root.join(SWITCHER_DIR).join(SETTINGS_FILE),
            backup_dir: Some(root.join(BACKUP_DIR)),
        }
    }

    pub fn without_backups(mut self) -> Self {
        self.backup_dir = None;
        self
    }
}
