//! # 显示层数据模型
//!
//! 前端渲染所需的只读视图，由 `SettingsService` 按需生成，不做缓存：
//! 激活状态每次读取时重新计算，避免与磁盘状态不一致。

use serde::Serialize;
use uuid::Uuid;

use crate::models::profile::ModelConfig;

/// 配置列表中的一行：配置本身 + 是否为当前激活的配置
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigListItem {
    #[serde(flatten)]
    pub config: ModelConfig,
    pub is_active: bool,
}

/// 设置总览：设置页面和菜单栏需要的全部状态
///
/// `last_error` 非空时前端显示错误提示，但其余字段仍然可以正常渲染。
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverview {
    pub claude_settings_path: String,
    pub app_settings_path: String,
    /// 当前主模型；Claude 配置未加载或未设置时为 None
    pub current_model: Option<String>,
    pub active_config_id: Option<Uuid>,
    /// `~/.claude/settings.json` 的格式化 JSON（未加载时为 None）
    pub claude_raw_json: Option<String>,
    pub app_raw_json: String,
    pub last_error: Option<String>,
}
