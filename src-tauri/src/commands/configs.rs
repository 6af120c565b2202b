//! # 模型配置 Tauri Commands
//!
//! 前端与 `SettingsService` 之间的 IPC 接口：
//! - `list_configs` / `get_overview` - 读取配置列表（含激活状态）和设置总览
//! - `add_config` / `update_config` / `delete_config` - 表单方式管理配置
//! - `get_config_json` / `add_config_json` / `update_config_json` - 原始 JSON 编辑方式管理配置
//! - `activate_config` - 切换到指定配置
//! - `reload_settings` - 从磁盘重新加载两份配置
//! - `reveal_claude_settings` / `reveal_app_settings` - 在文件管理器中定位配置文件
//!
//! 确认对话框、成功/失败提示都由前端负责。

use tauri::{AppHandle, State};
use tauri_plugin_opener::OpenerExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::SwitcherError;
use crate::models::display::{ConfigListItem, SettingsOverview};
use crate::models::profile::ModelConfig;
use crate::services::settings_service::SettingsService;

/// 获取配置列表，每行附带是否为当前激活配置
#[tauri::command]
pub async fn list_configs(
    service: State<'_, Mutex<SettingsService>>,
) -> Result<Vec<ConfigListItem>, SwitcherError> {
    Ok(service.lock().await.config_items())
}

/// 获取设置总览（文件路径、当前模型、原始 JSON、最近一次错误）
#[tauri::command]
pub async fn get_overview(
    service: State<'_, Mutex<SettingsService>>,
) -> Result<SettingsOverview, SwitcherError> {
    Ok(service.lock().await.overview())
}

#[tauri::command]
pub async fn add_config(
    config: ModelConfig,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.add_config(config).await
}

/// 从原始 JSON 文本添加配置
#[tauri::command]
pub async fn add_config_json(
    json: String,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.add_config_from_json(&json).await
}

#[tauri::command]
pub async fn update_config(
    config: ModelConfig,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.update_config(config).await
}

/// 获取单个配置的格式化 JSON，作为原始 JSON 编辑器的初始内容
#[tauri::command]
pub async fn get_config_json(
    id: Uuid,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<String, SwitcherError> {
    service.lock().await.config_json(id)
}

/// 通过原始 JSON 编辑配置，`id` 始终以参数为准
#[tauri::command]
pub async fn update_config_json(
    id: Uuid,
    json: String,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.update_config_from_json(id, &json).await
}

#[tauri::command]
pub async fn delete_config(
    id: Uuid,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.delete_config(id).await
}

/// 切换到指定配置
///
/// 成功后服务会广播 `ActivationChanged`，由 `lib.rs` 中的转发任务作为
/// `settings-event` 事件推送给前端。
#[tauri::command]
pub async fn activate_config(
    id: Uuid,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), SwitcherError> {
    service.lock().await.activate_config_by_id(id).await
}

/// 从磁盘重新加载，返回加载过程中遇到的问题描述
#[tauri::command]
pub async fn reload_settings(
    service: State<'_, Mutex<SettingsService>>,
) -> Result<Vec<String>, SwitcherError> {
    let warnings = service.lock().await.reload().await;
    Ok(warnings.iter().map(ToString::to_string).collect())
}

/// 在系统文件管理器中定位 `~/.claude/settings.json`
#[tauri::command]
pub async fn reveal_claude_settings(
    app: AppHandle,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), String> {
    let path = service.lock().await.overview().claude_settings_path;
    app.opener()
        .reveal_item_in_dir(path)
        .map_err(|e| format!("打开文件管理器失败: {}", e))
}

/// 在系统文件管理器中定位应用配置文件
#[tauri::command]
pub async fn reveal_app_settings(
    app: AppHandle,
    service: State<'_, Mutex<SettingsService>>,
) -> Result<(), String> {
    let path = service.lock().await.overview().app_settings_path;
    app.opener()
        .reveal_item_in_dir(path)
        .map_err(|e| format!("打开文件管理器失败: {}", e))
}
