//! # Claude Model Switcher - 配置引擎与 Tauri 应用初始化
//!
//! 维护一组命名的模型配置（供应商、模型 ID、接口地址、Token），
//! 并通过改写 `~/.claude/settings.json` 把其中一个应用到 Claude Code。
//!
//! ## 模块结构
//! - `models/` - 数据模型（对应前端 TypeScript 类型）
//! - `services/` - 核心业务逻辑（配置读写、激活匹配、切换）
//! - `utils/` - 通用工具函数（路径解析）
//! - `commands/` - Tauri command 处理函数（IPC 接口层，仅 `desktop` feature）
//!
//! 默认构建只包含配置引擎；启用 `desktop` feature 后 `run()` 启动 Tauri 桌面外壳。

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Result, SwitcherError};
pub use services::settings_service::{SettingsEvent, SettingsService};
pub use utils::path::SettingsPaths;

#[cfg(feature = "desktop")]
use tauri::{Emitter, Manager};

/// 推送给前端的服务事件名
#[cfg(feature = "desktop")]
const SETTINGS_EVENT: &str = "settings-event";

// 当目标平台为移动端时，将 `run()` 标记为 Tauri 移动端入口点；
// 桌面端由 `main.rs` 直接调用。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册插件（对话框、文件管理器定位；调试模式下注册日志）
/// 2. 在 `setup` 钩子中构造并加载 `SettingsService`，放入 managed state
/// 3. 启动事件转发任务：服务广播的 `SettingsEvent` 作为 `settings-event` 推送给前端
/// 4. 注册所有 Tauri commands 并启动事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    use tokio::sync::Mutex;
    use tokio::sync::broadcast::error::RecvError;

    tauri::Builder::default()
        // 对话框插件：删除配置前的确认框由前端通过此插件弹出
        .plugin(tauri_plugin_dialog::init())
        // Opener 插件：在系统文件管理器中定位配置文件
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            commands::configs::list_configs,
            commands::configs::get_overview,
            commands::configs::add_config,
            commands::configs::get_config_json,
            commands::configs::add_config_json,
            commands::configs::update_config,
            commands::configs::update_config_json,
            commands::configs::delete_config,
            commands::configs::activate_config,
            commands::configs::reload_settings,
            commands::configs::reveal_claude_settings,
            commands::configs::reveal_app_settings,
        ])
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let paths = SettingsPaths::from_home()?;
            let service = tauri::async_runtime::block_on(SettingsService::load(paths));

            let mut events = service.subscribe();
            let handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if let Err(e) = handle.emit(SETTINGS_EVENT, &event) {
                                log::warn!("推送设置事件失败: {}", e);
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("设置事件积压，丢弃 {} 条", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });

            app.manage(Mutex::new(service));
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
