//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `json_file` - JSON 文件读写（缩进 + 键排序）
//! - `file_guard` - 文件写入守卫：覆盖 Claude 配置前的临时备份
//! - `config_store` - 应用配置（模型配置列表）的存储
//! - `claude_settings` - `~/.claude/settings.json` 的访问器
//! - `matcher` - 激活配置匹配
//! - `settings_service` - 协调以上组件的配置切换服务

pub mod claude_settings;
pub mod config_store;
pub mod file_guard;
pub mod json_file;
pub mod matcher;
pub mod settings_service;
