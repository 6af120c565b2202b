//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize`，用于 Tauri IPC 传输和 JSON 文件读写。
//! - `profile` - 模型配置和应用配置容器
//! - `settings` - Claude Code 的 settings.json
//! - `display` - 前端列表和总览视图

pub mod display;
pub mod profile;
pub mod settings;
