//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! - `configs` - 模型配置的管理、激活和设置文件查看

pub mod configs;
