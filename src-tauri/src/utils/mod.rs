//! # 通用工具模块
//!
//! - `path` - 配置文件路径解析

pub mod path;
