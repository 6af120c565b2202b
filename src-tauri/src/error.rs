//! # 错误类型
//!
//! 整个应用共用的错误枚举。所有错误都不会导致进程退出：
//! - `FileNotFound` / `Deserialization` 属于可恢复的警告，调用方用默认值或空值替代后继续运行
//! - `NotLoaded` 表示调用顺序错误（未加载就保存或激活），只影响本次调用
//! - `WriteFailure` 表示磁盘或权限问题，内存状态保留，不会自动重试

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SwitcherError {
    #[error("配置文件不存在: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("解析配置文件失败 {}: {source}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Claude 配置文件未加载")]
    NotLoaded,

    #[error("写入配置文件失败 {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("读取配置文件失败 {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("序列化配置失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 原始 JSON 编辑器提交的内容无法解析
    #[error("JSON 格式错误: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),

    #[error("配置 ID 已存在: {0}")]
    DuplicateId(Uuid),

    #[error("配置不存在: {0}")]
    ProfileNotFound(Uuid),

    #[error("无法获取用户主目录")]
    HomeDirUnavailable,
}

impl SwitcherError {
    /// 是否为加载阶段可恢复的警告（缺失文件或格式错误）
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SwitcherError::FileNotFound(_) | SwitcherError::Deserialization { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SwitcherError>;

// Tauri command 的错误需要可序列化，前端只关心可读的错误信息
impl serde::Serialize for SwitcherError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_classification() {
        assert!(SwitcherError::FileNotFound(PathBuf::from("/tmp/x")).is_warning());
        assert!(!SwitcherError::NotLoaded.is_warning());
        assert!(!SwitcherError::MissingField("name").is_warning());
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&SwitcherError::NotLoaded).unwrap();
        assert_eq!(json, "\"Claude 配置文件未加载\"");
    }
}
