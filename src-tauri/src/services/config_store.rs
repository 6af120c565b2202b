//! # 应用配置存储
//!
//! 负责 `~/.claude-model-switcher/settings.json` 的读写。
//! 每次修改后整体写回完整列表，不做追加或批量合并。

use std::path::{Path, PathBuf};

use crate::error::{Result, SwitcherError};
use crate::models::profile::AppSettings;
use crate::services::json_file;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// 使用给定的文件路径创建存储，此时不读取文件
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 应用配置文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取所有配置
    ///
    /// 文件不存在（首次使用）时返回空配置，不视为错误。
    ///
    /// # 错误
    /// 文件存在但无法读取或 JSON 解析失败时返回错误，由调用方决定是否回退为空列表
    pub async fn load(&self) -> Result<AppSettings> {
        match json_file::read_json(&self.path).await {
            Ok(settings) => Ok(settings),
            Err(SwitcherError::FileNotFound(_)) => Ok(AppSettings::default()),
            Err(e) => Err(e),
        }
    }

    /// 整体写回所有配置（缩进 + 键排序），必要时创建目录
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        json_file::write_json(&self.path, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ModelConfig;

    fn store_in(dir: &Path) -> ConfigStore {
        ConfigStore::new(dir.join(".claude-model-switcher").join("settings.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(dir.path()).load().await.unwrap();
        assert!(settings.configs.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let settings = AppSettings {
            configs: vec![
                ModelConfig::new("A", "Anthropic", "m1", "https://x", None),
                ModelConfig::new("B", "OpenRouter", "m2", "https://y", Some("tok".into())),
                ModelConfig::new("A", "", "m1", "https://x", Some(String::new())),
            ],
        };

        store.save(&settings).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_file_layout_is_sorted_and_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let settings = AppSettings {
            configs: vec![ModelConfig::new("A", "P", "m1", "https://x", None)],
        };
        store.save(&settings).await.unwrap();

        let content = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(content.starts_with("{\n  \"configs\": ["));
        let keys = ["baseUrl", "createdAt", "id", "modelId", "name", "provider", "updatedAt"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| content.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        json_file::ensure_parent_dir(store.path()).await.unwrap();
        tokio::fs::write(store.path(), "[1, 2").await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SwitcherError::Deserialization { .. }));
    }
}
