//! # Claude Code 设置数据模型
//!
//! 定义 `~/.claude/settings.json` 的 Rust 结构体（ClaudeSettings、EnvSettings）。
//!
//! 该文件归 Claude Code CLI 所有，本应用只是部分写入者：
//! 只修改 `env` 中与模型相关的几个字段，其余字段（`includeCoAuthoredBy`、
//! 未识别的顶层字段、`env` 中的其他环境变量）原样保留。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::profile::ModelConfig;

/// 文件缺失时合成默认配置使用的主模型
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_HAIKU_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_OPUS_MODEL: &str = "claude-opus-4-5-20251101";

/// Claude Code 设置数据结构
///
/// 设计决策：
/// - 已知字段使用强类型，便于激活和匹配逻辑直接读写
/// - 通过 `#[serde(flatten)]` 将未识别的字段收集到 `extra` 中，
///   保存时原样写回，避免 Claude Code 新版本增加的字段在读取后保存时被丢弃
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ClaudeSettings {
///   env: EnvSettings;
///   includeCoAuthoredBy?: boolean;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeSettings {
    pub env: EnvSettings,

    /// 由 Claude Code 自己管理，本应用从不修改
    ///
    /// 外层 None 表示文件中没有该键，`Some(None)` 表示值为 `null`，写回时原样保留。
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub include_co_authored_by: Option<Option<bool>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `env` 字段：Claude Code 启动时注入的环境变量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EnvSettings {
    /// 配置没有 Token 时不会改动，因此与 `includeCoAuthoredBy` 一样区分缺失和 `null`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub anthropic_auth_token: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_base_url: Option<String>,

    /// 主模型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_default_sonnet_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_default_haiku_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_default_opus_model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_reasoning_model: Option<String>,

    /// 其他环境变量（如代理设置），原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 键存在时（包括值为 `null`）总是得到外层 `Some`，缺失的键由 `default` 处理
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Default for ClaudeSettings {
    /// 文件不存在时合成的默认配置（仅在内存中，不会自动写盘）
    fn default() -> Self {
        Self {
            env: EnvSettings {
                anthropic_auth_token: None,
                anthropic_base_url: None,
                anthropic_model: Some(DEFAULT_MODEL.to_string()),
                anthropic_default_sonnet_model: Some(DEFAULT_MODEL.to_string()),
                anthropic_default_haiku_model: Some(DEFAULT_HAIKU_MODEL.to_string()),
                anthropic_default_opus_model: Some(DEFAULT_OPUS_MODEL.to_string()),
                anthropic_reasoning_model: Some(DEFAULT_MODEL.to_string()),
                extra: Map::new(),
            },
            include_co_authored_by: Some(Some(false)),
            extra: Map::new(),
        }
    }
}

impl ClaudeSettings {
    /// 将主模型、三个角色模型和推理模型统一设置为同一个模型
    pub fn set_all_models(&mut self, model_id: &str) {
        let env = &mut self.env;
        env.anthropic_model = Some(model_id.to_string());
        env.anthropic_default_sonnet_model = Some(model_id.to_string());
        env.anthropic_default_haiku_model = Some(model_id.to_string());
        env.anthropic_default_opus_model = Some(model_id.to_string());
        env.anthropic_reasoning_model = Some(model_id.to_string());
    }

    /// 基于当前设置生成应用了指定配置的新设置
    ///
    /// 五个模型字段总是一起变化；Token 只有在配置中非空时才覆盖。
    pub fn with_config(&self, config: &ModelConfig) -> Self {
        let mut next = self.clone();
        next.set_all_models(&config.model_id);
        next.env.anthropic_base_url = Some(config.base_url.clone());
        if let Some(token) = config.effective_token() {
            next.env.anthropic_auth_token = Some(Some(token.to_string()));
        }
        next
    }

    /// 当前的 Auth Token（缺失或为 `null` 时为 None）
    pub fn auth_token(&self) -> Option<&str> {
        self.env.anthropic_auth_token.as_ref()?.as_deref()
    }

    /// 当前使用的主模型
    pub fn current_model(&self) -> Option<&str> {
        self.env.anthropic_model.as_deref()
    }

    /// 用于激活匹配的接口地址，缺失时视为空字符串
    pub fn base_url(&self) -> &str {
        self.env.anthropic_base_url.as_deref().unwrap_or("")
    }

    /// 用于激活匹配的主模型，缺失时视为空字符串
    pub fn model_id(&self) -> &str {
        self.env.anthropic_model.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_env_keys() {
        let settings: ClaudeSettings = serde_json::from_str(
            r#"{
                "env": {
                    "ANTHROPIC_AUTH_TOKEN": "tok",
                    "ANTHROPIC_BASE_URL": "https://api.example.com",
                    "ANTHROPIC_MODEL": "m0"
                },
                "includeCoAuthoredBy": true
            }"#,
        )
        .unwrap();
        assert_eq!(settings.auth_token(), Some("tok"));
        assert_eq!(settings.base_url(), "https://api.example.com");
        assert_eq!(settings.model_id(), "m0");
        assert_eq!(settings.include_co_authored_by, Some(Some(true)));
        assert!(settings.extra.is_empty());
    }

    #[test]
    fn test_missing_env_is_rejected() {
        let result: Result<ClaudeSettings, _> = serde_json::from_str(r#"{"model":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let text = r#"{
            "env": { "ANTHROPIC_MODEL": "m0", "HTTPS_PROXY": "http://proxy:8080" },
            "permissions": { "allow": ["Bash(ls)"] }
        }"#;
        let settings: ClaudeSettings = serde_json::from_str(text).unwrap();
        assert_eq!(settings.env.extra["HTTPS_PROXY"], "http://proxy:8080");

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["env"]["HTTPS_PROXY"], "http://proxy:8080");
        assert_eq!(value["permissions"]["allow"][0], "Bash(ls)");
        assert!(value.get("includeCoAuthoredBy").is_none());
    }

    #[test]
    fn test_null_values_are_kept_apart_from_missing_keys() {
        let settings: ClaudeSettings = serde_json::from_str(
            r#"{"env":{"ANTHROPIC_AUTH_TOKEN":null},"includeCoAuthoredBy":null}"#,
        )
        .unwrap();
        assert_eq!(settings.include_co_authored_by, Some(None));
        assert_eq!(settings.env.anthropic_auth_token, Some(None));
        assert_eq!(settings.auth_token(), None);

        let value = serde_json::to_value(&settings).unwrap();
        assert!(value["includeCoAuthoredBy"].is_null());
        assert!(value.as_object().unwrap().contains_key("includeCoAuthoredBy"));
        assert!(value["env"].as_object().unwrap().contains_key("ANTHROPIC_AUTH_TOKEN"));

        let missing: ClaudeSettings = serde_json::from_str(r#"{"env":{}}"#).unwrap();
        assert_eq!(missing.include_co_authored_by, None);
        assert_eq!(missing.env.anthropic_auth_token, None);
    }

    #[test]
    fn test_default_settings() {
        let settings = ClaudeSettings::default();
        assert_eq!(settings.current_model(), Some(DEFAULT_MODEL));
        assert_eq!(
            settings.env.anthropic_default_haiku_model.as_deref(),
            Some(DEFAULT_HAIKU_MODEL)
        );
        assert_eq!(settings.base_url(), "");
        assert_eq!(settings.include_co_authored_by, Some(Some(false)));
    }

    #[test]
    fn test_with_config_moves_all_model_fields() {
        let config = ModelConfig::new("A", "P", "m1", "https://x", None);
        let next = ClaudeSettings::default().with_config(&config);
        let env = &next.env;
        for field in [
            &env.anthropic_model,
            &env.anthropic_default_sonnet_model,
            &env.anthropic_default_haiku_model,
            &env.anthropic_default_opus_model,
            &env.anthropic_reasoning_model,
        ] {
            assert_eq!(field.as_deref(), Some("m1"));
        }
        assert_eq!(env.anthropic_base_url.as_deref(), Some("https://x"));
    }

    #[test]
    fn test_with_config_token_rules() {
        let mut current = ClaudeSettings::default();
        current.env.anthropic_auth_token = Some(Some("old".to_string()));

        let no_token = ModelConfig::new("A", "P", "m1", "https://x", None);
        assert_eq!(
            current.with_config(&no_token).auth_token(),
            Some("old")
        );

        let empty_token = ModelConfig::new("A", "P", "m1", "https://x", Some(String::new()));
        assert_eq!(
            current.with_config(&empty_token).auth_token(),
            Some("old")
        );

        let new_token = ModelConfig::new("A", "P", "m1", "https://x", Some("new".to_string()));
        assert_eq!(
            current.with_config(&new_token).auth_token(),
            Some("new")
        );
    }
}
