//! # 模型配置数据模型
//!
//! 定义用户维护的模型配置（ModelConfig）及其持久化容器（AppSettings）。
//! 存储在本应用自身的配置目录中（`~/.claude-model-switcher/settings.json`）。
//!
//! 对应前端 TypeScript 中的 `ModelConfig`、`AppSettings` 接口。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, SwitcherError};
use crate::services::json_file;

/// 模型配置数据结构
///
/// 一组命名的供应商 / 模型 / 接口地址 / Token 组合。激活时这些值会被写入
/// `~/.claude/settings.json` 的 `env` 字段中。
///
/// 从 JSON 解码时（前端提交或原始 JSON 编辑器），缺失的 `id`、时间戳、
/// `provider`、`authToken` 会被自动补全，因此前端新建配置时可以只提交必填字段。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ModelConfig {
///   id: string;
///   name: string;
///   provider: string;
///   modelId: string;
///   baseUrl: string;
///   authToken?: string;
///   createdAt: string;
///   updatedAt: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// 唯一标识符：创建时分配，之后任何编辑都不会改变
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// 配置名称：用户自定义，允许重复
    pub name: String,

    /// 供应商名称（如 "Anthropic"、"OpenRouter"），仅用于展示
    #[serde(default)]
    pub provider: String,

    /// 模型 ID：激活时写入主模型、三个角色模型和推理模型字段
    pub model_id: String,

    /// API 调用地址：激活时写入 `ANTHROPIC_BASE_URL`
    pub base_url: String,

    /// Auth Token：为空或缺失时激活不会覆盖已有 Token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// 每次更新时刷新
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl ModelConfig {
    /// 创建新的配置，分配新的 ID，创建时间和更新时间均为当前时间
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        model_id: impl Into<String>,
        base_url: impl Into<String>,
        auth_token: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            provider: provider.into(),
            model_id: model_id.into(),
            base_url: base_url.into(),
            auth_token,
            created_at: now,
            updated_at: now,
        }
    }

    /// 判断是否与给定的 baseUrl 和 modelId 匹配
    pub fn matches(&self, base_url: &str, model_id: &str) -> bool {
        self.base_url == base_url && self.model_id == model_id
    }

    /// 激活时实际生效的 Token：空字符串与缺失同等对待
    pub fn effective_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|token| !token.is_empty())
    }

    /// 检查必填字段（名称、模型 ID、接口地址）
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SwitcherError::MissingField("name"));
        }
        if self.model_id.trim().is_empty() {
            return Err(SwitcherError::MissingField("modelId"));
        }
        if self.base_url.trim().is_empty() {
            return Err(SwitcherError::MissingField("baseUrl"));
        }
        Ok(())
    }

    /// 从原始 JSON 文本解析配置
    ///
    /// 编辑已有配置时传入 `existing`，解析结果的 `id` 会被强制还原为原配置的 `id`，
    /// 即使 JSON 中写了别的 `id`；JSON 中没有 `createdAt` 时沿用原配置的创建时间。
    ///
    /// # 错误
    /// JSON 格式错误或缺少必需字段时返回 `InvalidJson`
    pub fn from_json(text: &str, existing: Option<&ModelConfig>) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(SwitcherError::InvalidJson)?;
        let has_created_at = value.get("createdAt").is_some();
        let mut decoded: ModelConfig =
            serde_json::from_value(value).map_err(SwitcherError::InvalidJson)?;
        if let Some(existing) = existing {
            decoded.id = existing.id;
            if !has_created_at {
                decoded.created_at = existing.created_at;
            }
        }
        Ok(decoded)
    }

    /// 序列化为供原始 JSON 编辑器展示的文本（缩进 + 键排序）
    pub fn to_pretty_json(&self) -> Result<String> {
        json_file::to_sorted_pretty_json(self)
    }
}

/// 应用配置：所有模型配置的顶层容器
///
/// 列表顺序即展示顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub configs: Vec<ModelConfig>,
}

impl AppSettings {
    /// 按 ID 查找配置
    pub fn find(&self, id: Uuid) -> Option<&ModelConfig> {
        self.configs.iter().find(|config| config.id == id)
    }

    /// 配置在列表中的位置
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.configs.iter().position(|config| config.id == id)
    }
}
