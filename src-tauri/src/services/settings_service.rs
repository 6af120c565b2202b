//! # 配置切换服务
//!
//! 协调应用配置存储（`ConfigStore`）和 Claude 配置文件（`ClaudeSettingsFile`）：
//! - 加载 / 重新加载两份配置文件
//! - 配置的增删改（每次修改后整体写回）
//! - 计算当前激活的配置
//! - 激活配置：改写 `~/.claude/settings.json` 并发出 `SettingsEvent::ActivationChanged`
//!
//! ## 所有权
//! 服务由调用方显式构造并持有（桌面端放在 Tauri managed state 中），
//! 两份配置各自只有一个内存副本，只通过本服务整体替换，不存在共享的局部修改。
//!
//! ## 失败语义
//! 所有 I/O 只尝试一次。写入失败不会回滚内存状态，调用方需要时可以调用 `reload()`
//! 从磁盘恢复一致的视图。最近一次错误记录在 `last_error` 中，供前端显示错误提示；
//! 之后任何一次写盘成功都会清除它。

use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::error::{Result, SwitcherError};
use crate::models::display::{ConfigListItem, SettingsOverview};
use crate::models::profile::{AppSettings, ModelConfig};
use crate::models::settings::ClaudeSettings;
use crate::services::claude_settings::ClaudeSettingsFile;
use crate::services::config_store::ConfigStore;
use crate::services::{json_file, matcher};
use crate::utils::path::SettingsPaths;

/// 事件通道容量：事件只由用户的离散操作触发，少量缓冲即可
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// 服务对外广播的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SettingsEvent {
    /// 激活配置已成功写入 Claude 配置文件
    ActivationChanged {
        #[serde(rename = "configId")]
        config_id: Uuid,
    },
}

pub struct SettingsService {
    store: ConfigStore,
    app_settings: AppSettings,
    claude: ClaudeSettingsFile,
    last_error: Option<String>,
    events: broadcast::Sender<SettingsEvent>,
}

impl SettingsService {
    /// 创建服务实例，此时两份配置都尚未加载
    pub fn new(paths: SettingsPaths) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: ConfigStore::new(paths.app_settings),
            app_settings: AppSettings::default(),
            claude: ClaudeSettingsFile::new(paths.claude_settings, paths.backup_dir),
            last_error: None,
            events,
        }
    }

    /// 创建服务并立即加载两份配置；加载失败不会阻止启动
    pub async fn load(paths: SettingsPaths) -> Self {
        let mut service = Self::new(paths);
        let warnings = service.reload().await;
        if !warnings.is_empty() {
            log::warn!("启动时加载配置出现 {} 个问题", warnings.len());
        }
        service
    }

    /// 订阅服务事件
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.events.subscribe()
    }

    // ======== 加载 ========

    /// 重新加载两份配置文件
    ///
    /// # 返回值
    /// 加载过程中遇到的全部问题（均已在内部恢复，服务仍可正常使用）
    pub async fn reload(&mut self) -> Vec<SwitcherError> {
        self.last_error = None;
        let mut warnings = Vec::new();
        if let Err(e) = self.load_claude_settings().await {
            warnings.push(e);
        }
        if let Err(e) = self.load_app_settings().await {
            warnings.push(e);
        }
        warnings
    }

    /// 加载 Claude 配置文件
    ///
    /// 文件不存在时合成默认配置并返回 `FileNotFound`；格式错误时内存副本置空。
    pub async fn load_claude_settings(&mut self) -> Result<()> {
        let result = self.claude.load().await;
        match &result {
            Ok(()) => log::info!("已加载 Claude 配置: {}", self.claude.path().display()),
            // 缺失文件只是提示信息，不显示为错误
            Err(SwitcherError::FileNotFound(_)) => {}
            Err(e) => self.record(e),
        }
        result
    }

    /// 加载应用配置；解析失败时回退为空列表
    pub async fn load_app_settings(&mut self) -> Result<()> {
        match self.store.load().await {
            Ok(settings) => {
                log::info!("已加载 {} 个模型配置", settings.configs.len());
                self.app_settings = settings;
                Ok(())
            }
            Err(e) => {
                self.app_settings = AppSettings::default();
                self.record(&e);
                Err(e)
            }
        }
    }

    // ======== 读取 ========

    /// 全部模型配置，按展示顺序
    pub fn configs(&self) -> &[ModelConfig] {
        &self.app_settings.configs
    }

    /// 按 ID 获取配置
    pub fn config(&self, id: Uuid) -> Option<&ModelConfig> {
        self.app_settings.find(id)
    }

    /// Claude 配置的内存副本；未加载或格式错误时为 None
    pub fn claude_settings(&self) -> Option<&ClaudeSettings> {
        self.claude.current()
    }

    /// 判断配置是否当前激活；Claude 配置未加载时总是 false
    pub fn is_config_active(&self, config: &ModelConfig) -> bool {
        self.claude
            .current()
            .is_some_and(|settings| matcher::is_active(settings, config))
    }

    /// 获取当前激活的配置
    pub fn active_config(&self) -> Option<&ModelConfig> {
        let settings = self.claude.current()?;
        matcher::find_active(settings, &self.app_settings.configs)
    }

    /// 配置列表，每行附带激活状态
    pub fn config_items(&self) -> Vec<ConfigListItem> {
        self.app_settings
            .configs
            .iter()
            .map(|config| ConfigListItem {
                config: config.clone(),
                is_active: self.is_config_active(config),
            })
            .collect()
    }

    pub fn overview(&self) -> SettingsOverview {
        SettingsOverview {
            claude_settings_path: self.claude.path().to_string_lossy().to_string(),
            app_settings_path: self.store.path().to_string_lossy().to_string(),
            current_model: self
                .claude
                .current()
                .and_then(|settings| settings.current_model())
                .map(str::to_string),
            active_config_id: self.active_config().map(|config| config.id),
            claude_raw_json: self.claude.raw_json(),
            app_raw_json: self.app_raw_json().unwrap_or_default(),
            last_error: self.last_error.clone(),
        }
    }

    /// 应用配置的格式化 JSON
    pub fn app_raw_json(&self) -> Result<String> {
        json_file::to_sorted_pretty_json(&self.app_settings)
    }

    /// 单个配置的格式化 JSON，供原始 JSON 编辑器使用
    pub fn config_json(&self, id: Uuid) -> Result<String> {
        self.app_settings
            .find(id)
            .ok_or(SwitcherError::ProfileNotFound(id))?
            .to_pretty_json()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ======== 配置管理 ========

    /// 添加配置并写回
    ///
    /// # 错误
    /// 必填字段缺失、ID 重复或写入失败。写入失败时新配置仍保留在内存中。
    pub async fn add_config(&mut self, config: ModelConfig) -> Result<()> {
        config.validate()?;
        if self.app_settings.find(config.id).is_some() {
            return Err(SwitcherError::DuplicateId(config.id));
        }
        log::info!("添加配置: {} ({})", config.name, config.id);
        self.app_settings.configs.push(config);
        self.persist().await
    }

    /// 从原始 JSON 添加配置
    pub async fn add_config_from_json(&mut self, json: &str) -> Result<()> {
        let config = ModelConfig::from_json(json, None)?;
        self.add_config(config).await
    }

    /// 按 ID 整体替换配置（ID 不变），刷新更新时间并写回
    pub async fn update_config(&mut self, mut config: ModelConfig) -> Result<()> {
        config.validate()?;
        let index = self
            .app_settings
            .position(config.id)
            .ok_or(SwitcherError::ProfileNotFound(config.id))?;
        config.updated_at = Utc::now();
        log::info!("更新配置: {} ({})", config.name, config.id);
        self.app_settings.configs[index] = config;
        self.persist().await
    }

    /// 通过原始 JSON 编辑配置
    ///
    /// JSON 中的 `id` 会被忽略，始终保留原配置的 `id`。
    pub async fn update_config_from_json(&mut self, id: Uuid, json: &str) -> Result<()> {
        let existing = self
            .app_settings
            .find(id)
            .ok_or(SwitcherError::ProfileNotFound(id))?;
        let config = ModelConfig::from_json(json, Some(existing))?;
        self.update_config(config).await
    }

    /// 删除配置并写回
    pub async fn delete_config(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .app_settings
            .position(id)
            .ok_or(SwitcherError::ProfileNotFound(id))?;
        let removed = self.app_settings.configs.remove(index);
        log::info!("删除配置: {} ({})", removed.name, removed.id);
        self.persist().await
    }

    async fn persist(&mut self) -> Result<()> {
        if let Err(e) = self.store.save(&self.app_settings).await {
            self.record(&e);
            return Err(e);
        }
        self.last_error = None;
        Ok(())
    }

    // ======== 激活 ========

    /// 激活配置：改写 Claude 配置文件中的接口地址、五个模型字段和 Token
    ///
    /// 内存副本在写盘前就会被替换；写盘失败时不回滚，调用方需要 `reload()` 恢复。
    /// 写盘成功后广播 `ActivationChanged`。
    ///
    /// # 错误
    /// - Claude 配置未加载：`NotLoaded`（不会隐式加载）
    /// - 备份或写入失败：`WriteFailure`
    pub async fn activate_config(&mut self, config: &ModelConfig) -> Result<()> {
        let Some(current) = self.claude.current() else {
            let e = SwitcherError::NotLoaded;
            self.record(&e);
            return Err(e);
        };

        let next = current.with_config(config);
        self.claude.replace(next);

        if let Err(e) = self.claude.save().await {
            self.record(&e);
            return Err(e);
        }

        log::info!("已切换到配置: {} ({})", config.name, config.model_id);
        self.last_error = None;
        // 没有订阅者时发送会失败，忽略即可
        let _ = self.events.send(SettingsEvent::ActivationChanged {
            config_id: config.id,
        });
        Ok(())
    }

    /// 按 ID 激活配置
    pub async fn activate_config_by_id(&mut self, id: Uuid) -> Result<()> {
        let config = self
            .app_settings
            .find(id)
            .cloned()
            .ok_or(SwitcherError::ProfileNotFound(id))?;
        self.activate_config(&config).await
    }

    fn record(&mut self, e: &SwitcherError) {
        if e.is_warning() {
            log::warn!("{}", e);
        } else {
            log::error!("{}", e);
        }
        self.last_error = Some(e.to_string());
    }
}
