//! # 激活配置匹配
//!
//! "激活"不是存储下来的指针，而是每次读取时根据 Claude 配置的当前值重新计算：
//! 接口地址和主模型都与某个配置相同，则该配置处于激活状态。
//! 多个配置相同时按列表顺序取第一个；手动修改过 settings.json 时可能一个都不匹配。

use crate::models::profile::ModelConfig;
use crate::models::settings::ClaudeSettings;

/// 判断单个配置是否与当前 Claude 配置匹配
pub fn is_active(settings: &ClaudeSettings, config: &ModelConfig) -> bool {
    config.matches(settings.base_url(), settings.model_id())
}

/// 查找当前激活的配置（按列表顺序第一个匹配项）
pub fn find_active<'a>(
    settings: &ClaudeSettings,
    configs: &'a [ModelConfig],
) -> Option<&'a ModelConfig> {
    configs.iter().find(|config| is_active(settings, config))
}
