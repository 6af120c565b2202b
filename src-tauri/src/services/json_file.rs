//! # JSON 文件读写服务
//!
//! 两个配置文件共用的读写逻辑：
//! - 读取：区分"文件不存在"、"读取失败"和"JSON 解析失败"三种情况，交给调用方决定如何恢复
//! - 写入：2 空格缩进 + 键按字典序排序，保证多次写入的输出稳定、便于 diff
//!
//! 写入始终是整文件覆盖，不做追加。

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Result, SwitcherError};

/// 读取并解析 JSON 文件
///
/// # 错误
/// - 文件不存在：`FileNotFound`
/// - 文件存在但无法读取：`ReadFailure`
/// - 内容不是合法 JSON 或与结构不匹配：`Deserialization`
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SwitcherError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(SwitcherError::ReadFailure {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_str(&content).map_err(|e| SwitcherError::Deserialization {
        path: path.to_path_buf(),
        source: e,
    })
}

/// 将值序列化为缩进格式的 JSON，所有层级的对象键按字典序排列
pub fn to_sorted_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let value = sort_keys(serde_json::to_value(value)?);
    Ok(serde_json::to_string_pretty(&value)?)
}

/// 递归重建对象，按键排序后插入
///
/// 不依赖 `serde_json::Map` 的底层实现：即使依赖树中某个 crate 开启了
/// `preserve_order`，输出依然是排序后的顺序。
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// 确保文件所在目录存在，递归创建所有缺失的父目录
pub async fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| SwitcherError::WriteFailure {
            path: parent.to_path_buf(),
            source: e,
        })
}

/// 将值以格式化 JSON 整体写入文件，必要时创建父目录
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = to_sorted_pretty_json(value)?;
    ensure_parent_dir(path).await?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| SwitcherError::WriteFailure {
            path: path.to_path_buf(),
            source: e,
        })
}
