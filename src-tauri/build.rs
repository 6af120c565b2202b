//! # Claude Model Switcher - Cargo 构建脚本
//!
//! 仅在启用 `desktop` feature 时调用 `tauri_build::build()`，
//! 生成 Tauri 运行时所需的资源绑定代码（图标、权限清单、Windows 资源文件等）。
//! 默认构建只包含配置引擎库，不需要任何 Tauri 构建步骤。

fn main() {
  #[cfg(feature = "desktop")]
  tauri_build::build();
}
