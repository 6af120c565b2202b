//! # Claude Model Switcher - Tauri 桌面应用原生入口点
//!
//! `main.rs` 仅负责启动应用，核心逻辑位于 `lib.rs` 中。
//! 只在启用 `desktop` feature 时构建（见 Cargo.toml 中的 `required-features`）。

// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
  app_lib::run();
}
