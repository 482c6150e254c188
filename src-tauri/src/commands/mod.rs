//! Tauri IPC Commands
//!
//! Thin wrappers over the bridge command surface. Every command answers
//! with `{ success, data, error }` where `error` carries a stable `code`.

pub mod bridge;
pub mod diagnostics;
pub mod manifest;
pub mod offline;
