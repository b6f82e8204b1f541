//! taskmgr library - task store, file formats and the interactive menu

pub mod cli;
pub mod config;
pub mod menu;
pub mod task;
