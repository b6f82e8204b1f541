//! Task management module
//!
//! - In-memory store keyed by numeric ID (add, edit, delete, list, filter, sort)
//! - CSV, line-text and JSON encodings
//! - Data file persistence and one-shot export/import

pub mod error;
pub mod format;
pub mod model;
pub mod storage;
pub mod store;

pub use error::{FormatError, StorageError, TaskError};
pub use format::{Format, ImportReport, SkippedRecord};
pub use model::{normalize_case, Task, TaskEdit, TaskId, TaskPriority, TaskStatus};
pub use storage::{Storage, DEFAULT_DATA_FILE};
pub use store::{SortKey, TaskStore};
