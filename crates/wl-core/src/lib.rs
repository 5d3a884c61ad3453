pub mod error;
pub mod types;

pub use error::AppError;
pub use types::{
    AiProvider, Alias, BatchResult, Config, EntrySource, FailedEntry, HistoryEntry, Lang,
    NotAssigned, ParseContext, Template, TrackedIssue, ValidationResult, WorklogEntry,
    is_task_key,
};
