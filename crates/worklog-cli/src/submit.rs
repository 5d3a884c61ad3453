use anyhow::{Result, bail};
use wl_core::{AppError, BatchResult, EntrySource, FailedEntry, HistoryEntry, Lang, WorklogEntry};
use wl_jira::Tracker;
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, fill, tr};
use crate::prompt::PromptSurface;

/// Validates, previews, confirms, and submits one batch.
///
/// One tracker round-trip validates every distinct key before anything is
/// written; a single invalid key aborts the whole batch. Submission is
/// strictly sequential in input order, and one entry's failure never stops
/// the rest. Returns `None` when the user declines at the preview.
pub async fn run_batch(
    entries: Vec<WorklogEntry>,
    tracker: &dyn Tracker,
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<Option<BatchResult>> {
    println!("{}\n", tr(lang, Msg::CheckingTasks));

    let mut keys = Vec::with_capacity(entries.len());
    for entry in &entries {
        match &entry.task {
            Some(task) => keys.push(task.clone()),
            None => bail!("batch reached submission with an unresolved task"),
        }
    }

    let validation = tracker.validate_tasks(&keys).await?;

    if !validation.invalid.is_empty() {
        let joined = validation.invalid.join(", ");
        display::error(&fill(tr(lang, Msg::TasksNotFound), &[("keys", &joined)]));
        return Err(AppError::TasksNotFound(joined).into());
    }

    if !validation.not_assigned.is_empty() {
        let listed = validation
            .not_assigned
            .iter()
            .map(|t| format!("{} ({})", t.key, t.assignee))
            .collect::<Vec<_>>()
            .join(", ");
        display::warning(&fill(tr(lang, Msg::TasksNotAssigned), &[("keys", &listed)]));
    }

    display::preview(&entries, lang);

    if !prompt.confirm(tr(lang, Msg::ConfirmLog), true)? {
        println!("\n{}\n", tr(lang, Msg::Cancelled));
        return Ok(None);
    }

    println!(
        "\n{}\n",
        fill(tr(lang, Msg::LoggingN), &[("n", &entries.len().to_string())])
    );

    let total = entries.len();
    let mut result = BatchResult::default();
    for (i, entry) in entries.into_iter().enumerate() {
        display::progress(i + 1, total, entry.task.as_deref().unwrap_or("???"));
        match tracker.submit_worklog(&entry).await {
            Ok(()) => {
                display::progress_result(true);
                result.success.push(entry);
            }
            Err(err) => {
                display::progress_result(false);
                result.failed.push(FailedEntry {
                    entry,
                    error: err.to_string(),
                });
            }
        }
    }

    display::batch_result(&result, lang);
    Ok(Some(result))
}

/// Records the entries that actually landed. Failed entries are never
/// written; re-running the batch must not duplicate history.
pub fn record_history(store: &mut Store, result: &BatchResult, source: EntrySource) -> Result<()> {
    if result.success.is_empty() {
        return Ok(());
    }
    let records: Vec<HistoryEntry> = result
        .success
        .iter()
        .cloned()
        .map(|entry| HistoryEntry { entry, source })
        .collect();
    store.save_history(&records)?;
    Ok(())
}
