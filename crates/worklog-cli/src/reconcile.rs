use std::collections::HashMap;

use wl_core::{Alias, Lang, WorklogEntry, is_task_key};

use crate::i18n::{Msg, fill, tr};
use crate::prompt::{PromptError, PromptSurface};

/// How many recent tasks to offer before the alias choices.
const RECENT_CHOICES: usize = 5;

/// Aliases the user asked to persist, as (keyword, task) pairs. Saving is
/// the caller's job; the loop stays storage-free and testable.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub new_aliases: Vec<(String, String)>,
}

/// Fills missing task keys interactively, in original entry order.
///
/// Resolutions are cached by exact activity text for the duration of one
/// run: N identical unresolved activities cost one human decision, not N.
pub fn resolve_missing_tasks(
    entries: &mut [WorklogEntry],
    aliases: &[Alias],
    recent: &[String],
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<ReconcileOutcome, PromptError> {
    let mut resolved: HashMap<String, String> = HashMap::new();
    let mut outcome = ReconcileOutcome::default();
    let recent = &recent[..recent.len().min(RECENT_CHOICES)];

    for entry in entries.iter_mut() {
        if entry.task.is_some() {
            continue;
        }

        if let Some(task) = resolved.get(&entry.activity) {
            entry.task = Some(task.clone());
            continue;
        }

        let task = ask_for_task(&entry.activity, aliases, recent, prompt, lang)?;
        resolved.insert(entry.activity.clone(), task.clone());
        entry.task = Some(task.clone());

        let question = fill(
            tr(lang, Msg::SaveAliasQ),
            &[("keyword", &entry.activity), ("task", &task)],
        );
        if prompt.confirm(&question, false)? {
            println!(
                "{}\n",
                fill(
                    tr(lang, Msg::AliasSaved),
                    &[("keyword", &entry.activity), ("task", &task)]
                )
            );
            outcome.new_aliases.push((entry.activity.clone(), task));
        }
    }

    Ok(outcome)
}

fn ask_for_task(
    activity: &str,
    aliases: &[Alias],
    recent: &[String],
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<String, PromptError> {
    let mut items: Vec<String> = Vec::with_capacity(recent.len() + aliases.len() + 1);
    for task in recent {
        items.push(format!("{task} ({})", tr(lang, Msg::RecentLabel)));
    }
    for alias in aliases {
        items.push(format!("{} ({})", alias.task, alias.keyword));
    }
    items.push(tr(lang, Msg::ManualEntry).to_string());

    let title = fill(tr(lang, Msg::NoTaskFor), &[("activity", activity)]);
    let choice = prompt.select(&title, &items)?;

    if choice < recent.len() {
        return Ok(recent[choice].clone());
    }
    if choice < recent.len() + aliases.len() {
        return Ok(aliases[choice - recent.len()].task.clone());
    }

    let format_hint = tr(lang, Msg::TaskFormat);
    prompt.input(tr(lang, Msg::EnterTask), None, &|value| {
        if is_task_key(value) {
            Ok(())
        } else {
            Err(format_hint.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::script::{Answer, ScriptedPrompt};

    fn entry(task: Option<&str>, activity: &str) -> WorklogEntry {
        WorklogEntry {
            task: task.map(String::from),
            activity: activity.into(),
            hours: 1.0,
            date: "2025-06-06".into(),
        }
    }

    fn alias(keyword: &str, task: &str) -> Alias {
        Alias {
            keyword: keyword.into(),
            task: task.into(),
            description: None,
            usage_count: 0,
            last_used_at: None,
            created_at: None,
        }
    }

    #[test]
    fn test_resolved_entries_skipped() {
        let mut entries = vec![entry(Some("PROJ-1"), "done")];
        let mut prompt = ScriptedPrompt::new(vec![]);
        let outcome =
            resolve_missing_tasks(&mut entries, &[], &[], &mut prompt, Lang::Ru).unwrap();
        assert!(prompt.select_calls.is_empty());
        assert!(outcome.new_aliases.is_empty());
    }

    #[test]
    fn test_identical_activities_ask_once() {
        let mut entries = vec![
            entry(None, "созвоны"),
            entry(None, "созвоны"),
            entry(None, "созвоны"),
        ];
        let recent = vec!["PROJ-9".to_string()];
        // One select (recent task), one decline-to-save-alias.
        let mut prompt =
            ScriptedPrompt::new(vec![Answer::Select(0), Answer::Confirm(false)]);

        resolve_missing_tasks(&mut entries, &[], &recent, &mut prompt, Lang::Ru).unwrap();

        assert_eq!(prompt.select_calls.len(), 1, "one prompt for k identical activities");
        for e in &entries {
            assert_eq!(e.task.as_deref(), Some("PROJ-9"));
        }
    }

    #[test]
    fn test_distinct_activities_ask_separately() {
        let mut entries = vec![entry(None, "созвоны"), entry(None, "ревью")];
        let recent = vec!["PROJ-1".to_string(), "PROJ-2".to_string()];
        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Select(0),
            Answer::Confirm(false),
            Answer::Select(1),
            Answer::Confirm(false),
        ]);

        resolve_missing_tasks(&mut entries, &[], &recent, &mut prompt, Lang::Ru).unwrap();

        assert_eq!(prompt.select_calls.len(), 2);
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-1"));
        assert_eq!(entries[1].task.as_deref(), Some("PROJ-2"));
    }

    #[test]
    fn test_alias_choice_resolves_by_offset() {
        let mut entries = vec![entry(None, "встречи")];
        let recent = vec!["PROJ-1".to_string()];
        let aliases = vec![alias("созвоны", "PROJ-42")];
        // Index 1 = first alias (after one recent task).
        let mut prompt =
            ScriptedPrompt::new(vec![Answer::Select(1), Answer::Confirm(false)]);

        resolve_missing_tasks(&mut entries, &aliases, &recent, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-42"));
    }

    #[test]
    fn test_manual_entry_revalidates_until_key_shaped() {
        let mut entries = vec![entry(None, "деплой")];
        // No recent, no aliases: item 0 is manual entry. Two bad inputs,
        // then a valid key.
        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Select(0),
            Answer::Input("not-a-key".into()),
            Answer::Input("proj-3".into()),
            Answer::Input("PROJ-3".into()),
            Answer::Confirm(false),
        ]);

        resolve_missing_tasks(&mut entries, &[], &[], &mut prompt, Lang::Ru).unwrap();
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-3"));
    }

    #[test]
    fn test_accepted_alias_offer_is_returned() {
        let mut entries = vec![entry(None, "созвоны"), entry(None, "созвоны")];
        let recent = vec!["PROJ-5".to_string()];
        let mut prompt =
            ScriptedPrompt::new(vec![Answer::Select(0), Answer::Confirm(true)]);

        let outcome =
            resolve_missing_tasks(&mut entries, &[], &recent, &mut prompt, Lang::Ru).unwrap();

        assert_eq!(
            outcome.new_aliases,
            vec![("созвоны".to_string(), "PROJ-5".to_string())]
        );
        // The offer is made once per resolution, not per entry.
        assert_eq!(prompt.confirm_calls.len(), 1);
    }

    #[test]
    fn test_recent_choices_bounded_to_five() {
        let mut entries = vec![entry(None, "работа")];
        let recent: Vec<String> = (1..=8).map(|i| format!("PROJ-{i}")).collect();
        // Item 5 (0-based) must be manual entry, not PROJ-6.
        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Select(5),
            Answer::Input("PROJ-77".into()),
            Answer::Confirm(false),
        ]);

        resolve_missing_tasks(&mut entries, &[], &recent, &mut prompt, Lang::Ru).unwrap();
        assert_eq!(entries[0].task.as_deref(), Some("PROJ-77"));
    }
}
