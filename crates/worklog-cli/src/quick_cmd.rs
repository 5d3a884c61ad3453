//! `wl quick`: free text in, logged worklogs out. The whole pipeline lives
//! here: parse, reconcile, validate, confirm, submit, record history.

use anyhow::Result;
use tracing::debug;
use wl_ai::{ParseError, create_parser};
use wl_core::{AppError, Config, EntrySource, ParseContext};
use wl_jira::{JiraClient, JiraConfig, Tracker};
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, fill, tr};
use crate::prompt::PromptSurface;
use crate::reconcile::resolve_missing_tasks;
use crate::submit::{record_history, run_batch};

/// Recent-task counts differ on purpose: the prompt context can afford more
/// than an interactive picker.
const PROMPT_RECENT: usize = 10;
const PICKER_RECENT: usize = 5;

pub async fn run(
    store: &mut Store,
    config: &Config,
    input: &str,
    prompt: &mut dyn PromptSurface,
) -> Result<()> {
    let lang = config.lang;

    if input.split_whitespace().count() < 3 {
        display::warning(tr(lang, Msg::ShortInputWarning));
        eprintln!("{}", tr(lang, Msg::QuoteRight));
        eprintln!("{}\n", tr(lang, Msg::QuoteWrong));
    }

    let parser = create_parser(config);
    let jira = JiraClient::new(JiraConfig::from(config))?;

    let aliases = store.aliases()?;
    let context = ParseContext {
        project_key: config.project_key.clone(),
        aliases: aliases.clone(),
        recent_tasks: jira.recent_tasks(PROMPT_RECENT).await,
    };

    println!("\n{}\n", tr(lang, Msg::Parsing));
    let mut entries = match parser.parse(input, &context).await {
        Ok(entries) => entries,
        Err(err @ ParseError::Transport { .. }) => return Err(err.into()),
        Err(ParseError::EmptyExtraction) => {
            display::error(tr(lang, Msg::NothingExtracted));
            eprintln!("{}", tr(lang, Msg::EnsureSpecified));
            eprintln!("{}", tr(lang, Msg::HintTask));
            eprintln!("{}", tr(lang, Msg::HintTime));
            eprintln!("{}\n", tr(lang, Msg::HintDate));
            std::process::exit(1);
        }
        Err(err) => {
            display::error(tr(lang, Msg::ParseFailed));
            eprintln!("{err}");
            eprintln!("\n{}", tr(lang, Msg::TryPhrasing));
            eprintln!(
                "{}",
                fill(tr(lang, Msg::ExamplePhrase), &[("key", &config.project_key)])
            );
            if !aliases.is_empty() {
                eprintln!("\n{}", tr(lang, Msg::OrUseAliases));
                for alias in aliases.iter().take(3) {
                    eprintln!(
                        "{}",
                        fill(
                            tr(lang, Msg::ExampleAliasPhrase),
                            &[("keyword", &alias.keyword)],
                        )
                    );
                }
            }
            eprintln!();
            std::process::exit(1);
        }
    };
    debug!(entries = entries.len(), "parsed input");

    // Count alias usage for phrases the model was able to resolve itself.
    let lowered = input.to_lowercase();
    for alias in &aliases {
        if lowered.contains(&alias.keyword.to_lowercase()) {
            store.touch_alias(&alias.keyword)?;
        }
    }

    let recent = store.recent_tasks(PICKER_RECENT)?;
    let outcome = resolve_missing_tasks(&mut entries, &aliases, &recent, prompt, lang)?;
    for (keyword, task) in &outcome.new_aliases {
        store.save_alias(keyword, task, None)?;
    }

    let Some(result) = run_batch(entries, &jira, prompt, lang).await? else {
        return Ok(());
    };

    record_history(store, &result, EntrySource::Ai)?;
    Ok(())
}

/// Loads the config or fails with the standard "run setup" diagnosis.
pub fn require_config(store: &Store) -> Result<Config> {
    store.get_config()?.ok_or_else(|| AppError::ConfigMissing.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_core::{BatchResult, WorklogEntry};

    #[test]
    fn test_require_config_missing_maps_to_app_error() {
        let store = Store::open_in_memory().unwrap();
        let err = require_config(&store).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::ConfigMissing)
        ));
    }

    #[test]
    fn test_record_history_persists_successes_as_ai() {
        let mut store = Store::open_in_memory().unwrap();
        let result = BatchResult {
            success: vec![WorklogEntry {
                task: Some("PROJ-7".into()),
                activity: "code review".into(),
                hours: 1.5,
                date: "2025-06-06".into(),
            }],
            failed: Vec::new(),
        };
        record_history(&mut store, &result, EntrySource::Ai).unwrap();
        assert_eq!(store.recent_tasks(10).unwrap(), vec!["PROJ-7".to_string()]);
    }
}
