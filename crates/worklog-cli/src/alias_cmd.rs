//! `wl alias`: manage phrase-to-task shortcuts.

use anyhow::Result;
use wl_core::{Alias, Lang, is_task_key};
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, fill, tr};
use crate::menu::{MenuAction, manage};
use crate::prompt::{PromptError, PromptSurface, non_empty};

pub fn run(store: &Store, prompt: &mut dyn PromptSurface, lang: Lang) -> Result<()> {
    let aliases = store.aliases()?;
    let labels: Vec<String> = aliases.iter().map(display::alias_label).collect();

    let action = manage(
        tr(lang, Msg::AliasesTitle),
        &labels,
        tr(lang, Msg::NoAliases),
        false,
        prompt,
        lang,
    )?;

    match action {
        MenuAction::Create => {
            let fields = collect_fields(prompt, lang, None)?;
            store.save_alias(&fields.keyword, &fields.task, fields.description.as_deref())?;
            println!(
                "\n{}\n",
                fill(
                    tr(lang, Msg::AliasSaved),
                    &[("keyword", &fields.keyword), ("task", &fields.task)],
                )
            );
        }
        MenuAction::Edit(i) => {
            let old = &aliases[i];
            let fields = collect_fields(prompt, lang, Some(old))?;
            if fields.keyword != old.keyword {
                store.delete_alias(&old.keyword)?;
            }
            store.save_alias(&fields.keyword, &fields.task, fields.description.as_deref())?;
            println!(
                "\n{}\n",
                fill(
                    tr(lang, Msg::AliasUpdated),
                    &[("keyword", &fields.keyword), ("task", &fields.task)],
                )
            );
        }
        MenuAction::Delete(i) => {
            let old = &aliases[i];
            let question = fill(tr(lang, Msg::DeleteAliasQ), &[("keyword", &old.keyword)]);
            if prompt.confirm(&question, false)? {
                store.delete_alias(&old.keyword)?;
                println!(
                    "\n{}\n",
                    fill(tr(lang, Msg::AliasDeleted), &[("keyword", &old.keyword)])
                );
            }
        }
        MenuAction::Use(_) | MenuAction::Back => {}
    }
    Ok(())
}

struct AliasFields {
    keyword: String,
    task: String,
    description: Option<String>,
}

fn collect_fields(
    prompt: &mut dyn PromptSurface,
    lang: Lang,
    defaults: Option<&Alias>,
) -> Result<AliasFields, PromptError> {
    let keyword = prompt.input(
        tr(lang, Msg::KeywordQ),
        defaults.map(|a| a.keyword.as_str()),
        &non_empty,
    )?;

    let key_hint = tr(lang, Msg::TaskFormat);
    let key_validator = move |s: &str| {
        if is_task_key(s.trim().to_uppercase().as_str()) {
            Ok(())
        } else {
            Err(key_hint.to_string())
        }
    };
    let task = prompt
        .input(
            tr(lang, Msg::TaskKeyQ),
            defaults.map(|a| a.task.as_str()),
            &key_validator,
        )?
        .trim()
        .to_uppercase();

    let description = prompt.input(
        tr(lang, Msg::DescriptionQ),
        defaults.and_then(|a| a.description.as_deref()),
        &crate::prompt::no_validation,
    )?;
    let description = match description.trim() {
        "" => None,
        text => Some(text.to_string()),
    };

    Ok(AliasFields {
        keyword,
        task,
        description,
    })
}
