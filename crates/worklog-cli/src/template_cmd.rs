//! `wl template`: manage reusable entry batches and run them against a
//! chosen date.

use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use wl_core::{Config, EntrySource, Lang, Template, WorklogEntry, is_task_key};
use wl_jira::{JiraClient, JiraConfig};
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, fill, tr};
use crate::menu::{MenuAction, manage};
use crate::prompt::{PromptSurface, non_empty};
use crate::submit::{record_history, run_batch};

pub async fn run(store: &mut Store, config: &Config, prompt: &mut dyn PromptSurface) -> Result<()> {
    let lang = config.lang;
    let templates = store.templates()?;
    let labels: Vec<String> = templates
        .iter()
        .map(|t| display::template_label(t, lang))
        .collect();

    let action = manage(
        tr(lang, Msg::TemplatesTitle),
        &labels,
        tr(lang, Msg::NoTemplates),
        true,
        prompt,
        lang,
    )?;

    match action {
        MenuAction::Create => create(store, prompt, lang)?,
        MenuAction::Edit(i) => edit(store, &templates[i], prompt, lang)?,
        MenuAction::Delete(i) => delete(store, &templates[i], prompt, lang)?,
        MenuAction::Use(i) => run_template(store, config, &templates[i], prompt).await?,
        MenuAction::Back => {}
    }
    Ok(())
}

fn create(store: &Store, prompt: &mut dyn PromptSurface, lang: Lang) -> Result<()> {
    let name = prompt.input(tr(lang, Msg::TemplateNameQ), None, &non_empty)?;
    let entries = collect_entries(prompt, lang, &[])?;
    store.save_template(&name, &entries)?;
    println!(
        "\n{}\n",
        fill(
            tr(lang, Msg::TemplateCreated),
            &[("name", &name), ("n", &entries.len().to_string())],
        )
    );
    Ok(())
}

fn edit(
    store: &Store,
    template: &Template,
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<()> {
    let name = prompt.input(
        tr(lang, Msg::TemplateNameQ),
        Some(&template.name),
        &non_empty,
    )?;
    let entries = collect_entries(prompt, lang, &template.entries)?;

    // Renaming replaces the record rather than leaving the old name behind.
    if name != template.name {
        store.delete_template(&template.name)?;
    }
    store.save_template(&name, &entries)?;
    println!(
        "\n{}\n",
        fill(tr(lang, Msg::TemplateUpdated), &[("name", &name)])
    );
    Ok(())
}

fn delete(
    store: &Store,
    template: &Template,
    prompt: &mut dyn PromptSurface,
    lang: Lang,
) -> Result<()> {
    let question = fill(tr(lang, Msg::DeleteTemplateQ), &[("name", &template.name)]);
    if prompt.confirm(&question, false)? {
        store.delete_template(&template.name)?;
        println!(
            "\n{}\n",
            fill(tr(lang, Msg::TemplateDeleted), &[("name", &template.name)])
        );
    }
    Ok(())
}

async fn run_template(
    store: &mut Store,
    config: &Config,
    template: &Template,
    prompt: &mut dyn PromptSurface,
) -> Result<()> {
    let lang = config.lang;
    let date = pick_date(prompt, lang, Local::now().date_naive())?;

    let entries: Vec<WorklogEntry> = template
        .entries
        .iter()
        .cloned()
        .map(|mut entry| {
            entry.date = date.clone();
            entry
        })
        .collect();

    let jira = JiraClient::new(JiraConfig::from(config))?;
    let Some(result) = run_batch(entries, &jira, prompt, lang).await? else {
        return Ok(());
    };

    store.touch_template(&template.name)?;
    record_history(store, &result, EntrySource::Template)?;
    Ok(())
}

/// Template entries carry no date; the run decides it. Today and yesterday
/// cover the common cases, anything else is typed in as ISO.
fn pick_date(
    prompt: &mut dyn PromptSurface,
    lang: Lang,
    today: NaiveDate,
) -> Result<String, crate::prompt::PromptError> {
    let choices = vec![
        tr(lang, Msg::Today).to_string(),
        tr(lang, Msg::Yesterday).to_string(),
        tr(lang, Msg::CustomDate).to_string(),
    ];
    let date = match prompt.select(tr(lang, Msg::RunDateQ), &choices)? {
        0 => today,
        1 => today - Days::new(1),
        _ => {
            let hint = tr(lang, Msg::DateInvalid);
            let date_validator = move |s: &str| match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(_) => Ok(()),
                Err(_) => Err(hint.to_string()),
            };
            let text = prompt.input(tr(lang, Msg::EnterDateQ), None, &date_validator)?;
            return Ok(text.trim().to_string());
        }
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

fn collect_entries(
    prompt: &mut dyn PromptSurface,
    lang: Lang,
    defaults: &[WorklogEntry],
) -> Result<Vec<WorklogEntry>, crate::prompt::PromptError> {
    let key_hint = tr(lang, Msg::TaskFormat);
    let key_validator = move |s: &str| {
        if is_task_key(s.trim().to_uppercase().as_str()) {
            Ok(())
        } else {
            Err(key_hint.to_string())
        }
    };
    let hours_hint = tr(lang, Msg::HoursInvalid);
    let hours_validator = move |s: &str| match s.trim().parse::<f64>() {
        Ok(h) if h > 0.0 && h <= 24.0 => Ok(()),
        _ => Err(hours_hint.to_string()),
    };

    let mut entries = Vec::new();
    let mut index = 0;
    loop {
        let current = defaults.get(index);
        println!(
            "\n{}",
            fill(tr(lang, Msg::EntryN), &[("n", &(index + 1).to_string())])
        );

        let task = prompt
            .input(
                tr(lang, Msg::TaskKeyQ),
                current.and_then(|e| e.task.as_deref()),
                &key_validator,
            )?
            .trim()
            .to_uppercase();
        let activity = prompt.input(
            tr(lang, Msg::ActivityQ),
            current.map(|e| e.activity.as_str()),
            &non_empty,
        )?;
        let hours_default = current.map(|e| e.hours.to_string());
        let hours_text = prompt.input(
            tr(lang, Msg::HoursQ),
            hours_default.as_deref(),
            &hours_validator,
        )?;
        // The validator guarantees this parses.
        let hours: f64 = hours_text.trim().parse().unwrap_or(0.0);

        entries.push(WorklogEntry {
            task: Some(task),
            activity,
            hours,
            date: String::new(),
        });
        index += 1;

        if !prompt.confirm(tr(lang, Msg::AddMoreQ), index < defaults.len())? {
            return Ok(entries);
        }
    }
}
