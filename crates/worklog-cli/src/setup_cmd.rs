//! `wl setup`: interactive configuration with a live connection check
//! before anything is saved.

use anyhow::Result;
use tracing::debug;
use wl_core::{AiProvider, Config, Lang};
use wl_jira::{JiraClient, JiraConfig};
use wl_store::Store;

use crate::display;
use crate::i18n::{Msg, tr};
use crate::prompt::{PromptSurface, non_empty};

pub async fn run(store: &Store, prompt: &mut dyn PromptSurface, lang: Lang) -> Result<()> {
    println!("\n🔧 {}\n", tr(lang, Msg::SetupTitle));

    let existing = store.get_config()?;

    let config = collect_config(prompt, lang, existing.as_ref())?;
    // The language choice applies from this point on, even on failure paths.
    let lang = config.lang;

    println!("\n{}", tr(lang, Msg::TestingConnection));
    let client = JiraClient::new(JiraConfig::from(&config))?;
    match client.test_connection().await {
        Ok(user) => {
            debug!(user = %user, "jira connection verified");
            println!("{}\n", tr(lang, Msg::ConnectionOk));
        }
        Err(err) => {
            display::error(tr(lang, Msg::ConnectionFailed));
            eprintln!("{err}");
            eprintln!("\n{}", tr(lang, Msg::CheckThese));
            eprintln!("{}", tr(lang, Msg::CheckVpnLine));
            eprintln!("{}", tr(lang, Msg::CheckUrlLine));
            eprintln!("{}\n", tr(lang, Msg::CheckCredentialsLine));
            // Guidance already printed in full, bypass the generic boundary.
            std::process::exit(1);
        }
    }

    store.save_config(&config)?;

    println!("{}\n", tr(lang, Msg::SetupDone));
    println!("{}", tr(lang, Msg::UsageHeader));
    println!("{}", tr(lang, Msg::UsageInteractive));
    println!("{}", tr(lang, Msg::UsageQuick));
    println!("{}", tr(lang, Msg::UsageTemplates));
    println!("{}\n", tr(lang, Msg::UsageAliases));
    Ok(())
}

fn collect_config(
    prompt: &mut dyn PromptSurface,
    lang: Lang,
    existing: Option<&Config>,
) -> Result<Config> {
    let url_hint = tr(lang, Msg::UrlInvalid);
    let url_validator = move |s: &str| validate_url(s, url_hint);
    let jira_url = prompt.input(
        tr(lang, Msg::JiraUrlQ),
        Some(
            existing
                .map(|c| c.jira_url.as_str())
                .unwrap_or("https://jira.example.com"),
        ),
        &url_validator,
    )?;

    let jira_username = prompt.input(
        tr(lang, Msg::UsernameQ),
        existing.map(|c| c.jira_username.as_str()),
        &non_empty,
    )?;
    let jira_password = prompt.password(tr(lang, Msg::PasswordQ))?;

    let key_hint = tr(lang, Msg::ProjectKeyInvalid);
    let key_validator = move |s: &str| {
        let upper = s.trim().to_uppercase();
        if !upper.is_empty() && upper.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(())
        } else {
            Err(key_hint.to_string())
        }
    };
    let project_key = prompt
        .input(
            tr(lang, Msg::ProjectKeyQ),
            existing.map(|c| c.project_key.as_str()),
            &key_validator,
        )?
        .trim()
        .to_uppercase();

    let providers = vec![
        "Anthropic (Claude)".to_string(),
        "OpenAI (GPT)".to_string(),
    ];
    let ai_provider = match prompt.select(tr(lang, Msg::AiProviderQ), &providers)? {
        0 => AiProvider::Anthropic,
        _ => AiProvider::OpenAi,
    };
    let ai_api_key = prompt.password(tr(lang, Msg::ApiKeyQ))?;

    let languages = vec!["Русский".to_string(), "English".to_string()];
    let lang = match prompt.select(tr(lang, Msg::LanguageQ), &languages)? {
        0 => Lang::Ru,
        _ => Lang::En,
    };

    Ok(Config {
        jira_url,
        jira_username,
        jira_password,
        project_key,
        ai_provider,
        ai_api_key,
        ai_model: existing.and_then(|c| c.ai_model.clone()),
        lang,
    })
}

fn validate_url(input: &str, hint: &str) -> Result<(), String> {
    let rest = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(hint.to_string()),
    }
}
